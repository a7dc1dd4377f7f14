//! Command parsing and handling.
//!
//! This module provides command parsing functionality for the bot,
//! converting Matrix message text into structured [`Command`] enums. Parsing
//! is driven by a table of command specifications, so each command declares
//! its name, its required arguments and its usage line in one place, and the
//! parser and missing-argument messages stay consistent with each other.

use command_parser::Parser;
use log::debug;

use crate::commands::text_response::{format_missing_argument, format_unknown_command};

/// Represents a parsed bot command.
///
/// Commands are parsed from Matrix message text and represent the various
/// card lookups users can perform with the bot.
#[derive(Debug, Hash, PartialEq, Eq)]
pub enum Command {
    /// Display the list of supported commands
    Usage,
    /// Show an image of a card
    ///
    /// # Fields
    ///
    /// * `String` - Card name
    Card(String),
    /// Show a card's legality in every format
    ///
    /// # Fields
    ///
    /// * `String` - Card name
    Legalities(String),
    /// Show a card's legality in one format
    ///
    /// # Fields
    ///
    /// * `String` - Format name
    /// * `String` - Card name
    Legal(String, String),
    /// Show a card's prices and purchase links
    ///
    /// # Fields
    ///
    /// * `String` - Card name
    Price(String),
}

/// Errors that can occur during command parsing.
#[derive(Debug)]
pub enum CommandParsingError {
    /// The message could not be parsed as a command
    UnableToParse,
    /// The command name is not registered; carries the attempted name
    Unknown(String),
    /// A required argument is missing
    MissingArgument {
        /// Name of the first missing argument
        argument: &'static str,
        /// Usage line of the command, e.g. `!card (card name)`
        usage: &'static str,
    },
}

/// How an argument consumes message tokens.
#[derive(Debug, Clone, Copy)]
enum ArgKind {
    /// A single whitespace-delimited token
    Single,
    /// The rest of the message, joined back with spaces
    Greedy,
}

/// Specification of one required command argument.
struct ArgSpec {
    /// Name used in missing-argument messages
    name: &'static str,
    /// How the argument consumes tokens
    kind: ArgKind,
}

/// Specification of a command: name, argument list, usage line and the
/// constructor turning collected argument values into a [`Command`].
struct CommandSpec {
    /// Command name, matched case-insensitively
    name: &'static str,
    /// Required arguments, in order; at most one greedy argument, last
    args: &'static [ArgSpec],
    /// Usage line shown in missing-argument messages
    usage: &'static str,
    /// Builds the command variant from the collected argument values
    build: fn(Vec<String>) -> Command,
}

/// Table of every command the bot understands.
const COMMAND_SPECS: &[CommandSpec] = &[
    CommandSpec {
        name: "usage",
        args: &[],
        usage: "!usage",
        build: |_| Command::Usage,
    },
    CommandSpec {
        name: "card",
        args: &[ArgSpec {
            name: "card_name",
            kind: ArgKind::Greedy,
        }],
        usage: "!card (card name)",
        build: |mut values| Command::Card(values.remove(0)),
    },
    CommandSpec {
        name: "legalities",
        args: &[ArgSpec {
            name: "card_name",
            kind: ArgKind::Greedy,
        }],
        usage: "!legalities (card name)",
        build: |mut values| Command::Legalities(values.remove(0)),
    },
    CommandSpec {
        name: "legal",
        args: &[
            ArgSpec {
                name: "format",
                kind: ArgKind::Single,
            },
            ArgSpec {
                name: "card_name",
                kind: ArgKind::Greedy,
            },
        ],
        usage: "!legal (format) (card name)",
        build: |mut values| {
            let card_name = values.remove(1);
            Command::Legal(values.remove(0), card_name)
        },
    },
    CommandSpec {
        name: "price",
        args: &[ArgSpec {
            name: "card_name",
            kind: ArgKind::Greedy,
        }],
        usage: "!price (card name)",
        build: |mut values| Command::Price(values.remove(0)),
    },
];

impl Command {
    /// Parses a message string into a Command.
    ///
    /// This method attempts to parse a Matrix message body into a structured
    /// command. The first token (after the `!` prefix) is matched
    /// case-insensitively against the command table, then the remaining
    /// tokens are collected according to the command's argument spec.
    ///
    /// # Arguments
    ///
    /// * `parser` - The command parser instance configured for the bot
    /// * `body` - The message text to parse
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The message is not a command format - [`CommandParsingError::UnableToParse`]
    /// - The command name is not registered - [`CommandParsingError::Unknown`]
    /// - A required argument is missing - [`CommandParsingError::MissingArgument`]
    ///
    /// # Examples
    ///
    /// ```
    /// # use command_parser::Parser;
    /// # use tutor::commands::command::Command;
    /// let parser = Parser::new('!', '-');
    /// let result = Command::parse(&parser, "!card Lightning Bolt");
    /// assert!(result.is_ok());
    /// ```
    pub fn parse(parser: &Parser, body: &str) -> Result<Self, CommandParsingError> {
        // For an unknown reason the parser ignores the last word, so we add a dummy word at the end
        let body = body.to_string() + " dummy";

        // This is normal to fails if the message is not a command
        let command = match parser.parse(&body) {
            Ok(cmd) => cmd,
            Err(_) => return Err(CommandParsingError::UnableToParse),
        };

        debug!("Parsing command: {:?}", command);

        let name = command.name.to_lowercase();
        let Some(spec) = COMMAND_SPECS.iter().find(|spec| spec.name == name) else {
            return Err(CommandParsingError::Unknown(command.name.clone()));
        };

        let values = parse_arguments(spec, &command.arguments)?;
        Ok((spec.build)(values))
    }
}

/// Collects the argument values a command spec requires.
///
/// Single-token arguments consume one token; a greedy argument consumes all
/// remaining tokens, joined back with single spaces. The first argument with
/// no tokens left produces [`CommandParsingError::MissingArgument`].
fn parse_arguments(
    spec: &CommandSpec,
    tokens: &[String],
) -> Result<Vec<String>, CommandParsingError> {
    let mut values = Vec::with_capacity(spec.args.len());
    let mut index = 0;

    for arg in spec.args {
        if index >= tokens.len() {
            return Err(CommandParsingError::MissingArgument {
                argument: arg.name,
                usage: spec.usage,
            });
        }

        match arg.kind {
            ArgKind::Single => {
                values.push(tokens[index].clone());
                index += 1;
            }
            ArgKind::Greedy => {
                values.push(tokens[index..].join(" "));
                index = tokens.len();
            }
        }
    }

    Ok(values)
}

/// Formats a command error into a user-friendly message.
///
/// Converts certain [`CommandParsingError`] variants into formatted error
/// messages for display to the user. `UnableToParse` returns `None` to avoid
/// responding to non-command messages.
///
/// # Arguments
///
/// * `error` - The command error to format
///
/// # Returns
///
/// * `Some(String)` - A formatted error message for user-facing errors
/// * `None` - For messages that should not produce a response
pub fn format_command_error(error: CommandParsingError) -> Option<String> {
    match error {
        CommandParsingError::Unknown(name) => Some(format_unknown_command(&name)),
        CommandParsingError::MissingArgument { argument, usage } => {
            Some(format_missing_argument(argument, usage))
        }
        CommandParsingError::UnableToParse => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_parser() -> Parser {
        Parser::new('!', '-')
    }

    #[test]
    fn test_parse_usage_command() {
        let parser = create_parser();
        let result = Command::parse(&parser, "!usage");
        assert!(matches!(result, Ok(Command::Usage)));
    }

    #[test]
    fn test_parse_card_command() {
        let parser = create_parser();
        let result = Command::parse(&parser, "!card Fireball");
        assert!(matches!(
            result,
            Ok(Command::Card(card_name)) if card_name == "Fireball"
        ));
    }

    #[test]
    fn test_parse_card_command_greedy_name() {
        let parser = create_parser();
        let result = Command::parse(&parser, "!card Black Lotus");
        assert!(matches!(
            result,
            Ok(Command::Card(card_name)) if card_name == "Black Lotus"
        ));
    }

    #[test]
    fn test_parse_card_command_missing_name() {
        let parser = create_parser();
        let result = Command::parse(&parser, "!card");
        assert!(matches!(
            result,
            Err(CommandParsingError::MissingArgument {
                argument: "card_name",
                usage: "!card (card name)",
            })
        ));
    }

    #[test]
    fn test_parse_command_is_case_insensitive() {
        let parser = create_parser();
        let result = Command::parse(&parser, "!CARD Fireball");
        assert!(matches!(
            result,
            Ok(Command::Card(card_name)) if card_name == "Fireball"
        ));
    }

    #[test]
    fn test_parse_legalities_command() {
        let parser = create_parser();
        let result = Command::parse(&parser, "!legalities Lightning Bolt");
        assert!(matches!(
            result,
            Ok(Command::Legalities(card_name)) if card_name == "Lightning Bolt"
        ));
    }

    #[test]
    fn test_parse_legalities_command_missing_name() {
        let parser = create_parser();
        let result = Command::parse(&parser, "!legalities");
        assert!(matches!(
            result,
            Err(CommandParsingError::MissingArgument {
                argument: "card_name",
                ..
            })
        ));
    }

    #[test]
    fn test_parse_legal_command() {
        let parser = create_parser();
        let result = Command::parse(&parser, "!legal modern Lightning Bolt");
        assert!(matches!(
            result,
            Ok(Command::Legal(format, card_name))
            if format == "modern" && card_name == "Lightning Bolt"
        ));
    }

    #[test]
    fn test_parse_legal_command_missing_all_args() {
        let parser = create_parser();
        let result = Command::parse(&parser, "!legal");
        assert!(matches!(
            result,
            Err(CommandParsingError::MissingArgument {
                argument: "format",
                usage: "!legal (format) (card name)",
            })
        ));
    }

    #[test]
    fn test_parse_legal_command_missing_card_name() {
        let parser = create_parser();
        let result = Command::parse(&parser, "!legal modern");
        assert!(matches!(
            result,
            Err(CommandParsingError::MissingArgument {
                argument: "card_name",
                usage: "!legal (format) (card name)",
            })
        ));
    }

    #[test]
    fn test_parse_price_command() {
        let parser = create_parser();
        let result = Command::parse(&parser, "!price Black Lotus");
        assert!(matches!(
            result,
            Ok(Command::Price(card_name)) if card_name == "Black Lotus"
        ));
    }

    #[test]
    fn test_parse_price_command_missing_name() {
        let parser = create_parser();
        let result = Command::parse(&parser, "!price");
        assert!(matches!(
            result,
            Err(CommandParsingError::MissingArgument {
                argument: "card_name",
                ..
            })
        ));
    }

    #[test]
    fn test_parse_unknown_command() {
        let parser = create_parser();
        let result = Command::parse(&parser, "!foobar");
        assert!(matches!(
            result,
            Err(CommandParsingError::Unknown(name)) if name == "foobar"
        ));
    }

    #[test]
    fn test_parse_unable_to_parse() {
        let parser = create_parser();
        let result = Command::parse(&parser, "This is not a command");
        assert!(matches!(result, Err(CommandParsingError::UnableToParse)));
    }

    #[test]
    fn test_format_command_error_unknown() {
        let error = CommandParsingError::Unknown("foobar".to_owned());
        let result = format_command_error(error);
        assert!(result.is_some());
        let message = result.unwrap();
        assert!(message.contains("\"foobar\" is not found"));
        assert!(message.contains("!usage"));
    }

    #[test]
    fn test_format_command_error_missing_argument() {
        let error = CommandParsingError::MissingArgument {
            argument: "card_name",
            usage: "!card (card name)",
        };
        let result = format_command_error(error);
        assert!(result.is_some());
        assert!(result.unwrap().contains("!card (card name)"));
    }

    #[test]
    fn test_format_command_error_unable_to_parse() {
        let error = CommandParsingError::UnableToParse;
        let result = format_command_error(error);
        assert!(result.is_none());
    }
}

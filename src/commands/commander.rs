//! Command orchestration and execution.
//!
//! This module provides the [`Commander`] struct, which serves as the main
//! entry point for processing bot commands. It coordinates command parsing
//! and execution, routing commands to their appropriate handlers.
//!
//! # Architecture
//!
//! The Commander follows a two-phase processing model:
//!
//! 1. **Parsing Phase** - Validates and parses raw message text into
//!    structured [`Command`] enums
//! 2. **Execution Phase** - Routes parsed commands to handlers that query
//!    Scryfall and format the reply
//!
//! # Flow
//!
//! ```text
//! Matrix Message → parse() → Command → run_command() → reply text
//! ```

use command_parser::Parser;

use crate::commands::{
    CommandParseError,
    actions::{handle_card, handle_legal, handle_legalities, handle_price, handle_usage},
    command::{Command, format_command_error},
};
use crate::scryfall::Requester;

/// Command orchestrator for parsing and executing bot commands.
///
/// The Commander is responsible for:
/// - Parsing raw message text into structured commands
/// - Converting parse errors into user-friendly messages
/// - Routing commands to appropriate handlers
///
/// It owns the Scryfall requester; the command table itself is immutable and
/// the Commander holds no mutable state, so one instance is shared by every
/// message handler task.
///
/// # Command Prefix
///
/// All commands must start with `!`. Messages without the prefix are
/// silently ignored (returning [`CommandParseError::NotForBot`]).
///
/// # Supported Commands
///
/// - `usage` - List the supported commands
/// - `card (card name)` - Show an image of the specified card
/// - `legalities (card name)` - Show the card's legality in every format
/// - `legal (format) (card name)` - Show the card's legality in one format
/// - `price (card name)` - Show the card's prices and purchase links
pub struct Commander<R: Requester> {
    /// Command parser for processing user commands
    parser: Parser,
    /// Scryfall client used by the card-lookup handlers
    requester: R,
}

impl<R: Requester> Commander<R> {
    /// Creates a new Commander instance with a configured command parser.
    ///
    /// The parser is configured to recognize commands starting with `!` as
    /// the command prefix and `-` as the option prefix.
    ///
    /// # Arguments
    ///
    /// * `requester` - The Scryfall client the handlers fetch card data with
    pub fn new(requester: R) -> Self {
        let parser = Parser::new('!', '-');
        Commander { parser, requester }
    }

    /// Parses a Matrix message body into a structured command.
    ///
    /// This method validates that the message is:
    /// 1. A valid command format (starts with `!`)
    /// 2. A registered command name (matched case-insensitively)
    /// 3. Complete, with every required argument present
    ///
    /// # Arguments
    ///
    /// * `body` - The raw message text from Matrix
    ///
    /// # Returns
    ///
    /// * `Ok(Command)` - Successfully parsed and validated command
    /// * `Err(CommandParseError::NotForBot)` - Message is not a command
    /// * `Err(CommandParseError::InvalidCommand)` - Unknown command or
    ///   missing argument, with the message to send back
    ///
    /// # Error Handling
    ///
    /// - Non-command messages return `NotForBot` to avoid responding to
    ///   regular chat
    /// - An unknown command name returns `InvalidCommand` pointing the user
    ///   at `!usage`
    /// - A missing required argument returns `InvalidCommand` with the
    ///   command's usage line
    pub fn parse(&self, body: &str) -> Result<Command, CommandParseError> {
        let parse_result = Command::parse(&self.parser, body);

        // Raise an error message if the command is invalid
        if parse_result.is_err() {
            let error = parse_result.err().unwrap();
            // Return silently if the message is not a command
            // Otherwise, send an error message
            if let Some(message) = format_command_error(error) {
                return Err(CommandParseError::InvalidCommand(message));
            }
            return Err(CommandParseError::NotForBot);
        }

        Ok(parse_result.unwrap())
    }

    /// Executes a parsed command and returns the reply text.
    ///
    /// Card-lookup commands perform one Scryfall fetch through the owned
    /// requester; `usage` is answered locally.
    ///
    /// # Arguments
    ///
    /// * `command` - The parsed command to execute
    ///
    /// # Command Handlers
    ///
    /// - [`Command::Usage`] → [`handle_usage`]
    /// - [`Command::Card`] → [`handle_card`]
    /// - [`Command::Legalities`] → [`handle_legalities`]
    /// - [`Command::Legal`] → [`handle_legal`]
    /// - [`Command::Price`] → [`handle_price`]
    pub async fn run_command(&self, command: &Command) -> String {
        match command {
            Command::Usage => handle_usage(),
            Command::Card(card_name) => handle_card(&self.requester, card_name).await,
            Command::Legalities(card_name) => handle_legalities(&self.requester, card_name).await,
            Command::Legal(format, card_name) => {
                handle_legal(&self.requester, format, card_name).await
            }
            Command::Price(card_name) => handle_price(&self.requester, card_name).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scryfall::{FetchOutcome, MockRequester};

    fn create_commander() -> Commander<MockRequester> {
        Commander::new(MockRequester::new())
    }

    #[test]
    fn test_parse_valid_usage_command() {
        let commander = create_commander();
        let result = commander.parse("!usage");
        assert!(result.is_ok());
        assert!(matches!(result.unwrap(), Command::Usage));
    }

    #[test]
    fn test_parse_valid_card_command() {
        let commander = create_commander();
        let result = commander.parse("!card Lightning Bolt");
        assert!(result.is_ok());
        match result.unwrap() {
            Command::Card(card_name) => {
                assert_eq!(card_name, "Lightning Bolt");
            }
            _ => panic!("Expected Card command"),
        }
    }

    #[test]
    fn test_parse_valid_legal_command() {
        let commander = create_commander();
        let result = commander.parse("!legal modern Lightning Bolt");
        assert!(result.is_ok());
        match result.unwrap() {
            Command::Legal(format, card_name) => {
                assert_eq!(format, "modern");
                assert_eq!(card_name, "Lightning Bolt");
            }
            _ => panic!("Expected Legal command"),
        }
    }

    #[test]
    fn test_parse_unknown_command_returns_error() {
        let commander = create_commander();
        let result = commander.parse("!foobar");
        assert!(result.is_err());
        match result.err().unwrap() {
            CommandParseError::InvalidCommand(msg) => {
                assert!(msg.contains("\"foobar\" is not found"));
                assert!(msg.contains("!usage"));
            }
            _ => panic!("Expected InvalidCommand error"),
        }
    }

    #[test]
    fn test_parse_not_a_command() {
        let commander = create_commander();
        let result = commander.parse("This is just a regular message");
        assert!(result.is_err());
        assert!(matches!(
            result.err().unwrap(),
            CommandParseError::NotForBot
        ));
    }

    #[test]
    fn test_parse_card_missing_argument() {
        let commander = create_commander();
        let result = commander.parse("!card");
        assert!(result.is_err());
        match result.err().unwrap() {
            CommandParseError::InvalidCommand(msg) => {
                assert!(msg.contains("!card (card name)"));
            }
            _ => panic!("Expected InvalidCommand error"),
        }
    }

    #[test]
    fn test_parse_legal_missing_card_name() {
        let commander = create_commander();
        let result = commander.parse("!legal modern");
        assert!(result.is_err());
        match result.err().unwrap() {
            CommandParseError::InvalidCommand(msg) => {
                assert!(msg.contains("!legal (format) (card name)"));
            }
            _ => panic!("Expected InvalidCommand error"),
        }
    }

    #[tokio::test]
    async fn test_run_command_usage() {
        let commander = create_commander();

        let response = commander.run_command(&Command::Usage).await;

        assert!(response.contains("-----Commands-----"));
        assert!(response.contains("!price (card name)"));
    }

    #[tokio::test]
    async fn test_run_command_card_not_found() {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_fetch_card()
            .times(1)
            .returning(|_| FetchOutcome::NotFound);
        let commander = Commander::new(mock_requester);

        let response = commander
            .run_command(&Command::Card("Lightnig Boltt".to_owned()))
            .await;

        assert_eq!(response, "Card not found, ensure your spelling is correct");
    }

    #[tokio::test]
    async fn test_run_command_price_upstream_error() {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_fetch_card()
            .times(1)
            .returning(|_| FetchOutcome::OtherError(502));
        let commander = Commander::new(mock_requester);

        let response = commander
            .run_command(&Command::Price("Fireball".to_owned()))
            .await;

        assert_eq!(response, "An error occured, status code: 502");
    }
}

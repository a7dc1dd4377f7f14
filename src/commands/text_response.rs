//! Plain-text response formatters for bot commands.
//!
//! This module provides functions to format bot replies for display in
//! Matrix rooms. Each function is pure: given a parsed card payload (or an
//! error detail), it produces the exact reply text, with `\n` line breaks.

use crate::scryfall::Card;

/// Formats the usage message listing the supported commands.
///
/// # Returns
///
/// The fixed multi-line help block with the exact argument syntax of every
/// card command.
pub fn format_usage() -> String {
    let body = "-----Commands-----\n\
        NOTE: All commands require exact spelling but are case insensitive\n\
        ------------------------------------------------------------------------------------------\n\
        !card (card name) - Shows an image of the specified card.\n\
        ------------------------------------------------------------------------------------------\n\
        !legalities (card name) - Shows all formats and whether or not the specified card is legal in each format.\n\
        ------------------------------------------------------------------------------------------\n\
        !legal (format) (card name) - Shows whether or not a card is legal in the specified format.\n\
        ------------------------------------------------------------------------------------------\n\
        !price (card name) - Shows the price of the given card in USD, EUR, and MTGO Tix.\n\
        ------------------------------------------------------------------------------------------\n";

    body.to_owned()
}

/// Formats a response for an unknown command.
///
/// Includes the attempted command name and points the user at `!usage`.
///
/// # Arguments
///
/// * `name` - The command name the user typed, as typed
pub fn format_unknown_command(name: &str) -> String {
    format!(
        "ERROR: Command \"{}\" is not found. Use !usage to view a list of supported commands",
        name
    )
}

/// Formats a response for a missing required argument.
///
/// # Arguments
///
/// * `argument` - Name of the first missing argument
/// * `usage` - Usage line of the command, e.g. `!card (card name)`
pub fn format_missing_argument(argument: &str, usage: &str) -> String {
    format!(
        "ERROR: {} is a required argument that is missing. Ensure that you are formatting your command as - {}",
        argument, usage
    )
}

/// Formats the response for a card name no card matched.
pub fn format_card_not_found() -> String {
    "Card not found, ensure your spelling is correct".to_owned()
}

/// Formats the response for an upstream error.
///
/// # Arguments
///
/// * `status` - The HTTP status code, or 0 when the request produced none
pub fn format_upstream_error(status: u16) -> String {
    format!("An error occured, status code: {}", status)
}

/// Formats a card's legality across every format as a table.
///
/// Header line `-----{name}-----`, then one `{format}: {status}` line per
/// format in the order the API emitted them. The `not_legal` status is
/// rendered as `not legal`; every other status is rendered verbatim.
///
/// # Arguments
///
/// * `card` - The card payload returned by the lookup
pub fn format_legalities_table(card: &Card) -> String {
    let mut answer = format!("-----{}-----\n", card.name);

    for (format, legality) in &card.legalities {
        if legality == "not_legal" {
            answer.push_str(&format!("{}: not legal\n", format));
        } else {
            answer.push_str(&format!("{}: {}\n", format, legality));
        }
    }

    answer
}

/// Formats a card's legality in a single format.
///
/// The format name is lower-cased and stripped of spaces before the lookup,
/// but echoed back to the user as typed. Exactly three outcomes: `legal`,
/// `not_legal`, and everything else. An unrecognized format and a
/// `restricted`/`banned` status produce the same generic message.
///
/// # Arguments
///
/// * `card` - The card payload returned by the lookup
/// * `format` - The format name as the user typed it
pub fn format_single_legality(card: &Card, format: &str) -> String {
    let normalized = format.to_lowercase().replace(' ', "");

    match card.legalities.get(&normalized).map(String::as_str) {
        Some("legal") => format!("{} is legal in {}", card.name, format),
        Some("not_legal") => format!("{} is not legal in {}", card.name, format),
        _ => "An error has occured, check the spelling of the format you provided".to_owned(),
    }
}

/// Formats a card's prices and purchase links.
///
/// Fixed template with USD, EUR and tix prices followed by three
/// marketplace links. Fields missing from the payload are rendered as the
/// literal `None` rather than omitted.
///
/// # Arguments
///
/// * `card` - The card payload returned by the lookup
pub fn format_price_summary(card: &Card) -> String {
    let prices = &card.prices;
    let links = &card.purchase_uris;

    format!(
        "-----{} Prices-----\nUSD: ${}\nEUR: €{}\nTIX: {}\n\n-----Buy Online-----\nTCG Player: {}\nCard Market: {}\nCard Hoarder: {}",
        card.name,
        prices.usd.as_deref().unwrap_or("None"),
        prices.eur.as_deref().unwrap_or("None"),
        prices.tix.as_deref().unwrap_or("None"),
        links.tcgplayer.as_deref().unwrap_or("None"),
        links.cardmarket.as_deref().unwrap_or("None"),
        links.cardhoarder.as_deref().unwrap_or("None"),
    )
}

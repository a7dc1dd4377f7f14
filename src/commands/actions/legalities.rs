//! Legalities command handler.
//!
//! Given a card name, replies with a table of every format Scryfall reports
//! and the card's legality status in each.

use log::debug;

use crate::commands::text_response::{
    format_card_not_found, format_legalities_table, format_upstream_error,
};
use crate::scryfall::{FetchOutcome, Requester};

/// Replies with the full legalities table for the given card name.
pub async fn handle_legalities<R: Requester>(requester: &R, card_name: &str) -> String {
    debug!("handling legalities command for '{}'", card_name);

    match requester.fetch_card(card_name).await {
        FetchOutcome::Found(card) => format_legalities_table(&card),
        FetchOutcome::NotFound => format_card_not_found(),
        FetchOutcome::OtherError(status) => format_upstream_error(status),
    }
}

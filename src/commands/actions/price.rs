//! Price command handler.
//!
//! Given a card name, replies with the card's prices in USD, EUR and MTGO
//! tix together with purchase links. Currencies or links Scryfall has no
//! data for are rendered as `None`.

use log::debug;

use crate::commands::text_response::{
    format_card_not_found, format_price_summary, format_upstream_error,
};
use crate::scryfall::{FetchOutcome, Requester};

/// Replies with the price summary for the given card name.
pub async fn handle_price<R: Requester>(requester: &R, card_name: &str) -> String {
    debug!("handling price command for '{}'", card_name);

    match requester.fetch_card(card_name).await {
        FetchOutcome::Found(card) => format_price_summary(&card),
        FetchOutcome::NotFound => format_card_not_found(),
        FetchOutcome::OtherError(status) => format_upstream_error(status),
    }
}

//! Legal command handler.
//!
//! Given a format and a card name, replies with whether the card is legal
//! in that format. Any status other than `legal` or `not_legal`, including
//! an unrecognized format name, produces the generic check-the-format
//! message.

use log::debug;

use crate::commands::text_response::{
    format_card_not_found, format_single_legality, format_upstream_error,
};
use crate::scryfall::{FetchOutcome, Requester};

/// Replies with the card's legality in the given format.
pub async fn handle_legal<R: Requester>(requester: &R, format: &str, card_name: &str) -> String {
    debug!(
        "handling legal command for '{}' in format '{}'",
        card_name, format
    );

    match requester.fetch_card(card_name).await {
        FetchOutcome::Found(card) => format_single_legality(&card, format),
        FetchOutcome::NotFound => format_card_not_found(),
        FetchOutcome::OtherError(status) => format_upstream_error(status),
    }
}

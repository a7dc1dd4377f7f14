//! Command action handlers.
//!
//! Individual handler functions for each bot command. Card-lookup handlers
//! receive the Scryfall [`Requester`](crate::scryfall::Requester), perform
//! one fetch, and turn the outcome into the reply text.
//!
//! # Handler Pattern
//!
//! Handlers follow a consistent pattern:
//! 1. Fetch the card through the requester (except `usage`, which is fixed)
//! 2. Branch on the [`FetchOutcome`](crate::scryfall::FetchOutcome):
//!    found cards go through the response formatter, a miss becomes the
//!    card-not-found message, and any other upstream failure becomes the
//!    general error message with the status code
//! 3. Return the reply text
//!
//! # Available Handlers
//!
//! - [`handle_usage`] - List the supported commands
//! - [`handle_card`] - Reply with a card image link
//! - [`handle_legalities`] - Reply with the card's legality table
//! - [`handle_legal`] - Reply with the card's legality in one format
//! - [`handle_price`] - Reply with the card's prices and purchase links

mod card;
mod legal;
mod legalities;
mod price;
mod usage;

pub use crate::commands::actions::{
    card::handle_card, legal::handle_legal, legalities::handle_legalities, price::handle_price,
    usage::handle_usage,
};

//! Scryfall card database integration.
//!
//! This module provides the HTTP client used to look up Magic: The Gathering
//! cards on Scryfall, along with the structures the API responses are parsed
//! into.
//!
//! # Modules
//!
//! - `requester` - HTTP client performing fuzzy card lookups against the
//!   Scryfall API
//! - `response_structs` - Data structures for the card payload returned by
//!   the API
//!
//! # Examples
//!
//! ```no_run
//! use tutor::scryfall::{FetchOutcome, Requester, ScryfallRequester};
//!
//! # async fn example() -> Result<(), reqwest::Error> {
//! let requester = ScryfallRequester::new("https://api.scryfall.com", 10, 4)?;
//! match requester.fetch_card("Lightning Bolt").await {
//!     FetchOutcome::Found(card) => println!("found {}", card.name),
//!     FetchOutcome::NotFound => println!("no such card"),
//!     FetchOutcome::OtherError(status) => println!("upstream error {status}"),
//! }
//! # Ok(())
//! # }
//! ```

mod requester;
mod response_structs;

pub use crate::scryfall::requester::{Requester, ScryfallRequester};
pub use crate::scryfall::response_structs::Card;
#[cfg(test)]
pub use crate::scryfall::{
    requester::MockRequester,
    response_structs::{Prices, PurchaseUris},
};

/// Status value used when no HTTP status is available.
///
/// Covers transport-level failures (DNS, refused connection, timeout) and
/// responses whose body could not be decoded.
pub const TRANSPORT_ERROR_STATUS: u16 = 0;

/// Outcome of a single card lookup against the Scryfall API.
///
/// Constructed by the requester for each request and consumed immediately by
/// the command handlers; nothing is cached or persisted.
///
/// # Variants
///
/// * `Found` - The API returned HTTP 200 with a parseable card payload
/// * `NotFound` - The API returned HTTP 404 (no card matched the name)
/// * `OtherError` - Any other HTTP status, or [`TRANSPORT_ERROR_STATUS`]
///   when the request never produced a status
#[derive(Debug)]
pub enum FetchOutcome {
    /// Card found and parsed.
    Found(Card),
    /// No card matched the requested name.
    NotFound,
    /// Upstream failure, tagged with the HTTP status code.
    OtherError(u16),
}

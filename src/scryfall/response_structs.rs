//! Response structures for the Scryfall card API.
//!
//! This module contains structures for deserializing the JSON payload
//! returned by `/cards/named`.

use indexmap::IndexMap;
use serde::Deserialize;
use std::fmt;

/// Representation of a card from `/cards/named?fuzzy={name}`.
///
/// Only the fields the bot renders are kept; the rest of the (large)
/// Scryfall payload is ignored during deserialization.
#[derive(Deserialize, Debug)]
pub struct Card {
    /// Canonical card name resolved by the fuzzy lookup.
    pub name: String,

    /// Legality status per format, e.g. `standard` -> `legal`.
    ///
    /// Kept in the order the API emits the keys, which is the order the
    /// legalities table is rendered in. Statuses are stored verbatim
    /// (`legal`, `not_legal`, `restricted`, `banned`, ...).
    #[serde(default)]
    pub legalities: IndexMap<String, String>,

    /// Current prices; each currency may be absent.
    #[serde(default)]
    pub prices: Prices,

    /// Links to online marketplaces; each link may be absent.
    #[serde(default)]
    pub purchase_uris: PurchaseUris,
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "name={}, legalities={:?}, prices={:?}",
            self.name, self.legalities, self.prices
        )
    }
}

/// Card prices from the `prices` object of the card payload.
///
/// Scryfall reports prices as strings and omits currencies it has no data
/// for.
#[derive(Deserialize, Debug, Default)]
pub struct Prices {
    /// Price in US dollars.
    pub usd: Option<String>,
    /// Price in euros.
    pub eur: Option<String>,
    /// Price in Magic Online tix.
    pub tix: Option<String>,
}

/// Marketplace links from the `purchase_uris` object of the card payload.
#[derive(Deserialize, Debug, Default)]
pub struct PurchaseUris {
    /// TCGplayer listing.
    pub tcgplayer: Option<String>,
    /// Cardmarket listing.
    pub cardmarket: Option<String>,
    /// Cardhoarder listing.
    pub cardhoarder: Option<String>,
}

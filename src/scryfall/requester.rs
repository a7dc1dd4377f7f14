//! HTTP client for the Scryfall card API.
//!
//! This module provides the [`ScryfallRequester`] struct for making HTTP
//! requests to Scryfall and mapping the responses into [`FetchOutcome`]
//! values.

use std::time::Duration;

use log::{debug, error, info};
use mockall::automock;
use reqwest::{Client, StatusCode};
use tokio::sync::Semaphore;

use crate::scryfall::{FetchOutcome, TRANSPORT_ERROR_STATUS, response_structs::Card};

/// HTTP client for requesting card data from the Scryfall API.
///
/// Every command performs the same fuzzy lookup; only the formatting of the
/// result differs, so a single fetch method serves all of them. Requests
/// share one [`reqwest::Client`] with a bounded timeout, and a semaphore
/// caps how many lookups are in flight at once.
///
/// # Examples
///
/// ```no_run
/// # use tutor::scryfall::{Requester, ScryfallRequester};
/// # async fn example() -> Result<(), reqwest::Error> {
/// let requester = ScryfallRequester::new("https://api.scryfall.com", 10, 4)?;
/// let outcome = requester.fetch_card("Lightning Bolt").await;
/// # Ok(())
/// # }
/// ```
pub struct ScryfallRequester {
    /// Scryfall API base url
    url: String,
    /// HTTP client
    client: Client,
    /// Cap on concurrent upstream requests
    limiter: Semaphore,
}

/// Trait for looking up cards on the Scryfall API.
///
/// This trait abstracts the HTTP operations for easier testing with mocks.
#[automock]
pub trait Requester {
    /// Performs a fuzzy card lookup and maps the response to a [`FetchOutcome`].
    async fn fetch_card(&self, card_name: &str) -> FetchOutcome;
    /// Builds the image link for a card name.
    fn card_image_url(&self, card_name: &str) -> String;
}

impl ScryfallRequester {
    /// Create a new [ScryfallRequester].
    ///
    /// # Arguments
    ///
    /// * `url` - The base URL of the Scryfall API.
    /// * `request_timeout` - Per-request timeout in seconds.
    /// * `max_concurrent_requests` - Cap on in-flight requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(
        url: &str,
        request_timeout: u64,
        max_concurrent_requests: usize,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(request_timeout))
            .build()?;

        Ok(ScryfallRequester {
            url: url.to_string(),
            client,
            limiter: Semaphore::new(max_concurrent_requests),
        })
    }

    /// Builds the fuzzy lookup URL for a card name.
    ///
    /// The URL is assembled by string concatenation so that the normalized
    /// name is inserted exactly as produced by [`format_query_name`].
    fn card_url(&self, card_name: &str) -> String {
        format!(
            "{}/cards/named?fuzzy={}",
            &self.url,
            format_query_name(card_name)
        )
    }
}

/// Normalizes a card name for use in a lookup URL.
///
/// Every space becomes a `+`; every other character is left untouched.
pub(crate) fn format_query_name(card_name: &str) -> String {
    card_name.replace(' ', "+")
}

impl Requester for ScryfallRequester {
    /// Request `/cards/named?fuzzy={name}` and map the response.
    ///
    /// Mapping:
    /// - HTTP 200 with a parseable body -> [`FetchOutcome::Found`]
    /// - HTTP 404 -> [`FetchOutcome::NotFound`]
    /// - any other status -> [`FetchOutcome::OtherError`] with that status
    /// - transport failure or undecodable body ->
    ///   [`FetchOutcome::OtherError`] with [`TRANSPORT_ERROR_STATUS`]
    ///
    /// One outbound call per invocation, no retries.
    async fn fetch_card(&self, card_name: &str) -> FetchOutcome {
        let url = self.card_url(card_name);
        info!("request card '{}'", card_name);
        debug!("request {}", &url);

        let _permit = match self.limiter.acquire().await {
            Ok(permit) => permit,
            Err(e) => {
                error!("request limiter closed: {}", e);
                return FetchOutcome::OtherError(TRANSPORT_ERROR_STATUS);
            }
        };

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("request to {} failed: {}", &url, e);
                return FetchOutcome::OtherError(TRANSPORT_ERROR_STATUS);
            }
        };

        match response.status() {
            StatusCode::OK => match response.json::<Card>().await {
                Ok(card) => {
                    debug!("response from {} -> {}", &url, &card);
                    FetchOutcome::Found(card)
                }
                Err(e) => {
                    error!("failed to decode card data from {}: {}", &url, e);
                    FetchOutcome::OtherError(TRANSPORT_ERROR_STATUS)
                }
            },
            StatusCode::NOT_FOUND => FetchOutcome::NotFound,
            status => {
                error!("failed to fetch card data: status code {}", status.as_u16());
                FetchOutcome::OtherError(status.as_u16())
            }
        }
    }

    /// Builds the image link for a card name.
    ///
    /// This is the lookup URL with `&format=image` appended. Posting it lets
    /// the chat client render the card image; the image itself is never
    /// fetched by the bot.
    fn card_image_url(&self, card_name: &str) -> String {
        format!("{}&format=image", self.card_url(card_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD_BODY: &str = r#"{
        "name": "Fireball",
        "legalities": {"modern": "legal", "standard": "not_legal"},
        "prices": {"usd": "0.35", "eur": "0.20", "tix": "0.03"},
        "purchase_uris": {
            "tcgplayer": "https://www.tcgplayer.com/product/1",
            "cardmarket": "https://www.cardmarket.com/en/Magic/1",
            "cardhoarder": "https://www.cardhoarder.com/cards/1"
        }
    }"#;

    #[test]
    fn test_format_query_name_replaces_spaces() {
        assert_eq!(format_query_name("Lightning Bolt"), "Lightning+Bolt");
        assert_eq!(
            format_query_name("Kess, Dissident Mage"),
            "Kess,+Dissident+Mage"
        );
    }

    #[test]
    fn test_format_query_name_leaves_other_characters() {
        assert_eq!(format_query_name("Fireball"), "Fireball");
        assert_eq!(format_query_name("Lim-Dûl's Vault"), "Lim-Dûl's+Vault");
    }

    #[test]
    fn test_card_image_url() {
        let requester = ScryfallRequester::new("https://api.scryfall.com", 10, 4).unwrap();
        assert_eq!(
            requester.card_image_url("Lightning Bolt"),
            "https://api.scryfall.com/cards/named?fuzzy=Lightning+Bolt&format=image"
        );
    }

    #[tokio::test]
    async fn test_fetch_card_found() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        server
            .mock("GET", "/cards/named")
            .match_query(mockito::Matcher::UrlEncoded(
                "fuzzy".to_owned(),
                "Fireball".to_owned(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(CARD_BODY)
            .create_async()
            .await;

        let requester = ScryfallRequester::new(&url, 10, 4).unwrap();
        let outcome = requester.fetch_card("Fireball").await;

        match outcome {
            FetchOutcome::Found(card) => {
                assert_eq!(card.name, "Fireball");
                assert_eq!(card.legalities["modern"], "legal");
                assert_eq!(card.prices.usd.as_deref(), Some("0.35"));
            }
            other => panic!("expected Found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_card_not_found() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        server
            .mock("GET", "/cards/named")
            .match_query(mockito::Matcher::Any)
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"object": "error", "status": 404}"#)
            .create_async()
            .await;

        let requester = ScryfallRequester::new(&url, 10, 4).unwrap();
        let outcome = requester.fetch_card("Lightnig Boltt").await;

        assert!(matches!(outcome, FetchOutcome::NotFound));
    }

    #[tokio::test]
    async fn test_fetch_card_other_status() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        server
            .mock("GET", "/cards/named")
            .match_query(mockito::Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let requester = ScryfallRequester::new(&url, 10, 4).unwrap();
        let outcome = requester.fetch_card("Fireball").await;

        assert!(matches!(outcome, FetchOutcome::OtherError(503)));
    }

    #[tokio::test]
    async fn test_fetch_card_undecodable_body() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        server
            .mock("GET", "/cards/named")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("not json at all")
            .create_async()
            .await;

        let requester = ScryfallRequester::new(&url, 10, 4).unwrap();
        let outcome = requester.fetch_card("Fireball").await;

        assert!(matches!(
            outcome,
            FetchOutcome::OtherError(TRANSPORT_ERROR_STATUS)
        ));
    }

    #[tokio::test]
    async fn test_fetch_card_unreachable_upstream() {
        // Nothing listens on this port, the connection is refused
        let requester = ScryfallRequester::new("http://127.0.0.1:9", 1, 4).unwrap();
        let outcome = requester.fetch_card("Fireball").await;

        assert!(matches!(
            outcome,
            FetchOutcome::OtherError(TRANSPORT_ERROR_STATUS)
        ));
    }
}

//! Card command handler.
//!
//! Given a card name, replies with a link to an image of the fuzzy-matched
//! card. The link is the lookup URL with an image format parameter; the
//! chat client renders it, the bot never downloads the image itself.

use log::debug;

use crate::commands::text_response::{format_card_not_found, format_upstream_error};
use crate::scryfall::{FetchOutcome, Requester};

/// Replies with an image link for the given card name.
///
/// The lookup validates that the name resolves to a card; on success the
/// reply is the image URL for that same fuzzy query.
pub async fn handle_card<R: Requester>(requester: &R, card_name: &str) -> String {
    debug!("handling card command for '{}'", card_name);

    match requester.fetch_card(card_name).await {
        FetchOutcome::Found(_) => requester.card_image_url(card_name),
        FetchOutcome::NotFound => format_card_not_found(),
        FetchOutcome::OtherError(status) => format_upstream_error(status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scryfall::{Card, MockRequester};

    fn create_test_card(name: &str) -> Card {
        serde_json::from_str(&format!(r#"{{"name": "{}"}}"#, name)).unwrap()
    }

    #[tokio::test]
    async fn test_handle_card_found() {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_fetch_card()
            .with(mockall::predicate::eq("Lightning Bolt"))
            .times(1)
            .returning(|name| FetchOutcome::Found(create_test_card(name)));
        mock_requester
            .expect_card_image_url()
            .with(mockall::predicate::eq("Lightning Bolt"))
            .times(1)
            .returning(|_| {
                "https://api.scryfall.com/cards/named?fuzzy=Lightning+Bolt&format=image".to_owned()
            });

        let response = handle_card(&mock_requester, "Lightning Bolt").await;

        assert_eq!(
            response,
            "https://api.scryfall.com/cards/named?fuzzy=Lightning+Bolt&format=image",
        );
    }

    #[tokio::test]
    async fn test_handle_card_not_found() {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_fetch_card()
            .times(1)
            .returning(|_| FetchOutcome::NotFound);

        let response = handle_card(&mock_requester, "Lightnig Boltt").await;

        assert_eq!(response, "Card not found, ensure your spelling is correct");
    }

    #[tokio::test]
    async fn test_handle_card_upstream_error() {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_fetch_card()
            .times(1)
            .returning(|_| FetchOutcome::OtherError(500));

        let response = handle_card(&mock_requester, "Lightning Bolt").await;

        assert_eq!(response, "An error occured, status code: 500");
    }
}

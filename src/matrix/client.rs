//! Matrix client wrapper for bot messaging and synchronization.
//!
//! This module provides a high-level [`MatrixClient`] interface that wraps
//! the Matrix SDK client and handles login, message sending and
//! synchronization.

use log::{error, info};
use matrix_sdk::{
    Client,
    ruma::{
        EventId, OwnedUserId, RoomId, UserId,
        events::room::message::{
            AddMentions, ForwardThread, ReplyMetadata, RoomMessageEventContent,
        },
    },
};

use crate::matrix::{UserCredentials, sync::MatrixSync};

/// High-level Matrix client for bot messaging operations.
///
/// Manages a Matrix SDK client with synchronization capabilities and
/// provides a convenient method for sending threaded plain-text replies.
pub struct MatrixClient {
    /// Synchronization service for handling real-time events
    matrix_sync: MatrixSync,
    /// Underlying Matrix SDK client
    client: Client,
}

impl MatrixClient {
    /// Creates and initializes a new Matrix client.
    ///
    /// This method performs the complete initialization workflow:
    /// 1. Builds the Matrix client against the configured homeserver
    /// 2. Logs in with the bot account's user ID and password
    /// 3. Sets the bot's display name
    /// 4. Initializes the synchronization service
    ///
    /// # Arguments
    ///
    /// * `user_credentials` - Homeserver URL, user ID and password of the
    ///   bot account
    ///
    /// # Returns
    ///
    /// A fully configured [`MatrixClient`] ready for messaging and
    /// synchronization.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The user ID cannot be parsed
    /// - The client cannot be built or login fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tutor::matrix::{UserCredentials, client::MatrixClient};
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), anyhow::Error> {
    /// let credentials = UserCredentials {
    ///     homeserver_url: "https://matrix.org".to_string(),
    ///     user_id: "@tutor:matrix.org".to_string(),
    ///     password: "secure_password".to_string(),
    /// };
    ///
    /// let client = MatrixClient::new(&credentials).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(user_credentials: &UserCredentials) -> Result<Self, anyhow::Error> {
        let user_id: OwnedUserId = user_credentials.user_id.clone().try_into()?;

        let client = Client::builder()
            .homeserver_url(&user_credentials.homeserver_url)
            .build()
            .await?;

        client
            .matrix_auth()
            .login_username(user_id.as_str(), &user_credentials.password)
            .initial_device_display_name("tutor bot")
            .send()
            .await?;

        info!("logged in as {}", user_id);

        // Set display name
        client.account().set_display_name(Some("Tutor")).await?;

        let matrix_sync = MatrixSync::new(&client);

        Ok(MatrixClient {
            matrix_sync,
            client,
        })
    }

    /// Starts the Matrix synchronization loop.
    ///
    /// This method begins syncing with the Matrix server and invokes the
    /// provided callback for each incoming text message. The sync loop runs
    /// indefinitely and automatically handles:
    /// - Auto-joining rooms on invitation
    /// - Filtering for text messages in joined rooms
    /// - Ignoring the bot's own messages
    ///
    /// # Arguments
    ///
    /// * `on_message` - Callback invoked for each text message with
    ///   parameters:
    ///   - `body`: The message text content
    ///   - `room_id`: The room where the message was sent
    ///   - `sender_id`: The user who sent the message
    ///   - `event_id`: The unique event identifier
    ///
    /// # Returns
    ///
    /// Never returns under normal operation. Returns `Ok(())` if sync ends
    /// gracefully.
    pub async fn sync<F>(&self, on_message: F) -> Result<(), anyhow::Error>
    where
        F: Fn(String, String, String, String) + Send + Sync + 'static + Clone,
    {
        match self.matrix_sync.sync(on_message).await {
            Ok(_) => info!("matrix sync ended successfully"),
            Err(e) => error!("matrix sync ended with error: {:?}", e),
        }

        Ok(())
    }

    /// Sends a threaded reply to a specific message.
    ///
    /// Creates a plain-text reply to an existing message, maintaining
    /// proper thread context in the Matrix room.
    ///
    /// # Arguments
    ///
    /// * `room_id` - The Matrix room ID where the reply should be sent
    /// * `sender_id` - The user ID of the original message sender
    /// * `event_id` - The event ID of the message being replied to
    /// * `body` - The reply content, plain text with `\n` line breaks
    pub async fn send_reply(&self, room_id: &str, sender_id: &str, event_id: &str, body: &str) {
        let sender = UserId::parse(sender_id).unwrap();
        let event = EventId::parse(event_id).unwrap();

        let content = RoomMessageEventContent::text_plain(body).make_reply_to(
            ReplyMetadata::new(&event, &sender, None),
            ForwardThread::No,
            AddMentions::No,
        );

        self.send(room_id, content).await;
    }

    /// Internal helper to send message content to a room.
    ///
    /// # Arguments
    ///
    /// * `room_id` - The Matrix room ID
    /// * `content` - The pre-formatted message content
    async fn send(&self, room_id: &str, content: RoomMessageEventContent) {
        let room_id_obj = RoomId::parse(room_id).unwrap();

        if let Some(room) = self.client.get_room(&room_id_obj)
            && let Err(e) = room.send(content).await
        {
            error!("Failed to send message: {:?}", e);
        }
    }
}

//! Bot module for managing Matrix-Scryfall integration.
//!
//! This module provides the main [`Bot`] implementation that connects a
//! Matrix client with the Scryfall card database. It wires incoming Matrix
//! messages to the command dispatcher and sends the resulting replies back
//! to the room.
//!
//! # Overview
//!
//! The Tutor bot answers card-lookup commands in the Matrix rooms it has
//! joined. Each incoming message is parsed; recognized commands trigger one
//! Scryfall lookup and a formatted plain-text reply, invalid commands get an
//! instructive error reply, and everything else is ignored.
//!
//! # Command Processing Flow
//!
//! ```text
//! Matrix Message → Parse Command → Fetch Card → Format → Send Reply
//! ```
//!
//! # Supported Commands
//!
//! - `!usage` - List the supported commands
//! - `!card` - Show an image of a card
//! - `!legalities` - Show a card's legality in every format
//! - `!legal` - Show a card's legality in one format
//! - `!price` - Show a card's prices and purchase links

use log::info;

use crate::{
    commands::{CommandParseError, Commander},
    config::Config,
    matrix::{MatrixClient, UserCredentials},
    scryfall::ScryfallRequester,
};
use std::sync::Arc;

/// Context for processing a Matrix message.
///
/// Groups together all the information needed to process a single Matrix
/// message and execute commands.
struct MessageContext {
    /// The message body text
    body: String,
    /// The Matrix room ID where the message was sent
    room_id: String,
    /// The Matrix user ID who sent the message
    sender_id: String,
    /// The Matrix event ID of the message
    event_id: String,
    /// Thread-safe reference to the Matrix client
    matrix_client: Arc<MatrixClient>,
    /// Thread-safe reference to the command dispatcher
    commander: Arc<Commander<ScryfallRequester>>,
}

/// Main bot structure that integrates Matrix messaging with Scryfall.
///
/// The `Bot` owns the two long-lived services of the process:
///
/// 1. **Matrix Client** - Receives room messages and sends replies
/// 2. **Commander** - Parses commands and executes them against Scryfall
///
/// # Architecture
///
/// The Matrix sync loop delivers each text message to a callback, which
/// spawns a dedicated task for the message. The task parses the message,
/// performs the card lookup if needed, and sends the reply. A slow Scryfall
/// response therefore only delays its own command, never the sync loop or
/// other users' commands.
///
/// # Thread Safety
///
/// Shared services (`matrix_client`, `commander`) are wrapped in `Arc` for
/// safe sharing across message tasks. Both are immutable after startup, so
/// no locking is needed.
///
/// # Examples
///
/// ```no_run
/// # use tutor::bot::Bot;
/// # use tutor::config::Config;
/// # async fn example() -> Result<(), anyhow::Error> {
/// let config = Config::load("config.yaml")?;
/// let bot = Bot::new(config).await?;
/// bot.start().await; // Runs indefinitely
/// # Ok(())
/// # }
/// ```
pub struct Bot {
    /// Matrix client for sending and receiving messages.
    matrix_client: Arc<MatrixClient>,

    /// Command parser and executor.
    ///
    /// Owns the Scryfall requester. Stateless apart from the immutable
    /// command table, so it is safely shared between message tasks.
    commander: Arc<Commander<ScryfallRequester>>,
}

impl Bot {
    /// Creates a new Bot instance from the loaded configuration.
    ///
    /// This constructor builds the Scryfall requester, the command
    /// dispatcher and the Matrix client, and performs the Matrix login.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration loaded from file containing:
    ///   - `scryfall.url`: Base URL of the Scryfall API
    ///   - `scryfall.request_timeout`: Per-request timeout in seconds
    ///   - `scryfall.max_concurrent_requests`: Cap on in-flight lookups
    ///   - `matrix.homeserver_url`: Homeserver of the bot account
    ///   - `matrix.user_id`: Matrix bot account ID (e.g., `@tutor:matrix.org`)
    ///   - `matrix.password`: Matrix account password
    ///
    /// # Returns
    ///
    /// * `Ok(Bot)` - Successfully initialized bot ready to start
    /// * `Err(anyhow::Error)` - Failed to build the HTTP client or to log in
    ///   to Matrix (invalid credentials, network error, etc.)
    pub async fn new(config: Config) -> Result<Self, anyhow::Error> {
        // Create the scryfall client and the command dispatcher around it
        let requester = ScryfallRequester::new(
            &config.scryfall.url,
            config.scryfall.request_timeout,
            config.scryfall.max_concurrent_requests,
        )?;
        let commander = Arc::new(Commander::new(requester));

        // Create matrix client
        let matrix_client = Arc::new(
            MatrixClient::new(&UserCredentials {
                homeserver_url: config.matrix.homeserver_url,
                user_id: config.matrix.user_id,
                password: config.matrix.password,
            })
            .await?,
        );

        Ok(Bot {
            matrix_client,
            commander,
        })
    }

    /// Starts the bot and begins processing messages.
    ///
    /// This method consumes `self` and runs indefinitely. It registers the
    /// message handler and enters the Matrix sync loop; each incoming text
    /// message is handled on its own task.
    ///
    /// # Lifecycle
    ///
    /// This method runs forever and only terminates if:
    /// - The process receives a termination signal (SIGINT, SIGTERM)
    /// - The Matrix sync encounters an unrecoverable error (panics)
    ///
    /// # Panics
    ///
    /// Panics if the Matrix sync loop fails to start or encounters an
    /// unrecoverable error.
    pub async fn start(self) {
        // Clone references for the message handler
        let matrix_client_for_handler = Arc::clone(&self.matrix_client);
        let commander = Arc::clone(&self.commander);

        // Create message handler closure
        let on_message =
            move |body: String, room_id: String, sender_id: String, event_id: String| {
                let ctx = MessageContext {
                    body,
                    room_id,
                    sender_id,
                    event_id,
                    matrix_client: Arc::clone(&matrix_client_for_handler),
                    commander: Arc::clone(&commander),
                };
                Self::handle_matrix_message(ctx)
            };

        info!("Bot is ready");

        // Start matrix sync
        self.matrix_client.sync(on_message).await.unwrap();
    }

    /// Handles an incoming Matrix message and processes it as a command.
    ///
    /// This method implements the complete command processing flow:
    /// 1. Parse the message body to identify the command
    /// 2. Silently ignore if the message is not a command
    /// 3. Send an error reply if the command is unknown or incomplete
    /// 4. Execute the command (one Scryfall lookup for card commands)
    /// 5. Send the reply to the room
    ///
    /// # Arguments
    ///
    /// * `ctx` - The message context containing:
    ///   - `body`: The message text to parse
    ///   - `room_id`, `sender_id`, `event_id`: Matrix message metadata
    ///   - `matrix_client`: For sending responses
    ///   - `commander`: For parsing and executing commands
    ///
    /// # Behavior
    ///
    /// This method spawns a new async task to handle the message, allowing
    /// the Matrix sync loop to continue processing other messages without
    /// blocking on the upstream API.
    fn handle_matrix_message(ctx: MessageContext) {
        tokio::spawn(async move {
            // Parse body to extract command
            let command = match ctx.commander.parse(&ctx.body) {
                Ok(command) => command,
                Err(e) => match e {
                    // Return silently if the message is not a command
                    CommandParseError::NotForBot => return,
                    // Send error message if the command is invalid
                    CommandParseError::InvalidCommand(message) => {
                        ctx.matrix_client
                            .send_reply(&ctx.room_id, &ctx.sender_id, &ctx.event_id, &message)
                            .await;
                        return;
                    }
                },
            };

            // Execute the command, fetching card data if needed
            let response = ctx.commander.run_command(&command).await;

            // Send response back to matrix room
            ctx.matrix_client
                .send_reply(&ctx.room_id, &ctx.sender_id, &ctx.event_id, &response)
                .await;
        });
    }
}

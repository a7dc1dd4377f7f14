//! Matrix client synchronization and event handling.
//!
//! This module provides the [`MatrixSync`] struct for managing the Matrix
//! client's synchronization loop and handling real-time events from the
//! homeserver.
//!
//! # Overview
//!
//! The [`MatrixSync::sync`] method:
//! 1. Registers an auto-join handler for room invitations
//! 2. Performs an initial sync so the message backlog is not replayed
//!    through the command handler
//! 3. Registers the message handler and enters a continuous sync loop

use anyhow::Result;
use std::sync::Arc;

use log::{error, info, warn};
use matrix_sdk::{
    Client, Room, RoomState,
    config::SyncSettings,
    ruma::{
        OwnedUserId,
        api::client::filter::FilterDefinition,
        events::room::{
            member::StrippedRoomMemberEvent,
            message::{MessageType, OriginalSyncRoomMessageEvent},
        },
    },
};
use tokio::time::{Duration, sleep};

/// Manages Matrix client synchronization and event processing.
///
/// This struct wraps a Matrix [`Client`] and handles the synchronization
/// lifecycle:
/// - Initial sync to catch up on invitations received while offline
/// - Continuous sync loop for real-time event processing
/// - Event handler registration for invites and messages
pub struct MatrixSync {
    /// The matrix client
    client: Client,
}

impl MatrixSync {
    /// Creates a new MatrixSync instance.
    ///
    /// This does not start the synchronization process; call
    /// [`MatrixSync::sync`] to begin syncing.
    ///
    /// # Arguments
    ///
    /// * `client` - The authenticated Matrix client
    pub fn new(client: &Client) -> Self {
        MatrixSync {
            client: client.to_owned(),
        }
    }

    /// Starts the synchronization process and enters an infinite loop.
    ///
    /// This method performs the following sequence:
    /// 1. Registers an auto-join handler for room invitations
    /// 2. Performs an initial sync to process offline events (especially
    ///    invites) without replaying old messages through the callback
    /// 3. Registers a message handler with the provided callback
    /// 4. Enters a continuous sync loop
    ///
    /// The sync loop continues indefinitely until an error occurs or the
    /// process is terminated. Messages sent by the bot account itself are
    /// filtered out before the callback is invoked.
    ///
    /// # Arguments
    ///
    /// * `on_message` - Callback invoked for each text message in a joined
    ///   room. Parameters are: `(body, room_id, sender_id, event_id)`
    ///
    /// # Returns
    ///
    /// Never returns under normal operation. Returns `Err` if sync fails.
    pub async fn sync<F>(&self, on_message: F) -> Result<()>
    where
        F: Fn(String, String, String, String) + Send + Sync + 'static + Clone,
    {
        info!("start syncing");

        // Auto join rooms when invited
        self.client.add_event_handler(auto_join_rooms);

        // Enable room members lazy-loading
        // See <https://spec.matrix.org/v1.6/client-server-api/#lazy-loading-room-members>.
        let filter = FilterDefinition::with_lazy_loading();
        let mut sync_settings = SyncSettings::default().filter(filter.into());

        // First sync to process pending invitations without replaying the
        // message backlog through the command handler
        let response = self.client.sync_once(sync_settings.clone()).await?;

        let bot_user_id = self.client.user_id().map(ToOwned::to_owned);
        let on_message_arc = Arc::new(on_message);

        // Listen to incoming room messages. Because we are listening after the
        // sync_once, we only get new messages.
        self.client.add_event_handler({
            let on_message = Arc::clone(&on_message_arc);
            move |event: OriginalSyncRoomMessageEvent, room: Room| {
                let on_message = Arc::clone(&on_message);
                let bot_user_id = bot_user_id.clone();
                async move { on_room_message(event, room, bot_user_id, on_message).await }
            }
        });

        // Since we called `sync_once` before we entered our sync loop we must
        // pass that sync token to `sync`
        sync_settings = sync_settings.token(response.next_batch);

        self.client.sync(sync_settings).await?;

        Ok(())
    }
}

/// Automatically joins rooms when the bot receives an invitation.
///
/// # Arguments
///
/// * `room_member` - The stripped room member event containing the invite
/// * `client` - The Matrix client to use for joining
/// * `room` - The room to join
///
/// # References
///
/// See <https://github.com/matrix-org/synapse/issues/4345> for the Synapse
/// issue that necessitates the retry logic.
async fn auto_join_rooms(room_member: StrippedRoomMemberEvent, client: Client, room: Room) {
    let Some(user_id) = client.user_id() else {
        warn!("could not get user id from client");
        return;
    };

    // Ignore if the invite is not for us
    if room_member.state_key != user_id {
        return;
    }

    tokio::spawn(async move {
        info!("auto joining room {}", room.room_id());
        let mut delay = 2;

        while let Err(err) = room.join().await {
            // retry autojoin due to synapse sending invites, before the
            // invited user can join for more information see
            // https://github.com/matrix-org/synapse/issues/4345
            error!(
                "failed to join room {} ({err:?}), retrying in {delay}s",
                room.room_id()
            );

            sleep(Duration::from_secs(delay)).await;
            delay *= 2;

            if delay > 3600 {
                error!("can't join room {} ({err:?})", room.room_id());
                break;
            }
        }
        info!("successfully joined room {}", room.room_id());
    });
}

/// Handles incoming room messages and delegates to the user callback.
///
/// This internal function:
/// 1. Filters out messages from non-joined rooms
/// 2. Filters out the bot's own messages
/// 3. Extracts text content from message events
/// 4. Invokes the user-provided callback with message details
///
/// Non-text messages (images, files, etc.) are silently ignored.
///
/// # Arguments
///
/// * `event` - The room message event from the sync stream
/// * `room` - The room where the message was sent
/// * `bot_user_id` - The bot account's own user ID, if known
/// * `on_message` - The user-provided callback to invoke
async fn on_room_message<F>(
    event: OriginalSyncRoomMessageEvent,
    room: Room,
    bot_user_id: Option<OwnedUserId>,
    on_message: Arc<F>,
) where
    F: Fn(String, String, String, String) + Send + Sync + 'static,
{
    // Ignore messages from non-joined rooms
    if room.state() != RoomState::Joined {
        return;
    }

    // Ignore our own messages
    if Some(&event.sender) == bot_user_id.as_ref() {
        return;
    }

    // Only handle text messages
    let MessageType::Text(text_content) = event.content.msgtype else {
        return;
    };

    on_message(
        text_content.body,
        room.room_id().to_string(),
        event.sender.to_string(),
        event.event_id.to_string(),
    );
}

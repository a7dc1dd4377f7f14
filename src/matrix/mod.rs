//! Matrix protocol integration for the bot.
//!
//! This module provides the Matrix client the bot talks to its rooms with:
//! - Login with the bot account credentials
//! - Real-time event synchronization with auto-join on invitation
//! - Plain-text threaded replies
//!
//! The bot keeps no session state on disk and does not participate in
//! end-to-end encrypted rooms; it logs in fresh at startup.
//!
//! # Architecture
//!
//! The module is structured around the [`client::MatrixClient`] which
//! coordinates:
//! - **Login**: account authentication at startup via the client submodule
//! - **Sync**: real-time event handling and room synchronization via the
//!   sync submodule

mod client;
mod sync;

pub use crate::matrix::client::MatrixClient;

/// Credentials for the Matrix bot account
#[derive(Debug, Clone)]
pub struct UserCredentials {
    /// URL of the homeserver the account lives on
    pub homeserver_url: String,
    /// User ID of the matrix account
    pub user_id: String,
    /// Password of the matrix account
    pub password: String,
}

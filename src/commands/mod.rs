//! Bot command parsing, dispatch and response formatting.
//!
//! This module provides the complete command processing pipeline for the
//! Tutor bot, enabling Matrix users to look up Magic: The Gathering cards.
//!
//! # Overview
//!
//! The commands module handles the entire lifecycle of bot commands:
//! 1. **Parsing** - Converting Matrix messages into structured
//!    [`command::Command`] enums, driven by a static command-spec table
//! 2. **Validation** - Detecting unknown commands and missing arguments
//! 3. **Execution** - Routing commands to specialized handlers that query
//!    the Scryfall API
//! 4. **Response** - Formatting card data as plain text for Matrix display
//!
//! # Architecture
//!
//! ```text
//! Matrix Message
//!      │
//!      ▼
//! ┌─────────────┐
//! │  Commander  │  ← Entry point: parse() + run_command()
//! └─────────────┘
//!      │
//!      ├── parse() ────────────────────┐
//!      │                               ▼
//!      │                   ┌──────────────────┐
//!      │                   │ command::Command │
//!      │                   └──────────────────┘
//!      │
//!      └── run_command() ─────────────┐
//!                                     ▼
//!                          ┌─────────────────────┐
//!                          │ Action Handlers     │
//!                          │  - handle_usage     │
//!                          │  - handle_card      │
//!                          │  - handle_legalities│
//!                          │  - handle_legal     │
//!                          │  - handle_price     │
//!                          └─────────────────────┘
//!                                     │
//!                                     ▼
//!                              reply text (String)
//! ```
//!
//! # Command Structure
//!
//! All commands follow the format: `!<command> [args...]`. Command names are
//! matched case-insensitively.
//!
//! | Command | Arguments | Description |
//! |---------|-----------|-------------|
//! | `usage` | None | List the supported commands |
//! | `card` | `(card name)` | Show an image of the specified card |
//! | `legalities` | `(card name)` | Show the card's legality in every format |
//! | `legal` | `(format) (card name)` | Show the card's legality in one format |
//! | `price` | `(card name)` | Show the card's prices and purchase links |
//!
//! # Error Handling
//!
//! The module distinguishes between two error categories:
//!
//! - **Silent Errors** ([`CommandParseError::NotForBot`]): Messages that are
//!   not prefixed commands at all. These never generate responses.
//!
//! - **User Errors** ([`CommandParseError::InvalidCommand`]): Unknown command
//!   names or missing required arguments. These carry an instructive message
//!   to send back to the user.
//!
//! # Module Organization
//!
//! - [`commander`] - Main orchestrator for parsing and executing commands
//! - [`command`] - Command enum, the command-spec table and parsing logic
//! - [`actions`] - Individual command handler implementations
//! - [`text_response`] - Reply text formatting

mod actions;
mod command;
mod commander;
mod text_response;

pub use crate::commands::commander::Commander;

/// Errors that can occur during command parsing.
///
/// This enum distinguishes between errors that should produce user-facing
/// messages and those that should be silently ignored.
///
/// # Variants
///
/// * `NotForBot` - Message is not a prefixed command. Should be handled
///   silently without responding to the user.
///
/// * `InvalidCommand` - Unknown command or missing arguments. Contains a
///   user-friendly error message to display.
#[derive(Debug)]
pub enum CommandParseError {
    /// Message is not for this bot (silent error)
    NotForBot,
    /// Invalid command with error message
    InvalidCommand(String),
}

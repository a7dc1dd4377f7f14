//! Tutor - A Matrix bot for Magic: The Gathering card lookups.
//!
//! This is the main entry point for the Tutor bot, which bridges Matrix
//! messaging with the Scryfall card database so players can look up cards
//! without leaving their chat room.
//!
//! # Overview
//!
//! Tutor listens to the rooms it has been invited to and answers prefix
//! commands with card information fetched from the Scryfall API: a card
//! image, the card's legality across formats, its legality in one specific
//! format, or its current prices with purchase links.
//!
//! # Features
//!
//! - **Fuzzy Card Lookup**: Misspelled card names are resolved by Scryfall's
//!   fuzzy matching
//! - **Card Images**: `!card` replies with a direct card image link
//! - **Format Legalities**: full table with `!legalities`, single format with
//!   `!legal`
//! - **Prices**: USD, EUR and MTGO tix with purchase links via `!price`
//! - **Auto-Join**: joins rooms automatically when invited
//! - **YAML Configuration**: simple configuration file format with
//!   environment variable support
//!
//! # Configuration
//!
//! Create a `config.yaml` file with your settings:
//!
//! ```yaml
//! scryfall:
//!   url: "https://api.scryfall.com"
//!   request_timeout: 10
//!   max_concurrent_requests: 4
//!
//! matrix:
//!   homeserver_url: "https://matrix.org"
//!   user_id: "@tutor:matrix.org"
//!   password: "your-password"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Override any configuration value using environment variables with the
//! `TUTOR_` prefix:
//!
//! ```bash
//! export TUTOR_SCRYFALL__URL="https://api.scryfall.com"
//! export TUTOR_MATRIX__USER_ID="@tutor:matrix.org"
//! export TUTOR_MATRIX__PASSWORD="your-password"
//! ```
//!
//! # Usage
//!
//! ```bash
//! tutor --config config.yaml
//! ```
//!
//! # Bot Commands
//!
//! Once running, users can interact with the bot using these commands in
//! Matrix:
//!
//! - `!usage` - Display the list of supported commands
//! - `!card (card name)` - Show an image of the specified card
//! - `!legalities (card name)` - Show all formats and whether the card is
//!   legal in each
//! - `!legal (format) (card name)` - Show whether the card is legal in one
//!   format
//! - `!price (card name)` - Show the card's prices in USD, EUR and MTGO tix
//!
//! # Architecture
//!
//! The bot consists of several modules:
//!
//! - [`bot`] - Main bot logic wiring Matrix messages to command execution
//! - [`commands`] - Command parsing, dispatch and response formatting
//! - [`config`] - YAML configuration structures and loading with environment
//!   variable support
//! - [`matrix`] - Matrix client integration and event synchronization
//! - [`scryfall`] - Scryfall API client and response structures
//!
//! # Runtime Behavior
//!
//! Once started, the bot logs in to Matrix and enters a sync loop. Each
//! incoming text message is handled on its own task: the message is parsed,
//! the matching command fetches card data from Scryfall, and the reply is
//! sent back to the room. Non-command messages are ignored silently. The
//! loop runs indefinitely until the process is terminated.
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (default: `info`)
//!   - Set to `debug` for verbose output
//!   - Set to `warn` or `error` for minimal logging

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use crate::{bot::Bot, config::Config};

mod bot;
mod commands;
mod config;
mod matrix;
mod scryfall;

/// Command-line arguments for the Tutor bot.
///
/// The bot requires a single command-line argument: the path to the YAML
/// configuration file containing Scryfall and Matrix settings. Everything
/// else is configured through the file (see [`config::Config`]).
///
/// # Examples
///
/// ```bash
/// tutor --config config.yaml
/// ```
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    ///
    /// The configuration file should contain Scryfall client settings and
    /// Matrix account credentials. See the [`config`] module for the
    /// expected format. Values can be overridden with `TUTOR_`-prefixed
    /// environment variables.
    #[arg(short, long)]
    config: String,
}

/// Main entry point for the Tutor bot.
///
/// This function initializes the bot with the following steps:
///
/// 1. **Logging Setup**: Configures the logger with `info` level by default
///    (can be overridden with the `RUST_LOG` environment variable)
/// 2. **Argument Parsing**: Parses command-line arguments using `clap`
/// 3. **Configuration Loading**: Reads the YAML configuration file and
///    applies environment variable overrides
/// 4. **Bot Initialization**: Creates the bot instance and logs in to Matrix
/// 5. **Bot Execution**: Starts the sync loop and processes commands until
///    the process is terminated
///
/// # Error Handling
///
/// Configuration and login failures are logged and cause an early return
/// without panicking. Upstream errors during operation are reported to the
/// user in the room and logged, but never stop the bot.
#[tokio::main]
async fn main() {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting tutor {}...", env!("CARGO_PKG_VERSION"));

    // Parse command line arguments
    let args = Args::parse();

    // Load configuration from YAML file with environment variable overrides
    let mut config: Config = match Config::load(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load config file: {}", e);
            return;
        }
    };

    // Normalize Scryfall URL by removing trailing slash if present
    if config.scryfall.url.ends_with('/') {
        config.scryfall.url.pop();
    }

    // Launch bot
    let bot = match Bot::new(config).await {
        Ok(b) => b,
        Err(e) => {
            error!("Failed to initialize bot: {}", e);
            return;
        }
    };
    bot.start().await;
}

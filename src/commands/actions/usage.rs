//! Usage command handler.
//!
//! Displays the list of supported commands with their exact argument
//! syntax. This is a stateless command that always returns the same text.

use log::debug;

use crate::commands::text_response::format_usage;

/// Returns the usage message listing the supported commands.
pub fn handle_usage() -> String {
    debug!("handling usage command");

    format_usage()
}

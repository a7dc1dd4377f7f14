//! Configuration file structures for the Tutor bot.
//!
//! This module defines the configuration file format. The configuration is
//! split into two main sections: Scryfall client settings and Matrix account
//! settings. Values are read from a YAML file and can be overridden with
//! `TUTOR_`-prefixed environment variables, using `__` as the section
//! separator.
//!
//! # Configuration File Format
//!
//! ```yaml
//! # Scryfall Client Configuration
//! scryfall:
//!   # Base URL of the Scryfall API
//!   url: "https://api.scryfall.com"
//!
//!   # Request timeout in seconds (optional, default 10)
//!   request_timeout: 10
//!
//!   # Maximum number of in-flight Scryfall requests (optional, default 4)
//!   max_concurrent_requests: 4
//!
//! # Matrix Account Configuration
//! matrix:
//!   # Homeserver the bot account lives on
//!   homeserver_url: "https://matrix.org"
//!
//!   # Fully qualified Matrix user ID for the bot account
//!   user_id: "@tutor:matrix.org"
//!
//!   # Matrix account password
//!   password: "secret-password"
//! ```
//!
//! # Environment Variable Overrides
//!
//! ```bash
//! export TUTOR_SCRYFALL__URL="https://api.scryfall.com"
//! export TUTOR_MATRIX__PASSWORD="secret-from-env"
//! ```

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::Deserialize;

/// Root configuration structure for the Tutor bot.
///
/// This structure represents the complete bot configuration, containing both
/// Scryfall client settings and Matrix account credentials.
///
/// # Structure
///
/// The configuration is divided into two sections:
/// - [`Scryfall`] - Scryfall API client settings
/// - [`Matrix`] - Matrix account credentials and settings
#[derive(Deserialize)]
pub struct Config {
    /// Scryfall client configuration
    pub scryfall: Scryfall,
    /// Matrix account configuration
    pub matrix: Matrix,
}

impl Config {
    /// Loads the configuration from a YAML file with environment overrides.
    ///
    /// The file is read first, then any `TUTOR_`-prefixed environment
    /// variable is merged on top, so secrets can be kept out of the file in
    /// deployments. Nested keys use `__` as the separator, e.g.
    /// `TUTOR_MATRIX__PASSWORD` overrides `matrix.password`.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML configuration file
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the file cannot be read or a value is
    /// missing or has the wrong type.
    pub fn load(path: &str) -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("TUTOR_").split("__"))
            .extract()
    }
}

/// Scryfall API client configuration.
///
/// Contains all settings required to reach the Scryfall card database.
///
/// # YAML Section
///
/// ```yaml
/// scryfall:
///   url: "https://api.scryfall.com"
///   request_timeout: 10
///   max_concurrent_requests: 4
/// ```
#[derive(Deserialize)]
pub struct Scryfall {
    /// Base URL of the Scryfall API.
    ///
    /// Should include the protocol (http/https) but not trailing slashes.
    ///
    /// # Examples
    ///
    /// - `https://api.scryfall.com`
    /// - `http://localhost:8080`
    pub url: String,

    /// Request timeout in seconds.
    ///
    /// Upper bound on a single card lookup. A hanging upstream fails that
    /// one command instead of blocking its handler forever.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Maximum number of concurrent Scryfall requests.
    ///
    /// Commands beyond this limit wait for a slot before their lookup is
    /// sent.
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,
}

/// Matrix account configuration.
///
/// Contains credentials and settings for the Matrix bot account.
///
/// # YAML Section
///
/// ```yaml
/// matrix:
///   homeserver_url: "https://matrix.org"
///   user_id: "@tutor:matrix.org"
///   password: "your-password"
/// ```
#[derive(Deserialize)]
pub struct Matrix {
    /// URL of the homeserver the bot account lives on.
    pub homeserver_url: String,

    /// Fully qualified Matrix user ID.
    ///
    /// The Matrix ID of the bot account in the format
    /// `@username:homeserver.com`.
    pub user_id: String,

    /// Matrix account password.
    ///
    /// Usually provided through the `TUTOR_MATRIX__PASSWORD` environment
    /// variable rather than the file.
    pub password: String,
}

fn default_request_timeout() -> u64 {
    10
}

fn default_max_concurrent_requests() -> usize {
    4
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serial_test::serial;
    use tempfile::NamedTempFile;

    use super::*;

    const CONFIG_YAML: &str = r#"
scryfall:
  url: "https://api.scryfall.com"
  request_timeout: 5
  max_concurrent_requests: 2

matrix:
  homeserver_url: "https://matrix.org"
  user_id: "@tutor:matrix.org"
  password: "hunter2"
"#;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    #[serial]
    fn test_load_full_config() {
        let file = write_config(CONFIG_YAML);
        let config = Config::load(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.scryfall.url, "https://api.scryfall.com");
        assert_eq!(config.scryfall.request_timeout, 5);
        assert_eq!(config.scryfall.max_concurrent_requests, 2);
        assert_eq!(config.matrix.homeserver_url, "https://matrix.org");
        assert_eq!(config.matrix.user_id, "@tutor:matrix.org");
        assert_eq!(config.matrix.password, "hunter2");
    }

    #[test]
    #[serial]
    fn test_load_config_with_default_scryfall_settings() {
        let file = write_config(
            r#"
scryfall:
  url: "https://api.scryfall.com"

matrix:
  homeserver_url: "https://matrix.org"
  user_id: "@tutor:matrix.org"
  password: "hunter2"
"#,
        );
        let config = Config::load(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.scryfall.request_timeout, 10);
        assert_eq!(config.scryfall.max_concurrent_requests, 4);
    }

    #[test]
    #[serial]
    fn test_load_config_with_env_override() {
        let file = write_config(CONFIG_YAML);

        unsafe { std::env::set_var("TUTOR_MATRIX__PASSWORD", "from-env") };
        let config = Config::load(file.path().to_str().unwrap()).unwrap();
        unsafe { std::env::remove_var("TUTOR_MATRIX__PASSWORD") };

        // Environment value wins over the file value
        assert_eq!(config.matrix.password, "from-env");
        assert_eq!(config.matrix.user_id, "@tutor:matrix.org");
    }

    #[test]
    #[serial]
    fn test_load_config_missing_section() {
        let file = write_config(
            r#"
scryfall:
  url: "https://api.scryfall.com"
"#,
        );
        let result = Config::load(file.path().to_str().unwrap());
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_load_config_missing_file() {
        let result = Config::load("/nonexistent/config.yaml");
        assert!(result.is_err());
    }
}

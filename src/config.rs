//! Server configuration
//!
//! Loads settings from an optional `config.toml` with `TINYFTP_`-prefixed
//! environment overrides. All values have working defaults so the server
//! starts without any configuration file present.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Server configuration, fixed for the lifetime of the process.
///
/// The `server_root` is the base directory every authenticated session is
/// confined to. It is read once at startup and shared read-only across
/// sessions.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    /// IP address to bind the control connection listener
    pub bind_address: String,

    /// Port for the control connection listener (0 picks an ephemeral port)
    pub control_port: u16,

    /// Base directory bound as root/current directory at login
    pub server_root: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            control_port: 2121,
            server_root: "./server_root".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from config.toml (if present) with environment overrides.
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("TINYFTP"))
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.bind_address.is_empty() {
            return Err(config::ConfigError::Message(
                "bind_address cannot be empty".into(),
            ));
        }

        if self.server_root.is_empty() {
            return Err(config::ConfigError::Message(
                "server_root cannot be empty".into(),
            ));
        }

        Ok(())
    }

    /// Get bind address and control port as a socket address string.
    pub fn control_socket(&self) -> String {
        format!("{}:{}", self.bind_address, self.control_port)
    }

    /// Get the server root as a PathBuf.
    pub fn server_root_path(&self) -> PathBuf {
        PathBuf::from(&self.server_root)
    }
}

//! Server configuration
//!
//! Host and port come from `config/tracker.toml`, resolved relative to the
//! working directory. A missing file falls back to the defaults, so the
//! service also starts bare.

use anyhow::Result;
use serde::Deserialize;

const CONFIG_FILE: &str = "config/tracker";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl ServerConfig {
    /// Load the server configuration from the default config file
    pub fn load() -> Result<Self> {
        Self::from_file(CONFIG_FILE)
    }

    /// Load the server configuration from a specific file
    ///
    /// `path` is a config-crate file stem; the extension is inferred.
    pub fn from_file(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .add_source(config::File::with_name(path).required(false))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// The `host:port` address to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = ServerConfig::from_file("config/no-such-file").unwrap();
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_shipped_config_file_is_read() {
        // Tests run with the package root as working directory, where the
        // sample config file lives.
        let config = ServerConfig::load().unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
    }
}

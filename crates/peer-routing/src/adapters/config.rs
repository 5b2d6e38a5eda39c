//! Node configuration and TOML loading.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::domain::RoutingConfig;
use crate::wire::FrameConfig;

/// Default tracing filter directive.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Everything a routing node needs to start.
///
/// # Config File Format
///
/// Every key is optional; missing keys take their defaults.
///
/// ```toml
/// log_filter = "peer_routing=debug,info"
///
/// [routing]
/// bucket_size = 16
/// lookup_count = 16
///
/// [transport]
/// max_message_size = 4000000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub routing: RoutingConfig,
    pub transport: FrameConfig,
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` takes precedence.
    pub log_filter: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            routing: RoutingConfig::default(),
            transport: FrameConfig::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl NodeConfig {
    /// Small buckets and verbose logging for tests.
    pub fn for_testing() -> Self {
        Self {
            routing: RoutingConfig::for_testing(),
            transport: FrameConfig::default(),
            log_filter: "debug".to_string(),
        }
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, parsed or validated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        let config = Self::parse(&content)?;
        debug!(path = %path.display(), "loaded node config");
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: NodeConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values no routing table or transport can run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.routing.bucket_size == 0 {
            return Err(ConfigError::Invalid("routing.bucket_size must be at least 1"));
        }
        if self.routing.lookup_count == 0 {
            return Err(ConfigError::Invalid("routing.lookup_count must be at least 1"));
        }
        if self.transport.max_message_size() == 0 {
            return Err(ConfigError::Invalid(
                "transport.max_message_size must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File read error.
    #[error("failed to read {path}: {error}")]
    Io { path: String, error: String },

    /// TOML parse error.
    #[error("failed to parse config: {0}")]
    Parse(String),

    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

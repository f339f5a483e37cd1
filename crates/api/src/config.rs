//! Process configuration, read once from the environment at startup.

use std::net::{AddrParseError, SocketAddr};

use thiserror::Error;

/// Environment variable holding the listen address.
pub const BIND_VAR: &str = "WIRECAST_BIND";

/// Listen address used when `WIRECAST_BIND` is unset.
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid WIRECAST_BIND value `{value}`: {source}")]
    InvalidBindAddress {
        value: String,
        #[source]
        source: AddrParseError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind: SocketAddr,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup (used by tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw = lookup(BIND_VAR).unwrap_or_else(|| {
            tracing::info!("{BIND_VAR} not set; using {DEFAULT_BIND}");
            DEFAULT_BIND.to_string()
        });

        let bind = raw
            .trim()
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddress {
                value: raw.clone(),
                source,
            })?;

        Ok(Self { bind })
    }
}

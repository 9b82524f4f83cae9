use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

use crate::backend::liveblocks::DEFAULT_API_BASE;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Runtime configuration read from the environment
#[derive(Clone, PartialEq)]
pub struct GatewayConfig {
    /// Secret key for the hosted service; the in-memory backend is used without one
    pub secret_key: Option<String>,
    pub api_base: String,
    pub bind_addr: SocketAddr,
    pub request_timeout: Duration,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .field("api_base", &self.api_base)
            .field("bind_addr", &self.bind_addr)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bind_raw = get("DOCGATE_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                name: "DOCGATE_BIND_ADDR",
                value: bind_raw.clone(),
            })?;

        let request_timeout = match get("DOCGATE_REQUEST_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: "DOCGATE_REQUEST_TIMEOUT_SECS",
                        value: raw,
                    })
                }
            },
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        Ok(Self {
            secret_key: get("LIVEBLOCKS_SECRET_KEY"),
            api_base: get("LIVEBLOCKS_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            bind_addr,
            request_timeout,
        })
    }
}

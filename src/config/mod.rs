//! Configuration module for snslite
//!
//! - `defaults` - default constants
//! - `args` - CLI argument definitions
//!
//! [`ServerConfig`] is the validated form handed to the server; it is
//! built from parsed CLI arguments (with environment-variable
//! fallbacks) via [`ServerConfig::from_args`].

mod args;
mod defaults;

pub use args::ServerArgs;
pub use defaults::*;

use crate::error::{Result, SnsLiteError};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Complete server configuration for snslite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP server listens on
    pub listen_addr: SocketAddr,
    /// Maximum number of live captured messages
    pub capacity: usize,
    /// URL path prefix for the verification API
    pub verification_prefix: String,
    /// Log level
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_SOCKET_ADDR,
            capacity: DEFAULT_CAPACITY,
            verification_prefix: DEFAULT_VERIFICATION_PREFIX.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ServerConfig {
    /// Build and validate a configuration from parsed CLI arguments.
    pub fn from_args(args: ServerArgs) -> Result<Self> {
        let listen_addr = args.listen_addr.parse::<SocketAddr>().map_err(|e| {
            SnsLiteError::Config(format!(
                "Invalid listen address '{}': {}",
                args.listen_addr, e
            ))
        })?;
        let config = Self {
            listen_addr,
            capacity: args.capacity,
            verification_prefix: args.verification_prefix,
            log_level: args.log_level,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration invariants before server start.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(SnsLiteError::Config(
                "capacity must be greater than zero".to_string(),
            ));
        }
        if !self.verification_prefix.starts_with('/') || self.verification_prefix.len() < 2 {
            return Err(SnsLiteError::Config(format!(
                "verification prefix '{}' must start with '/' and name a path segment",
                self.verification_prefix
            )));
        }
        Ok(())
    }
}

//! Command-line arguments for the snslite server
//!
//! This module defines the CLI arguments structure using clap.

use clap::Parser;

use super::defaults::*;

/// Command-line arguments for the snslite server
#[derive(Parser, Debug, Clone)]
#[command(name = "snslite")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A local, in-process mock of the Amazon SNS publish API")]
pub struct ServerArgs {
    /// Address to listen on for the SNS wire endpoint and verification API
    #[arg(long, env = "SNSLITE_LISTEN_ADDR", default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: String,

    /// Maximum number of live captured messages. When the store is full,
    /// the oldest message is evicted on insert.
    #[arg(long, env = "SNSLITE_CAPACITY", default_value_t = DEFAULT_CAPACITY)]
    pub capacity: usize,

    /// URL path prefix for the verification API
    #[arg(long, env = "SNSLITE_VERIFICATION_PREFIX", default_value = DEFAULT_VERIFICATION_PREFIX)]
    pub verification_prefix: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "SNSLITE_LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,
}

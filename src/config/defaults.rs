//! Default constants for snslite configuration
//!
//! These constants define the values used when no explicit option is
//! provided on the command line or through the environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Default listen address for the HTTP server
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:5001";

/// Default listen socket address (const, no parsing needed)
pub(crate) const DEFAULT_LISTEN_SOCKET_ADDR: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 5001);

/// Default maximum number of live captured messages
pub const DEFAULT_CAPACITY: usize = 1000;

/// Default URL path prefix for the verification API
pub const DEFAULT_VERIFICATION_PREFIX: &str = "/messages";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

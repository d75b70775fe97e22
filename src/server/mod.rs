//! HTTP surfaces for snslite
//!
//! Two routers merged onto one listener:
//! - `sns_api` - the SNS wire protocol endpoint SDK clients post to
//! - `verify_api` - the JSON verification API tests query
//!
//! `http` wires both together with a `/health` probe and serves them.

pub mod http;
pub mod sns_api;
pub mod verify_api;

pub use http::{build_router, start_http_server};
pub use sns_api::{create_sns_router, SnsApiState};
pub use verify_api::{create_verify_router, VerifyApiState};

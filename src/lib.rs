#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

//! # snslite
//!
//! snslite is a local, in-process mock of the Amazon SNS publish API.
//! Point an unmodified AWS SDK client at it via endpoint override and it
//! captures every publish with its metadata, indexes it, and exposes a
//! JSON verification API so tests can assert "what was published, to
//! which topic, with which attributes, in what order" - no cloud
//! account, containers, or network-attached emulators required.
//!
//! ## Features
//!
//! - **SDK compatible**: parses the AWS query-style wire format and
//!   answers with bit-compatible XML envelopes (`Publish`, `CreateTopic`)
//! - **Bounded capture store**: thread-safe, multi-indexed, FIFO
//!   eviction once capacity is reached
//! - **Deduplication**: repeated publishes with the same
//!   `(TopicArn, MessageDeduplicationId)` replay the original message id
//! - **Verification API**: query captured messages by topic, time
//!   range, body substring, or id; clear between tests
//! - **Nothing persisted**: process exit loses all captured messages
//!
//! ## Quick Start
//!
//! ```bash
//! # Run with defaults (listens on 127.0.0.1:5001)
//! $ ./snslite
//!
//! # Publish through any SNS client pointed at the mock
//! $ aws sns publish --endpoint-url http://localhost:5001 \
//!       --topic-arn arn:aws:sns:us-east-1:000000000000:orders \
//!       --message 'hello'
//!
//! # Assert what was published
//! $ curl 'http://localhost:5001/messages?topic=arn:aws:sns:us-east-1:000000000000:orders'
//! ```
//!
//! ## Library Usage
//!
//! The capture store can be used directly, without the HTTP surface:
//!
//! ```no_run
//! use snslite::{CapturedMessage, MessageStore, Result};
//! use bytes::Bytes;
//! use chrono::Utc;
//!
//! fn main() -> Result<()> {
//!     let store = MessageStore::new(100)?;
//!
//!     let record = CapturedMessage::new(
//!         "m-1",
//!         "arn:aws:sns:us-east-1:000000000000:orders",
//!         "hello",
//!         Utc::now(),
//!         Bytes::from_static(b"Action=Publish&Message=hello"),
//!     );
//!     store.add(record)?;
//!
//!     let captured = store.get_by_topic("arn:aws:sns:us-east-1:000000000000:orders")?;
//!     assert_eq!(captured.len(), 1);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod message;
pub mod server;
pub mod store;
pub mod wire;

pub use config::{ServerArgs, ServerConfig};
pub use error::{Result, SnsLiteError};
pub use message::{CapturedMessage, MessageAttribute};
pub use store::MessageStore;

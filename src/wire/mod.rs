//! Wire codec for the SNS query protocol
//!
//! The inbound side decodes the `application/x-www-form-urlencoded`
//! bodies the AWS SDK sends; the outbound side emits the fixed XML
//! envelopes the SDK's parser accepts.

pub mod form;
pub mod xml;

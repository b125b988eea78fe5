//! lariat-broker — queue demo runner over NATS JetStream.
//!
//! Owns the `reservations` subject end to end: a durable pull consumer
//! named `reservations-subscription` that logs and acks every delivered
//! message, and a one-shot publish of a timestamped greeting.

pub mod demo;
pub mod error;

pub use demo::{QueueDemo, RESERVATIONS_STREAM, RESERVATIONS_SUBJECT, RESERVATIONS_SUBSCRIPTION};
pub use error::{BrokerError, BrokerResult};

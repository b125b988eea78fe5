//! Error types for the queue demo.

use thiserror::Error;

pub type BrokerResult<T> = Result<T, BrokerError>;

#[derive(Debug, Error)]
pub enum BrokerError {
    /// Failed to reach the broker at all.
    #[error("broker connect failed: {0}")]
    Connect(String),

    /// Stream creation or lookup failed.
    #[error("stream setup failed: {0}")]
    Stream(String),

    /// Consumer creation or message pull failed.
    #[error("consumer setup failed: {0}")]
    Consumer(String),

    /// Publish was rejected or never acknowledged.
    #[error("publish failed: {0}")]
    Publish(String),
}

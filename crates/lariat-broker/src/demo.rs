//! Queue demo — standing subscriber plus a one-shot publish.

use async_nats::jetstream::{
    self,
    consumer::{pull::Config as ConsumerConfig, AckPolicy},
    stream,
};
use chrono::{SecondsFormat, Utc};
use futures::StreamExt;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::{BrokerError, BrokerResult};

/// Subject the demo publishes to and the stream captures.
pub const RESERVATIONS_SUBJECT: &str = "reservations";

/// Durable consumer name for the demo subscription.
pub const RESERVATIONS_SUBSCRIPTION: &str = "reservations-subscription";

/// JetStream stream holding the reservations subject.
pub const RESERVATIONS_STREAM: &str = "RESERVATIONS";

/// The queue demo: one durable subscription that logs and acks every
/// delivered message, and one timestamped greeting published at startup.
#[derive(Debug)]
pub struct QueueDemo {
    jetstream: jetstream::Context,
}

impl QueueDemo {
    /// Connect to the broker and build a JetStream context over it.
    pub async fn connect(url: &str) -> BrokerResult<Self> {
        let client = async_nats::connect(url)
            .await
            .map_err(|e| BrokerError::Connect(format!("{url}: {e}")))?;
        let jetstream = jetstream::new(client);
        info!(%url, "broker connected");
        Ok(Self { jetstream })
    }

    /// Run the demo: ensure the stream and durable consumer exist, publish
    /// one greeting, then drain the subscription until shutdown.
    ///
    /// The consumer is created before the publish so the greeting is
    /// delivered to this same subscription.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> BrokerResult<()> {
        let stream = self
            .jetstream
            .get_or_create_stream(stream::Config {
                name: RESERVATIONS_STREAM.to_string(),
                subjects: vec![RESERVATIONS_SUBJECT.to_string()],
                ..Default::default()
            })
            .await
            .map_err(|e| BrokerError::Stream(e.to_string()))?;

        let consumer = stream
            .get_or_create_consumer(
                RESERVATIONS_SUBSCRIPTION,
                ConsumerConfig {
                    durable_name: Some(RESERVATIONS_SUBSCRIPTION.to_string()),
                    ack_policy: AckPolicy::Explicit,
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| BrokerError::Consumer(e.to_string()))?;

        let mut messages = consumer
            .messages()
            .await
            .map_err(|e| BrokerError::Consumer(e.to_string()))?;

        self.publish_greeting().await?;

        loop {
            tokio::select! {
                maybe = messages.next() => {
                    match maybe {
                        Some(Ok(message)) => {
                            let text = String::from_utf8_lossy(&message.payload);
                            info!(payload = %text, "message received");
                            // Ack unconditionally; redelivery on handler
                            // failure is the broker's concern.
                            if let Err(e) = message.ack().await {
                                warn!(error = %e, "ack failed");
                            }
                        }
                        Some(Err(e)) => {
                            warn!(error = %e, "message pull error");
                        }
                        None => {
                            info!("message stream closed");
                            break;
                        }
                    }
                }
                _ = shutdown.changed() => {
                    info!("queue demo shutting down");
                    break;
                }
            }
        }
        Ok(())
    }

    /// Publish one `"Hello @ <instant>"` message to the reservations
    /// subject, waiting for the stream to acknowledge it.
    pub async fn publish_greeting(&self) -> BrokerResult<()> {
        let payload = greeting_payload();
        let ack = self
            .jetstream
            .publish(RESERVATIONS_SUBJECT, payload.clone().into())
            .await
            .map_err(|e| BrokerError::Publish(e.to_string()))?
            .await
            .map_err(|e| BrokerError::Publish(e.to_string()))?;
        info!(
            subject = RESERVATIONS_SUBJECT,
            sequence = ack.sequence,
            payload = %payload,
            "greeting published"
        );
        Ok(())
    }
}

/// Greeting payload: `"Hello @ "` followed by the current UTC instant.
fn greeting_payload() -> String {
    format!(
        "Hello @ {}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
    )
}

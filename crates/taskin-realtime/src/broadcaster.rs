//! Table-scoped change broadcaster.

use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

use taskin_core::result::AppResult;

use crate::change::{ChangeEvent, ChangeOp};
use crate::subscription::{RowFilter, Subscription};

/// One broadcast channel per table name, created lazily.
///
/// Publishing to a table nobody listens on is a no-op; channels persist
/// once created so late subscribers reuse them.
#[derive(Debug)]
pub struct ChangeBroadcaster {
    channels: DashMap<String, broadcast::Sender<ChangeEvent>>,
    buffer_size: usize,
}

impl ChangeBroadcaster {
    /// Create a broadcaster whose channels buffer `buffer_size` events.
    pub fn new(buffer_size: usize) -> Self {
        Self {
            channels: DashMap::new(),
            buffer_size,
        }
    }

    fn sender_for(&self, table: &str) -> broadcast::Sender<ChangeEvent> {
        self.channels
            .entry(table.to_string())
            .or_insert_with(|| broadcast::channel(self.buffer_size).0)
            .clone()
    }

    /// Publish a row change. Returns how many subscribers received it.
    pub fn publish<T: Serialize>(&self, table: &str, op: ChangeOp, row: &T) -> AppResult<usize> {
        let event = ChangeEvent::new(table, op, row)?;
        let delivered = match self.channels.get(table) {
            Some(sender) => sender.send(event).unwrap_or(0),
            None => 0,
        };
        debug!(table, delivered, "published change event");
        Ok(delivered)
    }

    /// Subscribe to every change on a table.
    pub fn subscribe(&self, table: &str) -> Subscription {
        Subscription::new(self.sender_for(table).subscribe(), None)
    }

    /// Subscribe to changes on a table whose rows pass `filter`.
    pub fn subscribe_filtered(&self, table: &str, filter: RowFilter) -> Subscription {
        Subscription::new(self.sender_for(table).subscribe(), Some(filter))
    }

    /// Number of live subscribers on a table's channel.
    pub fn subscriber_count(&self, table: &str) -> usize {
        self.channels
            .get(table)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_filtered_subscription_sees_only_its_rows() {
        let broadcaster = ChangeBroadcaster::new(16);
        let mut sub =
            broadcaster.subscribe_filtered("provider_locations", RowFilter::eq("request_id", "r1"));

        broadcaster
            .publish(
                "provider_locations",
                ChangeOp::Update,
                &json!({"request_id": "r2", "latitude": 1.0}),
            )
            .unwrap();
        broadcaster
            .publish(
                "provider_locations",
                ChangeOp::Update,
                &json!({"request_id": "r1", "latitude": 2.0}),
            )
            .unwrap();

        let event = sub.next().await.unwrap();
        assert_eq!(event.column("latitude"), Some(&json!(2.0)));
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_noop() {
        let broadcaster = ChangeBroadcaster::new(16);
        let delivered = broadcaster
            .publish("messages", ChangeOp::Insert, &json!({"id": "m1"}))
            .unwrap();
        assert_eq!(delivered, 0);
    }

    #[tokio::test]
    async fn test_dropping_subscription_detaches() {
        let broadcaster = ChangeBroadcaster::new(16);
        let sub = broadcaster.subscribe("messages");
        assert_eq!(broadcaster.subscriber_count("messages"), 1);
        drop(sub);
        assert_eq!(broadcaster.subscriber_count("messages"), 0);
    }
}

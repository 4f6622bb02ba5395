//! Filtered subscriptions over the change feed.

use serde_json::Value;
use tokio::sync::broadcast;
use tracing::warn;

use crate::change::ChangeEvent;

/// Column-equality filter applied to incoming events.
#[derive(Debug, Clone)]
pub struct RowFilter {
    column: String,
    value: Value,
}

impl RowFilter {
    /// Match rows whose `column` equals `value`.
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Whether an event's row passes the filter.
    pub fn matches(&self, event: &ChangeEvent) -> bool {
        event.column(&self.column) == Some(&self.value)
    }
}

/// A live subscription to one table's change channel.
///
/// Holds a broadcast receiver; dropping the subscription detaches it
/// from the channel.
#[derive(Debug)]
pub struct Subscription {
    rx: broadcast::Receiver<ChangeEvent>,
    filter: Option<RowFilter>,
}

impl Subscription {
    pub(crate) fn new(rx: broadcast::Receiver<ChangeEvent>, filter: Option<RowFilter>) -> Self {
        Self { rx, filter }
    }

    /// Next event passing the filter, or `None` once the channel closes.
    ///
    /// A slow subscriber that falls behind the channel buffer loses the
    /// oldest events and keeps going; location consumers only care about
    /// the latest position anyway.
    pub async fn next(&mut self) -> Option<ChangeEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => {
                    if self.filter.as_ref().is_none_or(|f| f.matches(&event)) {
                        return Some(event);
                    }
                }
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    warn!(missed, "subscription lagged, dropping oldest events");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

//! Row-level change events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use taskin_core::error::AppError;
use taskin_core::result::AppResult;

/// What happened to the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeOp {
    Insert,
    Update,
    Delete,
}

/// One row change on a named table.
///
/// The row is carried as a JSON object so subscribers can filter on any
/// column without the feed knowing entity types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// The affected table.
    pub table: String,
    /// Kind of change.
    pub op: ChangeOp,
    /// The row after the change (before it, for deletes).
    pub row: Value,
    /// When the change was published.
    pub occurred_at: DateTime<Utc>,
}

impl ChangeEvent {
    /// Build an event from any serializable row.
    pub fn new<T: Serialize>(table: impl Into<String>, op: ChangeOp, row: &T) -> AppResult<Self> {
        let row = serde_json::to_value(row).map_err(AppError::from)?;
        Ok(Self {
            table: table.into(),
            op,
            row,
            occurred_at: Utc::now(),
        })
    }

    /// Value of a column in the carried row, if present.
    pub fn column(&self, name: &str) -> Option<&Value> {
        self.row.get(name)
    }
}

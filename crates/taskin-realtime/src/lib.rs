//! # taskin-realtime
//!
//! In-process change feed. Writers publish row-level [`ChangeEvent`]s to
//! table-scoped channels on the [`ChangeBroadcaster`]; readers take
//! filtered [`Subscription`]s that deliver only the rows they care
//! about. Dropping a subscription detaches it.

pub mod broadcaster;
pub mod change;
pub mod subscription;

pub use broadcaster::ChangeBroadcaster;
pub use change::{ChangeEvent, ChangeOp};
pub use subscription::{RowFilter, Subscription};

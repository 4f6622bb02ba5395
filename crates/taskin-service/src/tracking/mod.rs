//! Provider location tracking while a request is accepted.

mod service;

pub use service::{TrackingHandle, TrackingService};

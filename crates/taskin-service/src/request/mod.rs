//! Service request lifecycle.

mod service;

pub use service::{CreateRequestInput, RequestService};

//! Payment settlement, which also completes the request.

mod service;

pub use service::{PayRequestInput, PaymentService};

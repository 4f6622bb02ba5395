//! Post-completion ratings.

mod service;

pub use service::{RateRequestInput, RatingService};

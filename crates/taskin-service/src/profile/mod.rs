//! User profiles and role management.

mod service;

pub use service::{ProfileService, UpdateProfileInput};

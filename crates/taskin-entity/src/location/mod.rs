//! Provider location entities.

pub mod model;

pub use model::ProviderLocation;

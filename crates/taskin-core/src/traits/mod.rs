//! Cross-crate trait definitions.

pub mod geolocation;

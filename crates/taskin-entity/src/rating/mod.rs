//! Rating domain entities.

pub mod model;

pub use model::Rating;

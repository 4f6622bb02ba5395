//! # taskin-core
//!
//! Core crate for the Taskin backend. Contains traits, configuration
//! schemas, typed identifiers, geographic/pagination types, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other Taskin crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;

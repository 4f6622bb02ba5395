//! # taskin-api
//!
//! HTTP API layer for Taskin built on Axum.
//!
//! Identity lives in an external provider; this layer verifies bearer
//! JWTs, maps domain errors to HTTP responses, and exposes the REST
//! endpoints over the service layer.

pub mod auth;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::{AppState, Repositories};

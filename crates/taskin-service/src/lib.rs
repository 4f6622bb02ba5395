//! # taskin-service
//!
//! Business logic for the Taskin backend. Services own the lifecycle
//! rules; repositories only persist. Each service takes its repository
//! traits as `Arc<dyn ...>` so the API wires PostgreSQL and the tests
//! wire the in-memory backend.

pub mod chat;
pub mod context;
pub mod notification;
pub mod payment;
pub mod profile;
pub mod rating;
pub mod request;
pub mod task;
pub mod tracking;

pub use context::RequestContext;

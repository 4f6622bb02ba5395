//! # taskin-database
//!
//! Storage layer for the Taskin backend. Each entity has a repository
//! trait defined alongside its PostgreSQL implementation in
//! [`repositories`]; the [`memory`] module provides `dashmap`-backed
//! implementations of the same traits for tests and local development.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;

//! Repository traits and their PostgreSQL implementations.
//!
//! Each module defines the trait for one entity next to its `Pg*`
//! implementation. The in-memory counterparts live in [`crate::memory`].

pub mod chat;
pub mod location;
pub mod notification;
pub mod payment;
pub mod profile;
pub mod rating;
pub mod request;
pub mod role;
pub mod task;

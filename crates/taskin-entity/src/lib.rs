//! # taskin-entity
//!
//! Domain entity models for the Taskin backend: service requests and their
//! lifecycle, provider locations, chat, notifications, payments, ratings,
//! personal reminder tasks, and user profiles/roles.

pub mod chat;
pub mod location;
pub mod notification;
pub mod payment;
pub mod rating;
pub mod request;
pub mod task;
pub mod user;

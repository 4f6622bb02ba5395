//! HTTP handlers, organized by domain.

pub mod chat;
pub mod health;
pub mod notification;
pub mod payment;
pub mod profile;
pub mod rating;
pub mod request;
pub mod task;
pub mod tracking;

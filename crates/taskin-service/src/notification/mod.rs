//! Notification management and fan-out.

mod service;

pub use service::NotificationService;

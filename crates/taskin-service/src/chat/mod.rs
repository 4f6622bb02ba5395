//! Per-request chat between customer and provider.

mod service;

pub use service::ChatService;

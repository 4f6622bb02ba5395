//! Shared value types used across the workspace.

pub mod geo;
pub mod pagination;

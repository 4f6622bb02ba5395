//! Personal reminder task entities.

pub mod model;
pub mod priority;

pub use model::Task;
pub use priority::TaskPriority;

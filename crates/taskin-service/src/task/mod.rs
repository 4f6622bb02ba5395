//! Personal reminder tasks.

mod service;

pub use service::{CreateTaskInput, TaskService, UpdateTaskInput};

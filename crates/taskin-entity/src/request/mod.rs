//! Service request domain entities.

pub mod model;
pub mod status;

pub use model::ServiceRequest;
pub use status::RequestStatus;

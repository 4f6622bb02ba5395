//! In-memory repository implementations backed by [`dashmap`].
//!
//! These back the service-layer tests and small single-node deployments
//! where a PostgreSQL instance is not available. They uphold the same
//! atomicity contracts as the `Pg*` implementations: conditional
//! transitions are applied under the shard lock of the owning entry, so
//! concurrent attempts still resolve to one winner.

mod chat;
mod location;
mod notification;
mod payment;
mod profile;
mod rating;
mod request;
mod role;
mod task;

pub use chat::MemoryChatRepository;
pub use location::MemoryLocationRepository;
pub use notification::MemoryNotificationRepository;
pub use payment::MemoryPaymentRepository;
pub use profile::MemoryProfileRepository;
pub use rating::MemoryRatingRepository;
pub use request::MemoryRequestRepository;
pub use role::MemoryRoleRepository;
pub use task::MemoryTaskRepository;

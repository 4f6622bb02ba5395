//! User profile and role entities.

pub mod profile;
pub mod role;

pub use profile::Profile;
pub use role::AppRole;

//! Service request entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use taskin_core::types::geo::GeoPoint;

use super::status::RequestStatus;

/// A customer's ask for on-demand local help.
///
/// Created in `Pending` state with no provider. The `provider_id` slot is
/// the only contended field: it is claimed by exactly one provider through
/// a conditional update.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ServiceRequest {
    /// Unique request identifier.
    pub id: Uuid,
    /// The customer who posted the request.
    pub customer_id: Uuid,
    /// The provider who accepted, once accepted.
    pub provider_id: Option<Uuid>,
    /// Requested service category ("Plumber", "Electrician", ...).
    pub service_type: String,
    /// Lifecycle status.
    pub status: RequestStatus,
    /// Customer latitude at posting time.
    pub latitude: f64,
    /// Customer longitude at posting time.
    pub longitude: f64,
    /// Free-form customer address.
    pub address: Option<String>,
    /// Free-form description of the work.
    pub description: Option<String>,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
    /// When a provider accepted.
    pub accepted_at: Option<DateTime<Utc>>,
    /// When payment settled.
    pub completed_at: Option<DateTime<Utc>>,
}

impl ServiceRequest {
    /// Construct a fresh pending request.
    pub fn new(
        customer_id: Uuid,
        service_type: String,
        location: GeoPoint,
        address: Option<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer_id,
            provider_id: None,
            service_type,
            status: RequestStatus::Pending,
            latitude: location.latitude,
            longitude: location.longitude,
            address,
            description,
            created_at: Utc::now(),
            accepted_at: None,
            completed_at: None,
        }
    }

    /// The customer's location.
    pub fn location(&self) -> GeoPoint {
        GeoPoint {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// Whether the request is still open for acceptance.
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending && self.provider_id.is_none()
    }

    /// Whether the given user is one of the two interested parties.
    pub fn involves(&self, user_id: Uuid) -> bool {
        self.customer_id == user_id || self.provider_id == Some(user_id)
    }

    /// The counterpart of `user_id` on this request, if any.
    pub fn counterpart_of(&self, user_id: Uuid) -> Option<Uuid> {
        if self.customer_id == user_id {
            self.provider_id
        } else if self.provider_id == Some(user_id) {
            Some(self.customer_id)
        } else {
            None
        }
    }
}

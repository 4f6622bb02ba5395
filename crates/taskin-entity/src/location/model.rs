//! Provider location entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use taskin_core::types::geo::GeoPoint;

/// Latest known position of a provider working a request.
///
/// One logical row per (provider, request); repeated upserts overwrite it
/// (last write wins, no history). Rows are only meaningful while the
/// request is in the accepted state.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProviderLocation {
    /// Row identifier.
    pub id: Uuid,
    /// The reporting provider.
    pub provider_id: Uuid,
    /// The request being worked, if bound to one.
    pub request_id: Option<Uuid>,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// When the position was last reported.
    pub updated_at: DateTime<Utc>,
}

impl ProviderLocation {
    /// Build a fresh row for an upsert.
    pub fn new(provider_id: Uuid, request_id: Option<Uuid>, point: GeoPoint) -> Self {
        Self {
            id: Uuid::new_v4(),
            provider_id,
            request_id,
            latitude: point.latitude,
            longitude: point.longitude,
            updated_at: Utc::now(),
        }
    }

    /// The reported position.
    pub fn point(&self) -> GeoPoint {
        GeoPoint {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

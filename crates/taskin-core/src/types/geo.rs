//! Geographic coordinate types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A WGS84 latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, −90.0 to 90.0.
    pub latitude: f64,
    /// Longitude in degrees, −180.0 to 180.0.
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a point, validating the coordinate ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, AppError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(AppError::validation(format!(
                "Invalid latitude: {latitude}"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(AppError::validation(format!(
                "Invalid longitude: {longitude}"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// One position sample emitted by a geolocation source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationSample {
    /// The sampled position.
    pub point: GeoPoint,
    /// When the sample was taken.
    pub sampled_at: DateTime<Utc>,
}

impl LocationSample {
    /// Create a sample taken now.
    pub fn now(point: GeoPoint) -> Self {
        Self {
            point,
            sampled_at: Utc::now(),
        }
    }

    /// Whether the sample is older than `max_age_seconds`.
    pub fn is_stale(&self, max_age_seconds: u64) -> bool {
        let age = Utc::now().signed_duration_since(self.sampled_at);
        age.num_seconds() > max_age_seconds as i64
    }
}

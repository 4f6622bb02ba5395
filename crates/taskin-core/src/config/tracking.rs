//! Provider location tracking configuration.

use serde::{Deserialize, Serialize};

/// Location tracking settings for accepted requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Request high-accuracy positioning from the geolocation source.
    #[serde(default = "default_true")]
    pub high_accuracy: bool,
    /// Maximum acceptable sample age in seconds. Older cached samples are
    /// discarded by the source.
    #[serde(default = "default_max_age")]
    pub max_sample_age_seconds: u64,
    /// Per-sample acquisition timeout in seconds.
    #[serde(default = "default_sample_timeout")]
    pub sample_timeout_seconds: u64,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            max_sample_age_seconds: default_max_age(),
            sample_timeout_seconds: default_sample_timeout(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_age() -> u64 {
    10
}

fn default_sample_timeout() -> u64 {
    5
}

//! In-process change-stream configuration.

use serde::{Deserialize, Serialize};

/// Change-stream (pub/sub) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Buffer size for each per-table broadcast channel. Slow subscribers
    /// that fall further behind than this lose the oldest events.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            channel_buffer_size: default_channel_buffer(),
        }
    }
}

fn default_channel_buffer() -> usize {
    256
}

//! Abstraction over a device-provided stream of position samples.
//!
//! A provider's device continuously reports its position while it is en
//! route to an accepted request. The concrete source is platform-specific;
//! the tracking service only depends on this trait. Tests use a scripted
//! implementation.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::result::AppResult;
use crate::types::geo::LocationSample;

/// Options applied when opening a position watch.
#[derive(Debug, Clone, Copy)]
pub struct WatchOptions {
    /// Request high-accuracy positioning.
    pub high_accuracy: bool,
    /// Maximum acceptable age for a cached sample.
    pub max_sample_age: Duration,
    /// Per-sample acquisition timeout.
    pub sample_timeout: Duration,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            max_sample_age: Duration::from_secs(10),
            sample_timeout: Duration::from_secs(5),
        }
    }
}

/// A live position stream.
///
/// Dropping the watch closes the channel, which the source must treat as
/// cancellation: no further samples may be produced afterwards. Holders are
/// obliged to drop the watch once the request it serves leaves the accepted
/// state.
#[derive(Debug)]
pub struct LocationWatch {
    rx: mpsc::Receiver<LocationSample>,
}

impl LocationWatch {
    /// Wrap a sample receiver.
    pub fn new(rx: mpsc::Receiver<LocationSample>) -> Self {
        Self { rx }
    }

    /// Await the next sample. Returns `None` once the source has stopped.
    pub async fn next(&mut self) -> Option<LocationSample> {
        self.rx.recv().await
    }

    /// Stop watching. Equivalent to dropping the watch.
    pub fn stop(self) {}
}

/// A source of position samples (device GPS, platform location API, ...).
#[async_trait]
pub trait GeolocationSource: Send + Sync + 'static {
    /// Open a continuous position watch with the given options.
    async fn watch(&self, options: WatchOptions) -> AppResult<LocationWatch>;
}

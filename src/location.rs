use std::time::Duration;

use tokio::sync::watch;

use crate::model::Coord;

/// Used until a real position arrives (central Bangalore, like the app's
/// default map view).
pub const DEFAULT_COORD: Coord = Coord { lat: 12.9716, lon: 77.5946 };

/// Delay before re-polling a source that reported an error.
pub const RETRY_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    Unavailable,
    #[error("location request timed out")]
    Timeout,
}

/// Push-based position feed. Yields `None` when the feed is closed.
#[async_trait::async_trait]
pub trait LocationSource: Send {
    async fn next_position(&mut self) -> Option<Result<Coord, LocationError>>;
}

/// Holds the last known coordinate and notifies subscribers on change.
/// Position errors are never fatal: the tracker logs, falls back to
/// [`DEFAULT_COORD`] if nothing better is known, and keeps consuming.
pub struct LocationTracker {
    current: watch::Sender<Option<Coord>>,
}

impl Default for LocationTracker {
    fn default() -> Self {
        let (current, _) = watch::channel(None);
        Self { current }
    }
}

impl LocationTracker {
    pub fn update(&self, at: Coord) {
        self.current.send_replace(Some(at));
    }

    pub fn current(&self) -> Coord {
        self.current.borrow().unwrap_or(DEFAULT_COORD)
    }

    pub fn has_fix(&self) -> bool {
        self.current.borrow().is_some()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Coord>> {
        self.current.subscribe()
    }

    pub async fn run<S: LocationSource>(&self, mut source: S) {
        while let Some(position) = source.next_position().await {
            match position {
                Ok(at) => {
                    log::debug!("position update: {:.6}, {:.6}", at.lat, at.lon);
                    self.update(at);
                }
                Err(e) => {
                    log::warn!("location source error: {e}, retrying");
                    if !self.has_fix() {
                        self.update(DEFAULT_COORD);
                    }
                    tokio::time::sleep(RETRY_DELAY).await;
                }
            }
        }
    }
}

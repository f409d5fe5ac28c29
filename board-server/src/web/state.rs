//! Application state for the web layer.

use std::sync::Arc;
use std::time::Duration;

use crate::board::BoardWindow;
use crate::feed::SharedFeed;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Current provider data
    pub feed: SharedFeed,

    /// Which trains each board shows
    pub window: Arc<BoardWindow>,

    /// How often the feed reloads, and so how often board pages reload
    pub refresh_interval: Duration,
}

impl AppState {
    /// Create a new app state.
    pub fn new(feed: SharedFeed, window: BoardWindow, refresh_interval: Duration) -> Self {
        Self {
            feed,
            window: Arc::new(window),
            refresh_interval,
        }
    }
}

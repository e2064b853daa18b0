use std::sync::Arc;

use crate::config::Settings;

/// Shared application state passed to every handler via axum `State`.
/// Settings are loaded once in `main` and shared read-only from then on.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }
}

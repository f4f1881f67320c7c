//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! turns it into shell intents and loads catalog data for the visible view.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `playback`: Player-bar intents and play recording
//! - `navigation`: View changes and catalog loading

mod input;
mod playback;
mod navigation;

use std::sync::Arc;

use crate::model::{AppModel, CatalogError, Effect};

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<AppModel>,
}

impl AppController {
    pub fn new(model: Arc<AppModel>) -> Self {
        Self { model }
    }

    /// Follow up on what the shell reported
    pub(crate) async fn handle_effect(&self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::ViewChanged(view) => {
                tracing::info!(view = %view, "View changed");
                self.spawn_load_view(view, false);
            }
            Effect::TrackStarted(track) => {
                tracing::info!(track_id = %track.catalog_id(), title = %track.title, "Playing track");
                self.record_play(track);
            }
        }
    }

    pub(crate) fn format_error(error: &CatalogError) -> String {
        match error {
            CatalogError::NotConfigured => {
                "Catalog not configured. Set SUPABASE_URL and SUPABASE_ANON_KEY.".to_string()
            }
            CatalogError::Status { status, .. } => match status.as_u16() {
                401 | 403 => "Catalog rejected the API key. Check SUPABASE_ANON_KEY.".to_string(),
                404 => "Catalog table not found.".to_string(),
                429 => "Rate limited. Please wait a moment.".to_string(),
                code if code >= 500 => "Catalog is unavailable. Press F5 to retry.".to_string(),
                _ => format!("Error: {}", error),
            },
            CatalogError::Request(e) if e.is_timeout() || e.is_connect() => {
                "Could not reach the catalog. Press F5 to retry.".to_string()
            }
            _ => format!("Error: {}", error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn status_errors_get_friendly_messages() {
        let unauthorized = CatalogError::Status {
            status: StatusCode::UNAUTHORIZED,
            body: "{}".to_string(),
        };
        assert!(AppController::format_error(&unauthorized).contains("API key"));

        let teapot = CatalogError::Status {
            status: StatusCode::IM_A_TEAPOT,
            body: "short and stout".to_string(),
        };
        assert!(AppController::format_error(&teapot).starts_with("Error: "));

        assert!(AppController::format_error(&CatalogError::NotConfigured).contains("SUPABASE_URL"));
    }
}

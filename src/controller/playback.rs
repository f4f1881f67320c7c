//! Playback control methods

use std::time::Duration;

use crate::model::{Intent, Track};
use super::AppController;

/// Arrow-key seek step in seconds
pub const SEEK_STEP_SECS: f64 = 5.0;

impl AppController {
    pub async fn play_selected(&self) {
        match self.model.get_selected_track().await {
            Some(track) => self.dispatch(Intent::PlayTrack(track)).await,
            None => tracing::debug!("Nothing selected to play"),
        }
    }

    pub async fn seek_relative(&self, delta_secs: f64) {
        let current = self.model.get_playback_info().await.progress_secs;
        self.dispatch(Intent::Seek(current + delta_secs)).await;
    }

    pub async fn tick(&self, elapsed: Duration) {
        self.dispatch(Intent::Tick(elapsed)).await;
    }

    /// Fire-and-forget insert into the recently played feed
    pub(crate) fn record_play(&self, track: Track) {
        if !self.model.config.record_plays || !self.model.catalog.is_configured() {
            return;
        }
        let controller = self.clone();
        tokio::spawn(async move {
            if let Err(e) = controller.model.catalog.record_play(&track).await {
                tracing::warn!(track_id = %track.catalog_id(), error = %e, "Failed to record play");
            }
        });
    }
}

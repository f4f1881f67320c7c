//! Navigation-related controller methods (views, sidebar, catalog loading)

use crate::config::{freshness, freshness_for};
use crate::model::{
    fetch_cached, CatalogError, CatalogSection, DataSource, FetchOutcome, Intent, Loadable,
    NavEntry, SidebarItem, Track, View,
};
use super::AppController;

fn to_loadable(result: Result<FetchOutcome<Vec<Track>>, CatalogError>) -> Loadable {
    match result {
        Ok(FetchOutcome { data, source }) => Loadable::Loaded {
            tracks: data,
            stale_error: match source {
                DataSource::CacheFallback { error } => Some(error),
                DataSource::Cache | DataSource::Network => None,
            },
        },
        Err(e) => Loadable::Failed(AppController::format_error(&e)),
    }
}

impl AppController {
    /// Apply an intent and run whatever follow-up it asks for
    pub async fn dispatch(&self, intent: Intent) {
        let effect = self.model.apply_intent(intent).await;
        self.handle_effect(effect).await;
    }

    pub(crate) async fn load_view(&self, view: &View, force: bool) {
        match view {
            View::Home => self.load_home(force).await,
            View::Search => self.model.refresh_search().await,
            View::Library => self.load_library(force).await,
            View::Playlist(id) => self.load_playlist(id, force).await,
        }
    }

    /// Spawn a view load so the input loop never waits on the network
    pub(crate) fn spawn_load_view(&self, view: View, force: bool) {
        let controller = self.clone();
        tokio::spawn(async move {
            controller.load_view(&view, force).await;
        });
    }

    pub async fn reload_current_view(&self) {
        let view = self.model.current_view().await;
        tracing::debug!(view = %view, "Reloading view");
        self.spawn_load_view(view, true);
    }

    pub async fn load_home(&self, force: bool) {
        self.model.mark_home_loading().await;
        let (recent, made_for_you, popular) = futures::join!(
            self.fetch_home_section(CatalogSection::RecentlyPlayed, force),
            self.fetch_home_section(CatalogSection::MadeForYou, force),
            self.fetch_home_section(CatalogSection::PopularAlbums, force)
        );

        for (section, result) in [
            (CatalogSection::RecentlyPlayed, recent),
            (CatalogSection::MadeForYou, made_for_you),
            (CatalogSection::PopularAlbums, popular),
        ] {
            self.set_home_result(section, result).await;
        }
        self.model.refresh_search().await;
    }

    /// Reload one home feed, leaving the others as they are
    pub async fn load_home_section(&self, section: CatalogSection, force: bool) {
        let result = self.fetch_home_section(section, force).await;
        self.set_home_result(section, result).await;
        self.model.refresh_search().await;
    }

    async fn fetch_home_section(
        &self,
        section: CatalogSection,
        force: bool,
    ) -> Result<FetchOutcome<Vec<Track>>, CatalogError> {
        let limit = self.model.config.home_limit;
        let key = format!("{}:{}", section.resource(), limit);
        fetch_cached(
            &self.model.cache,
            &key,
            freshness_for(section.resource()),
            force,
            || self.model.catalog.get_section(section, limit),
        )
        .await
    }

    async fn set_home_result(
        &self,
        section: CatalogSection,
        result: Result<FetchOutcome<Vec<Track>>, CatalogError>,
    ) {
        match &result {
            Ok(outcome) => tracing::info!(
                section = section.resource(),
                tracks = outcome.data.len(),
                source = ?outcome.source,
                "Home section loaded"
            ),
            Err(e) => tracing::error!(section = section.resource(), error = %e, "Home section failed"),
        }
        self.model.set_home_section(section, to_loadable(result)).await;
    }

    pub async fn load_library(&self, force: bool) {
        self.model.mark_library_loading().await;
        let section = CatalogSection::RecentlyPlayed;
        let limit = self.model.config.library_limit;
        let key = format!("{}:{}", section.resource(), limit);

        let result = fetch_cached(
            &self.model.cache,
            &key,
            freshness::recently_played(),
            force,
            || self.model.catalog.get_section(section, limit),
        )
        .await;

        if let Err(e) = &result {
            tracing::error!(error = %e, "Library load failed");
        }
        self.model.set_library(to_loadable(result)).await;
        self.model.refresh_search().await;
    }

    /// Remove the selected entry in the background
    pub async fn remove_selected_from_library(&self) {
        let Some(track) = self.model.get_selected_track().await else {
            return;
        };
        let controller = self.clone();
        tokio::spawn(async move {
            controller.remove_from_library(track).await;
        });
    }

    /// Delete a recently played entry, then reload every list that shows that feed
    pub async fn remove_from_library(&self, track: Track) {
        if let Err(e) = self.model.catalog.delete_recently_played(&track.id).await {
            tracing::error!(id = %track.id, error = %e, "Failed to remove from library");
            self.model.set_error(AppController::format_error(&e)).await;
            return;
        }
        tracing::info!(id = %track.id, "Removed from library");

        let resource = CatalogSection::RecentlyPlayed.resource();
        let config = &self.model.config;
        self.model.cache.remove(&format!("{}:{}", resource, config.library_limit)).await;
        self.model.cache.remove(&format!("{}:{}", resource, config.home_limit)).await;

        futures::join!(
            self.load_library(true),
            self.load_home_section(CatalogSection::RecentlyPlayed, true)
        );
    }

    pub async fn load_playlist(&self, playlist_id: &str, force: bool) {
        self.model.open_playlist_content(playlist_id).await;
        let limit = self.model.config.library_limit;
        let key = format!("playlist-{}:{}", playlist_id, limit);

        let result = fetch_cached(
            &self.model.cache,
            &key,
            freshness::playlist_tracks(),
            force,
            || self.model.catalog.get_playlist_tracks(playlist_id, limit),
        )
        .await;

        match &result {
            Ok(outcome) => tracing::info!(playlist_id, tracks = outcome.data.len(), "Playlist loaded"),
            Err(e) => tracing::error!(playlist_id, error = %e, "Playlist load failed"),
        }
        self.model.set_playlist_tracks(playlist_id, to_loadable(result)).await;
        self.model.refresh_search().await;
    }

    pub async fn load_user_playlists(&self, force: bool) {
        let result = fetch_cached(
            &self.model.cache,
            "playlists",
            freshness::playlists(),
            force,
            || self.model.catalog.get_playlists(),
        )
        .await;

        match result {
            Ok(outcome) => {
                tracing::info!(count = outcome.data.len(), source = ?outcome.source, "Playlists loaded");
                self.model.set_playlists(outcome.data).await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load playlists");
                self.model.set_error(Self::format_error(&e)).await;
            }
        }
    }

    /// Background poll of the feeds that change on their own
    pub async fn refresh_home(&self) {
        tracing::debug!("Polling home sections");
        self.load_home(false).await;
        if self.model.current_view().await == View::Library {
            self.load_library(false).await;
        }
    }

    pub async fn open_sidebar_item(&self) {
        let Some(item) = self.model.get_selected_sidebar_item().await else {
            return;
        };
        let intent = match item {
            SidebarItem::Nav(NavEntry::Home) => Intent::HomeClick,
            SidebarItem::Nav(NavEntry::Search) => Intent::SearchClick,
            SidebarItem::Nav(NavEntry::Library) => Intent::LibraryToggle,
            SidebarItem::Playlist(playlist) => Intent::PlaylistClick(playlist.id),
        };
        self.dispatch(intent).await;
    }
}

//! Main application model with state management

use std::time::Instant;
use tokio::sync::Mutex;

use super::cache::LocalCache;
use super::catalog_client::CatalogClient;
use super::content::{CatalogSection, ContentState, Loadable, TrackList, Track};
use super::playback::PlaybackInfo;
use super::shell::{Effect, Intent, ShellState};
use super::types::{ActiveSection, PlaylistItem, SidebarItem, UiState, View};
use crate::config::AppConfig;

const ERROR_DISPLAY_SECS: u64 = 5;

/// Main application model containing all state
pub struct AppModel {
    pub catalog: CatalogClient,
    pub cache: LocalCache,
    pub config: AppConfig,
    shell: Mutex<ShellState>,
    ui_state: Mutex<UiState>,
    content_state: Mutex<ContentState>,
    should_quit: Mutex<bool>,
}

impl AppModel {
    pub fn new(config: AppConfig, catalog: CatalogClient) -> Self {
        let cache = LocalCache::new(config.cache_dir.clone());
        Self {
            catalog,
            cache,
            shell: Mutex::new(ShellState::new(config.default_volume)),
            config,
            ui_state: Mutex::new(UiState::default()),
            content_state: Mutex::new(ContentState::default()),
            should_quit: Mutex::new(false),
        }
    }

    // ========================================================================
    // Shell (navigation + transport)
    // ========================================================================

    pub async fn apply_intent(&self, intent: Intent) -> Effect {
        let mut shell = self.shell.lock().await;
        if !matches!(intent, Intent::Tick(_)) {
            tracing::debug!(?intent, view = %shell.view(), "Applying intent");
        }
        shell.apply(intent)
    }

    pub async fn get_shell_state(&self) -> ShellState {
        self.shell.lock().await.clone()
    }

    pub async fn current_view(&self) -> View {
        self.shell.lock().await.view().clone()
    }

    pub async fn get_playback_info(&self) -> PlaybackInfo {
        PlaybackInfo::from(&self.shell.lock().await.transport)
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    // ========================================================================
    // UI state
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn cycle_section_forward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.next();
    }

    pub async fn cycle_section_backward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.prev();
    }

    pub async fn set_active_section(&self, section: ActiveSection) {
        let mut state = self.ui_state.lock().await;
        state.active_section = section;
    }

    pub async fn sidebar_move_up(&self) {
        let mut state = self.ui_state.lock().await;
        state.sidebar_selected = state.sidebar_selected.saturating_sub(1);
    }

    pub async fn sidebar_move_down(&self) {
        let mut state = self.ui_state.lock().await;
        if state.sidebar_selected < state.sidebar_len().saturating_sub(1) {
            state.sidebar_selected += 1;
        }
    }

    pub async fn get_selected_sidebar_item(&self) -> Option<SidebarItem> {
        self.ui_state.lock().await.selected_sidebar_item()
    }

    pub async fn set_playlists(&self, playlists: Vec<PlaylistItem>) {
        let mut state = self.ui_state.lock().await;
        state.playlists = playlists;
        state.sidebar_selected = state.sidebar_selected.min(state.sidebar_len().saturating_sub(1));
    }

    pub async fn update_search_query(&self, query: String) {
        let mut state = self.ui_state.lock().await;
        state.search_query = query;
        let query = state.search_query.clone();
        drop(state);
        self.content_state.lock().await.run_search(&query);
    }

    pub async fn append_to_search(&self, c: char) {
        let query = {
            let mut state = self.ui_state.lock().await;
            state.search_query.push(c);
            state.search_query.clone()
        };
        self.content_state.lock().await.run_search(&query);
    }

    pub async fn backspace_search(&self) {
        let query = {
            let mut state = self.ui_state.lock().await;
            state.search_query.pop();
            state.search_query.clone()
        };
        self.content_state.lock().await.run_search(&query);
    }

    /// Re-run the current query, e.g. after new catalog data arrived
    pub async fn refresh_search(&self) {
        let query = self.ui_state.lock().await.search_query.clone();
        self.content_state.lock().await.run_search(&query);
    }

    pub async fn set_error(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.error_message = Some(message);
        state.error_timestamp = Some(Instant::now());
    }

    pub async fn clear_error(&self) {
        let mut state = self.ui_state.lock().await;
        state.error_message = None;
        state.error_timestamp = None;
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    pub async fn auto_clear_old_errors(&self) {
        let mut state = self.ui_state.lock().await;
        if let Some(timestamp) = state.error_timestamp {
            if timestamp.elapsed().as_secs() > ERROR_DISPLAY_SECS {
                state.error_message = None;
                state.error_timestamp = None;
            }
        }
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    // ========================================================================
    // Content
    // ========================================================================

    pub async fn get_content_state(&self) -> ContentState {
        self.content_state.lock().await.clone()
    }

    pub async fn set_home_section(&self, section: CatalogSection, data: Loadable) {
        let mut state = self.content_state.lock().await;
        state.home.section_mut(section).set(data);
    }

    /// Failed sections go back to loading; loaded sections keep their data while refreshing
    pub async fn mark_home_loading(&self) {
        let mut state = self.content_state.lock().await;
        for section in CatalogSection::ALL {
            let list = state.home.section_mut(section);
            if matches!(list.data, Loadable::Failed(_)) {
                list.set(Loadable::Loading);
            }
        }
    }

    pub async fn set_library(&self, data: Loadable) {
        self.content_state.lock().await.library.set(data);
    }

    pub async fn mark_library_loading(&self) {
        let mut state = self.content_state.lock().await;
        if !matches!(state.library.data, Loadable::Loaded { .. }) {
            state.library.set(Loadable::Loading);
        }
    }

    pub async fn open_playlist_content(&self, playlist_id: &str) {
        let mut state = self.content_state.lock().await;
        let same = matches!(&state.playlist, Some((id, _)) if id == playlist_id);
        if !same {
            state.playlist = Some((playlist_id.to_string(), TrackList::default()));
        }
    }

    /// Ignored if the user already moved on to another playlist
    pub async fn set_playlist_tracks(&self, playlist_id: &str, data: Loadable) {
        let mut state = self.content_state.lock().await;
        if let Some((id, list)) = &mut state.playlist {
            if id == playlist_id {
                list.set(data);
            }
        }
    }

    pub async fn content_move_up(&self) {
        let view = self.current_view().await;
        let mut state = self.content_state.lock().await;
        if let Some(list) = state.active_list_mut(&view) {
            list.move_up();
        }
    }

    pub async fn content_move_down(&self) {
        let view = self.current_view().await;
        let mut state = self.content_state.lock().await;
        if let Some(list) = state.active_list_mut(&view) {
            list.move_down();
        }
    }

    pub async fn focus_home_section(&self, forward: bool) {
        let mut state = self.content_state.lock().await;
        state.home.focused = if forward {
            state.home.focused.next()
        } else {
            state.home.focused.prev()
        };
    }

    pub async fn get_selected_track(&self) -> Option<Track> {
        let view = self.current_view().await;
        let state = self.content_state.lock().await;
        state.active_list(&view).and_then(|l| l.selected_track().cloned())
    }
}

//! Core type definitions for the application

use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Which section of the UI is currently active/focused
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveSection {
    Search,
    Sidebar,
    MainContent,
}

impl ActiveSection {
    pub fn next(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Sidebar,
            ActiveSection::Sidebar => ActiveSection::MainContent,
            ActiveSection::MainContent => ActiveSection::Search,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::MainContent,
            ActiveSection::Sidebar => ActiveSection::Search,
            ActiveSection::MainContent => ActiveSection::Sidebar,
        }
    }
}

/// Which content pane is visible
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Search,
    Library,
    Playlist(String),
}

impl View {
    /// Opaque history key, e.g. `"home"` or `"playlist-42"`
    pub fn key(&self) -> String {
        match self {
            View::Home => "home".to_string(),
            View::Search => "search".to_string(),
            View::Library => "library".to_string(),
            View::Playlist(id) => format!("playlist-{}", id),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Repeat mode state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RepeatMode {
    #[default]
    Off,
    All,
    One,
}

impl RepeatMode {
    /// Off -> All -> One -> Off
    pub fn next(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }
}

/// Fixed navigation entries at the top of the sidebar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavEntry {
    Home,
    Search,
    Library,
}

impl NavEntry {
    pub const ALL: [NavEntry; 3] = [NavEntry::Home, NavEntry::Search, NavEntry::Library];

    pub fn label(self) -> &'static str {
        match self {
            NavEntry::Home => "Home",
            NavEntry::Search => "Search",
            NavEntry::Library => "Your Library",
        }
    }
}

/// A user's playlist (for sidebar display)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub id: String,
    pub name: String,
}

/// Something in the sidebar the cursor can rest on
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SidebarItem {
    Nav(NavEntry),
    Playlist(PlaylistItem),
}

/// UI state for the application
#[derive(Clone)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub search_query: String,
    pub playlists: Vec<PlaylistItem>,
    /// Index over `NavEntry::ALL` followed by `playlists`
    pub sidebar_selected: usize,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    pub show_help_popup: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_section: ActiveSection::Sidebar,
            search_query: String::new(),
            playlists: vec![], // Will be loaded from the catalog
            sidebar_selected: 0,
            error_message: None,
            error_timestamp: None,
            show_help_popup: false,
        }
    }
}

impl UiState {
    pub fn sidebar_len(&self) -> usize {
        NavEntry::ALL.len() + self.playlists.len()
    }

    pub fn selected_sidebar_item(&self) -> Option<SidebarItem> {
        let nav_len = NavEntry::ALL.len();
        if self.sidebar_selected < nav_len {
            Some(SidebarItem::Nav(NavEntry::ALL[self.sidebar_selected]))
        } else {
            self.playlists
                .get(self.sidebar_selected - nav_len)
                .cloned()
                .map(SidebarItem::Playlist)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_keys_keep_the_string_convention() {
        assert_eq!(View::Home.key(), "home");
        assert_eq!(View::Search.key(), "search");
        assert_eq!(View::Library.key(), "library");
        assert_eq!(View::Playlist("42".into()).key(), "playlist-42");
    }

    #[test]
    fn repeat_mode_is_a_three_cycle() {
        for start in [RepeatMode::Off, RepeatMode::All, RepeatMode::One] {
            assert_eq!(start.next().next().next(), start);
            assert_ne!(start.next(), start);
        }
    }

    #[test]
    fn sidebar_selection_spans_nav_and_playlists() {
        let mut ui = UiState::default();
        ui.playlists = vec![PlaylistItem { id: "p1".into(), name: "Chill".into() }];
        assert_eq!(ui.sidebar_len(), 4);

        ui.sidebar_selected = 2;
        assert_eq!(ui.selected_sidebar_item(), Some(SidebarItem::Nav(NavEntry::Library)));

        ui.sidebar_selected = 3;
        assert!(matches!(ui.selected_sidebar_item(), Some(SidebarItem::Playlist(p)) if p.id == "p1"));

        ui.sidebar_selected = 4;
        assert_eq!(ui.selected_sidebar_item(), None);
    }
}

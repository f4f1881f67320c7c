//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (views, sections, UI state)
//! - `history`: Back/forward navigation stack
//! - `playback`: Transport state (play/pause, position, volume, shuffle, repeat, like)
//! - `shell`: Intent reducer tying navigation and transport together
//! - `content`: Catalog tracks and per-view load state
//! - `cache`: File-backed cache-aside fetch utility
//! - `catalog_client`: Supabase REST client
//! - `app_model`: Main application model with state management methods

mod types;
mod history;
mod playback;
mod shell;
mod content;
mod cache;
mod catalog_client;
mod app_model;

// Re-export all public types for convenient access
pub use types::{
    ActiveSection, NavEntry, RepeatMode, SidebarItem, UiState, View,
};

pub use history::NavigationHistory;

pub use playback::{PlaybackInfo, DEFAULT_VOLUME_PERCENT};

pub use shell::{Effect, Intent, ShellState};

pub use content::{
    CatalogSection, ContentState, Loadable, Track, TrackList,
};

pub use cache::{fetch_cached, DataSource, FetchOutcome};

pub use catalog_client::{CatalogClient, CatalogError};

pub use app_model::AppModel;

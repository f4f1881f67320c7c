//! Content pane data: catalog tracks and per-view load state

use serde::{Deserialize, Serialize};

use super::types::View;

/// A playable catalog record. Immutable once fetched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Row key within `source`
    pub id: String,
    /// Catalog track the row refers to, when it differs from the row key
    #[serde(default)]
    pub track_id: Option<String>,
    /// Table the row was read from
    #[serde(default)]
    pub source: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    #[serde(default)]
    pub album_art: Option<String>,
    /// Seconds
    pub duration: u32,
}

impl Track {
    /// Id of the underlying catalog track
    pub fn catalog_id(&self) -> &str {
        self.track_id.as_deref().unwrap_or(&self.id)
    }

    /// Row keys are only unique per table, so identity is `(source, id)`
    pub fn is_same_entry(&self, other: &Track) -> bool {
        self.source == other.source && self.id == other.id
    }

    pub fn matches(&self, query_lower: &str) -> bool {
        self.title.to_lowercase().contains(query_lower)
            || self.artist.to_lowercase().contains(query_lower)
            || self.album.to_lowercase().contains(query_lower)
    }
}

/// The three home feeds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CatalogSection {
    RecentlyPlayed,
    MadeForYou,
    PopularAlbums,
}

impl CatalogSection {
    pub const ALL: [CatalogSection; 3] = [
        CatalogSection::RecentlyPlayed,
        CatalogSection::MadeForYou,
        CatalogSection::PopularAlbums,
    ];

    pub fn title(self) -> &'static str {
        match self {
            CatalogSection::RecentlyPlayed => "Recently played",
            CatalogSection::MadeForYou => "Made for you",
            CatalogSection::PopularAlbums => "Popular albums",
        }
    }

    /// Resource name used for cache keys and logs
    pub fn resource(self) -> &'static str {
        match self {
            CatalogSection::RecentlyPlayed => "recently-played",
            CatalogSection::MadeForYou => "made-for-you",
            CatalogSection::PopularAlbums => "popular-albums",
        }
    }

    fn index(self) -> usize {
        match self {
            CatalogSection::RecentlyPlayed => 0,
            CatalogSection::MadeForYou => 1,
            CatalogSection::PopularAlbums => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Load state of one track list
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Loadable {
    #[default]
    Loading,
    Loaded {
        tracks: Vec<Track>,
        /// Set when served from cache after a failed fetch
        stale_error: Option<String>,
    },
    Failed(String),
}

impl Loadable {
    pub fn tracks(&self) -> &[Track] {
        match self {
            Loadable::Loaded { tracks, .. } => tracks,
            _ => &[],
        }
    }
}

/// Track list with a cursor
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackList {
    pub data: Loadable,
    pub selected: usize,
}

impl TrackList {
    pub fn set(&mut self, data: Loadable) {
        let len = data.tracks().len();
        self.data = data;
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected < self.data.tracks().len().saturating_sub(1) {
            self.selected += 1;
        }
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.data.tracks().get(self.selected)
    }
}

/// Home page: three feeds, one of them focused
#[derive(Clone, Debug, PartialEq)]
pub struct HomeContent {
    pub recently_played: TrackList,
    pub made_for_you: TrackList,
    pub popular_albums: TrackList,
    pub focused: CatalogSection,
}

impl Default for HomeContent {
    fn default() -> Self {
        Self {
            recently_played: TrackList::default(),
            made_for_you: TrackList::default(),
            popular_albums: TrackList::default(),
            focused: CatalogSection::RecentlyPlayed,
        }
    }
}

impl HomeContent {
    pub fn section(&self, section: CatalogSection) -> &TrackList {
        match section {
            CatalogSection::RecentlyPlayed => &self.recently_played,
            CatalogSection::MadeForYou => &self.made_for_you,
            CatalogSection::PopularAlbums => &self.popular_albums,
        }
    }

    pub fn section_mut(&mut self, section: CatalogSection) -> &mut TrackList {
        match section {
            CatalogSection::RecentlyPlayed => &mut self.recently_played,
            CatalogSection::MadeForYou => &mut self.made_for_you,
            CatalogSection::PopularAlbums => &mut self.popular_albums,
        }
    }
}

/// State for the main content area, kept per view so back/forward is instant
#[derive(Clone, Debug, Default)]
pub struct ContentState {
    pub home: HomeContent,
    pub library: TrackList,
    pub search: TrackList,
    /// Tracks of the most recently opened playlist
    pub playlist: Option<(String, TrackList)>,
}

impl ContentState {
    /// Every track loaded in the home feeds and the library, in display order.
    /// A row shown in both places appears once.
    pub fn known_tracks(&self) -> Vec<Track> {
        let mut seen = std::collections::HashSet::new();
        CatalogSection::ALL
            .iter()
            .flat_map(|s| self.home.section(*s).data.tracks().iter())
            .chain(self.library.data.tracks().iter())
            .filter(|t| seen.insert((t.source.clone(), t.id.clone())))
            .cloned()
            .collect()
    }

    pub fn run_search(&mut self, query: &str) {
        let query_lower = query.trim().to_lowercase();
        let tracks = if query_lower.is_empty() {
            Vec::new()
        } else {
            self.known_tracks()
                .into_iter()
                .filter(|t| t.matches(&query_lower))
                .collect()
        };
        self.search.selected = 0;
        self.search.set(Loadable::Loaded { tracks, stale_error: None });
    }

    /// The list the cursor acts on for `view`
    pub fn active_list_mut(&mut self, view: &View) -> Option<&mut TrackList> {
        match view {
            View::Home => {
                let focused = self.home.focused;
                Some(self.home.section_mut(focused))
            }
            View::Search => Some(&mut self.search),
            View::Library => Some(&mut self.library),
            View::Playlist(id) => match &mut self.playlist {
                Some((loaded_id, list)) if loaded_id == id => Some(list),
                _ => None,
            },
        }
    }

    pub fn active_list(&self, view: &View) -> Option<&TrackList> {
        match view {
            View::Home => Some(self.home.section(self.home.focused)),
            View::Search => Some(&self.search),
            View::Library => Some(&self.library),
            View::Playlist(id) => match &self.playlist {
                Some((loaded_id, list)) if loaded_id == id => Some(list),
                _ => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str, title: &str, artist: &str) -> Track {
        row("recently_played", id, title, artist)
    }

    fn row(source: &str, id: &str, title: &str, artist: &str) -> Track {
        Track {
            id: id.to_string(),
            track_id: None,
            source: source.to_string(),
            title: title.to_string(),
            artist: artist.to_string(),
            album: "Album".to_string(),
            album_art: None,
            duration: 120,
        }
    }

    fn loaded(tracks: Vec<Track>) -> Loadable {
        Loadable::Loaded { tracks, stale_error: None }
    }

    #[test]
    fn track_json_uses_api_field_names() {
        let json = r#"{"id":"t1","title":"Song","artist":"A","album":"B","albumArt":"x.jpg","duration":200}"#;
        let track: Track = serde_json::from_str(json).unwrap();
        assert_eq!(track.album_art.as_deref(), Some("x.jpg"));
        assert_eq!(track.duration, 200);

        let back = serde_json::to_value(&track).unwrap();
        assert!(back.get("albumArt").is_some());
    }

    #[test]
    fn selection_stays_in_bounds_when_data_shrinks() {
        let mut list = TrackList::default();
        list.set(loaded(vec![track("1", "a", "x"), track("2", "b", "x"), track("3", "c", "x")]));
        list.move_down();
        list.move_down();
        list.move_down();
        assert_eq!(list.selected, 2);

        list.set(loaded(vec![track("1", "a", "x")]));
        assert_eq!(list.selected, 0);
        list.move_up();
        assert_eq!(list.selected, 0);
    }

    #[test]
    fn search_keeps_rows_from_different_tables_apart() {
        let mut content = ContentState::default();
        content.home.recently_played.set(loaded(vec![track("1", "Blue Sky", "Nova")]));
        content.home.made_for_you.set(loaded(vec![row("made_for_you", "1", "Red", "Sky Walkers")]));
        content.library.set(loaded(vec![track("1", "Blue Sky", "Nova"), track("3", "Green", "Moss")]));

        content.run_search("red");
        let titles: Vec<_> = content.search.data.tracks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Red"]);

        // The recently played row is shown on home and in the library but listed once
        content.run_search("SKY");
        let titles: Vec<_> = content.search.data.tracks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Blue Sky", "Red"]);

        content.run_search("   ");
        assert!(content.search.data.tracks().is_empty());
    }

    #[test]
    fn open_playlist_is_not_searched() {
        let mut content = ContentState::default();
        let mut list = TrackList::default();
        list.set(loaded(vec![row("playlist_tracks", "5", "Red", "Moss")]));
        content.playlist = Some(("7".to_string(), list));

        content.run_search("red");
        assert!(content.search.data.tracks().is_empty());
    }

    #[test]
    fn entry_identity_includes_the_source_table() {
        let recent = track("1", "Blue", "Nova");
        let picked = row("made_for_you", "1", "Red", "Nova");
        assert!(!recent.is_same_entry(&picked));
        assert!(recent.is_same_entry(&track("1", "Blue", "Nova")));

        let replay = Track { track_id: Some("t-42".into()), ..recent };
        assert_eq!(replay.catalog_id(), "t-42");
        assert_eq!(picked.catalog_id(), "1");
    }

    #[test]
    fn playlist_list_only_matches_its_own_id() {
        let mut content = ContentState::default();
        content.playlist = Some(("7".to_string(), TrackList::default()));
        assert!(content.active_list(&View::Playlist("7".into())).is_some());
        assert!(content.active_list(&View::Playlist("8".into())).is_none());
    }

    #[test]
    fn sections_cycle() {
        let s = CatalogSection::RecentlyPlayed;
        assert_eq!(s.next().next().next(), s);
        assert_eq!(s.prev(), CatalogSection::PopularAlbums);
    }
}

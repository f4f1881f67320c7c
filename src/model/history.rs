//! Back/forward navigation history with browser semantics

use super::types::View;

/// Ordered list of visited views plus a cursor marking the current one.
///
/// Never empty, so `cursor` is always a valid index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationHistory {
    entries: Vec<View>,
    cursor: usize,
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::new(View::Home)
    }
}

impl NavigationHistory {
    pub fn new(initial: View) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &View {
        &self.entries[self.cursor]
    }

    pub fn entries(&self) -> &[View] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Push `target`, dropping any forward entries.
    ///
    /// Returns false (and leaves history untouched) when `target` is already current.
    pub fn navigate_to(&mut self, target: View) -> bool {
        if *self.current() == target {
            return false;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(target);
        self.cursor = self.entries.len() - 1;
        true
    }

    pub fn go_back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn go_forward(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.cursor += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(history: &NavigationHistory) -> Vec<String> {
        history.entries().iter().map(View::key).collect()
    }

    fn playlist(id: &str) -> View {
        View::Playlist(id.to_string())
    }

    #[test]
    fn starts_at_home() {
        let history = NavigationHistory::default();
        assert_eq!(keys(&history), vec!["home"]);
        assert_eq!(history.cursor(), 0);
        assert!(!history.can_go_back());
        assert!(!history.can_go_forward());
    }

    #[test]
    fn cursor_stays_valid_for_any_navigation_sequence() {
        let targets = [
            View::Search,
            View::Library,
            View::Search,
            playlist("1"),
            View::Home,
            View::Home,
            playlist("2"),
        ];
        let mut history = NavigationHistory::default();
        // Interleave back/forward so truncation paths get exercised too
        for (i, target) in targets.iter().cycle().take(60).enumerate() {
            match i % 5 {
                3 => {
                    history.go_back();
                }
                4 => {
                    history.go_forward();
                }
                _ => {
                    history.navigate_to(target.clone());
                }
            }
            assert!(history.cursor() < history.entries().len());
        }
    }

    #[test]
    fn go_back_at_start_is_a_noop() {
        let mut history = NavigationHistory::default();
        let before = history.clone();
        assert!(!history.go_back());
        assert_eq!(history, before);
    }

    #[test]
    fn go_forward_at_end_is_a_noop() {
        let mut history = NavigationHistory::default();
        history.navigate_to(View::Search);
        let before = history.clone();
        assert!(!history.go_forward());
        assert_eq!(history, before);
    }

    #[test]
    fn back_returns_to_previous_view() {
        let mut history = NavigationHistory::default();
        history.navigate_to(View::Library);
        let after_a = history.current().clone();
        history.navigate_to(playlist("7"));
        history.go_back();
        assert_eq!(*history.current(), after_a);
    }

    #[test]
    fn navigating_after_back_discards_forward_entries() {
        let mut history = NavigationHistory::default();
        history.navigate_to(View::Search);
        history.go_back();
        history.navigate_to(View::Library);
        assert!(!history.go_forward());
        assert_eq!(keys(&history), vec!["home", "library"]);
    }

    #[test]
    fn navigating_to_current_view_does_not_duplicate() {
        let mut history = NavigationHistory::default();
        assert!(history.navigate_to(View::Search));
        assert!(!history.navigate_to(View::Search));
        assert_eq!(keys(&history), vec!["home", "search"]);
        assert_eq!(history.cursor(), 1);
    }

    #[test]
    fn distinct_playlists_are_distinct_entries() {
        let mut history = NavigationHistory::default();
        history.navigate_to(playlist("1"));
        history.navigate_to(playlist("2"));
        assert_eq!(keys(&history), vec!["home", "playlist-1", "playlist-2"]);
    }

    #[test]
    fn sidebar_walkthrough() {
        let mut history = NavigationHistory::default();

        history.navigate_to(View::Search);
        assert_eq!(keys(&history), vec!["home", "search"]);
        assert_eq!(history.cursor(), 1);

        history.navigate_to(playlist("42"));
        assert_eq!(keys(&history), vec!["home", "search", "playlist-42"]);
        assert_eq!(history.cursor(), 2);

        history.go_back();
        assert_eq!(*history.current(), View::Search);
        assert_eq!(history.cursor(), 1);

        history.navigate_to(View::Library);
        assert_eq!(keys(&history), vec!["home", "search", "library"]);
        assert_eq!(history.cursor(), 2);

        let before = history.clone();
        assert!(!history.go_forward());
        assert_eq!(history, before);
    }
}

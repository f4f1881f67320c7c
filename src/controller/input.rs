//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{ActiveSection, Intent, View};
use super::playback::SEEK_STEP_SECS;
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = &self.model;

        // Handle error message first (blocks all other interactions)
        if model.has_error().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                model.clear_error().await;
            }
            return Ok(());
        }

        // Handle help popup
        if model.is_help_popup_open().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H')) {
                model.hide_help_popup().await;
            }
            return Ok(());
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        // History works from every section
        match key.code {
            KeyCode::Left if alt => {
                self.dispatch(Intent::GoBack).await;
                return Ok(());
            }
            KeyCode::Right if alt => {
                self.dispatch(Intent::GoForward).await;
                return Ok(());
            }
            KeyCode::F(5) => {
                self.reload_current_view().await;
                return Ok(());
            }
            KeyCode::Char('r') if ctrl => {
                self.reload_current_view().await;
                return Ok(());
            }
            _ => {}
        }

        let ui_state = model.get_ui_state().await;

        // Handle search input when in search section
        if ui_state.active_section == ActiveSection::Search {
            match key.code {
                KeyCode::Tab => {
                    model.cycle_section_forward().await;
                    return Ok(());
                }
                KeyCode::BackTab => {
                    model.cycle_section_backward().await;
                    return Ok(());
                }
                KeyCode::Enter => {
                    self.dispatch(Intent::SearchClick).await;
                    model.set_active_section(ActiveSection::MainContent).await;
                    return Ok(());
                }
                KeyCode::Esc => {
                    model.update_search_query(String::new()).await;
                    return Ok(());
                }
                KeyCode::Backspace => {
                    model.backspace_search().await;
                    return Ok(());
                }
                KeyCode::Char(c) => {
                    // Q still quits even in search mode when Ctrl is pressed
                    if (c == 'q' || c == 'Q') && ctrl {
                        model.set_should_quit(true).await;
                        return Ok(());
                    }
                    model.append_to_search(c).await;
                    if self.model.current_view().await != View::Search {
                        self.dispatch(Intent::SearchClick).await;
                    }
                    return Ok(());
                }
                _ => {}
            }
        }

        let current_view = model.current_view().await;
        let on_home = current_view == View::Home;
        let on_library = current_view == View::Library;
        match ui_state.active_section {
            ActiveSection::Sidebar => match key.code {
                KeyCode::Up => {
                    model.sidebar_move_up().await;
                    return Ok(());
                }
                KeyCode::Down => {
                    model.sidebar_move_down().await;
                    return Ok(());
                }
                KeyCode::Enter => {
                    self.open_sidebar_item().await;
                    return Ok(());
                }
                _ => {}
            },
            ActiveSection::MainContent => match key.code {
                KeyCode::Left | KeyCode::Right if on_home => {
                    model.focus_home_section(key.code == KeyCode::Right).await;
                    return Ok(());
                }
                KeyCode::Up => {
                    model.content_move_up().await;
                    return Ok(());
                }
                KeyCode::Down => {
                    model.content_move_down().await;
                    return Ok(());
                }
                KeyCode::Enter => {
                    self.play_selected().await;
                    return Ok(());
                }
                KeyCode::Char('d') | KeyCode::Delete if on_library => {
                    self.remove_selected_from_library().await;
                    return Ok(());
                }
                KeyCode::Backspace | KeyCode::Esc => {
                    self.dispatch(Intent::GoBack).await;
                    return Ok(());
                }
                _ => {}
            },
            ActiveSection::Search => {}
        }

        // Global keybindings
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true).await;
            }
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    model.cycle_section_backward().await;
                } else {
                    model.cycle_section_forward().await;
                }
            }
            KeyCode::BackTab => {
                model.cycle_section_backward().await;
            }
            KeyCode::Char('[') => self.dispatch(Intent::GoBack).await,
            KeyCode::Char(']') => self.dispatch(Intent::GoForward).await,
            KeyCode::Char('1') => self.dispatch(Intent::HomeClick).await,
            KeyCode::Char('2') => self.dispatch(Intent::SearchClick).await,
            KeyCode::Char('3') => self.dispatch(Intent::LibraryToggle).await,
            // Play/Pause toggle
            KeyCode::Char(' ') => self.dispatch(Intent::TogglePlayPause).await,
            KeyCode::Char('n') | KeyCode::Char('N') => self.dispatch(Intent::Next).await,
            KeyCode::Char('p') | KeyCode::Char('P') => self.dispatch(Intent::Previous).await,
            KeyCode::Char('s') | KeyCode::Char('S') => self.dispatch(Intent::ToggleShuffle).await,
            KeyCode::Char('r') | KeyCode::Char('R') => self.dispatch(Intent::CycleRepeatMode).await,
            KeyCode::Char('x') | KeyCode::Char('X') => self.dispatch(Intent::ToggleLiked).await,
            KeyCode::Char('+') | KeyCode::Char('=') => self.dispatch(Intent::VolumeUp).await,
            KeyCode::Char('-') => self.dispatch(Intent::VolumeDown).await,
            KeyCode::Char(',') => self.seek_relative(-SEEK_STEP_SECS).await,
            KeyCode::Char('.') => self.seek_relative(SEEK_STEP_SECS).await,
            // Focus search
            KeyCode::Char('g') | KeyCode::Char('G') => {
                model.set_active_section(ActiveSection::Search).await;
            }
            // Show help popup
            KeyCode::Char('h') | KeyCode::Char('H') => {
                model.show_help_popup().await;
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::AppConfig;
    use crate::model::{AppModel, CatalogClient, RepeatMode};

    fn controller() -> AppController {
        let catalog = CatalogClient::new(reqwest::Client::new(), None, None);
        let config = AppConfig {
            cache_dir: std::env::temp_dir().join("spotify-shell-input-tests"),
            ..AppConfig::default()
        };
        AppController::new(Arc::new(AppModel::new(config, catalog)))
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn transport_keys_reach_the_shell() {
        let controller = controller();
        controller.handle_key_event(press(KeyCode::Char('s'))).await.unwrap();
        controller.handle_key_event(press(KeyCode::Char('r'))).await.unwrap();
        controller.handle_key_event(press(KeyCode::Char('-'))).await.unwrap();

        let state = controller.model.get_playback_info().await.state;
        assert!(state.shuffle);
        assert_eq!(state.repeat_mode, RepeatMode::All);
        assert_eq!(state.volume, 75);
    }

    #[tokio::test]
    async fn bracket_keys_walk_history() {
        let controller = controller();
        controller.handle_key_event(press(KeyCode::Char('3'))).await.unwrap();
        assert_eq!(controller.model.current_view().await, View::Library);

        controller.handle_key_event(press(KeyCode::Char('['))).await.unwrap();
        assert_eq!(controller.model.current_view().await, View::Home);

        controller.handle_key_event(press(KeyCode::Char(']'))).await.unwrap();
        assert_eq!(controller.model.current_view().await, View::Library);
    }

    #[tokio::test]
    async fn typing_in_search_switches_to_search_view() {
        let controller = controller();
        controller.model.set_active_section(ActiveSection::Search).await;
        controller.handle_key_event(press(KeyCode::Char('a'))).await.unwrap();
        controller.handle_key_event(press(KeyCode::Char('q'))).await.unwrap();

        assert_eq!(controller.model.current_view().await, View::Search);
        assert_eq!(controller.model.get_ui_state().await.search_query, "aq");
        assert!(!controller.model.should_quit().await);
    }

    #[tokio::test]
    async fn error_overlay_swallows_keys_until_dismissed() {
        let controller = controller();
        controller.model.set_error("boom".to_string()).await;
        controller.handle_key_event(press(KeyCode::Char('s'))).await.unwrap();
        assert!(!controller.model.get_playback_info().await.state.shuffle);

        controller.handle_key_event(press(KeyCode::Esc)).await.unwrap();
        assert!(!controller.model.has_error().await);
    }
}

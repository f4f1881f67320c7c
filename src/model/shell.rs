//! Player/navigation shell: one state struct, intents in, effects out

use std::time::Duration;

use super::content::Track;
use super::history::NavigationHistory;
use super::playback::Transport;
use super::types::View;

/// A discrete user action coming from the sidebar, content pane or player bar
#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    // Sidebar
    HomeClick,
    SearchClick,
    LibraryToggle,
    PlaylistClick(String),
    NavigateTo(View),
    GoBack,
    GoForward,
    // Content pane / sidebar
    PlayTrack(Track),
    // Player bar
    TogglePlayPause,
    Seek(f64),
    SetVolume(u8),
    VolumeUp,
    VolumeDown,
    ToggleShuffle,
    CycleRepeatMode,
    ToggleLiked,
    Next,
    Previous,
    Tick(Duration),
}

/// Follow-up work for the controller after an intent was applied
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    None,
    ViewChanged(View),
    TrackStarted(Track),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShellState {
    pub history: NavigationHistory,
    pub transport: Transport,
}

impl ShellState {
    pub fn new(volume: u8) -> Self {
        Self {
            history: NavigationHistory::default(),
            transport: Transport::new(volume),
        }
    }

    pub fn view(&self) -> &View {
        self.history.current()
    }

    pub fn apply(&mut self, intent: Intent) -> Effect {
        match intent {
            Intent::HomeClick => self.navigate(View::Home),
            Intent::SearchClick => self.navigate(View::Search),
            Intent::LibraryToggle => {
                let target = if *self.view() == View::Library {
                    View::Home
                } else {
                    View::Library
                };
                self.navigate(target)
            }
            Intent::PlaylistClick(id) => self.navigate(View::Playlist(id)),
            Intent::NavigateTo(view) => self.navigate(view),
            Intent::GoBack => {
                if self.history.go_back() {
                    Effect::ViewChanged(self.view().clone())
                } else {
                    Effect::None
                }
            }
            Intent::GoForward => {
                if self.history.go_forward() {
                    Effect::ViewChanged(self.view().clone())
                } else {
                    Effect::None
                }
            }
            Intent::PlayTrack(track) => {
                self.transport.play(track.clone());
                Effect::TrackStarted(track)
            }
            Intent::TogglePlayPause => self.transport_only(Transport::toggle_play_pause),
            Intent::Seek(time) => self.transport_only(|t| t.seek(time)),
            Intent::SetVolume(volume) => self.transport_only(|t| t.set_volume(volume)),
            Intent::VolumeUp => self.transport_only(Transport::volume_up),
            Intent::VolumeDown => self.transport_only(Transport::volume_down),
            Intent::ToggleShuffle => self.transport_only(Transport::toggle_shuffle),
            Intent::CycleRepeatMode => self.transport_only(Transport::cycle_repeat_mode),
            Intent::ToggleLiked => self.transport_only(Transport::toggle_liked),
            Intent::Next => self.transport_only(Transport::next),
            Intent::Previous => self.transport_only(Transport::previous),
            Intent::Tick(elapsed) => self.transport_only(|t| t.tick(elapsed)),
        }
    }

    fn navigate(&mut self, target: View) -> Effect {
        if self.history.navigate_to(target) {
            Effect::ViewChanged(self.view().clone())
        } else {
            Effect::None
        }
    }

    fn transport_only(&mut self, update: impl FnOnce(&mut Transport)) -> Effect {
        update(&mut self.transport);
        Effect::None
    }
}

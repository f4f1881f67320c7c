//! Playback-related types and state management

use std::time::Duration;

use super::content::Track;
use super::types::RepeatMode;

pub const DEFAULT_VOLUME_PERCENT: u8 = 80;
pub const MAX_VOLUME_PERCENT: u8 = 100;
pub const VOLUME_STEP: u8 = 5;

/// Player-bar flags. There is no audio engine behind these.
#[derive(Clone, Debug, PartialEq)]
pub struct TransportState {
    pub is_playing: bool,
    /// Seconds into the current track, always within `[0, duration]`
    pub current_time: f64,
    pub volume: u8,
    pub shuffle: bool,
    pub repeat_mode: RepeatMode,
    /// Applies to the loaded track only; reset on every `play`
    pub liked: bool,
}

impl Default for TransportState {
    fn default() -> Self {
        Self::with_volume(DEFAULT_VOLUME_PERCENT)
    }
}

impl TransportState {
    pub fn with_volume(volume: u8) -> Self {
        Self {
            is_playing: false,
            current_time: 0.0,
            volume: volume.min(MAX_VOLUME_PERCENT),
            shuffle: false,
            repeat_mode: RepeatMode::Off,
            liked: false,
        }
    }
}

/// Transport state plus the track it applies to
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transport {
    pub state: TransportState,
    pub current_track: Option<Track>,
}

impl Transport {
    pub fn new(volume: u8) -> Self {
        Self {
            state: TransportState::with_volume(volume),
            current_track: None,
        }
    }

    fn duration(&self) -> f64 {
        self.current_track
            .as_ref()
            .map(|t| t.duration as f64)
            .unwrap_or(0.0)
    }

    pub fn play(&mut self, track: Track) {
        self.current_track = Some(track);
        self.state.is_playing = true;
        self.state.current_time = 0.0;
        self.state.liked = false;
    }

    pub fn toggle_play_pause(&mut self) {
        self.state.is_playing = !self.state.is_playing;
    }

    /// Moves the playhead, clamped to the loaded track.
    pub fn seek(&mut self, time: f64) {
        let time = if time.is_finite() { time } else { 0.0 };
        self.state.current_time = time.clamp(0.0, self.duration());
    }

    pub fn set_volume(&mut self, volume: u8) {
        self.state.volume = volume.min(MAX_VOLUME_PERCENT);
    }

    pub fn volume_up(&mut self) {
        self.set_volume(self.state.volume.saturating_add(VOLUME_STEP));
    }

    pub fn volume_down(&mut self) {
        self.set_volume(self.state.volume.saturating_sub(VOLUME_STEP));
    }

    pub fn toggle_shuffle(&mut self) {
        self.state.shuffle = !self.state.shuffle;
    }

    pub fn cycle_repeat_mode(&mut self) {
        self.state.repeat_mode = self.state.repeat_mode.next();
    }

    pub fn toggle_liked(&mut self) {
        self.state.liked = !self.state.liked;
    }

    /// Restart the current track. No queue, so nothing to advance to.
    pub fn next(&mut self) {
        self.state.current_time = 0.0;
    }

    pub fn previous(&mut self) {
        self.state.current_time = 0.0;
    }

    /// Advance the progress clock while playing.
    pub fn tick(&mut self, elapsed: Duration) {
        if !self.state.is_playing || self.current_track.is_none() {
            return;
        }
        let duration = self.duration();
        let position = self.state.current_time + elapsed.as_secs_f64();
        if position < duration {
            self.state.current_time = position;
        } else if self.state.repeat_mode == RepeatMode::One {
            self.state.current_time = 0.0;
        } else {
            self.state.current_time = duration;
            self.state.is_playing = false;
        }
    }
}

/// Complete playback information for rendering the UI
#[derive(Clone, Debug)]
pub struct PlaybackInfo {
    pub track: Option<Track>,
    pub progress_secs: f64,
    pub duration_secs: u32,
    pub state: TransportState,
}

impl From<&Transport> for PlaybackInfo {
    fn from(transport: &Transport) -> Self {
        Self {
            track: transport.current_track.clone(),
            progress_secs: transport.state.current_time,
            duration_secs: transport.current_track.as_ref().map(|t| t.duration).unwrap_or(0),
            state: transport.state.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str, duration: u32) -> Track {
        Track {
            id: id.to_string(),
            track_id: None,
            source: "made_for_you".to_string(),
            title: format!("Track {}", id),
            artist: "Artist".to_string(),
            album: "Album".to_string(),
            album_art: None,
            duration,
        }
    }

    #[test]
    fn initial_state() {
        let transport = Transport::default();
        assert!(transport.current_track.is_none());
        assert!(!transport.state.is_playing);
        assert_eq!(transport.state.current_time, 0.0);
        assert_eq!(transport.state.volume, 80);
        assert!(!transport.state.shuffle);
        assert_eq!(transport.state.repeat_mode, RepeatMode::Off);
    }

    #[test]
    fn play_always_restarts_and_plays() {
        let mut transport = Transport::default();
        transport.play(track("a", 300));
        transport.seek(120.0);
        transport.toggle_play_pause();
        transport.toggle_liked();

        transport.play(track("b", 180));
        assert_eq!(transport.current_track.as_ref().map(|t| t.id.as_str()), Some("b"));
        assert!(transport.state.is_playing);
        assert_eq!(transport.state.current_time, 0.0);
        assert!(!transport.state.liked);
    }

    #[test]
    fn play_keeps_shuffle_repeat_and_volume() {
        let mut transport = Transport::default();
        transport.toggle_shuffle();
        transport.cycle_repeat_mode();
        transport.set_volume(30);
        transport.play(track("a", 100));
        assert!(transport.state.shuffle);
        assert_eq!(transport.state.repeat_mode, RepeatMode::All);
        assert_eq!(transport.state.volume, 30);
    }

    #[test]
    fn toggle_play_pause_keeps_position() {
        let mut transport = Transport::default();
        transport.play(track("a", 100));
        transport.seek(42.0);
        transport.toggle_play_pause();
        assert!(!transport.state.is_playing);
        assert_eq!(transport.state.current_time, 42.0);
    }

    #[test]
    fn seek_past_end_clamps_to_duration() {
        let mut transport = Transport::default();
        transport.play(track("t1", 200));
        transport.seek(250.0);
        assert_eq!(transport.state.current_time, 200.0);
    }

    #[test]
    fn seek_clamps_negative_and_nan_to_zero() {
        let mut transport = Transport::default();
        transport.play(track("t1", 200));
        transport.seek(-5.0);
        assert_eq!(transport.state.current_time, 0.0);
        transport.seek(f64::NAN);
        assert_eq!(transport.state.current_time, 0.0);
    }

    #[test]
    fn seek_without_track_stays_at_zero() {
        let mut transport = Transport::default();
        transport.seek(10.0);
        assert_eq!(transport.state.current_time, 0.0);
    }

    #[test]
    fn volume_is_clamped() {
        let mut transport = Transport::default();
        transport.set_volume(250);
        assert_eq!(transport.state.volume, 100);
        transport.volume_up();
        assert_eq!(transport.state.volume, 100);
        transport.set_volume(3);
        transport.volume_down();
        assert_eq!(transport.state.volume, 0);
    }

    #[test]
    fn repeat_mode_cycles_back_after_three() {
        let mut transport = Transport::default();
        let original = transport.state.repeat_mode;
        transport.cycle_repeat_mode();
        transport.cycle_repeat_mode();
        transport.cycle_repeat_mode();
        assert_eq!(transport.state.repeat_mode, original);
    }

    #[test]
    fn next_and_previous_only_rewind() {
        let mut transport = Transport::default();
        transport.play(track("a", 100));
        transport.seek(50.0);
        transport.next();
        assert_eq!(transport.state.current_time, 0.0);
        assert_eq!(transport.current_track.as_ref().map(|t| t.id.as_str()), Some("a"));
        transport.seek(50.0);
        transport.previous();
        assert_eq!(transport.state.current_time, 0.0);
        assert!(transport.state.is_playing);
    }

    #[test]
    fn tick_advances_and_stops_at_end() {
        let mut transport = Transport::default();
        transport.play(track("a", 10));
        transport.tick(Duration::from_secs(4));
        assert_eq!(transport.state.current_time, 4.0);
        transport.tick(Duration::from_secs(20));
        assert_eq!(transport.state.current_time, 10.0);
        assert!(!transport.state.is_playing);
    }

    #[test]
    fn tick_loops_with_repeat_one() {
        let mut transport = Transport::default();
        transport.play(track("a", 10));
        transport.cycle_repeat_mode();
        transport.cycle_repeat_mode();
        assert_eq!(transport.state.repeat_mode, RepeatMode::One);
        transport.tick(Duration::from_secs(11));
        assert_eq!(transport.state.current_time, 0.0);
        assert!(transport.state.is_playing);
    }

    #[test]
    fn tick_while_paused_does_nothing() {
        let mut transport = Transport::default();
        transport.play(track("a", 10));
        transport.toggle_play_pause();
        transport.tick(Duration::from_secs(3));
        assert_eq!(transport.state.current_time, 0.0);
    }
}

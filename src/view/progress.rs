//! Player bar rendering

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Gauge},
    Frame,
};

use crate::model::{PlaybackInfo, RepeatMode};
use super::utils::format_duration;

pub fn render_player_bar(frame: &mut Frame, area: Rect, playback: &PlaybackInfo) {
    let state = &playback.state;

    let status_text = match &playback.track {
        None => " No track playing".to_string(),
        Some(track) => {
            let icon = if state.is_playing { " ▶" } else { "⏸ " };
            let heart = if state.liked { " ♥" } else { " ♡" };
            format!("{} {} | {} ({}){}", icon, track.title, track.artist, track.album, heart)
        }
    };

    let shuffle_text = if state.shuffle { "Shuffle: On" } else { "Shuffle: Off" };
    let repeat_text = match state.repeat_mode {
        RepeatMode::Off => "Repeat: Off",
        RepeatMode::All => "Repeat: All",
        RepeatMode::One => "Repeat: One",
    };
    let volume_text = format!("Vol: {}%", state.volume);

    let time_str = format!(
        "{} / {}",
        format_duration(playback.progress_secs),
        format_duration(playback.duration_secs as f64)
    );

    let progress_ratio = if playback.duration_secs > 0 {
        (playback.progress_secs / playback.duration_secs as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let title = format!("{} ", status_text);
    let controls_info = format!(" {} | {} | {} ", shuffle_text, repeat_text, volume_text);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_bottom(Line::from(controls_info).right_aligned()),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(progress_ratio)
        .label(time_str);

    frame.render_widget(gauge, area);
}

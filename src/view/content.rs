//! Main content area rendering (home feeds, search, library, playlists)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, ListItem, Paragraph, Wrap},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{
    ActiveSection, CatalogSection, ContentState, Loadable, Track, TrackList, UiState, View,
};
use super::utils::{
    calculate_track_column_widths, focus_border, format_duration, render_scrollable_list,
    truncate_string,
};

pub fn render_main_content(
    frame: &mut Frame,
    area: Rect,
    view: &View,
    ui_state: &UiState,
    content_state: &ContentState,
    current_track: Option<&Track>,
) {
    let is_focused = ui_state.active_section == ActiveSection::MainContent;

    match view {
        View::Home => render_home(frame, area, content_state, is_focused, current_track),
        View::Search => {
            if ui_state.search_query.trim().is_empty() {
                let hint = Paragraph::new(
                    "Type in the search bar to filter loaded tracks\n\nPress g to focus search\nUse ↑/↓ to select, Enter to play",
                )
                .style(Style::default().fg(Color::DarkGray))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" Search ")
                        .padding(Padding::horizontal(1))
                        .border_style(focus_border(is_focused)),
                );
                frame.render_widget(hint, area);
            } else {
                let title = format!(" Results for \"{}\" ", ui_state.search_query);
                render_track_list(frame, area, &title, &content_state.search, is_focused, current_track);
            }
        }
        View::Library => {
            render_track_list(
                frame,
                area,
                " Your Library · Recently played ",
                &content_state.library,
                is_focused,
                current_track,
            );
        }
        View::Playlist(id) => {
            let name = ui_state
                .playlists
                .iter()
                .find(|p| p.id == *id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| format!("Playlist {}", id));
            let title = format!(" {} ", name);
            match &content_state.playlist {
                Some((loaded_id, list)) if loaded_id == id => {
                    render_track_list(frame, area, &title, list, is_focused, current_track);
                }
                _ => {
                    render_track_list(frame, area, &title, &TrackList::default(), is_focused, current_track);
                }
            }
        }
    }
}

fn render_home(
    frame: &mut Frame,
    area: Rect,
    content_state: &ContentState,
    is_focused: bool,
    current_track: Option<&Track>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    for (chunk, section) in chunks.iter().zip(CatalogSection::ALL) {
        let section_focused = is_focused && content_state.home.focused == section;
        let title = format!(" {} ", section.title());
        render_track_list(
            frame,
            *chunk,
            &title,
            content_state.home.section(section),
            section_focused,
            current_track,
        );
    }
}

fn render_track_list(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    list: &TrackList,
    is_focused: bool,
    current_track: Option<&Track>,
) {
    let border_style = focus_border(is_focused);

    let (tracks, stale_error) = match &list.data {
        Loadable::Loading => {
            let loading = Paragraph::new("Loading...")
                .style(Style::default().fg(Color::Yellow))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(title.to_string())
                        .border_style(border_style),
                );
            frame.render_widget(loading, area);
            return;
        }
        Loadable::Failed(message) => {
            let error = Paragraph::new(format!("{}\n\nPress F5 to reload", message))
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(title.to_string())
                        .padding(Padding::horizontal(1))
                        .border_style(border_style),
                );
            frame.render_widget(error, area);
            return;
        }
        Loadable::Loaded { tracks, stale_error } => (tracks, stale_error),
    };

    let title = if stale_error.is_some() {
        format!("{}(offline, cached) ", title)
    } else {
        title.to_string()
    };

    if tracks.is_empty() {
        let empty = Paragraph::new("Nothing here yet")
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .padding(Padding::horizontal(1))
                    .border_style(border_style),
            );
        frame.render_widget(empty, area);
        return;
    }

    let content_width = area.width.saturating_sub(2) as usize;
    let (num_width, title_width, artist_width, duration_width) =
        calculate_track_column_widths(content_width, tracks.len());

    let items: Vec<ListItem> = tracks
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let is_playing = current_track.is_some_and(|playing| playing.is_same_entry(track));
            let num = if is_playing {
                format!("{:>width$}", "▶", width = num_width)
            } else {
                format!("{:>width$}", i + 1, width = num_width)
            };
            let artist_album = if track.album.is_empty() {
                track.artist.clone()
            } else {
                format!("{} · {}", track.artist, track.album)
            };
            let text = format!(
                " {}   {}   {}   {:>width$}",
                num,
                truncate_string(&track.title, title_width),
                truncate_string(&artist_album, artist_width),
                format_duration(track.duration as f64),
                width = duration_width,
            );

            let style = if i == list.selected && is_focused {
                Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
            } else if is_playing {
                Style::default().fg(Color::Green)
            } else if i == list.selected {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(text).style(style)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style);

    render_scrollable_list(frame, area, items, list.selected, block);
}

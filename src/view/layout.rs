//! Layout rendering (top bar, sidebar)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{ActiveSection, NavEntry, NavigationHistory, UiState, View};
use super::utils::{focus_border, render_scrollable_list};

pub fn render_top_bar(frame: &mut Frame, area: Rect, ui_state: &UiState, history: &NavigationHistory) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(30), // Back/forward + current view
            Constraint::Min(0),     // Search input
        ])
        .split(area);

    let arrow_style = |enabled: bool| {
        if enabled {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };

    let nav = Paragraph::new(Line::from(vec![
        Span::styled("◀ ", arrow_style(history.can_go_back())),
        Span::styled("▶ ", arrow_style(history.can_go_forward())),
        Span::styled(history.current().key(), Style::default().fg(Color::Cyan)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {}/{} ", history.cursor() + 1, history.entries().len()))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(nav, chunks[0]);

    let is_focused = ui_state.active_section == ActiveSection::Search;
    let search_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::White)
    };

    let search_text = if ui_state.search_query.is_empty() {
        "Type to search..."
    } else {
        &ui_state.search_query
    };

    let search = Paragraph::new(search_text)
        .style(search_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search ")
                .padding(Padding::horizontal(1))
                .border_style(focus_border(is_focused)),
        );
    frame.render_widget(search, chunks[1]);
}

fn nav_view(entry: NavEntry) -> View {
    match entry {
        NavEntry::Home => View::Home,
        NavEntry::Search => View::Search,
        NavEntry::Library => View::Library,
    }
}

pub fn render_sidebar(frame: &mut Frame, area: Rect, ui_state: &UiState, current_view: &View) {
    let is_focused = ui_state.active_section == ActiveSection::Sidebar;

    let item_style = |index: usize, is_current: bool| {
        let selected = index == ui_state.sidebar_selected;
        if selected && is_focused {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else if is_current {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else if selected {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        }
    };

    let mut items: Vec<ListItem> = NavEntry::ALL
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let is_current = nav_view(*entry) == *current_view;
            ListItem::new(entry.label()).style(item_style(i, is_current))
        })
        .collect();

    items.push(
        ListItem::new("── Playlists ──").style(Style::default().fg(Color::DarkGray)),
    );

    let offset = NavEntry::ALL.len();
    items.extend(ui_state.playlists.iter().enumerate().map(|(i, playlist)| {
        let is_current = matches!(current_view, View::Playlist(id) if *id == playlist.id);
        ListItem::new(playlist.name.clone()).style(item_style(offset + i, is_current))
    }));

    // The divider occupies one row, so playlist rows sit one below their index
    let display_index = if ui_state.sidebar_selected >= offset {
        ui_state.sidebar_selected + 1
    } else {
        ui_state.sidebar_selected
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Library ")
        .padding(Padding::horizontal(1))
        .border_style(focus_border(is_focused));

    render_scrollable_list(frame, area, items, display_index, block);
}

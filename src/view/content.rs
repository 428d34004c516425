//! Library listing

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, ListItem},
    Frame,
};

use crate::model::{PlaybackInfo, UiState};
use super::utils::{render_scrollable_list, truncate_string};

pub fn render_library(frame: &mut Frame, area: Rect, ui_state: &UiState, playback: &PlaybackInfo) {
    let content_width = area.width.saturating_sub(4) as usize;
    let title_width = (content_width * 55) / 100;
    let artist_width = content_width.saturating_sub(title_width + 4);
    let playing_id = playback.track.as_ref().map(|t| &t.id);

    let items: Vec<ListItem> = ui_state
        .library
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let marker = if Some(&track.id) == playing_id { "▶ " } else { "  " };
            let line = format!(
                "{}{} {}",
                marker,
                truncate_string(&track.title, title_width),
                truncate_string(&track.artist, artist_width)
            );

            let style = if i == ui_state.library_selected {
                Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
            } else if Some(&track.id) == playing_id {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Library (Enter play, e queue) ");

    render_scrollable_list(frame, area, items, ui_state.library_selected, block);
}

//! Progress bar rendering

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Gauge},
    Frame,
};

use crate::model::{PlaybackInfo, PlaybackStatus};
use super::utils::format_duration;

pub fn render_progress_bar(frame: &mut Frame, area: Rect, playback: &PlaybackInfo) {
    let status_text = match (&playback.track, playback.state.status) {
        (None, _) => " Queue is empty".to_string(),
        (Some(track), status) => {
            let icon = match status {
                PlaybackStatus::Playing => "▶",
                PlaybackStatus::Paused => "⏸",
                PlaybackStatus::Stopped => "■",
            };
            let liked = if track.liked { " ♥" } else { "" };
            format!(" {} {} | {}{}", icon, track.title, track.artist, liked)
        }
    };

    let position_text = match playback.index {
        Some(index) => format!("{}/{}", index + 1, playback.queue.len()),
        None => "-/-".to_string(),
    };
    let shuffle_text = if playback.state.shuffle { "Shuffle: On" } else { "Shuffle: Off" };
    let repeat_text = if playback.state.repeat { "Repeat: On" } else { "Repeat: Off" };
    let volume_text = format!("Vol: {}%", (playback.state.volume * 100.0).round() as u8);

    let time_str = format!(
        "{} / {}",
        format_duration(playback.state.elapsed),
        format_duration(playback.state.duration)
    );

    let title = format!("{} ", status_text);
    let controls_info = format!(
        " {} | {} | {} | {} ",
        position_text, shuffle_text, repeat_text, volume_text
    );

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_bottom(Line::from(controls_info).right_aligned()),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(playback.progress_ratio())
        .label(time_str);

    frame.render_widget(gauge, area);
}

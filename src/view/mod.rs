//! View module - UI rendering
//!
//! This module renders the now-playing surface using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (formatting, scrollable lists)
//! - `content`: Library listing
//! - `progress`: Progress bar rendering
//! - `overlays`: Notification overlay

mod utils;
mod content;
mod progress;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{PlaybackInfo, UiState};

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, playback: &PlaybackInfo, ui_state: &UiState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Library
                Constraint::Length(3), // Progress bar with playback info
            ])
            .split(frame.area());

        content::render_library(frame, chunks[0], ui_state, playback);
        progress::render_progress_bar(frame, chunks[1], playback);

        if let Some(notification) = &playback.notification {
            overlays::render_notification(frame, notification);
        }
    }
}

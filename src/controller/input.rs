//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::UiState;
use super::{PlaybackController, PlaybackRequests};

const SEEK_STEP_SECS: f64 = 5.0;

impl PlaybackController {
    pub async fn handle_key_event(
        &self,
        key: KeyEvent,
        ui: &mut UiState,
        requests: &PlaybackRequests,
    ) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => ui.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                ui.should_quit = true;
            }
            KeyCode::Esc => self.dismiss_notification().await,
            KeyCode::Char(' ') => self.toggle_playback().await,
            KeyCode::Char('n') => self.next().await,
            KeyCode::Char('p') => self.previous().await,
            KeyCode::Left => self.seek_by(-SEEK_STEP_SECS).await,
            KeyCode::Right => self.seek_by(SEEK_STEP_SECS).await,
            KeyCode::Char('+') | KeyCode::Char('=') => self.volume_up().await,
            KeyCode::Char('-') => self.volume_down().await,
            KeyCode::Char('s') => self.toggle_shuffle().await,
            KeyCode::Char('r') => self.toggle_repeat().await,
            KeyCode::Char('l') => {
                self.toggle_liked().await;
                ui.refresh_from(&self.snapshot().await.queue);
            }
            KeyCode::Char('c') => self.clear_queue().await,
            KeyCode::Up => ui.move_selection_up(),
            KeyCode::Down => ui.move_selection_down(),
            KeyCode::Enter => {
                ui.refresh_from(&self.snapshot().await.queue);
                if let Some(track) = ui.selected_track().cloned() {
                    // The whole library becomes the queue, as when a track is
                    // picked from a library listing.
                    requests.request_playback(track, Some(ui.library.clone()))?;
                }
            }
            KeyCode::Char('e') => {
                if let Some(track) = ui.selected_track().cloned() {
                    self.enqueue(track).await;
                }
            }
            _ => {}
        }

        Ok(())
    }
}

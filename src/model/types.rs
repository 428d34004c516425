//! Terminal shell state

use super::track::Track;

/// UI state for the terminal shell
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub library: Vec<Track>,
    pub library_selected: usize,
    pub should_quit: bool,
}

impl UiState {
    pub fn new(library: Vec<Track>) -> Self {
        Self {
            library,
            ..Default::default()
        }
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.library.get(self.library_selected)
    }

    /// Take the queue's copy of every library track it also holds, so edits
    /// made through the controller (liked flags) show up in the library.
    pub fn refresh_from(&mut self, queue: &[Track]) {
        for entry in &mut self.library {
            if let Some(current) = queue.iter().find(|t| t.id == entry.id) {
                *entry = current.clone();
            }
        }
    }

    pub fn move_selection_up(&mut self) {
        self.library_selected = self.library_selected.saturating_sub(1);
    }

    pub fn move_selection_down(&mut self) {
        if self.library_selected + 1 < self.library.len() {
            self.library_selected += 1;
        }
    }
}

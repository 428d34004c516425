//! Playback queue: ordered tracks plus the current position

use super::track::{Track, TrackId};

/// Ordered list of tracks with a cursor.
///
/// The cursor is `Some(i)` with `i < len` whenever the queue holds tracks and
/// `None` when it is empty.
#[derive(Clone, Debug, Default)]
pub struct PlaybackQueue {
    tracks: Vec<Track>,
    index: Option<usize>,
}

impl PlaybackQueue {
    pub fn new(tracks: Vec<Track>) -> Self {
        let index = if tracks.is_empty() { None } else { Some(0) };
        Self { tracks, index }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn current(&self) -> Option<&Track> {
        self.index.and_then(|i| self.tracks.get(i))
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn position_of(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }

    /// Move the cursor. Returns false (and leaves the cursor alone) when out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.tracks.len() {
            self.index = Some(index);
            true
        } else {
            false
        }
    }

    pub fn next_index(&self, wrap: bool) -> Option<usize> {
        let current = self.index?;
        if current + 1 < self.tracks.len() {
            Some(current + 1)
        } else if wrap {
            Some(0)
        } else {
            None
        }
    }

    pub fn previous_index(&self, wrap: bool) -> Option<usize> {
        let current = self.index?;
        if current > 0 {
            Some(current - 1)
        } else if wrap {
            Some(self.tracks.len() - 1)
        } else {
            None
        }
    }

    /// Replace the whole queue, placing the cursor on `track`.
    ///
    /// When `track` is not part of `tracks` it is put at the front.
    pub fn replace_with(&mut self, mut tracks: Vec<Track>, track: Track) -> usize {
        let index = match tracks.iter().position(|t| t.id == track.id) {
            Some(i) => i,
            None => {
                tracks.insert(0, track);
                0
            }
        };
        self.tracks = tracks;
        self.index = Some(index);
        index
    }

    /// Insert right after the cursor (or at the front of an empty queue) and
    /// return the new track's position. The cursor is not moved.
    pub fn insert_after_current(&mut self, track: Track) -> usize {
        let at = self.index.map_or(0, |i| i + 1);
        self.tracks.insert(at, track);
        if self.index.is_none() {
            self.index = Some(0);
        }
        at
    }

    /// Append a track. An empty queue gets its cursor on the new entry.
    pub fn push(&mut self, track: Track) -> usize {
        self.tracks.push(track);
        if self.index.is_none() {
            self.index = Some(0);
        }
        self.tracks.len() - 1
    }

    /// Swap the entry at `index` for an edited copy.
    pub fn replace_at(&mut self, index: usize, track: Track) -> bool {
        match self.tracks.get_mut(index) {
            Some(slot) => {
                *slot = track;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
        self.index = None;
    }
}

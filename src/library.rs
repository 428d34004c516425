//! Mock music library
//!
//! The catalog is either the built-in set below or a JSON array of entries
//! read from disk. Durations are only used to feed the simulated output.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LibraryError;
use crate::model::Track;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LibraryEntry {
    #[serde(flatten)]
    pub track: Track,
    pub duration_secs: f64,
}

#[derive(Clone, Debug)]
pub struct Library {
    entries: Vec<LibraryEntry>,
}

impl Library {
    pub fn builtin() -> Self {
        let entry = |id: &str, title: &str, artist: &str, duration_secs: f64| LibraryEntry {
            track: Track::new(id, title, artist, format!("builtin:{id}"))
                .with_cover_art(format!("covers/{id}.jpg")),
            duration_secs,
        };

        Self {
            entries: vec![
                entry("midnight-drive", "Midnight Drive", "Neon Harbor", 214.0),
                entry("paper-lanterns", "Paper Lanterns", "Ivy Rowe", 187.0),
                entry("low-tide", "Low Tide", "The Quiet Coast", 242.0),
                entry("signal-fire", "Signal Fire", "Northbound", 199.0),
                entry("glass-city", "Glass City", "Neon Harbor", 231.0),
                entry("slow-orbit", "Slow Orbit", "Ivy Rowe", 176.0),
            ],
        }
    }

    pub fn load(path: &Path) -> Result<Self, LibraryError> {
        let content = std::fs::read_to_string(path)?;
        let entries: Vec<LibraryEntry> = serde_json::from_str(&content)?;
        if entries.is_empty() {
            return Err(LibraryError::Empty);
        }
        if let Some(bad) = entries
            .iter()
            .find(|e| !e.duration_secs.is_finite() || e.duration_secs < 0.0)
        {
            return Err(LibraryError::InvalidDuration {
                id: bad.track.id.to_string(),
                duration: bad.duration_secs,
            });
        }
        tracing::info!(path = %path.display(), tracks = entries.len(), "Library loaded from disk");
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// All tracks in catalog order. The first one is the default track.
    pub fn tracks(&self) -> Vec<Track> {
        self.entries.iter().map(|e| e.track.clone()).collect()
    }

    /// Duration per source reference
    pub fn durations(&self) -> HashMap<String, f64> {
        self.entries
            .iter()
            .map(|e| (e.track.source.clone(), e.duration_secs))
            .collect()
    }
}

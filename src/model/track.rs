//! Track metadata

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A playable track.
///
/// Tracks are never mutated in place: edits such as toggling the liked flag
/// produce a new value that replaces the old one wherever it is stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub cover_art: String,
    pub source: String,
    #[serde(default)]
    pub liked: bool,
}

impl Track {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            id: TrackId::new(id),
            title: title.into(),
            artist: artist.into(),
            cover_art: String::new(),
            source: source.into(),
            liked: false,
        }
    }

    pub fn with_cover_art(self, cover_art: impl Into<String>) -> Self {
        Self {
            cover_art: cover_art.into(),
            ..self
        }
    }

    pub fn with_liked(&self, liked: bool) -> Self {
        Self {
            liked,
            ..self.clone()
        }
    }
}

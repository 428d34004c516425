//! Error types shared by the output handle, the source probe and the controller

use thiserror::Error;

/// Rejection reported by an [`AudioOutput`](crate::audio::AudioOutput) when asked to start playback
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OutputError {
    #[error("no audio source is loaded")]
    NoSource,
    #[error("audio source is not playable: {0}")]
    UnknownSource(String),
    #[error("output refused to start: {0}")]
    Rejected(String),
}

/// Reason a source was judged unreachable before it was handed to the output
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("audio file not found: {0}")]
    Missing(String),
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("Playback failed: {0}")]
    PlaybackRejected(#[from] OutputError),
    #[error("Source unreachable: {0}")]
    SourceUnreachable(#[from] ProbeError),
    #[error("playback controller is no longer running")]
    ControllerGone,
}

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("could not read library file: {0}")]
    Io(#[from] std::io::Error),
    #[error("library file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("library contains no tracks")]
    Empty,
    #[error("track {id} has an invalid duration: {duration}")]
    InvalidDuration { id: String, duration: f64 },
}

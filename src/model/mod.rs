//! Model module - Playback state and data types
//!
//! This module contains the data structures the playback controller owns.
//! It is organized into submodules by responsibility:
//!
//! - `track`: Track metadata
//! - `queue`: Ordered tracks plus the current position
//! - `playback`: Status, timing, volume, mode flags and notifications
//! - `player_model`: Session state owned by the controller
//! - `types`: Terminal shell state

mod track;
mod queue;
mod playback;
mod player_model;
mod types;

// Re-export all public types for convenient access
pub use track::Track;

pub use playback::{Notification, NotificationLevel, PlaybackInfo, PlaybackStatus};

pub use player_model::{PlayerModel, PlayerSettings};

pub use types::UiState;

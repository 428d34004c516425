//! Playback-related types and state management

use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::time::Instant;

use crate::audio::DEFAULT_VOLUME;
use super::track::Track;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackStatus {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Timing, volume and mode flags of the now-playing surface
#[derive(Clone, Debug)]
pub struct PlaybackState {
    pub status: PlaybackStatus,
    pub elapsed: f64,
    pub duration: f64,
    pub volume: f32,
    pub shuffle: bool,
    pub repeat: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            status: PlaybackStatus::Stopped,
            elapsed: 0.0,
            duration: 0.0,
            volume: DEFAULT_VOLUME,
            shuffle: false,
            repeat: false,
        }
    }
}

impl PlaybackState {
    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    /// Clamp a requested position into `[0, duration]`.
    pub fn clamp_position(&self, seconds: f64) -> f64 {
        seconds.clamp(0.0, self.duration.max(0.0))
    }

    /// Record a position reported by the output. Until the duration is known
    /// only the lower bound applies.
    pub fn set_elapsed(&mut self, seconds: f64) {
        if !seconds.is_finite() {
            return;
        }
        self.elapsed = if self.duration > 0.0 {
            self.clamp_position(seconds)
        } else {
            seconds.max(0.0)
        };
    }

    pub fn rewind(&mut self) {
        self.elapsed = 0.0;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// Transient message shown to the user
#[derive(Clone, Debug)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub raised_at: Instant,
    pub raised_wall: DateTime<Local>,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
            raised_at: Instant::now(),
            raised_wall: Local::now(),
        }
    }

    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.raised_at.elapsed() >= ttl
    }
}

/// Complete playback information for rendering the UI
#[derive(Clone, Debug, Default)]
pub struct PlaybackInfo {
    pub track: Option<Track>,
    pub index: Option<usize>,
    pub queue: Vec<Track>,
    pub state: PlaybackState,
    pub notification: Option<Notification>,
}

impl PlaybackInfo {
    pub fn progress_ratio(&self) -> f64 {
        if self.state.duration > 0.0 {
            (self.state.elapsed / self.state.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

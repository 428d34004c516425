//! Session state owned by the playback controller

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::audio::DEFAULT_VOLUME;

use super::playback::{Notification, NotificationLevel, PlaybackInfo, PlaybackState};
use super::queue::PlaybackQueue;
use super::track::Track;

pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(5);

/// Initial values handed to the controller at construction
#[derive(Clone, Debug)]
pub struct PlayerSettings {
    pub volume: f32,
    pub shuffle: bool,
    pub repeat: bool,
    pub notification_ttl: Duration,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        let state = PlaybackState::default();
        Self {
            volume: state.volume,
            shuffle: state.shuffle,
            repeat: state.repeat,
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
        }
    }
}

pub struct PlayerModel {
    pub queue: PlaybackQueue,
    pub state: PlaybackState,
    notification: Option<Notification>,
    notification_ttl: Duration,
    attempt: u64,
    rng: StdRng,
}

impl PlayerModel {
    pub fn new(tracks: Vec<Track>, settings: &PlayerSettings) -> Self {
        let volume = if settings.volume.is_finite() {
            settings.volume.clamp(0.0, 1.0)
        } else {
            tracing::warn!(volume = settings.volume, "Ignoring non-finite startup volume");
            DEFAULT_VOLUME
        };
        Self {
            queue: PlaybackQueue::new(tracks),
            state: PlaybackState {
                volume,
                shuffle: settings.shuffle,
                repeat: settings.repeat,
                ..Default::default()
            },
            notification: None,
            notification_ttl: settings.notification_ttl,
            attempt: 0,
            rng: StdRng::from_os_rng(),
        }
    }

    #[cfg(test)]
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Uniform draw over the whole queue, current index included.
    pub fn random_index(&mut self) -> Option<usize> {
        let len = self.queue.len();
        if len == 0 {
            None
        } else {
            Some(self.rng.random_range(0..len))
        }
    }

    // ========================================================================
    // Play attempts
    // ========================================================================

    /// Invalidate every in-flight play attempt and return a fresh token.
    pub fn next_attempt(&mut self) -> u64 {
        self.attempt += 1;
        self.attempt
    }

    pub fn is_current_attempt(&self, attempt: u64) -> bool {
        self.attempt == attempt
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notification = Some(Notification::new(level, message));
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    pub fn expire_notification(&mut self) {
        if self
            .notification
            .as_ref()
            .is_some_and(|n| n.is_expired(self.notification_ttl))
        {
            self.notification = None;
        }
    }

    pub fn snapshot(&self) -> PlaybackInfo {
        PlaybackInfo {
            track: self.queue.current().cloned(),
            index: self.queue.index(),
            queue: self.queue.tracks().to_vec(),
            state: self.state.clone(),
            notification: self.notification.clone(),
        }
    }
}

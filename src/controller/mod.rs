//! Controller module - Playback logic and event handling
//!
//! This module contains the playback controller that owns the session state,
//! drives the audio output and reacts to output callbacks and playback
//! requests. It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `playback`: Playback control methods
//! - `player_events`: Output event and playback request listener
//! - `requests`: Typed "play this track" channel

mod input;
mod playback;
mod player_events;
mod requests;

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinSet;

use crate::audio::{AudioOutput, SourceProbe};
use crate::model::{PlaybackInfo, PlayerModel, PlayerSettings, Track};

pub use requests::{PlaybackRequestReceiver, PlaybackRequests};

#[derive(Clone)]
pub struct PlaybackController {
    pub(crate) model: Arc<Mutex<PlayerModel>>,
    pub(crate) output: Arc<dyn AudioOutput>,
    probe: Arc<dyn SourceProbe>,
    attempts: Arc<Mutex<JoinSet<()>>>,
}

impl PlaybackController {
    /// Build a controller around `output`, starting with `tracks` as the queue.
    ///
    /// The first track is loaded into the output but not played.
    pub fn new(
        output: Arc<dyn AudioOutput>,
        probe: Arc<dyn SourceProbe>,
        tracks: Vec<Track>,
        settings: PlayerSettings,
    ) -> Self {
        let model = PlayerModel::new(tracks, &settings);
        output.set_volume(model.state.volume);
        output.set_source(model.queue.current().map(|t| t.source.as_str()));

        tracing::info!(
            tracks = model.queue.len(),
            volume = model.state.volume,
            shuffle = model.state.shuffle,
            repeat = model.state.repeat,
            "Playback controller created"
        );

        Self {
            model: Arc::new(Mutex::new(model)),
            output,
            probe,
            attempts: Arc::new(Mutex::new(JoinSet::new())),
        }
    }

    pub async fn snapshot(&self) -> PlaybackInfo {
        self.model.lock().await.snapshot()
    }

    pub async fn expire_notification(&self) {
        self.model.lock().await.expire_notification();
    }

    pub async fn dismiss_notification(&self) {
        self.model.lock().await.dismiss_notification();
    }

    /// Wait until every dispatched play attempt has reported back.
    pub async fn settle(&self) {
        loop {
            let mut pending = std::mem::take(&mut *self.attempts.lock().await);
            if pending.is_empty() {
                break;
            }
            while let Some(joined) = pending.join_next().await {
                if let Err(e) = joined {
                    tracing::warn!(error = %e, "Play attempt task failed");
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) async fn reseed(&self, seed: u64) {
        self.model.lock().await.reseed(seed);
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use crate::model::{PlaybackStatus, PlayerSettings};

    #[tokio::test]
    async fn new_loads_default_track_without_playing() {
        let (controller, output) = controller(&["a", "b"]);
        let info = controller.snapshot().await;

        assert_eq!(info.state.status, PlaybackStatus::Stopped);
        assert_eq!(info.index, Some(0));
        assert_eq!(output.last_source(), Some("builtin:a".to_string()));
        assert_eq!(output.play_count(), 0);
        assert_eq!(output.calls()[0], Call::Volume(PlayerSettings::default().volume));
    }

    #[tokio::test]
    async fn new_with_empty_queue_detaches_output() {
        let (controller, output) = controller(&[]);
        let info = controller.snapshot().await;

        assert!(info.track.is_none());
        assert_eq!(info.index, None);
        assert_eq!(output.last_source(), None);
    }

    #[tokio::test]
    async fn settle_with_nothing_pending_returns() {
        let (controller, _output) = controller(&["a"]);
        controller.settle().await;
    }
}

//! Typed "play this track" channel.
//!
//! Any part of the UI can hold a [`PlaybackRequests`] handle and ask for a
//! track (optionally with the queue it belongs to). The controller's listener
//! is the single consumer.

use tokio::sync::mpsc;

use crate::error::PlayerError;
use crate::model::Track;

#[derive(Clone, Debug)]
pub struct PlaybackRequest {
    pub track: Track,
    pub queue: Option<Vec<Track>>,
}

pub type PlaybackRequestReceiver = mpsc::UnboundedReceiver<PlaybackRequest>;

#[derive(Clone)]
pub struct PlaybackRequests {
    tx: mpsc::UnboundedSender<PlaybackRequest>,
}

impl PlaybackRequests {
    pub fn channel() -> (Self, PlaybackRequestReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn request_playback(&self, track: Track, queue: Option<Vec<Track>>) -> Result<(), PlayerError> {
        tracing::debug!(track = %track.title, "Sending playback request");
        self.tx
            .send(PlaybackRequest { track, queue })
            .map_err(|_| PlayerError::ControllerGone)
    }
}

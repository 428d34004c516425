//! Listener for output callbacks and playback requests

use tokio::task::JoinHandle;

use crate::audio::{OutputEvent, OutputEvents, SourceEvent};
use super::{PlaybackController, PlaybackRequestReceiver};

impl PlaybackController {
    /// Spawn the task that applies playback requests and output events one at
    /// a time. Pending requests are served before pending output events. The
    /// task runs until both channels are closed.
    pub fn spawn_listener(
        &self,
        mut events: OutputEvents,
        mut requests: PlaybackRequestReceiver,
    ) -> JoinHandle<()> {
        let controller = self.clone();
        tracing::info!("Starting playback event listener");

        tokio::spawn(async move {
            let mut events_open = true;
            let mut requests_open = true;

            loop {
                tokio::select! {
                    biased;
                    request = requests.recv(), if requests_open => match request {
                        Some(request) => {
                            tracing::debug!(track = %request.track.title, with_queue = request.queue.is_some(), "Playback requested");
                            controller.load_track(request.track, request.queue).await;
                        }
                        None => {
                            tracing::debug!("Playback request channel closed");
                            requests_open = false;
                        }
                    },
                    event = events.recv(), if events_open => match event {
                        Some(event) => controller.handle_output_event(event).await,
                        None => {
                            tracing::debug!("Output event channel closed");
                            events_open = false;
                        }
                    },
                    else => break,
                }
            }

            tracing::debug!("Playback event listener shutting down");
        })
    }

    /// Dispatch one output callback to its handler.
    pub async fn handle_output_event(&self, event: SourceEvent) {
        let SourceEvent { generation, event } = event;
        match event {
            OutputEvent::TimeUpdate(seconds) => {
                tracing::trace!(generation, seconds, "OutputEvent::TimeUpdate");
                self.on_time_update(generation, seconds).await;
            }
            OutputEvent::LoadedMetadata(duration) => {
                tracing::debug!(generation, duration, "OutputEvent::LoadedMetadata");
                self.on_loaded_metadata(generation, duration).await;
            }
            OutputEvent::Ended => {
                tracing::debug!(generation, "OutputEvent::Ended");
                self.on_track_ended(generation).await;
            }
        }
    }

    pub async fn on_time_update(&self, generation: u64, seconds: f64) {
        let mut model = self.model.lock().await;
        if self.is_stale(generation) {
            return;
        }
        // metadata may not have been delivered yet
        if model.state.duration <= 0.0 {
            model.state.duration = self
                .output
                .duration()
                .filter(|d| d.is_finite() && *d > 0.0)
                .unwrap_or(0.0);
        }
        model.state.set_elapsed(seconds);
    }

    pub async fn on_loaded_metadata(&self, generation: u64, duration: f64) {
        let mut model = self.model.lock().await;
        if self.is_stale(generation) {
            return;
        }
        if !duration.is_finite() || duration < 0.0 {
            tracing::warn!(duration, "Ignoring invalid track duration");
            return;
        }
        model.state.duration = duration;
        model.state.elapsed = model.state.elapsed.min(duration);
    }

    /// End-of-track policy: repeat restarts the same track, shuffle jumps to a
    /// random one, otherwise the queue advances and stops after the last track.
    pub async fn on_track_ended(&self, generation: u64) {
        let mut model = self.model.lock().await;
        if self.is_stale(generation) || model.queue.is_empty() {
            return;
        }

        if model.state.repeat {
            tracing::debug!("Repeat on, restarting track");
            self.restart_current(&mut model).await;
        } else {
            self.advance(&mut model).await;
        }
    }

    /// Whether `generation` belongs to a source that has since been replaced.
    /// Callers hold the model lock, so no source switch can interleave.
    fn is_stale(&self, generation: u64) -> bool {
        let current = self.output.generation();
        if generation != current {
            tracing::debug!(generation, current, "Dropping output event from a previous source");
        }
        generation != current
    }
}

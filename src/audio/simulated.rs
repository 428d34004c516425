//! Clock-driven stand-in for a platform media element.
//!
//! It knows each source's duration up front, advances position with the
//! tokio clock and raises the same callbacks a real element would.

use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;

use futures::FutureExt;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::error::OutputError;
use super::{AudioOutput, OutputEvent, OutputEvents, PlayRequest, SourceEvent, DEFAULT_VOLUME};

#[derive(Debug)]
struct SimState {
    generation: u64,
    source: Option<String>,
    duration: Option<f64>,
    playing: bool,
    position: f64,
    resumed_at: Instant,
    volume: f32,
}

impl SimState {
    fn position(&self) -> f64 {
        let position = if self.playing {
            self.position + self.resumed_at.elapsed().as_secs_f64()
        } else {
            self.position
        };
        match self.duration {
            Some(duration) => position.min(duration.max(0.0)),
            None => position,
        }
    }
}

pub struct SimulatedOutput {
    durations: HashMap<String, f64>,
    state: Mutex<SimState>,
    events: mpsc::UnboundedSender<SourceEvent>,
}

impl SimulatedOutput {
    /// Create the output and start its progress ticker.
    ///
    /// Must be called from within a tokio runtime. The ticker stops once the
    /// returned handle is dropped.
    pub fn new(durations: HashMap<String, f64>, tick: Duration) -> (Arc<Self>, OutputEvents) {
        let (events, rx) = mpsc::unbounded_channel();
        let output = Arc::new(Self {
            durations,
            state: Mutex::new(SimState {
                generation: 0,
                source: None,
                duration: None,
                playing: false,
                position: 0.0,
                resumed_at: Instant::now(),
                volume: DEFAULT_VOLUME,
            }),
            events,
        });
        Self::spawn_ticker(Arc::downgrade(&output), tick);
        (output, rx)
    }

    fn spawn_ticker(output: Weak<Self>, tick: Duration) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                let Some(output) = output.upgrade() else {
                    tracing::debug!("Simulated output dropped, stopping ticker");
                    break;
                };
                output.tick();
            }
        });
    }

    fn tick(&self) {
        let mut state = self.state.lock();
        if !state.playing {
            return;
        }

        let generation = state.generation;
        let position = state.position();
        let finished = state.duration.is_some_and(|d| position >= d);
        if finished {
            state.playing = false;
            state.position = position;
            drop(state);
            tracing::trace!(generation, position, "Simulated output reached end of source");
            self.emit(generation, OutputEvent::TimeUpdate(position));
            self.emit(generation, OutputEvent::Ended);
        } else {
            drop(state);
            self.emit(generation, OutputEvent::TimeUpdate(position));
        }
    }

    fn emit(&self, generation: u64, event: OutputEvent) {
        let _ = self.events.send(SourceEvent { generation, event });
    }

    #[cfg(test)]
    pub fn is_playing(&self) -> bool {
        self.state.lock().playing
    }
}

impl AudioOutput for SimulatedOutput {
    fn set_source(&self, source: Option<&str>) {
        let mut state = self.state.lock();
        state.generation += 1;
        state.playing = false;
        state.position = 0.0;
        state.source = source.map(str::to_string);
        state.duration = source.and_then(|s| self.durations.get(s).copied());
        let generation = state.generation;
        let duration = state.duration;
        drop(state);

        if let Some(duration) = duration {
            self.emit(generation, OutputEvent::LoadedMetadata(duration));
        }
    }

    fn generation(&self) -> u64 {
        self.state.lock().generation
    }

    fn play(&self) -> PlayRequest {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let result = match (&state.source, state.duration) {
            (None, _) => Err(OutputError::NoSource),
            (Some(source), None) => Err(OutputError::UnknownSource(source.clone())),
            (Some(source), Some(duration)) if duration <= 0.0 => {
                Err(OutputError::Rejected(format!("{source} has no audio")))
            }
            (Some(_), Some(duration)) => {
                if !state.playing {
                    if state.position >= duration {
                        state.position = 0.0;
                    }
                    state.playing = true;
                    state.resumed_at = Instant::now();
                }
                Ok(())
            }
        };
        futures::future::ready(result).boxed()
    }

    fn pause(&self) {
        let mut state = self.state.lock();
        if state.playing {
            state.position = state.position();
            state.playing = false;
        }
    }

    fn set_current_time(&self, seconds: f64) {
        let mut state = self.state.lock();
        let upper = state.duration.unwrap_or(0.0).max(0.0);
        state.position = seconds.clamp(0.0, upper);
        state.resumed_at = Instant::now();
    }

    fn current_time(&self) -> f64 {
        self.state.lock().position()
    }

    fn set_volume(&self, level: f32) {
        self.state.lock().volume = level.clamp(0.0, 1.0);
    }

    fn volume(&self) -> f32 {
        self.state.lock().volume
    }

    fn duration(&self) -> Option<f64> {
        self.state.lock().duration
    }
}

//! Audio output handle
//!
//! The controller drives exactly one output through the [`AudioOutput`] trait
//! and never decodes or buffers anything itself. Outputs report progress back
//! through an [`OutputEvents`] channel.
//!
//! - `simulated`: clock-driven output used by the terminal shell
//! - `probe`: reachability check run before a source is dispatched

mod simulated;
mod probe;

use futures::future::BoxFuture;
use tokio::sync::mpsc;

use crate::error::OutputError;

pub use simulated::SimulatedOutput;
pub use probe::{SourceChecker, SourceProbe};

pub const DEFAULT_VOLUME: f32 = 0.8;

/// Callbacks raised by the output, mirrored into controller state by the listener
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OutputEvent {
    TimeUpdate(f64),
    LoadedMetadata(f64),
    Ended,
}

/// An [`OutputEvent`] tagged with the source generation that raised it.
///
/// Every `set_source` starts a new generation, so events still queued for a
/// previous source can be told apart and dropped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SourceEvent {
    pub generation: u64,
    pub event: OutputEvent,
}

pub type OutputEvents = mpsc::UnboundedReceiver<SourceEvent>;

/// Pending answer to a play request.
///
/// The request itself is issued when [`AudioOutput::play`] is called; the
/// future only reports whether the output accepted it.
pub type PlayRequest = BoxFuture<'static, Result<(), OutputError>>;

pub trait AudioOutput: Send + Sync {
    /// Point the output at a new source, or detach it with `None`.
    ///
    /// Starts a new source generation.
    fn set_source(&self, source: Option<&str>);
    /// Generation of the current source; events carrying any other value are stale.
    fn generation(&self) -> u64;
    fn play(&self) -> PlayRequest;
    fn pause(&self);
    fn set_current_time(&self, seconds: f64);
    fn current_time(&self) -> f64;
    fn set_volume(&self, level: f32);
    fn volume(&self) -> f32;
    /// `None` until metadata for the current source is known.
    fn duration(&self) -> Option<f64>;
}

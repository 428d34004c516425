//! Playback control methods

use crate::error::{OutputError, PlayerError};
use crate::model::{NotificationLevel, PlaybackStatus, PlayerModel, Track};

use super::PlaybackController;

const VOLUME_STEP: f32 = 0.05;

impl PlaybackController {
    pub async fn play(&self) {
        let mut model = self.model.lock().await;
        self.play_locked(&mut model).await;
    }

    pub async fn pause(&self) {
        let mut model = self.model.lock().await;
        self.pause_locked(&mut model);
    }

    pub async fn toggle_playback(&self) {
        let mut model = self.model.lock().await;
        tracing::debug!(status = ?model.state.status, "Toggling playback");
        if model.state.is_playing() {
            self.pause_locked(&mut model);
        } else {
            self.play_locked(&mut model).await;
        }
    }

    pub async fn next(&self) {
        let mut model = self.model.lock().await;
        self.advance(&mut model).await;
    }

    pub async fn previous(&self) {
        let mut model = self.model.lock().await;
        if model.queue.is_empty() {
            return;
        }

        match model.queue.previous_index(model.state.repeat) {
            Some(index) => self.switch_to(&mut model, index).await,
            None => {
                tracing::debug!("Already at the first track, restarting it");
                self.restart_current(&mut model).await;
            }
        }
    }

    /// Replace the current track and, when given, the whole queue, then autoplay.
    ///
    /// The source is probed first; an unreachable source only raises a
    /// notification and leaves everything else untouched.
    pub async fn load_track(&self, track: Track, queue: Option<Vec<Track>>) {
        if let Err(e) = self.probe.probe(&track.source).await {
            tracing::warn!(track = %track.title, source = %track.source, error = %e, "Audio source unreachable");
            let mut model = self.model.lock().await;
            model.notify(NotificationLevel::Error, PlayerError::from(e).to_string());
            return;
        }

        let mut model = self.model.lock().await;
        let replaces_queue = queue.is_some();
        let index = match queue {
            Some(tracks) => model.queue.replace_with(tracks, track),
            None => match model.queue.position_of(&track.id) {
                Some(index) => index,
                None => model.queue.insert_after_current(track),
            },
        };

        tracing::debug!(index, replaces_queue, queue_len = model.queue.len(), "Loading track");
        self.switch_to(&mut model, index).await;
    }

    pub async fn seek(&self, seconds: f64) {
        if !seconds.is_finite() {
            tracing::debug!(seconds, "Ignoring non-finite seek target");
            return;
        }

        let mut model = self.model.lock().await;
        if model.queue.is_empty() {
            return;
        }

        let position = model.state.clamp_position(seconds);
        model.state.elapsed = position;
        self.output.set_current_time(position);
        tracing::debug!(requested = seconds, position, "Seeked");
    }

    pub async fn seek_by(&self, delta: f64) {
        let elapsed = self.model.lock().await.state.elapsed;
        self.seek(elapsed + delta).await;
    }

    pub async fn set_volume(&self, level: f32) {
        let mut model = self.model.lock().await;
        self.set_volume_locked(&mut model, level);
    }

    pub async fn volume_up(&self) {
        let mut model = self.model.lock().await;
        let level = model.state.volume + VOLUME_STEP;
        self.set_volume_locked(&mut model, level);
    }

    pub async fn volume_down(&self) {
        let mut model = self.model.lock().await;
        let level = model.state.volume - VOLUME_STEP;
        self.set_volume_locked(&mut model, level);
    }

    pub async fn set_shuffle(&self, shuffle: bool) {
        self.model.lock().await.state.shuffle = shuffle;
        tracing::info!(shuffle, "Shuffle changed");
    }

    pub async fn toggle_shuffle(&self) {
        let shuffle = !self.model.lock().await.state.shuffle;
        self.set_shuffle(shuffle).await;
    }

    pub async fn set_repeat(&self, repeat: bool) {
        self.model.lock().await.state.repeat = repeat;
        tracing::info!(repeat, "Repeat changed");
    }

    pub async fn toggle_repeat(&self) {
        let repeat = !self.model.lock().await.state.repeat;
        self.set_repeat(repeat).await;
    }

    pub async fn toggle_liked(&self) {
        let mut model = self.model.lock().await;
        let Some(index) = model.queue.index() else {
            tracing::warn!("Cannot toggle liked status: nothing is loaded");
            return;
        };
        let Some(updated) = model.queue.get(index).map(|t| t.with_liked(!t.liked)) else {
            return;
        };

        let message = if updated.liked {
            format!("Added \"{}\" to liked songs", updated.title)
        } else {
            format!("Removed \"{}\" from liked songs", updated.title)
        };
        tracing::info!(track_id = %updated.id, liked = updated.liked, "Track liked status toggled");

        model.queue.replace_at(index, updated);
        model.notify(NotificationLevel::Info, message);
    }

    /// Append a track. An empty queue gets it loaded (but not played).
    pub async fn enqueue(&self, track: Track) {
        let mut model = self.model.lock().await;
        let was_empty = model.queue.is_empty();
        let title = track.title.clone();
        let source = track.source.clone();
        let position = model.queue.push(track);

        if was_empty {
            model.state.rewind();
            model.state.duration = 0.0;
            self.output.set_source(Some(&source));
        }
        tracing::info!(track = %title, position, "Track added to queue");
        model.notify(NotificationLevel::Info, format!("Queued \"{title}\""));
    }

    pub async fn clear_queue(&self) {
        let mut model = self.model.lock().await;
        model.queue.clear();
        self.stop(&mut model);
        model.state.duration = 0.0;
        self.output.set_source(None);
        tracing::info!("Queue cleared");
    }

    // ========================================================================
    // Transitions shared with the output event handlers
    // ========================================================================

    /// Step forward per the shuffle/repeat policy, stopping at the end of a
    /// non-repeating queue.
    pub(crate) async fn advance(&self, model: &mut PlayerModel) {
        if model.queue.is_empty() {
            return;
        }

        let target = if model.state.shuffle {
            model.random_index()
        } else {
            model.queue.next_index(model.state.repeat)
        };

        match target {
            Some(index) => self.switch_to(model, index).await,
            None => {
                tracing::info!("Reached the end of the queue");
                self.stop(model);
            }
        }
    }

    pub(crate) async fn switch_to(&self, model: &mut PlayerModel, index: usize) {
        if !model.queue.select(index) {
            tracing::warn!(index, queue_len = model.queue.len(), "Ignoring out-of-range queue index");
            return;
        }
        let Some(track) = model.queue.current() else {
            return;
        };
        let source = track.source.clone();
        tracing::info!(index, track = %track.title, artist = %track.artist, "Track changed");

        model.state.rewind();
        model.state.duration = 0.0;
        self.output.set_source(Some(&source));
        self.output.set_current_time(0.0);
        self.start_playback(model).await;
    }

    pub(crate) async fn restart_current(&self, model: &mut PlayerModel) {
        model.state.rewind();
        self.output.set_current_time(0.0);
        self.start_playback(model).await;
    }

    pub(crate) fn stop(&self, model: &mut PlayerModel) {
        model.next_attempt();
        self.output.pause();
        self.output.set_current_time(0.0);
        model.state.status = PlaybackStatus::Stopped;
        model.state.rewind();
        tracing::debug!("Playback stopped");
    }

    async fn play_locked(&self, model: &mut PlayerModel) {
        if model.queue.current().is_none() {
            tracing::debug!("Play requested with an empty queue");
            return;
        }
        if model.state.is_playing() {
            return;
        }
        self.start_playback(model).await;
    }

    fn pause_locked(&self, model: &mut PlayerModel) {
        if !model.state.is_playing() {
            return;
        }
        model.next_attempt();
        self.output.pause();
        model.state.set_elapsed(self.output.current_time());
        model.state.status = PlaybackStatus::Paused;
        tracing::info!(elapsed = model.state.elapsed, "Playback paused");
    }

    fn set_volume_locked(&self, model: &mut PlayerModel, level: f32) {
        if !level.is_finite() {
            tracing::debug!(level, "Ignoring non-finite volume");
            return;
        }
        self.output.set_volume(level.clamp(0.0, 1.0));
        model.state.volume = self.output.volume();
        tracing::debug!(volume = model.state.volume, "Volume changed");
    }

    /// Ask the output to play and register a continuation for its answer.
    ///
    /// The state is optimistically `Playing`; the continuation reverts it to
    /// `Paused` on rejection unless a newer attempt has superseded this one.
    async fn start_playback(&self, model: &mut PlayerModel) {
        let Some(track) = model.queue.current() else {
            return;
        };
        let title = track.title.clone();
        let attempt = model.next_attempt();
        model.state.status = PlaybackStatus::Playing;

        let request = self.output.play();
        let shared = self.model.clone();
        let mut attempts = self.attempts.lock().await;
        // reap answered attempts
        while attempts.try_join_next().is_some() {}
        attempts.spawn(async move {
            let result = request.await;
            let mut model = shared.lock().await;
            Self::finish_play_attempt(&mut model, attempt, &title, result);
        });
    }

    fn finish_play_attempt(
        model: &mut PlayerModel,
        attempt: u64,
        title: &str,
        result: Result<(), OutputError>,
    ) {
        if !model.is_current_attempt(attempt) {
            tracing::debug!(attempt, track = title, accepted = result.is_ok(), "Discarding stale play attempt");
            return;
        }

        match result {
            Ok(()) => tracing::debug!(attempt, track = title, "Playback started"),
            Err(e) => {
                tracing::warn!(attempt, track = title, error = %e, "Output rejected playback");
                model.state.status = PlaybackStatus::Paused;
                model.notify(NotificationLevel::Error, PlayerError::from(e).to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use crate::audio::AudioOutput;
    use crate::error::OutputError;
    use crate::model::{NotificationLevel, PlaybackStatus, PlayerSettings};

    fn repeating() -> PlayerSettings {
        PlayerSettings {
            repeat: true,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn next_then_previous_returns_to_index() {
        let ids = ["a", "b", "c", "d"];
        for start in 0..ids.len() {
            let (controller, _output) = controller_with(&ids, repeating(), FakeProbe::default());
            controller.load_track(track(ids[start]), None).await;

            controller.next().await;
            controller.previous().await;

            assert_eq!(controller.snapshot().await.index, Some(start));
        }

        for start in 0..ids.len() - 1 {
            let (controller, _output) = controller(&ids);
            controller.load_track(track(ids[start]), None).await;

            controller.next().await;
            controller.previous().await;

            assert_eq!(controller.snapshot().await.index, Some(start));
        }
    }

    #[tokio::test]
    async fn seek_clamps_to_duration() {
        let (controller, output) = controller(&["a"]);
        controller.on_loaded_metadata(output.generation(), 180.0).await;

        controller.seek(-5.0).await;
        assert_eq!(controller.snapshot().await.state.elapsed, 0.0);

        controller.seek(280.0).await;
        assert_eq!(controller.snapshot().await.state.elapsed, 180.0);
        assert_eq!(output.calls().last(), Some(&Call::Seek(180.0)));

        controller.seek(f64::NAN).await;
        assert_eq!(controller.snapshot().await.state.elapsed, 180.0);
    }

    #[tokio::test]
    async fn seek_by_moves_relative_to_elapsed() {
        let (controller, output) = controller(&["a"]);
        controller.on_loaded_metadata(output.generation(), 100.0).await;
        controller.on_time_update(output.generation(), 40.0).await;

        controller.seek_by(5.0).await;
        assert_eq!(controller.snapshot().await.state.elapsed, 45.0);

        controller.seek_by(-60.0).await;
        assert_eq!(controller.snapshot().await.state.elapsed, 0.0);
    }

    #[tokio::test]
    async fn set_volume_clamps() {
        let (controller, output) = controller(&["a"]);

        controller.set_volume(1.5).await;
        assert_eq!(controller.snapshot().await.state.volume, 1.0);
        assert_eq!(output.calls().last(), Some(&Call::Volume(1.0)));

        controller.set_volume(-0.2).await;
        assert_eq!(controller.snapshot().await.state.volume, 0.0);
        assert_eq!(output.calls().last(), Some(&Call::Volume(0.0)));

        controller.set_volume(f32::NAN).await;
        assert_eq!(controller.snapshot().await.state.volume, 0.0);
    }

    #[tokio::test]
    async fn volume_steps_stay_in_range() {
        let (controller, _output) = controller(&["a"]);
        controller.set_volume(0.98).await;
        controller.volume_up().await;
        assert_eq!(controller.snapshot().await.state.volume, 1.0);

        controller.set_volume(0.5).await;
        controller.volume_down().await;
        let volume = controller.snapshot().await.state.volume;
        assert!((volume - 0.45).abs() < 1e-6);
    }

    #[tokio::test]
    async fn next_runs_off_the_end_and_stops() {
        let (controller, _output) = controller(&["a", "b", "c"]);
        controller.play().await;

        controller.next().await;
        controller.next().await;
        let info = controller.snapshot().await;
        assert_eq!(info.index, Some(2));
        assert_eq!(info.track.map(|t| t.title), Some("C".to_string()));
        assert_eq!(info.state.status, PlaybackStatus::Playing);

        controller.next().await;
        let info = controller.snapshot().await;
        assert_eq!(info.state.status, PlaybackStatus::Stopped);
        assert_eq!(info.index, Some(2));
    }

    #[tokio::test]
    async fn next_wraps_with_repeat() {
        let (controller, _output) = controller_with(&["a", "b"], repeating(), FakeProbe::default());
        controller.next().await;
        controller.next().await;

        let info = controller.snapshot().await;
        assert_eq!(info.index, Some(0));
        assert_eq!(info.state.status, PlaybackStatus::Playing);
    }

    #[tokio::test]
    async fn previous_at_start_restarts_track() {
        let (controller, output) = controller(&["a", "b"]);
        controller.play().await;
        controller.on_loaded_metadata(output.generation(), 200.0).await;
        controller.on_time_update(output.generation(), 42.0).await;

        controller.previous().await;

        let info = controller.snapshot().await;
        assert_eq!(info.index, Some(0));
        assert_eq!(info.state.elapsed, 0.0);
        assert_eq!(info.state.status, PlaybackStatus::Playing);
        assert_eq!(output.play_count(), 2);
    }

    #[tokio::test]
    async fn shuffle_draw_may_repeat_current_track() {
        let (controller, _output) = controller(&["a", "b"]);
        controller.reseed(11).await;
        controller.set_shuffle(true).await;

        let mut picks = Vec::new();
        for _ in 0..64 {
            controller.next().await;
            picks.push(controller.snapshot().await.index.expect("queue is not empty"));
        }

        assert!(picks.iter().all(|i| *i < 2));
        assert!(picks.windows(2).any(|w| w[0] == w[1]));
    }

    #[tokio::test]
    async fn pause_and_resume() {
        let (controller, output) = controller(&["a"]);

        controller.pause().await;
        assert_eq!(controller.snapshot().await.state.status, PlaybackStatus::Stopped);

        controller.toggle_playback().await;
        assert_eq!(controller.snapshot().await.state.status, PlaybackStatus::Playing);

        controller.toggle_playback().await;
        assert_eq!(controller.snapshot().await.state.status, PlaybackStatus::Paused);
        assert_eq!(output.calls().last(), Some(&Call::Pause));

        controller.play().await;
        controller.play().await;
        controller.settle().await;
        assert_eq!(controller.snapshot().await.state.status, PlaybackStatus::Playing);
        assert_eq!(output.play_count(), 2);
    }

    #[tokio::test]
    async fn pause_keeps_the_output_position() {
        let (controller, output) = controller(&["a"]);
        controller.play().await;
        controller.on_loaded_metadata(output.generation(), 100.0).await;
        controller.seek(30.0).await;
        controller.on_time_update(output.generation(), 25.0).await;

        controller.pause().await;
        assert_eq!(controller.snapshot().await.state.elapsed, 30.0);
    }

    #[tokio::test]
    async fn rejected_play_reverts_to_paused_without_retry() {
        let (controller, output) = controller(&["a"]);
        output.script(PlayScript::Reject(OutputError::Rejected("autoplay blocked".into())));

        controller.play().await;
        controller.settle().await;

        let info = controller.snapshot().await;
        assert_eq!(info.state.status, PlaybackStatus::Paused);
        let notification = info.notification.expect("rejection is surfaced");
        assert_eq!(notification.level, NotificationLevel::Error);
        assert!(notification.message.contains("autoplay blocked"));
        assert_eq!(output.play_count(), 1);
    }

    #[tokio::test]
    async fn stale_rejection_does_not_pause_newer_track() {
        let (controller, output) = controller(&["a", "b"]);
        let first = output.hold_next_play();

        controller.load_track(track("a"), None).await;
        controller.load_track(track("b"), None).await;

        first
            .send(Err(OutputError::Rejected("interrupted".into())))
            .expect("attempt is still waiting");
        controller.settle().await;

        let info = controller.snapshot().await;
        assert_eq!(info.state.status, PlaybackStatus::Playing);
        assert_eq!(info.track.map(|t| t.title), Some("B".to_string()));
        assert!(info.notification.is_none());
    }

    #[tokio::test]
    async fn stale_success_does_not_resume_rejected_track() {
        let (controller, output) = controller(&["a", "b"]);
        let first = output.hold_next_play();
        output.script(PlayScript::Reject(OutputError::NoSource));

        controller.load_track(track("a"), None).await;
        controller.load_track(track("b"), None).await;
        first.send(Ok(())).expect("attempt is still waiting");
        controller.settle().await;

        let info = controller.snapshot().await;
        assert_eq!(info.state.status, PlaybackStatus::Paused);
        assert!(info.notification.is_some());
    }

    #[tokio::test]
    async fn pause_supersedes_pending_attempt() {
        let (controller, output) = controller(&["a"]);
        let pending = output.hold_next_play();

        controller.play().await;
        controller.pause().await;
        pending
            .send(Err(OutputError::Rejected("aborted".into())))
            .expect("attempt is still waiting");
        controller.settle().await;

        let info = controller.snapshot().await;
        assert_eq!(info.state.status, PlaybackStatus::Paused);
        assert!(info.notification.is_none());
    }

    #[tokio::test]
    async fn unreachable_source_leaves_state_untouched() {
        let probe = FakeProbe {
            unreachable: vec!["builtin:gone".to_string()],
        };
        let (controller, output) = controller_with(&["a", "b"], PlayerSettings::default(), probe);

        controller.load_track(track("gone"), None).await;

        let info = controller.snapshot().await;
        assert_eq!(info.index, Some(0));
        assert_eq!(info.queue.len(), 2);
        assert_eq!(info.state.status, PlaybackStatus::Stopped);
        assert_eq!(
            info.notification.map(|n| n.level),
            Some(NotificationLevel::Error)
        );
        assert_eq!(output.last_source(), Some("builtin:a".to_string()));
        assert_eq!(output.play_count(), 0);
    }

    #[tokio::test]
    async fn load_track_with_queue_replaces_queue() {
        let (controller, output) = controller(&["a"]);

        controller
            .load_track(track("y"), Some(tracks(&["x", "y", "z"])))
            .await;

        let info = controller.snapshot().await;
        assert_eq!(info.index, Some(1));
        assert_eq!(info.queue.len(), 3);
        assert_eq!(info.state.status, PlaybackStatus::Playing);
        assert_eq!(info.state.elapsed, 0.0);
        assert_eq!(output.last_source(), Some("builtin:y".to_string()));
    }

    #[tokio::test]
    async fn load_track_outside_queue_is_inserted_after_current() {
        let (controller, _output) = controller(&["a", "b"]);

        controller.load_track(track("new"), None).await;

        let info = controller.snapshot().await;
        assert_eq!(info.index, Some(1));
        let ids: Vec<_> = info.queue.iter().map(|t| t.id.as_str().to_string()).collect();
        assert_eq!(ids, ["a", "new", "b"]);

        controller.previous().await;
        assert_eq!(controller.snapshot().await.index, Some(0));
    }

    #[tokio::test]
    async fn toggle_liked_replaces_current_track() {
        let (controller, _output) = controller(&["a", "b"]);

        controller.toggle_liked().await;
        let info = controller.snapshot().await;
        assert!(info.track.as_ref().is_some_and(|t| t.liked));
        assert!(info.queue[0].liked);
        assert!(!info.queue[1].liked);

        controller.toggle_liked().await;
        assert!(!controller.snapshot().await.queue[0].liked);
    }

    #[tokio::test]
    async fn clear_queue_stops_and_disables_playback() {
        let (controller, output) = controller(&["a", "b"]);
        controller.play().await;

        controller.clear_queue().await;
        let info = controller.snapshot().await;
        assert_eq!(info.state.status, PlaybackStatus::Stopped);
        assert_eq!(info.index, None);
        assert_eq!(output.last_source(), None);

        controller.play().await;
        controller.next().await;
        controller.previous().await;
        assert_eq!(controller.snapshot().await.state.status, PlaybackStatus::Stopped);
        assert_eq!(output.play_count(), 1);
    }

    #[tokio::test]
    async fn enqueue_into_empty_queue_loads_without_playing() {
        let (controller, output) = controller(&[]);

        controller.enqueue(track("a")).await;
        controller.enqueue(track("b")).await;

        let info = controller.snapshot().await;
        assert_eq!(info.index, Some(0));
        assert_eq!(info.queue.len(), 2);
        assert_eq!(info.state.status, PlaybackStatus::Stopped);
        assert_eq!(output.last_source(), Some("builtin:a".to_string()));
        assert_eq!(output.play_count(), 0);
    }
}

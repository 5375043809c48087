use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, trace, warn};

use super::{
    likes::LikeSet,
    output::{AudioOutput, MediaSource, OutputEvent, OutputEventKind, SourceToken},
    queue::Queue,
    state::{PlaybackState, PlaybackStatus, RepeatMode, clamp_volume},
};
use crate::types::{PlaylistEntry, Track};

/// Read-only view of the player for display.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStatus {
    pub track: Option<Track>,
    pub index: Option<usize>,
    pub queue_len: usize,
    pub status: PlaybackStatus,
    pub position: f64,
    pub duration: Option<f64>,
    pub volume: f64,
    pub muted: bool,
    pub shuffle: bool,
    pub repeat: RepeatMode,
    pub liked: bool,
}

/// Single authority over what is playing and how.
///
/// Owns the queue, the playback state and the like set, and is the only
/// component that commands the audio output. All operations are safe on an
/// empty queue: anything that would need a current track does nothing.
///
/// Shuffle never reorders the queue. It only changes how the next index is
/// picked: uniformly at random over the whole queue, the current track
/// included.
pub struct Coordinator<O: AudioOutput> {
    output: O,
    queue: Queue,
    state: PlaybackState,
    likes: LikeSet,
    catalog: Vec<Track>,
    rng: StdRng,
    source: Option<SourceToken>,
    notice: Option<String>,
}

impl<O: AudioOutput> Coordinator<O> {
    pub fn new(output: O) -> Self {
        Self::with_rng(output, StdRng::from_os_rng())
    }

    /// Coordinator with a deterministic shuffle sequence.
    pub fn with_seed(output: O, seed: u64) -> Self {
        Self::with_rng(output, StdRng::seed_from_u64(seed))
    }

    fn with_rng(output: O, rng: StdRng) -> Self {
        Self {
            output,
            queue: Queue::new(),
            state: PlaybackState::default(),
            likes: LikeSet::new(),
            catalog: Vec::new(),
            rng,
            source: None,
            notice: None,
        }
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    /// Mutable access for the event loop that drives the output's clock.
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn status(&self) -> PlaybackStatus {
        self.state.status
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.queue.current()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.queue.current_index()
    }

    /// Known tracks. Used as the default queue and to resolve ids.
    pub fn set_catalog(&mut self, tracks: Vec<Track>) {
        self.catalog = tracks;
    }

    pub fn catalog(&self) -> &[Track] {
        &self.catalog
    }

    /// Plays `track` within `queue`.
    ///
    /// Without a queue the catalog is used when it contains the track,
    /// otherwise the track alone. The current index becomes the track's
    /// position in the queue, or 0 if it is not in it.
    ///
    /// Asking again for the track that is already current, with the same
    /// queue, keeps the queue: a paused track resumes where it was, anything
    /// else restarts from 0.
    pub fn load_and_play(&mut self, track: &Track, queue: Option<Vec<Track>>) {
        let queue = match queue {
            Some(q) if !q.is_empty() => q,
            _ => self.default_queue_for(track),
        };

        let is_current = self.queue.current().is_some_and(|c| c.id == track.id);
        if is_current && self.queue.same_tracks(&queue) {
            self.restart_current();
            return;
        }

        let index = queue.iter().position(|t| t.id == track.id).unwrap_or(0);
        self.queue.replace(queue, index);
        self.start_current();
    }

    /// Replaces the queue with `tracks` and plays from `start` (clamped).
    /// Does nothing for an empty list.
    pub fn play_playlist(&mut self, tracks: Vec<Track>, start: usize) {
        if tracks.is_empty() {
            return;
        }
        self.queue.replace(tracks, start);
        self.start_current();
    }

    /// Like [`Coordinator::play_playlist`] for playlist members given as ids
    /// or embedded records. Ids unknown to the catalog are skipped; `start`
    /// counts entries, not resolved tracks.
    pub fn play_entries(&mut self, entries: &[PlaylistEntry], start: usize) {
        let skipped_before = entries
            .iter()
            .take(start)
            .filter(|e| resolve_entry(e, &self.catalog).is_none())
            .count();
        let tracks = resolve_entries(entries, &self.catalog);
        self.play_playlist(tracks, start.saturating_sub(skipped_before));
    }

    pub fn toggle_play_pause(&mut self) {
        match self.state.status {
            PlaybackStatus::Playing => self.pause(),
            PlaybackStatus::Paused | PlaybackStatus::Stopped => self.resume(),
        }
    }

    /// Playing → Paused. Anything else is left alone.
    pub fn pause(&mut self) {
        if self.state.status != PlaybackStatus::Playing {
            return;
        }
        self.output.pause();
        self.state.set_position(self.output.position());
        self.state.status = PlaybackStatus::Paused;
        debug!(position = self.state.position, "paused");
    }

    /// Paused/Stopped → Playing. No-op without a current track.
    pub fn resume(&mut self) {
        if self.queue.current().is_none() || self.state.status == PlaybackStatus::Playing {
            return;
        }
        self.state.status = PlaybackStatus::Playing;
        self.play_output();
        debug!(position = self.state.position, "resumed");
    }

    /// Halts playback and rewinds the track. Queue and index are kept.
    pub fn stop(&mut self) {
        if self.queue.current().is_none() {
            return;
        }
        self.output.stop();
        self.state.status = PlaybackStatus::Stopped;
        self.state.position = 0.0;
        debug!(index = ?self.queue.current_index(), "stopped");
    }

    /// Moves the play-head, clamped to `[0, duration]`. Status is unchanged.
    pub fn seek(&mut self, seconds: f64) {
        if self.queue.current().is_none() {
            return;
        }
        let target = self.state.clamp_position(seconds);
        self.output.seek(target);
        self.state.position = target;
    }

    /// Sets the stored volume (clamped to `[0, 1]`). A level above zero also
    /// unmutes. Without a current track the level is only recorded.
    pub fn set_volume(&mut self, level: f64) {
        let level = clamp_volume(level);
        self.state.volume = level;
        if level > 0.0 {
            self.state.muted = false;
        }
        if self.queue.current().is_some() {
            self.apply_volume();
        }
    }

    /// Flips mute. The stored volume is kept for unmuting.
    pub fn toggle_mute(&mut self) {
        self.state.muted = !self.state.muted;
        if self.queue.current().is_some() {
            self.apply_volume();
        }
    }

    pub fn toggle_shuffle(&mut self) -> bool {
        self.state.shuffle = !self.state.shuffle;
        self.state.shuffle
    }

    pub fn set_shuffle(&mut self, shuffle: bool) {
        self.state.shuffle = shuffle;
    }

    /// None → All → One → None. Returns the new mode.
    pub fn cycle_repeat_mode(&mut self) -> RepeatMode {
        self.state.repeat = self.state.repeat.cycled();
        self.state.repeat
    }

    pub fn set_repeat_mode(&mut self, mode: RepeatMode) {
        self.state.repeat = mode;
    }

    /// Skips forward. With shuffle a random index is picked; otherwise the
    /// next index, wrapping to the start under repeat-all. Past the end
    /// without repeat-all playback stops on the last track.
    ///
    /// Repeat-one does not apply to explicit skips.
    pub fn next(&mut self) {
        let Some(index) = self.queue.current_index() else {
            return;
        };

        let target = if self.state.shuffle {
            self.random_index()
        } else if index + 1 < self.queue.len() {
            index + 1
        } else if self.state.repeat == RepeatMode::All {
            0
        } else {
            self.stop();
            return;
        };
        self.jump_to(target);
    }

    /// Skips back. With shuffle a random index is picked; otherwise the
    /// previous index, wrapping to the end under repeat-all. At the first
    /// track without repeat-all nothing happens.
    pub fn previous(&mut self) {
        let Some(index) = self.queue.current_index() else {
            return;
        };

        let target = if self.state.shuffle {
            self.random_index()
        } else if index > 0 {
            index - 1
        } else if self.state.repeat == RepeatMode::All {
            match self.queue.last_index() {
                Some(last) => last,
                None => return,
            }
        } else {
            return;
        };
        self.jump_to(target);
    }

    /// Routes an output event. Events from a replaced source are dropped.
    ///
    /// Returns whether the event was applied.
    pub fn handle_event(&mut self, event: OutputEvent) -> bool {
        if self.source != Some(event.token) {
            trace!(token = ?event.token, "dropping event from replaced source");
            return false;
        }

        match event.kind {
            OutputEventKind::TimeUpdate(position) => self.state.set_position(position),
            OutputEventKind::MetadataLoaded(duration) => self.state.set_duration(Some(duration)),
            OutputEventKind::Ended => self.on_ended(),
            OutputEventKind::Error(message) => self.media_failed(&message),
        }
        true
    }

    /// Flips like membership. Returns whether the track is liked afterwards.
    pub fn toggle_like(&mut self, track: &Track) -> bool {
        self.likes.toggle(&track.id)
    }

    pub fn is_liked(&self, track: &Track) -> bool {
        self.likes.contains(&track.id)
    }

    pub fn likes(&self) -> &LikeSet {
        &self.likes
    }

    pub fn set_likes(&mut self, likes: LikeSet) {
        self.likes = likes;
    }

    /// Liked tracks known to the catalog, in the order they were liked.
    pub fn liked_tracks(&self) -> Vec<Track> {
        self.likes
            .ids()
            .iter()
            .filter_map(|id| self.catalog.iter().find(|t| &t.id == id))
            .cloned()
            .collect()
    }

    /// Last media failure, for the front end to show once.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    pub fn snapshot(&self) -> PlayerStatus {
        let track = self.queue.current().cloned();
        let liked = track.as_ref().is_some_and(|t| self.likes.contains(&t.id));
        PlayerStatus {
            track,
            index: self.queue.current_index(),
            queue_len: self.queue.len(),
            status: self.state.status,
            position: self.state.position,
            duration: self.state.duration,
            volume: self.state.volume,
            muted: self.state.muted,
            shuffle: self.state.shuffle,
            repeat: self.state.repeat,
            liked,
        }
    }

    /// Only a playing track advances. An end queued behind a pause or stop
    /// is ignored.
    fn on_ended(&mut self) {
        if self.state.status != PlaybackStatus::Playing {
            trace!(status = ?self.state.status, "ignoring end while not playing");
            return;
        }
        let Some(index) = self.queue.current_index() else {
            return;
        };

        if self.state.repeat == RepeatMode::One {
            self.restart_from_zero();
            return;
        }

        let target = if self.state.shuffle {
            self.random_index()
        } else if index + 1 < self.queue.len() {
            index + 1
        } else if self.state.repeat == RepeatMode::All {
            0
        } else {
            self.stop();
            return;
        };
        self.jump_to(target);
    }

    fn jump_to(&mut self, index: usize) {
        if self.queue.select(index) {
            self.start_current();
        }
    }

    fn random_index(&mut self) -> usize {
        self.rng.random_range(0..self.queue.len())
    }

    /// Points the output at the current track and starts it from 0.
    fn start_current(&mut self) {
        let Some(track) = self.queue.current() else {
            return;
        };
        let source = MediaSource::from(track);

        self.source = Some(self.output.set_source(&source));
        self.state.position = 0.0;
        self.state.set_duration(source.duration_hint);
        self.state.status = PlaybackStatus::Playing;
        self.apply_volume();
        debug!(
            track = %source.track_id,
            index = ?self.queue.current_index(),
            "track loaded"
        );
        self.play_output();
    }

    fn restart_current(&mut self) {
        if self.state.status == PlaybackStatus::Paused {
            self.resume();
        } else {
            self.restart_from_zero();
        }
    }

    fn restart_from_zero(&mut self) {
        self.output.seek(0.0);
        self.state.position = 0.0;
        self.state.status = PlaybackStatus::Playing;
        self.play_output();
    }

    fn play_output(&mut self) {
        if let Err(e) = self.output.play() {
            let message = e.to_string();
            self.media_failed(&message);
        }
    }

    /// Media errors are not fatal: the status stays as it is and the front
    /// end gets a notice. Nothing is retried.
    fn media_failed(&mut self, message: &str) {
        let title = self
            .queue
            .current()
            .map(|t| t.title.clone())
            .unwrap_or_default();
        warn!(track = %title, error = %message, "playback failed");
        self.notice = Some(format!("Cannot play \"{title}\": {message}"));
    }

    fn apply_volume(&mut self) {
        self.output.set_volume(self.state.effective_volume());
    }

    fn default_queue_for(&self, track: &Track) -> Vec<Track> {
        if self.catalog.iter().any(|t| t.id == track.id) {
            self.catalog.clone()
        } else {
            vec![track.clone()]
        }
    }
}

fn resolve_entry(entry: &PlaylistEntry, catalog: &[Track]) -> Option<Track> {
    match entry {
        PlaylistEntry::Track(track) => Some(track.clone()),
        PlaylistEntry::Id(id) => catalog.iter().find(|t| &t.id == id).cloned(),
    }
}

/// Turns playlist members into tracks. Ids are looked up in `catalog`;
/// unknown ids are skipped.
pub fn resolve_entries(entries: &[PlaylistEntry], catalog: &[Track]) -> Vec<Track> {
    entries
        .iter()
        .filter_map(|entry| {
            let track = resolve_entry(entry, catalog);
            if track.is_none() {
                debug!(id = entry.id(), "playlist entry not in catalog");
            }
            track
        })
        .collect()
}

//! The audio output handle the coordinator drives.
//!
//! An output accepts a media source, starts and stops it, reports its
//! position, and emits events (position updates, metadata, natural end)
//! through a channel. Every source assignment returns a fresh
//! [`SourceToken`] and every event carries the token of the source that
//! produced it, so events from a replaced source are recognisable and can be
//! dropped.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::trace;

use crate::{error::OutputError, types::Track};

/// Generation number of a source assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SourceToken(u64);

impl SourceToken {
    pub fn next(self) -> Self {
        SourceToken(self.0.wrapping_add(1))
    }
}

/// What the output is asked to play.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaSource {
    pub track_id: String,
    pub url: Option<String>,
    /// Length reported by the backend, if any.
    pub duration_hint: Option<f64>,
}

impl From<&Track> for MediaSource {
    fn from(track: &Track) -> Self {
        Self {
            track_id: track.id.clone(),
            url: track.audio_url.clone().filter(|u| !u.is_empty()),
            duration_hint: track.duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutputEventKind {
    /// Play-head moved (seconds)
    TimeUpdate(f64),
    /// Duration became known (seconds)
    MetadataLoaded(f64),
    /// The track played to its natural end
    Ended,
    /// The media failed after it was accepted
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputEvent {
    pub token: SourceToken,
    pub kind: OutputEventKind,
}

pub trait AudioOutput {
    /// Points the output at a new source, discarding the previous one.
    fn set_source(&mut self, source: &MediaSource) -> SourceToken;

    fn play(&mut self) -> Result<(), OutputError>;

    fn pause(&mut self);

    /// Halts playback and rewinds to 0. The source stays assigned.
    fn stop(&mut self);

    fn seek(&mut self, seconds: f64);

    /// Output level in `[0, 1]`.
    fn set_volume(&mut self, level: f64);

    fn position(&self) -> f64;

    fn duration(&self) -> Option<f64>;
}

/// Headless output that moves a play-head along a clock.
///
/// No samples are decoded; the front end calls [`ClockOutput::advance`] on
/// every tick and the output reports progress and the natural end of each
/// track exactly like a streaming element would.
pub struct ClockOutput {
    events: mpsc::UnboundedSender<OutputEvent>,
    token: SourceToken,
    source: Option<MediaSource>,
    position: f64,
    duration: Option<f64>,
    playing: bool,
    fallback_duration: f64,
}

impl ClockOutput {
    /// Creates the output and the receiving end of its event channel.
    ///
    /// `fallback_duration` is used for sources without a duration hint.
    pub fn new(fallback_duration: f64) -> (Self, mpsc::UnboundedReceiver<OutputEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let output = Self {
            events,
            token: SourceToken::default(),
            source: None,
            position: 0.0,
            duration: None,
            playing: false,
            fallback_duration: fallback_duration.max(1.0),
        };
        (output, rx)
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Moves the play-head by `elapsed` if playing; emits `Ended` when the
    /// track runs out.
    pub fn advance(&mut self, elapsed: Duration) {
        if !self.playing {
            return;
        }
        let Some(duration) = self.duration else {
            return;
        };

        self.position = (self.position + elapsed.as_secs_f64()).min(duration);
        self.emit(OutputEventKind::TimeUpdate(self.position));

        if self.position >= duration {
            self.playing = false;
            trace!(token = ?self.token, "source ended");
            self.emit(OutputEventKind::Ended);
        }
    }

    fn emit(&self, kind: OutputEventKind) {
        // The receiver is gone only when the player loop is shutting down.
        let _ = self.events.send(OutputEvent {
            token: self.token,
            kind,
        });
    }
}

impl AudioOutput for ClockOutput {
    fn set_source(&mut self, source: &MediaSource) -> SourceToken {
        self.token = self.token.next();
        self.playing = false;
        self.position = 0.0;
        self.source = Some(source.clone());
        self.duration = source.url.as_ref().map(|_| {
            source
                .duration_hint
                .filter(|d| d.is_finite() && *d > 0.0)
                .unwrap_or(self.fallback_duration)
        });

        if let Some(duration) = self.duration {
            self.emit(OutputEventKind::MetadataLoaded(duration));
        }
        self.token
    }

    fn play(&mut self) -> Result<(), OutputError> {
        let Some(duration) = self.duration else {
            return Err(OutputError::MissingSource);
        };
        if self.position >= duration {
            self.position = 0.0;
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn stop(&mut self) {
        self.playing = false;
        self.position = 0.0;
    }

    fn seek(&mut self, seconds: f64) {
        let upper = self.duration.unwrap_or(0.0);
        self.position = seconds.clamp(0.0, upper);
        self.emit(OutputEventKind::TimeUpdate(self.position));
    }

    // Nothing is rendered, so the level is only traced.
    fn set_volume(&mut self, level: f64) {
        trace!(level, "volume");
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }
}

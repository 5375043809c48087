//! Playback status, repeat mode and the numeric playback fields.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackStatus {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Repeat mode, cycled in the order None → All → One → None.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RepeatMode {
    /// Stop when the queue runs out
    #[default]
    None,
    /// Wrap around to the start of the queue
    All,
    /// Loop the current track
    One,
}

impl RepeatMode {
    pub fn cycled(self) -> Self {
        match self {
            RepeatMode::None => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::None,
        }
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RepeatMode::None => "none",
            RepeatMode::All => "all",
            RepeatMode::One => "one",
        };
        f.write_str(label)
    }
}

impl FromStr for RepeatMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "off" => Ok(RepeatMode::None),
            "all" => Ok(RepeatMode::All),
            "one" => Ok(RepeatMode::One),
            other => Err(format!(
                "Invalid repeat mode: '{other}'. Valid options: none, all, one"
            )),
        }
    }
}

/// Everything the coordinator knows about "how" the current track plays.
///
/// `position` and `duration` are seconds. Once a duration is known the
/// position never exceeds it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub status: PlaybackStatus,
    pub position: f64,
    pub duration: Option<f64>,
    pub volume: f64,
    pub muted: bool,
    pub shuffle: bool,
    pub repeat: RepeatMode,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            status: PlaybackStatus::Stopped,
            position: 0.0,
            duration: None,
            volume: 1.0,
            muted: false,
            shuffle: false,
            repeat: RepeatMode::None,
        }
    }
}

impl PlaybackState {
    /// Level actually sent to the output.
    pub fn effective_volume(&self) -> f64 {
        if self.muted { 0.0 } else { self.volume }
    }

    /// Clamps `seconds` into `[0, duration]` (upper bound only once known).
    pub fn clamp_position(&self, seconds: f64) -> f64 {
        let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
        match self.duration {
            Some(duration) => seconds.min(duration),
            None => seconds,
        }
    }

    pub fn set_position(&mut self, seconds: f64) {
        self.position = self.clamp_position(seconds);
    }

    pub fn set_duration(&mut self, seconds: Option<f64>) {
        self.duration = seconds.filter(|d| d.is_finite()).map(|d| d.max(0.0));
        self.position = self.clamp_position(self.position);
    }
}

pub(crate) fn clamp_volume(level: f64) -> f64 {
    if level.is_nan() {
        return 0.0;
    }
    level.clamp(0.0, 1.0)
}

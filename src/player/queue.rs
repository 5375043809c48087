use crate::types::Track;

/// Ordered tracks eligible for next/previous navigation plus the current
/// position.
///
/// `current` is either `None` (nothing selected) or a valid index into
/// `tracks`; every mutator keeps it that way.
#[derive(Debug, Clone, Default)]
pub struct Queue {
    tracks: Vec<Track>,
    current: Option<usize>,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole queue. `start` is clamped into range; an empty
    /// list leaves nothing selected.
    pub fn replace(&mut self, tracks: Vec<Track>, start: usize) {
        self.current = if tracks.is_empty() {
            None
        } else {
            Some(start.min(tracks.len() - 1))
        };
        self.tracks = tracks;
    }

    /// Moves the cursor. Out-of-range indices are refused.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.tracks.len() {
            self.current = Some(index);
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> Option<&Track> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn last_index(&self) -> Option<usize> {
        self.tracks.len().checked_sub(1)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// True when `other` holds the same track ids in the same order.
    pub fn same_tracks(&self, other: &[Track]) -> bool {
        self.tracks.len() == other.len()
            && self.tracks.iter().zip(other).all(|(a, b)| a.id == b.id)
    }
}

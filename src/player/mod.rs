//! Playback: the queue, the playback state, likes, and the coordinator that
//! ties them to an audio output.

mod coordinator;
mod likes;
mod output;
mod queue;
mod state;

pub use coordinator::{Coordinator, PlayerStatus, resolve_entries};
pub use likes::LikeSet;
pub use output::{AudioOutput, ClockOutput, MediaSource, OutputEvent, OutputEventKind, SourceToken};
pub use queue::Queue;
pub use state::{PlaybackState, PlaybackStatus, RepeatMode};

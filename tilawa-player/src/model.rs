//! Playback state enumeration

/// Coarse state of the sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    /// Nothing cued
    #[default]
    Idle,
    /// A verse is cued but not sounding
    CuedPaused,
    /// A verse is cued and the engine confirmed playback
    CuedPlaying,
}

impl PlaybackStatus {
    pub fn from_parts(current_index: Option<usize>, is_playing: bool) -> Self {
        match (current_index, is_playing) {
            (None, _) => PlaybackStatus::Idle,
            (Some(_), false) => PlaybackStatus::CuedPaused,
            (Some(_), true) => PlaybackStatus::CuedPlaying,
        }
    }
}

/// Point-in-time copy of the sequencer state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackSnapshot {
    pub status: PlaybackStatus,
    pub current_index: Option<usize>,
    pub is_playing: bool,
    pub repeat_one: bool,
    /// A start request is waiting for the engine's answer
    pub starting: bool,
    pub verse_count: usize,
}

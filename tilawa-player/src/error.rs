//! Error types for tilawa-player
//!
//! Playback failures never surface as errors from sequencer commands; they
//! become state changes. These types cover the engine seam only.

use thiserror::Error;

/// Failure reported synchronously by an [`crate::AudioEngine`]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The engine could not create a playable resource for the URL
    #[error("Failed to load audio resource {url}: {reason}")]
    Load { url: String, reason: String },

    /// The engine has been shut down
    #[error("Audio engine unavailable")]
    Unavailable,
}

//! Error types for the tracking subsystem.
//!
//! Only configuration-level problems are fatal; within-frame data
//! anomalies shrink the trace set instead of aborting the run.

use celltrace_core::CoreError;
use thiserror::Error;

/// Errors that can occur while tracking a mask sequence.
#[derive(Debug, Error)]
pub enum TrackError {
    /// `min_size` must be positive when configured.
    #[error("Invalid minimum region size: {0} (must be positive)")]
    InvalidMinSize(usize),

    /// `max_size` must be positive when configured.
    #[error("Invalid maximum region size: {0} (must be positive)")]
    InvalidMaxSize(usize),

    /// `min_size` must not exceed `max_size`.
    #[error("Size bounds reversed: min_size {min} > max_size {max}")]
    SizeBoundsReversed { min: usize, max: usize },

    /// The input sequence contained no frames.
    #[error("Empty frame sequence")]
    EmptySequence,

    /// A frame's dimensions differ from the first frame's.
    #[error("Frame {frame} is {actual_width}x{actual_height}, expected {expected_width}x{expected_height}")]
    FrameSizeMismatch {
        frame: usize,
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    /// Tracking was cancelled at a frame boundary.
    #[error("Tracking cancelled")]
    Cancelled,

    /// Error from the core mask/geometry types.
    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

/// Result type alias for tracking operations.
pub type TrackResult<T> = std::result::Result<T, TrackError>;

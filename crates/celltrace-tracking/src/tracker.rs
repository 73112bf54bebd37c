//! The tracking driver: configuration checks, the frame fold, and the
//! labeling front-end.

use crate::catalog::FrameCatalog;
use crate::error::{TrackError, TrackResult};
use crate::label::label_mask;
use crate::linker::LineageLinker;
use crate::selector::{select_traces, SelectedTrace};
use celltrace_core::{BinaryMask, LabelMask};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// Configuration for a tracking run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackConfig {
    /// Regions below this area are flagged too small (unbounded if `None`).
    pub min_size: Option<usize>,
    /// Regions above this area are flagged too large (unbounded if `None`).
    pub max_size: Option<usize>,
    /// Whether to flag regions touching the frame border.
    pub check_edges: bool,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            min_size: Some(1000),
            max_size: Some(10000),
            check_edges: true,
        }
    }
}

impl TrackConfig {
    /// Reject unusable size bounds. Called before any frame is touched.
    pub fn validate(&self) -> TrackResult<()> {
        if self.min_size == Some(0) {
            return Err(TrackError::InvalidMinSize(0));
        }
        if self.max_size == Some(0) {
            return Err(TrackError::InvalidMaxSize(0));
        }
        if let (Some(min), Some(max)) = (self.min_size, self.max_size) {
            if min > max {
                return Err(TrackError::SizeBoundsReversed { min, max });
            }
        }
        Ok(())
    }
}

/// Progress callback: (frames processed so far, total frames).
pub type ProgressFn = Box<dyn Fn(usize, usize) + Send + Sync>;

/// Tracks cell lineages through a sequence of labeled frames.
///
/// The sequence is processed strictly in order; exactly one previous
/// frame catalog is kept alive at any point.
pub struct Tracker {
    config: TrackConfig,
    on_progress: Option<ProgressFn>,
}

impl Tracker {
    /// Create a tracker with the given configuration.
    pub fn new(config: TrackConfig) -> Self {
        Self {
            config,
            on_progress: None,
        }
    }

    /// Register a progress callback, invoked once per processed frame.
    pub fn with_progress(mut self, callback: ProgressFn) -> Self {
        self.on_progress = Some(callback);
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &TrackConfig {
        &self.config
    }

    /// Track a sequence of labeled frames.
    ///
    /// Fails before touching frame 0 on configuration errors, an empty
    /// sequence, or mismatched frame dimensions. Within-frame anomalies
    /// never abort the run; they only shrink the resulting trace set.
    pub fn track(&self, frames: &[LabelMask]) -> TrackResult<Vec<SelectedTrace>> {
        self.track_inner(frames, None)
    }

    /// Like [`track`](Self::track), but checks `cancel` once per frame
    /// boundary and returns [`TrackError::Cancelled`] when it is set.
    pub fn track_with_cancel(
        &self,
        frames: &[LabelMask],
        cancel: &AtomicBool,
    ) -> TrackResult<Vec<SelectedTrace>> {
        self.track_inner(frames, Some(cancel))
    }

    /// Label each binary mask, then track the labeled sequence.
    pub fn track_binary(&self, frames: &[BinaryMask]) -> TrackResult<Vec<SelectedTrace>> {
        let labeled: Vec<LabelMask> = frames.iter().map(label_mask).collect();
        self.track(&labeled)
    }

    fn track_inner(
        &self,
        frames: &[LabelMask],
        cancel: Option<&AtomicBool>,
    ) -> TrackResult<Vec<SelectedTrace>> {
        self.config.validate()?;
        let first = frames.first().ok_or(TrackError::EmptySequence)?;
        let (height, width) = first.dimensions();
        for (frame, mask) in frames.iter().enumerate() {
            if mask.dimensions() != (height, width) {
                return Err(TrackError::FrameSizeMismatch {
                    frame,
                    expected_width: width,
                    expected_height: height,
                    actual_width: mask.width,
                    actual_height: mask.height,
                });
            }
        }

        let n_frames = frames.len();
        let mut previous = FrameCatalog::build(first, &self.config);
        let mut linker = LineageLinker::begin(&previous);
        debug!(
            frame = 0,
            regions = previous.len(),
            open = linker.open_count(),
            "Frame linked"
        );
        self.report_progress(1, n_frames);

        for (frame, mask) in frames.iter().enumerate().skip(1) {
            if let Some(flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    return Err(TrackError::Cancelled);
                }
            }
            let current = FrameCatalog::build(mask, &self.config);
            linker.step(&current, &previous);
            debug!(
                frame,
                regions = current.len(),
                open = linker.open_count(),
                "Frame linked"
            );
            self.report_progress(frame + 1, n_frames);
            previous = current;
        }

        Ok(select_traces(linker.into_traces(), n_frames))
    }

    fn report_progress(&self, done: usize, total: usize) {
        if let Some(callback) = &self.on_progress {
            callback(done, total);
        }
    }
}

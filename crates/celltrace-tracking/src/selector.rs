//! Final trace filtering.
//!
//! Downstream read-out only acts on cells that were followed through the
//! whole sequence, so traces shorter than the full frame count and
//! traces whose lineage became ambiguous are silently excluded.

use crate::linker::{Selection, Trace};
use serde::{Deserialize, Serialize};

/// A retained trace: one label per frame plus the final trust flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedTrace {
    /// Region label per frame, frame 0 first.
    pub labels: Vec<u32>,
    /// `true` for an unambiguous lineage of normally sized ancestors,
    /// `false` if a size anomaly was touched along the way.
    pub selected: bool,
}

/// Keep the traces that span every frame and carry a definite verdict.
pub fn select_traces(traces: Vec<Trace>, n_frames: usize) -> Vec<SelectedTrace> {
    traces
        .into_iter()
        .filter_map(|trace| {
            if trace.labels.len() != n_frames {
                return None;
            }
            match trace.selection {
                Selection::Good => Some(SelectedTrace {
                    labels: trace.labels,
                    selected: true,
                }),
                Selection::Tainted => Some(SelectedTrace {
                    labels: trace.labels,
                    selected: false,
                }),
                Selection::Invalid => None,
            }
        })
        .collect()
}

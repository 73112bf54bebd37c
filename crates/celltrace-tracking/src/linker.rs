//! The frame-to-frame lineage state machine.
//!
//! `LineageLinker` walks the frame sequence in order, carrying the
//! mapping from the most recent frame's labels to open trace slots. All
//! ambiguity is resolved by fixed deterministic rules; there is no
//! backtracking. Traces are opened only on frame 0; a region that first
//! appears later is never tracked.

use crate::catalog::FrameCatalog;
use crate::overlap::find_overlaps;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Trust verdict for a trace.
///
/// The ordering is the downgrade ordering: a selection only ever moves
/// from `Good` toward `Invalid`, never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Selection {
    /// Unambiguous lineage of normally sized ancestors.
    Good,
    /// Usable, but an ancestor was too small or too large at some point.
    Tainted,
    /// Ambiguous lineage; dropped by the selector.
    Invalid,
}

impl Selection {
    /// Move toward `Invalid`; upgrades are silently ignored.
    #[inline]
    pub fn degrade(&mut self, to: Selection) {
        *self = (*self).max(to);
    }

    #[inline]
    pub fn is_invalid(self) -> bool {
        self == Selection::Invalid
    }
}

/// One cell's history: the region label it carried in each frame from
/// frame 0 forward, plus the current trust verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trace {
    pub labels: Vec<u32>,
    pub selection: Selection,
}

/// Ordering bucket for a candidate parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Rank {
    Normal,
    Large,
    Small,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    label: u32,
    area: usize,
    rank: Rank,
}

/// Sequential lineage-linking state, updated frame by frame.
#[derive(Debug)]
pub struct LineageLinker {
    traces: Vec<Trace>,
    /// Maps the most recently processed frame's labels to trace slots.
    index: HashMap<u32, usize>,
}

impl LineageLinker {
    /// Open traces for the regions of frame 0.
    ///
    /// A region that touches the frame edge *and* is too small is treated
    /// as a segmentation artifact and opens no trace. Every other region
    /// gets a slot, starting `Good` only if its validity is clean.
    pub fn begin(first: &FrameCatalog) -> Self {
        let mut traces = Vec::with_capacity(first.len());
        let mut index = HashMap::with_capacity(first.len());

        for region in first.iter() {
            let validity = region.validity;
            if validity.unchecked() {
                warn!(label = region.label, "Skipping unclassifiable frame-0 region");
                continue;
            }
            if validity.at_edge() && validity.too_small() {
                continue;
            }
            index.insert(region.label, traces.len());
            traces.push(Trace {
                labels: vec![region.label],
                selection: if validity.is_good() {
                    Selection::Good
                } else {
                    Selection::Tainted
                },
            });
        }

        Self { traces, index }
    }

    /// Link one frame against its predecessor.
    ///
    /// `new` must be the catalog of the frame directly after `old`; the
    /// caller drives frames strictly in order.
    pub fn step(&mut self, new: &FrameCatalog, old: &FrameCatalog) {
        let overlaps = find_overlaps(new, old);
        let mut next_index: HashMap<u32, usize> = HashMap::new();
        let mut claimed: HashSet<usize> = HashSet::new();

        for (region, old_labels) in new.iter().zip(&overlaps) {
            if region.validity.unchecked() || region.validity.at_edge() {
                // Edge-touching regions are about to leave the field of
                // view; their parents' traces simply close here.
                continue;
            }
            if old_labels.is_empty() {
                // Birth after frame 0: not tracked.
                continue;
            }

            let (candidates, poisoned) = self.collect_candidates(old, old_labels);

            let chosen = if poisoned {
                None
            } else {
                choose_parent(&candidates)
            };

            let Some(parent) = chosen else {
                if candidates.is_empty() {
                    continue;
                }
                // Ambiguous match: every listed candidate's open trace is
                // permanently distrusted, and none is extended.
                debug!(
                    label = region.label,
                    candidates = candidates.len(),
                    "Ambiguous lineage, invalidating candidate parents"
                );
                for candidate in &candidates {
                    if let Some(&slot) = self.index.get(&candidate.label) {
                        self.traces[slot].selection.degrade(Selection::Invalid);
                    }
                }
                continue;
            };

            let Some(&slot) = self.index.get(&parent.label) else {
                // Parent never opened a trace (e.g. a frame-0 skip); the
                // child cannot be connected to anything.
                continue;
            };
            if self.traces[slot].selection.is_invalid() {
                // Invalid ancestry is never resurrected.
                continue;
            }
            if !claimed.insert(slot) {
                // Split: a sibling already took this trace. The first
                // claimant keeps the extension, the trace's history stays,
                // but it is no longer trusted.
                self.traces[slot].selection.degrade(Selection::Invalid);
                continue;
            }

            self.traces[slot].labels.push(region.label);
            next_index.insert(region.label, slot);
            // A size anomaly anywhere in the lineage (the chosen parent
            // or the newly appended region itself) permanently demotes
            // the trace to "usable but untrusted".
            if parent.rank != Rank::Normal
                || region.validity.too_small()
                || region.validity.too_large()
            {
                self.traces[slot].selection.degrade(Selection::Tainted);
            }
        }

        self.index = next_index;
    }

    /// Rank the overlapping old regions as candidate parents.
    ///
    /// Returns the ordered candidate list and whether the match was
    /// poisoned by an edge-touching, normally sized parent (in which case
    /// candidates collected up to that point are the ones to invalidate).
    fn collect_candidates(
        &self,
        old: &FrameCatalog,
        old_labels: &[u32],
    ) -> (SmallVec<[Candidate; 4]>, bool) {
        let mut candidates: SmallVec<[Candidate; 4]> = SmallVec::new();

        for &old_label in old_labels {
            let Some(parent) = old.get(old_label) else {
                warn!(label = old_label, "Overlap candidate missing from catalog");
                continue;
            };
            let validity = parent.validity;
            if validity.unchecked() {
                continue;
            }
            if validity.at_edge() {
                if validity.too_small() {
                    continue;
                }
                // A normally sized parent leaving the field of view makes
                // the whole match ambiguous.
                return (candidates, true);
            }
            let rank = if validity.too_small() {
                Rank::Small
            } else if validity.too_large() {
                Rank::Large
            } else {
                Rank::Normal
            };
            candidates.push(Candidate {
                label: parent.label,
                area: parent.area,
                rank,
            });
        }

        // Stable: Normal parents first, Large second-to-last, Small last,
        // encounter order preserved within each bucket.
        candidates.sort_by_key(|c| c.rank);
        (candidates, false)
    }

    /// Number of traces currently open (linked in the last frame).
    pub fn open_count(&self) -> usize {
        self.index.len()
    }

    /// All traces recorded so far, open and closed.
    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    /// Finalize and hand the traces to the selector.
    pub fn into_traces(self) -> Vec<Trace> {
        self.traces
    }
}

/// Pick the definite parent, or `None` when the match is ambiguous.
///
/// The documented rules cover one- and two-candidate sets; any larger
/// set of competitors is conservatively treated as ambiguous.
fn choose_parent(candidates: &[Candidate]) -> Option<Candidate> {
    match candidates {
        [only] => Some(*only),
        [first, second] => {
            if second.rank == Rank::Small {
                if first.rank == Rank::Small {
                    // Merge of small fragments: the larger body wins.
                    Some(if second.area > first.area {
                        *second
                    } else {
                        *first
                    })
                } else {
                    Some(*first)
                }
            } else {
                None
            }
        }
        _ => None,
    }
}

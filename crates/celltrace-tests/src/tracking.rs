//! Integration tests for the tracking pipeline.
//!
//! Exercises cross-crate interactions between celltrace-core and
//! celltrace-tracking: full mask sequences in, selected traces out.

use celltrace_core::{BinaryMask, LabelMask};
use celltrace_tracking::{TrackConfig, Tracker};

// ── Helpers ────────────────────────────────────────────────────

fn mask(rows: &[&[u32]]) -> LabelMask {
    let height = rows.len() as u32;
    let width = rows[0].len() as u32;
    let data = rows.iter().flat_map(|r| r.iter().copied()).collect();
    LabelMask::from_raw(width, height, data).unwrap()
}

fn tracker(min_size: Option<usize>, max_size: Option<usize>) -> Tracker {
    Tracker::new(TrackConfig {
        min_size,
        max_size,
        check_edges: true,
    })
}

// ── Straightforward lineages ───────────────────────────────────

#[test]
fn two_cells_tracked_independently() {
    let f0 = mask(&[
        &[0, 0, 0, 0, 0, 0],
        &[0, 1, 1, 0, 2, 0],
        &[0, 1, 1, 0, 2, 0],
        &[0, 0, 0, 0, 0, 0],
    ]);
    let f1 = f0.clone();

    let traces = tracker(None, None).track(&[f0, f1]).unwrap();
    assert_eq!(traces.len(), 2);
    assert_eq!(traces[0].labels, vec![1, 1]);
    assert!(traces[0].selected);
    assert_eq!(traces[1].labels, vec![2, 2]);
    assert!(traces[1].selected);
}

#[test]
fn moving_cell_followed_across_relabeling() {
    // The same cell drifts right and carries a different label each frame.
    let f0 = mask(&[
        &[0, 0, 0, 0, 0, 0],
        &[0, 4, 4, 0, 0, 0],
        &[0, 4, 4, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0],
    ]);
    let f1 = mask(&[
        &[0, 0, 0, 0, 0, 0],
        &[0, 0, 7, 7, 0, 0],
        &[0, 0, 7, 7, 0, 0],
        &[0, 0, 0, 0, 0, 0],
    ]);
    let f2 = mask(&[
        &[0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 2, 2, 0],
        &[0, 0, 0, 2, 2, 0],
        &[0, 0, 0, 0, 0, 0],
    ]);

    let traces = tracker(None, None).track(&[f0, f1, f2]).unwrap();
    assert_eq!(traces.len(), 1);
    assert_eq!(traces[0].labels, vec![4, 7, 2]);
    assert!(traces[0].selected);
}

#[test]
fn shrunken_descendant_demotes_trace() {
    // Good cell, then a descendant below the minimum size: trace is kept
    // but no longer trusted.
    let f0 = mask(&[
        &[0, 0, 0, 0],
        &[0, 1, 1, 0],
        &[0, 1, 1, 0],
        &[0, 0, 0, 0],
    ]);
    let f1 = mask(&[
        &[0, 0, 0, 0],
        &[0, 1, 1, 0],
        &[0, 0, 0, 0],
        &[0, 0, 0, 0],
    ]);

    let traces = tracker(Some(4), None).track(&[f0, f1]).unwrap();
    assert_eq!(traces.len(), 1);
    assert_eq!(traces[0].labels, vec![1, 1]);
    assert!(!traces[0].selected);
}

#[test]
fn demoted_trace_never_recovers() {
    let good = mask(&[
        &[0, 0, 0, 0],
        &[0, 1, 1, 0],
        &[0, 1, 1, 0],
        &[0, 0, 0, 0],
    ]);
    let small = mask(&[
        &[0, 0, 0, 0],
        &[0, 1, 1, 0],
        &[0, 0, 0, 0],
        &[0, 0, 0, 0],
    ]);

    // good → small → good again: the demotion sticks.
    let traces = tracker(Some(4), None)
        .track(&[good.clone(), small, good])
        .unwrap();
    assert_eq!(traces.len(), 1);
    assert_eq!(traces[0].labels, vec![1, 1, 1]);
    assert!(!traces[0].selected);
}

// ── Merges and splits ──────────────────────────────────────────

#[test]
fn merge_discards_both_lineages() {
    let f0 = mask(&[
        &[0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 1, 1, 0, 0, 2, 2, 0],
        &[0, 1, 1, 0, 0, 2, 2, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0],
    ]);
    let f1 = mask(&[
        &[0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 3, 3, 3, 3, 3, 3, 0],
        &[0, 3, 3, 3, 3, 3, 3, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0],
    ]);

    let traces = tracker(None, None).track(&[f0, f1]).unwrap();
    assert!(traces.is_empty());
}

#[test]
fn split_discards_the_lineage() {
    let f0 = mask(&[
        &[0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 1, 1, 1, 1, 1, 1, 0],
        &[0, 1, 1, 1, 1, 1, 1, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0],
    ]);
    let f1 = mask(&[
        &[0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 2, 2, 0, 0, 3, 3, 0],
        &[0, 2, 2, 0, 0, 3, 3, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0],
    ]);

    // One daughter claims the trace, the second claimant invalidates it;
    // nothing survives selection.
    let traces = tracker(None, None).track(&[f0, f1]).unwrap();
    assert!(traces.is_empty());
}

#[test]
fn small_fragment_merging_into_cell_is_absorbed() {
    // A below-minimum fragment merges into a proper cell: the cell's
    // lineage continues and stays trusted.
    let f0 = mask(&[
        &[0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 1, 1, 1, 0, 0, 2, 0],
        &[0, 1, 1, 1, 0, 0, 2, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0],
    ]);
    let f1 = mask(&[
        &[0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 5, 5, 5, 5, 5, 5, 0],
        &[0, 5, 5, 5, 5, 5, 5, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0],
    ]);

    let traces = tracker(Some(4), None).track(&[f0, f1]).unwrap();
    assert_eq!(traces.len(), 1);
    assert_eq!(traces[0].labels, vec![1, 5]);
    assert!(traces[0].selected);
}

// ── Frame edges ────────────────────────────────────────────────

#[test]
fn edge_artifact_opens_no_trace() {
    // Label 1: two pixels on the top border, below the minimum size; a
    // segmentation artifact, not a cell. Label 2 is a proper interior cell.
    let f0 = mask(&[
        &[0, 0, 0, 1, 1, 0],
        &[0, 2, 2, 0, 0, 0],
        &[0, 2, 2, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0],
    ]);
    let f1 = f0.clone();

    let traces = tracker(Some(3), None).track(&[f0, f1]).unwrap();
    assert_eq!(traces.len(), 1);
    assert_eq!(traces[0].labels, vec![2, 2]);
}

#[test]
fn cell_leaving_the_field_of_view_is_dropped() {
    let f0 = mask(&[
        &[0, 0, 0, 0, 0, 0],
        &[0, 0, 1, 1, 0, 0],
        &[0, 0, 1, 1, 0, 0],
        &[0, 0, 0, 0, 0, 0],
    ]);
    // The cell reaches the right border in frame 1; its trace closes and
    // is too short to keep.
    let f1 = mask(&[
        &[0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 1, 1],
        &[0, 0, 0, 0, 1, 1],
        &[0, 0, 0, 0, 0, 0],
    ]);
    let f2 = LabelMask::new(6, 4);

    let traces = tracker(None, None).track(&[f0, f1, f2]).unwrap();
    assert!(traces.is_empty());
}

#[test]
fn cell_appearing_after_frame_zero_is_not_tracked() {
    let empty_corner = mask(&[
        &[0, 0, 0, 0, 0, 0],
        &[0, 1, 1, 0, 0, 0],
        &[0, 1, 1, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0],
    ]);
    let with_newcomer = mask(&[
        &[0, 0, 0, 0, 0, 0],
        &[0, 1, 1, 0, 2, 0],
        &[0, 1, 1, 0, 2, 0],
        &[0, 0, 0, 0, 0, 0],
    ]);

    let traces = tracker(None, None)
        .track(&[empty_corner, with_newcomer.clone(), with_newcomer])
        .unwrap();
    assert_eq!(traces.len(), 1);
    assert_eq!(traces[0].labels, vec![1, 1, 1]);
}

// ── Labeling front-end ─────────────────────────────────────────

#[test]
fn binary_masks_are_labeled_then_tracked() {
    let mut seg = BinaryMask::new(8, 5);
    // Two 2x2 cells, stable across both frames.
    for row in 1..3 {
        for col in 1..3 {
            seg.set(row, col, 1);
        }
        for col in 5..7 {
            seg.set(row, col, 1);
        }
    }
    let frames = vec![seg.clone(), seg];

    let traces = tracker(Some(2), Some(100)).track_binary(&frames).unwrap();
    assert_eq!(traces.len(), 2);
    assert!(traces.iter().all(|t| t.labels.len() == 2));
    assert!(traces.iter().all(|t| t.selected));
}

// ── Determinism ────────────────────────────────────────────────

#[test]
fn repeated_runs_agree_exactly() {
    let f0 = mask(&[
        &[0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 1, 1, 0, 0, 2, 2, 0],
        &[0, 1, 1, 0, 0, 2, 2, 0],
        &[0, 0, 3, 3, 3, 0, 0, 0],
        &[0, 0, 3, 3, 3, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0],
    ]);
    let f1 = mask(&[
        &[0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 1, 1, 0, 2, 2, 0],
        &[0, 0, 1, 1, 0, 2, 2, 0],
        &[0, 0, 3, 3, 3, 3, 0, 0],
        &[0, 0, 3, 3, 3, 3, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0],
    ]);
    let frames = vec![f0, f1];

    let t = tracker(Some(2), Some(30));
    let first = t.track(&frames).unwrap();
    let second = t.track(&frames).unwrap();
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

//! Geometric overlap matching between consecutive frames.
//!
//! A cheap bounding-box pre-filter eliminates most region pairs; the
//! exact pixel-set intersection runs only on the survivors. Pairs are
//! independent, so the all-pairs pass is parallelized with rayon while
//! keeping the output in catalog order.

use crate::catalog::FrameCatalog;
use crate::region::{Region, RegionRow};
use rayon::prelude::*;

/// Test whether two regions share at least one pixel.
///
/// The shared-row list is walked alternating from both ends inward, so a
/// genuine overlap is usually found after a few rows; a true negative
/// still scans every shared row.
pub fn regions_overlap(a: &Region, b: &Region) -> bool {
    if !a.bbox.overlaps(b.bbox) {
        return false;
    }

    let shared = shared_rows(&a.rows, &b.rows);
    let n = shared.len();
    for k in 0..n {
        let i = if k % 2 == 0 { k / 2 } else { n - 1 - k / 2 };
        let (a_cols, b_cols) = shared[i];
        if cols_intersect(a_cols, b_cols) {
            return true;
        }
    }
    false
}

/// For every region of `new` (in catalog order), the labels of `old`
/// regions whose pixel sets intersect it, in ascending label order.
///
/// An empty list means the new region has no ancestor in the previous
/// frame.
pub fn find_overlaps(new: &FrameCatalog, old: &FrameCatalog) -> Vec<Vec<u32>> {
    new.regions()
        .par_iter()
        .map(|region| {
            old.iter()
                .filter(|candidate| regions_overlap(region, candidate))
                .map(|candidate| candidate.label)
                .collect()
        })
        .collect()
}

/// Column lists of the rows present in both regions, by merging the two
/// ascending row sequences.
fn shared_rows<'a>(a: &'a [RegionRow], b: &'a [RegionRow]) -> Vec<(&'a [u32], &'a [u32])> {
    let mut shared = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].row.cmp(&b[j].row) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                shared.push((a[i].cols.as_slice(), b[j].cols.as_slice()));
                i += 1;
                j += 1;
            }
        }
    }
    shared
}

/// Two-pointer intersection test over sorted column lists.
fn cols_intersect(a: &[u32], b: &[u32]) -> bool {
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => return true,
        }
    }
    false
}

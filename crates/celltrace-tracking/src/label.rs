//! Connected-component labeling of binary segmentation masks.
//!
//! Converts the segmentation step's binary output into the labeled input
//! the tracker consumes. 4-connectivity (edge neighbors only; diagonal
//! pixels belong to different components), two-pass union-find, labels
//! dense from 1 in raster-scan order of first appearance.

use celltrace_core::{BinaryMask, LabelMask};

/// Label the connected foreground components of a binary mask.
pub fn label_mask(mask: &BinaryMask) -> LabelMask {
    let mut out = LabelMask::new(mask.width, mask.height);
    // parent[0] is unused; provisional labels start at 1.
    let mut parent: Vec<u32> = vec![0];

    // First pass: provisional labels from the up/left neighbors.
    for row in 0..mask.height {
        for col in 0..mask.width {
            if mask.get(row, col) == 0 {
                continue;
            }
            let up = if row > 0 { out.get(row - 1, col) } else { 0 };
            let left = if col > 0 { out.get(row, col - 1) } else { 0 };
            let label = match (up, left) {
                (0, 0) => {
                    let fresh = parent.len() as u32;
                    parent.push(fresh);
                    fresh
                }
                (0, l) => l,
                (u, 0) => u,
                (u, l) => {
                    let ru = find(&mut parent, u);
                    let rl = find(&mut parent, l);
                    let (keep, merge) = if ru <= rl { (ru, rl) } else { (rl, ru) };
                    parent[merge as usize] = keep;
                    keep
                }
            };
            out.set(row, col, label);
        }
    }

    // Second pass: resolve to roots and renumber densely.
    let mut dense: Vec<u32> = vec![0; parent.len()];
    let mut next = 0u32;
    for pixel in out.data.iter_mut() {
        if *pixel == 0 {
            continue;
        }
        let root = find(&mut parent, *pixel);
        if dense[root as usize] == 0 {
            next += 1;
            dense[root as usize] = next;
        }
        *pixel = dense[root as usize];
    }

    out
}

/// Union-find root lookup with path halving.
fn find(parent: &mut [u32], mut x: u32) -> u32 {
    while parent[x as usize] != x {
        parent[x as usize] = parent[parent[x as usize] as usize];
        x = parent[x as usize];
    }
    x
}

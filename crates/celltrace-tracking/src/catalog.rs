//! Per-frame region catalogs.
//!
//! A `FrameCatalog` extracts every labeled region of one frame into a
//! contiguous arena, addressed by label through a small index map. Only
//! two catalogs are ever alive during linking: the current frame's and
//! its direct predecessor's.

use crate::region::{classify, Region, RegionRow};
use crate::tracker::TrackConfig;
use celltrace_core::{LabelMask, PixelBox};
use std::collections::{BTreeMap, HashMap};

struct RegionAccumulator {
    area: usize,
    bbox: PixelBox,
    rows: Vec<RegionRow>,
}

/// All regions of one frame, classified and addressable by label.
#[derive(Debug, Clone)]
pub struct FrameCatalog {
    regions: Vec<Region>,
    index: HashMap<u32, usize>,
    height: u32,
    width: u32,
}

impl FrameCatalog {
    /// Build the catalog for one frame in a single row-major pass.
    ///
    /// Validity is classified immediately on construction. An empty mask
    /// yields an empty catalog. Labels are assumed to be internally
    /// consistent (one connected component per label); the upstream
    /// labeling step guarantees this and it is not re-verified here.
    pub fn build(mask: &LabelMask, config: &TrackConfig) -> Self {
        // BTreeMap keeps region order ascending by label, which fixes the
        // iteration order the linker relies on for reproducible results.
        let mut accumulators: BTreeMap<u32, RegionAccumulator> = BTreeMap::new();

        for row in 0..mask.height {
            let line = mask.row(row);
            for (col, &label) in line.iter().enumerate() {
                if label == 0 {
                    continue;
                }
                let col = col as u32;
                let acc = accumulators
                    .entry(label)
                    .or_insert_with(|| RegionAccumulator {
                        area: 0,
                        bbox: PixelBox::from_point(row, col),
                        rows: Vec::new(),
                    });
                acc.area += 1;
                acc.bbox.include(row, col);
                match acc.rows.last_mut() {
                    Some(last) if last.row == row => last.cols.push(col),
                    _ => acc.rows.push(RegionRow {
                        row,
                        cols: vec![col],
                    }),
                }
            }
        }

        let regions: Vec<Region> = accumulators
            .into_iter()
            .map(|(label, acc)| {
                let validity = classify(acc.area, acc.bbox, config, mask.height, mask.width);
                Region {
                    label,
                    area: acc.area,
                    bbox: acc.bbox,
                    rows: acc.rows,
                    validity,
                }
            })
            .collect();

        let index = regions
            .iter()
            .enumerate()
            .map(|(i, r)| (r.label, i))
            .collect();

        Self {
            regions,
            index,
            height: mask.height,
            width: mask.width,
        }
    }

    /// Look up a region by label.
    #[inline]
    pub fn get(&self, label: u32) -> Option<&Region> {
        self.index.get(&label).map(|&i| &self.regions[i])
    }

    /// Regions in ascending label order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    /// The region arena, ordered ascending by label.
    #[inline]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Number of regions in the frame.
    #[inline]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the frame contained no foreground at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// (height, width) of the source frame.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.height, self.width)
    }
}

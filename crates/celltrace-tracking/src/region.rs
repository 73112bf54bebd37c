//! Labeled regions and their validity classification.
//!
//! A `Region` is one connected foreground component in one frame's label
//! mask. Regions are built by the frame catalog and never mutated
//! afterwards.

use crate::tracker::TrackConfig;
use celltrace_core::PixelBox;
use serde::{Deserialize, Serialize};
use std::ops::{BitOr, BitOrAssign};

/// Bit-flag classification of a region against the configured size
/// bounds and the frame border.
///
/// `GOOD` is the zero value; the size and edge flags are independent and
/// combine by bitwise OR (e.g. a region can be both at the edge and too
/// small). `UNCHECKED` marks a region that could not be classified, such
/// as a zero-pixel accumulator; unchecked regions are never considered
/// as ancestors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Validity(u8);

impl Validity {
    /// No anomaly detected.
    pub const GOOD: Validity = Validity(0);
    /// Area below the configured minimum.
    pub const TOO_SMALL: Validity = Validity(1);
    /// Area above the configured maximum.
    pub const TOO_LARGE: Validity = Validity(1 << 1);
    /// Touches the frame border.
    pub const AT_EDGE: Validity = Validity(1 << 2);
    /// Could not be classified (data inconsistency).
    pub const UNCHECKED: Validity = Validity(1 << 3);

    /// True if no flag is set.
    #[inline]
    pub fn is_good(self) -> bool {
        self.0 == 0
    }

    /// True if every flag in `other` is set.
    #[inline]
    pub fn contains(self, other: Validity) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn too_small(self) -> bool {
        self.contains(Self::TOO_SMALL)
    }

    #[inline]
    pub fn too_large(self) -> bool {
        self.contains(Self::TOO_LARGE)
    }

    #[inline]
    pub fn at_edge(self) -> bool {
        self.contains(Self::AT_EDGE)
    }

    #[inline]
    pub fn unchecked(self) -> bool {
        self.contains(Self::UNCHECKED)
    }
}

impl BitOr for Validity {
    type Output = Validity;

    #[inline]
    fn bitor(self, rhs: Validity) -> Validity {
        Validity(self.0 | rhs.0)
    }
}

impl BitOrAssign for Validity {
    #[inline]
    fn bitor_assign(&mut self, rhs: Validity) {
        self.0 |= rhs.0;
    }
}

/// Classify a region's area and extents. Pure and total.
pub fn classify(
    area: usize,
    bbox: PixelBox,
    config: &TrackConfig,
    height: u32,
    width: u32,
) -> Validity {
    if area == 0 {
        return Validity::UNCHECKED;
    }
    let mut validity = Validity::GOOD;
    if config.check_edges && bbox.touches_edge(height, width) {
        // The bbox is tight over the region's pixels, so testing it
        // against the border is equivalent to testing every coordinate.
        validity |= Validity::AT_EDGE;
    }
    if let Some(max) = config.max_size {
        if area > max {
            validity |= Validity::TOO_LARGE;
        }
    }
    if let Some(min) = config.min_size {
        if area < min {
            validity |= Validity::TOO_SMALL;
        }
    }
    validity
}

/// The column coordinates a region occupies on one raster row, sorted
/// ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionRow {
    pub row: u32,
    pub cols: Vec<u32>,
}

/// One connected labeled component within a single frame.
///
/// `rows` holds the full pixel coordinate set as per-row sorted column
/// runs in ascending row order, the layout the overlap matcher walks.
#[derive(Debug, Clone)]
pub struct Region {
    /// Label, unique within the frame (not across frames).
    pub label: u32,
    /// Pixel count.
    pub area: usize,
    /// Tight bounding box, inclusive extents.
    pub bbox: PixelBox,
    /// Pixel coordinates grouped by row.
    pub rows: Vec<RegionRow>,
    /// Classification, applied at catalog construction.
    pub validity: Validity,
}

impl Region {
    /// Check whether the region covers the given pixel.
    pub fn contains(&self, row: u32, col: u32) -> bool {
        if !self.bbox.contains(row, col) {
            return false;
        }
        match self.rows.binary_search_by_key(&row, |r| r.row) {
            Ok(i) => self.rows[i].cols.binary_search(&col).is_ok(),
            Err(_) => false,
        }
    }
}

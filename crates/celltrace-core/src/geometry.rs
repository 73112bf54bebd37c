//! Integer pixel geometry for labeled regions.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box over pixel coordinates, inclusive on all
/// four sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelBox {
    pub row_min: u32,
    pub col_min: u32,
    pub row_max: u32,
    pub col_max: u32,
}

impl PixelBox {
    /// Create a bounding box from explicit extents.
    #[inline]
    pub const fn new(row_min: u32, col_min: u32, row_max: u32, col_max: u32) -> Self {
        Self {
            row_min,
            col_min,
            row_max,
            col_max,
        }
    }

    /// A degenerate box covering a single pixel.
    #[inline]
    pub const fn from_point(row: u32, col: u32) -> Self {
        Self {
            row_min: row,
            col_min: col,
            row_max: row,
            col_max: col,
        }
    }

    /// Grow the box to cover the given pixel.
    #[inline]
    pub fn include(&mut self, row: u32, col: u32) {
        self.row_min = self.row_min.min(row);
        self.col_min = self.col_min.min(col);
        self.row_max = self.row_max.max(row);
        self.col_max = self.col_max.max(col);
    }

    /// Height in pixels (inclusive extents).
    #[inline]
    pub fn height(self) -> u32 {
        self.row_max - self.row_min + 1
    }

    /// Width in pixels (inclusive extents).
    #[inline]
    pub fn width(self) -> u32 {
        self.col_max - self.col_min + 1
    }

    /// Check if a pixel lies inside the box.
    #[inline]
    pub fn contains(self, row: u32, col: u32) -> bool {
        row >= self.row_min && row <= self.row_max && col >= self.col_min && col <= self.col_max
    }

    /// Check if two boxes overlap in both row and column extents.
    ///
    /// Inclusive extents, so two boxes sharing only a boundary row or
    /// column still count as overlapping candidates.
    #[inline]
    pub fn overlaps(self, other: Self) -> bool {
        self.row_min <= other.row_max
            && self.row_max >= other.row_min
            && self.col_min <= other.col_max
            && self.col_max >= other.col_min
    }

    /// Check if the box touches the frame border for a frame of the given
    /// height and width.
    #[inline]
    pub fn touches_edge(self, height: u32, width: u32) -> bool {
        self.row_min == 0
            || self.col_min == 0
            || height > 0 && self.row_max == height - 1
            || width > 0 && self.col_max == width - 1
    }
}

//! Mask buffer types for segmented microscopy frames in CPU memory.
//!
//! Two flavors exist: `BinaryMask` holds the raw foreground/background
//! output of the segmentation step, `LabelMask` holds one integer label
//! per connected component (0 = background). The tracker consumes one
//! `LabelMask` per frame.

use crate::error::{CoreError, CoreResult};

/// A single-channel binary mask (one byte per pixel, 0 = background,
/// nonzero = foreground).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Mask data (row-major, one byte per pixel).
    pub data: Vec<u8>,
}

impl BinaryMask {
    /// Create a new empty mask (all background).
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; (width as usize) * (height as usize)],
        }
    }

    /// Wrap an existing row-major buffer. Fails if the buffer length does
    /// not match `width * height`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> CoreResult<Self> {
        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(CoreError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Get the mask value at (row, col). Returns 0 if out of bounds.
    #[inline]
    pub fn get(&self, row: u32, col: u32) -> u8 {
        if row >= self.height || col >= self.width {
            return 0;
        }
        self.data[(row as usize) * (self.width as usize) + (col as usize)]
    }

    /// Set the mask value at (row, col). Out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, row: u32, col: u32, value: u8) {
        if row < self.height && col < self.width {
            self.data[(row as usize) * (self.width as usize) + (col as usize)] = value;
        }
    }

    /// Number of foreground pixels.
    pub fn foreground_count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// (height, width) pair.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.height, self.width)
    }
}

/// A labeled component mask (one `u32` per pixel, 0 = background).
///
/// Labels are unique within a frame, not across frames. Each label is
/// expected to cover exactly one connected component; this is guaranteed
/// by the upstream labeling step and not re-verified here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMask {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Label data (row-major, one `u32` per pixel).
    pub data: Vec<u32>,
}

impl LabelMask {
    /// Create a new all-background label mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u32; (width as usize) * (height as usize)],
        }
    }

    /// Wrap an existing row-major label buffer. Fails if the buffer length
    /// does not match `width * height`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u32>) -> CoreResult<Self> {
        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(CoreError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Get the label at (row, col). Returns 0 (background) if out of bounds.
    #[inline]
    pub fn get(&self, row: u32, col: u32) -> u32 {
        if row >= self.height || col >= self.width {
            return 0;
        }
        self.data[(row as usize) * (self.width as usize) + (col as usize)]
    }

    /// Set the label at (row, col). Out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, row: u32, col: u32, label: u32) {
        if row < self.height && col < self.width {
            self.data[(row as usize) * (self.width as usize) + (col as usize)] = label;
        }
    }

    /// Highest label present in the mask, or 0 for an empty mask.
    pub fn max_label(&self) -> u32 {
        self.data.iter().copied().max().unwrap_or(0)
    }

    /// (height, width) pair.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.height, self.width)
    }

    /// Get a full row of labels.
    #[inline]
    pub fn row(&self, row: u32) -> &[u32] {
        let w = self.width as usize;
        let start = (row as usize) * w;
        &self.data[start..start + w]
    }
}

//! CellTrace Core - Foundation types for cell tracking
//!
//! This crate provides the fundamental types used throughout CellTrace:
//! - Mask buffers for segmented and labeled frames (BinaryMask, LabelMask)
//! - Integer pixel geometry (PixelBox)
//! - Error types

pub mod error;
pub mod geometry;
pub mod mask;

pub use error::{CoreError, CoreResult};
pub use geometry::PixelBox;
pub use mask::{BinaryMask, LabelMask};

//! Integration test crate for CellTrace.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on the celltrace crates to verify they work together.

#[cfg(test)]
mod tracking;

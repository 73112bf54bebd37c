//! CellTrace Tracking - frame-to-frame cell lineage linking.
//!
//! Converts per-frame labeled segmentation masks into persistent cell
//! identities: for each cell present from frame 0 through the end of the
//! sequence, an ordered label sequence plus a trust verdict. Ambiguous
//! lineages (merges, splits, edge departures) are resolved by fixed
//! deterministic rules and discarded rather than guessed.

pub mod catalog;
pub mod error;
pub mod label;
pub mod linker;
pub mod overlap;
pub mod region;
pub mod selector;
pub mod tracker;

pub use catalog::FrameCatalog;
pub use error::{TrackError, TrackResult};
pub use label::label_mask;
pub use linker::{LineageLinker, Selection, Trace};
pub use overlap::{find_overlaps, regions_overlap};
pub use region::{classify, Region, RegionRow, Validity};
pub use selector::{select_traces, SelectedTrace};
pub use tracker::{TrackConfig, Tracker};

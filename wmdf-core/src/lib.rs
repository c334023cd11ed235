//! # wmdf Core
//!
//! Core components for reading WeaveMaker loom-draft files.
//!
//! This crate provides the fundamental building blocks:
//!
//! - [`cursor`]: Big-endian byte cursor with absolute offsets for errors
//! - [`segment`]: Segment id capability table and segment payloads
//! - [`grid`]: Bit-pattern grid decoder (threading, treadling, tieup, pegplan)
//! - [`indices`]: Signed integer index arrays (colors, colorway table)
//! - [`traits`]: The [`FromSegment`] decoding seam
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L4: Front end                                           │
//! │     wmdf CLI                                            │
//! ├─────────────────────────────────────────────────────────┤
//! │ L3: Output                                              │
//! │     WIF serializer                                      │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Container                                           │
//! │     Segment directory, color table, colorways, draft    │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Bytes (this crate)                                  │
//! │     ByteCursor, SegmentId, Grid, IndexArray             │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use wmdf_core::{FromSegment, Grid, Segment, SegmentId};
//!
//! // Two threading rows: shaft 1, then shaft 2.
//! let payload = vec![0x80, 0, 0, 0, 0x40, 0, 0, 0];
//! let segment = Segment::new(SegmentId::Threading, 4, payload, 0);
//! let grid = Grid::from_segment(&segment).unwrap();
//! assert_eq!(grid.width(), 2);
//! assert_eq!(grid.first_active(1), Some(1));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![forbid(unsafe_code)]

pub mod cursor;
pub mod error;
pub mod grid;
pub mod indices;
pub mod segment;
pub mod traits;

// Re-exports for convenience
pub use cursor::ByteCursor;
pub use error::{Result, WmdfError};
pub use grid::{EntityBits, Grid, MAX_GRID_WIDTH};
pub use indices::IndexArray;
pub use segment::{Segment, SegmentId};
pub use traits::FromSegment;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cursor::ByteCursor;
    pub use crate::error::{Result, WmdfError};
    pub use crate::grid::Grid;
    pub use crate::indices::IndexArray;
    pub use crate::segment::{Segment, SegmentId};
    pub use crate::traits::FromSegment;
}

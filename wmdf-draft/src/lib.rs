//! # wmdf Draft
//!
//! WeaveMaker container support for wmdf.
//!
//! This crate turns the raw bytes of a `.wmd`/`.wmdf` file into a
//! [`DraftModel`]:
//!
//! - **Directory**: splits the file into the color block and typed segments
//! - **Palette**: decodes the `Q` color block into RGB swatches
//! - **Text**: decodes name, version, remarks and flag segments
//! - **Colorway**: resolves each colorway's chip remap to concrete swatches
//! - **Draft**: assembles threading, treadling/tieup or pegplan, colors
//! - **Report**: structural report and summary for diagnostics
//!
//! ## Example
//!
//! ```rust,no_run
//! use wmdf_draft::{DraftModel, Summary};
//!
//! let bytes = std::fs::read("draft.wmdf").unwrap();
//! let draft = DraftModel::parse(&bytes, "draft.wmdf").unwrap();
//! for line in Summary::new(&draft).lines() {
//!     println!("{}", line);
//! }
//! ```
//!
//! ## Error policy
//!
//! Unknown segment ids are skipped one byte at a time and listed in the
//! structural report. A malformed color block or a segment whose payload runs
//! past the end of the file aborts the parse. Lossy conversions are recorded
//! in [`DraftModel::warnings`], intentional substitutions in
//! [`DraftModel::conversion_notes`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod colorway;
pub mod directory;
pub mod draft;
pub mod palette;
pub mod report;
pub mod text;

// Re-exports
pub use colorway::{ColorwayMapping, ColorwayTable, MapEntry};
pub use directory::{SegmentDirectory, SkipReason, SkippedByte, split_container};
pub use draft::{DraftModel, WeaveMode};
pub use palette::{ColorTable, Swatch};
pub use report::{StructureReport, Summary};
pub use text::SegmentText;

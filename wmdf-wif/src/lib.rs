//! # wmdf WIF
//!
//! Renders a [`DraftModel`](wmdf_draft::DraftModel) as WIF (Weaving
//! Information File) text.
//!
//! ## Output
//!
//! Sections are written in a fixed order: `[WIF]`, `[CONTENTS]`, `[TEXT]`,
//! `[THREADING]`, `[NOTES]`, then either `[LIFTPLAN]` or `[TIEUP]` and
//! `[TREADLING]`, the optional `[WARP COLORS]` and `[WEFT COLORS]`,
//! `[COLOR PALETTE]`, `[COLOR TABLE]`, `[WEAVING]`, `[WARP]` and `[WEFT]`.
//!
//! The most frequent warp (weft) color becomes the `[WARP]` (`[WEFT]`) color;
//! only threads of another color are listed, and a side where every thread
//! shares one color gets no listing at all.
//!
//! ## Example
//!
//! ```rust,no_run
//! use wmdf_draft::DraftModel;
//! use wmdf_wif::{ConvertOptions, render};
//!
//! let bytes = std::fs::read("twill.wmdf").unwrap();
//! let draft = DraftModel::parse(&bytes, "twill.wmdf").unwrap();
//! let wif = render(&draft, &ConvertOptions::new().with_colorway(1)).unwrap();
//! std::fs::write(&wif.filename, wif.text).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod colors;
mod config;
mod filename;
mod writer;

pub use colors::{ColorUsage, DEFAULT_COLOR, color_table, majority_color};
pub use config::{ConvertOptions, Units, WifConfig};
pub use filename::{display_title, wif_filename};
pub use writer::{Rendered, render, render_all, renderable_colorways};

//! Draft model assembly.
//!
//! [`DraftModel::parse`] runs the whole read side: container framing, color
//! table, segment directory, grid and index decoding, tromp-as-writ handling
//! and colorway resolution. The result is read-only.

use std::fmt;

use tracing::debug;
use wmdf_core::{Grid, IndexArray, Result, SegmentId, WmdfError};

use crate::colorway::{ColorwayMapping, ColorwayTable, resolve_colorways};
use crate::directory::{SegmentDirectory, split_container};
use crate::palette::ColorTable;
use crate::text::SegmentText;

/// Private-remarks placeholder the application writes when it has nothing.
const NO_LAUNCH_STRING: &str = "---no launch string found---";

/// Tromp-as-writ value meaning "normal" (as opposed to tabby/overshot).
const TROMP_NORMAL: &str = "n";

/// How the weft structure is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaveMode {
    /// Per-pick shaft lifts (pegplan).
    Liftplan,
    /// Tieup plus treadling.
    Tieup,
}

impl fmt::Display for WeaveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Liftplan => write!(f, "Liftplan"),
            Self::Tieup => write!(f, "Tieup"),
        }
    }
}

/// Everything needed to render a WIF, decoded from one file.
#[derive(Debug, Clone)]
pub struct DraftModel {
    /// Display filename, as supplied by the caller.
    pub filename: String,
    /// Draft name (`n`).
    pub name: Option<String>,
    /// Application version code (`D`).
    pub version: Option<String>,
    /// Public remarks (`Y`).
    pub comments: Option<String>,
    /// Private remarks (`*`).
    pub remarks: Option<String>,
    /// Author (`g`).
    pub author: Option<String>,

    /// Number of shafts used by the threading.
    pub shaft_count: usize,
    /// One row per warp thread.
    pub threading: Grid,
    /// One row per weft pick; absent when the file has none.
    pub treadling: Option<Grid>,
    /// Row per shaft, column per treadle.
    pub tieup: Option<Grid>,
    /// Per-pick shaft lifts.
    pub pegplan: Option<Grid>,
    /// True when the pegplan drives the output instead of tieup/treadling.
    pub liftplan: bool,
    /// Number of weft picks.
    pub weft_count: usize,

    /// Palette index per warp thread.
    pub warp_colors: Vec<i32>,
    /// Palette index per weft pick.
    pub weft_colors: Vec<i32>,
    /// Decoded color table, sentinels first.
    pub colors: ColorTable,
    /// Decoded colorway table, if the file has one.
    pub colorway_table: Option<ColorwayTable>,
    /// One mapping per colorway.
    pub colorways: Vec<ColorwayMapping>,

    /// Intentional, documented substitutions.
    pub conversion_notes: Vec<String>,
    /// Lossy or unsupported conversions.
    pub warnings: Vec<String>,

    /// All segments found, for structural reports.
    pub directory: SegmentDirectory,
}

impl DraftModel {
    /// Parse a complete file.
    pub fn parse(data: &[u8], filename: impl Into<String>) -> Result<Self> {
        let (block, segments_start) = split_container(data)?;
        let colors = ColorTable::decode(block, crate::directory::COLOR_BLOCK_START)?;
        let directory = SegmentDirectory::parse(data, segments_start)?;
        Self::from_parts(directory, colors, filename)
    }

    /// Assemble a draft from an already-parsed directory and color table.
    pub fn from_parts(
        directory: SegmentDirectory,
        colors: ColorTable,
        filename: impl Into<String>,
    ) -> Result<Self> {
        let mut conversion_notes = Vec::new();
        let mut warnings = Vec::new();

        let threading: Grid = directory
            .decode(SegmentId::Threading)?
            .ok_or_else(|| WmdfError::missing_segment(SegmentId::Threading.as_char()))?;
        let shaft_count = threading.width();
        debug!(
            shafts = shaft_count,
            threads = threading.len(),
            "threading decoded"
        );

        if directory.contains(SegmentId::OldThreading) {
            warnings.push(
                "Old-style threading segment 'h' found; it is not supported and was ignored."
                    .to_string(),
            );
        }

        let tromp = text(&directory, SegmentId::TrompType)?;
        let treadling = match tromp {
            Some(mode) => {
                conversion_notes.push("Tromp-as-writ selected. Warp copied to weft.".to_string());
                if mode != TROMP_NORMAL {
                    warnings.extend([
                        "Tromp-as-writ was selected with the special tabby or overshot option.".to_string(),
                        "That option is not supported, so the weft simply repeats the threading.".to_string(),
                        "The result is NOT as defined in the original file.".to_string(),
                    ]);
                }
                Some(threading.clone())
            }
            None => directory.decode::<Grid>(SegmentId::Treadling)?,
        };

        let tieup: Option<Grid> = directory.decode(SegmentId::Tieup)?;
        let pegplan: Option<Grid> = directory.decode(SegmentId::Pegplan)?;
        let liftplan = pegplan.is_some();

        let weft_count = match (&pegplan, &treadling) {
            (Some(p), _) => p.len(),
            (None, Some(t)) => t.len(),
            (None, None) => 0,
        };

        if !liftplan {
            if treadling.is_none() {
                warnings.push(
                    "No treadling, tieup or pegplan found: the weft sections are empty.".to_string(),
                );
            } else if tieup.is_none() {
                warnings.push("No tieup found: the tieup section is empty.".to_string());
            }
        }

        let warp_colors = indices(&directory, SegmentId::WarpColors)?;
        if warp_colors.is_empty() {
            conversion_notes.push("No warp colors found; warp uses color 1.".to_string());
        }

        let color_tromp = text(&directory, SegmentId::ColorTromp)?;
        let weft_colors = if color_tromp.is_some() {
            conversion_notes.push(
                "Color tromp-as-writ selected. Warp colors copied to weft colors.".to_string(),
            );
            warp_colors.clone()
        } else {
            indices(&directory, SegmentId::WeftColors)?
        };
        if weft_colors.is_empty() {
            conversion_notes.push("No weft colors found; weft uses color 1.".to_string());
        }

        let colorway_table = directory
            .decode::<IndexArray>(SegmentId::Colorway)?
            .map(|raw| ColorwayTable::from_indices(&raw, &mut warnings));
        let colorways = match &colorway_table {
            Some(table) => {
                resolve_colorways(table, &warp_colors, &weft_colors, &colors, &mut warnings)
            }
            None => {
                conversion_notes.push(
                    "No colorway table found; colors come straight from the color table.".to_string(),
                );
                Vec::new()
            }
        };

        let remarks =
            text(&directory, SegmentId::PrivateRemarks)?.filter(|r| r != NO_LAUNCH_STRING);

        Ok(Self {
            filename: filename.into(),
            name: text(&directory, SegmentId::Name)?,
            version: text(&directory, SegmentId::Version)?,
            comments: text(&directory, SegmentId::PublicRemarks)?,
            remarks,
            author: text(&directory, SegmentId::Author)?,
            shaft_count,
            threading,
            treadling,
            tieup,
            pegplan,
            liftplan,
            weft_count,
            warp_colors,
            weft_colors,
            colors,
            colorway_table,
            colorways,
            conversion_notes,
            warnings,
            directory,
        })
    }

    /// Liftplan or tieup mode.
    pub fn mode(&self) -> WeaveMode {
        if self.liftplan {
            WeaveMode::Liftplan
        } else {
            WeaveMode::Tieup
        }
    }

    /// Number of warp threads.
    pub fn warp_count(&self) -> usize {
        self.threading.len()
    }

    /// Number of treadles (columns of the tieup).
    pub fn treadle_count(&self) -> usize {
        self.tieup.as_ref().map_or(0, Grid::width)
    }

    /// Number of colorways decoded.
    pub fn colorway_count(&self) -> usize {
        self.colorways.len()
    }

    /// Look up one colorway.
    pub fn colorway(&self, index: usize) -> Result<&ColorwayMapping> {
        self.colorways
            .get(index)
            .ok_or_else(|| WmdfError::colorway_out_of_range(index, self.colorways.len()))
    }

    /// Colors used by the first colorway.
    pub fn colors_used(&self) -> usize {
        self.colorways.first().map_or(0, ColorwayMapping::colors_used)
    }
}

impl fmt::Display for DraftModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Wmdf: {}, {} {} warps, {} wefts, {} colorways, {} colors used from {} defined>",
            self.filename,
            self.mode(),
            self.warp_count(),
            self.weft_count,
            self.colorway_count(),
            self.colors_used(),
            self.colors.len()
        )
    }
}

fn text(directory: &SegmentDirectory, id: SegmentId) -> Result<Option<String>> {
    Ok(directory
        .decode::<SegmentText>(id)?
        .and_then(SegmentText::non_empty))
}

fn indices(directory: &SegmentDirectory, id: SegmentId) -> Result<Vec<i32>> {
    Ok(directory
        .decode::<IndexArray>(id)?
        .map(IndexArray::into_vec)
        .unwrap_or_default())
}

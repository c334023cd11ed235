//! Colorway table (`C`) and colorway resolution.
//!
//! The table is a flat integer array:
//!
//! ```text
//! [0]      declared number of colorways
//! [1..=3]  warp chip counts (major, minor, accent)
//! [4..=6]  weft chip counts (major, minor, accent)
//! [7..]    one block of chip_count palette indices per colorway
//! ```
//!
//! Within a block the first `warp_count` entries remap the distinct warp
//! color indices, in order of first appearance in the warp color array; the
//! last `weft_count` entries do the same for the weft.

use serde::Serialize;
use tracing::debug;
use wmdf_core::IndexArray;

use crate::palette::{ColorTable, Swatch};

/// Number of table entries before the first colorway block.
pub const TABLE_HEADER_LEN: usize = 7;

/// Most chips a colorway may hold.
pub const MAX_CHIPS: usize = 16;

/// Most colorways a file may hold.
pub const MAX_COLORWAYS: usize = 5;

/// The decoded colorway table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorwayTable {
    /// Colorway count declared in the header.
    pub declared: i32,
    /// Chip counts: warp major/minor/accent, then weft major/minor/accent.
    pub chip_counts: [usize; 6],
    /// One palette-index block per colorway.
    pub blocks: Vec<Vec<i32>>,
}

impl ColorwayTable {
    /// Split the raw array into header and blocks.
    ///
    /// Problems that leave the table usable are pushed to `warnings`.
    pub fn from_indices(raw: &IndexArray, warnings: &mut Vec<String>) -> Self {
        let values = raw.as_slice();
        if values.len() < TABLE_HEADER_LEN {
            warnings.push(format!(
                "Colorway table has {} entries, fewer than its {}-entry header; no colorways decoded.",
                values.len(),
                TABLE_HEADER_LEN
            ));
            return Self {
                declared: values.first().copied().unwrap_or(0),
                chip_counts: [0; 6],
                blocks: Vec::new(),
            };
        }

        let declared = values[0];
        let mut chip_counts = [0usize; 6];
        for (slot, &value) in chip_counts.iter_mut().zip(&values[1..TABLE_HEADER_LEN]) {
            *slot = value.max(0) as usize;
        }
        let chip_count: usize = chip_counts.iter().sum();

        let body = &values[TABLE_HEADER_LEN..];
        let blocks: Vec<Vec<i32>> = if chip_count == 0 {
            Vec::new()
        } else {
            body.chunks_exact(chip_count).map(<[i32]>::to_vec).collect()
        };

        if chip_count > 0 && body.len() % chip_count != 0 {
            warnings.push(format!(
                "Colorway table ends with a partial block of {} entries; it was ignored.",
                body.len() % chip_count
            ));
        }
        if declared >= 0 && declared as usize != blocks.len() {
            warnings.push(format!(
                "Colorway table declares {} colorways but holds {}.",
                declared,
                blocks.len()
            ));
        }
        if chip_count > MAX_CHIPS {
            warnings.push(format!(
                "Colorways have {} chips, more than the {} the format allows.",
                chip_count, MAX_CHIPS
            ));
        }
        if blocks.len() > MAX_COLORWAYS {
            warnings.push(format!(
                "{} colorways found, more than the {} the format allows.",
                blocks.len(),
                MAX_COLORWAYS
            ));
        }

        Self {
            declared,
            chip_counts,
            blocks,
        }
    }

    /// Chips on the warp side.
    pub fn warp_count(&self) -> usize {
        self.chip_counts[..3].iter().sum()
    }

    /// Chips on the weft side.
    pub fn weft_count(&self) -> usize {
        self.chip_counts[3..].iter().sum()
    }

    /// Chips per colorway.
    pub fn chip_count(&self) -> usize {
        self.warp_count() + self.weft_count()
    }

    /// Number of complete colorway blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the table holds no colorways.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// One thread color index resolved to a swatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapEntry {
    /// Color index as used in the warp/weft color array.
    pub index: i32,
    /// Palette index the colorway assigns to it.
    pub palette_index: usize,
    /// The resolved color.
    pub swatch: Swatch,
}

/// The warp and weft mapping of one colorway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColorwayMapping {
    /// One entry per distinct warp color index.
    pub warp_map: Vec<MapEntry>,
    /// One entry per distinct weft color index.
    pub weft_map: Vec<MapEntry>,
}

impl ColorwayMapping {
    /// Number of chips in use (warp plus weft).
    pub fn colors_used(&self) -> usize {
        self.warp_map.len() + self.weft_map.len()
    }

    /// Look up the swatch for a thread color index, warp side first.
    pub fn swatch_for(&self, index: i32) -> Option<&Swatch> {
        self.warp_map
            .iter()
            .chain(&self.weft_map)
            .find(|e| e.index == index)
            .map(|e| &e.swatch)
    }
}

/// Distinct values in order of first appearance.
pub fn distinct_indices(values: &[i32]) -> Vec<i32> {
    let mut seen = Vec::new();
    for &v in values {
        if !seen.contains(&v) {
            seen.push(v);
        }
    }
    seen
}

/// Resolve every colorway in `table` against the color arrays.
pub fn resolve_colorways(
    table: &ColorwayTable,
    warp_colors: &[i32],
    weft_colors: &[i32],
    colors: &ColorTable,
    warnings: &mut Vec<String>,
) -> Vec<ColorwayMapping> {
    let warp_distinct = distinct_indices(warp_colors);
    let weft_distinct = distinct_indices(weft_colors);
    let warp_count = table.warp_count();
    let weft_count = table.weft_count();

    table
        .blocks
        .iter()
        .enumerate()
        .map(|(n, block)| {
            let warp_slots = &block[..warp_count];
            let weft_slots = &block[block.len() - weft_count..];
            let mapping = ColorwayMapping {
                warp_map: remap(n, "warp", &warp_distinct, warp_slots, colors, warnings),
                weft_map: remap(n, "weft", &weft_distinct, weft_slots, colors, warnings),
            };
            debug!(
                colorway = n,
                warp = mapping.warp_map.len(),
                weft = mapping.weft_map.len(),
                "colorway resolved"
            );
            mapping
        })
        .collect()
}

fn remap(
    colorway: usize,
    side: &str,
    distinct: &[i32],
    slots: &[i32],
    colors: &ColorTable,
    warnings: &mut Vec<String>,
) -> Vec<MapEntry> {
    let mut entries = Vec::with_capacity(distinct.len());
    for (position, &index) in distinct.iter().enumerate() {
        let Some(&slot) = slots.get(position) else {
            warnings.push(format!(
                "Colorway {}: {} color {} has no chip in the colorway table.",
                colorway + 1,
                side,
                index
            ));
            continue;
        };
        let swatch = usize::try_from(slot).ok().and_then(|p| colors.get(p).map(|s| (p, s)));
        match swatch {
            Some((palette_index, swatch)) => entries.push(MapEntry {
                index,
                palette_index,
                swatch: swatch.clone(),
            }),
            None => warnings.push(format!(
                "Colorway {}: {} color {} maps to palette entry {}, which is not defined.",
                colorway + 1,
                side,
                index,
                slot
            )),
        }
    }
    entries
}

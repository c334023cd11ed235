//! Color assignment for WIF: majority colors and the color table.
//!
//! WIF color number `k` is thread color index `k`. Index 0 is the white
//! sentinel and has no table row, so the table runs from 1 to the number of
//! decoded colors, the last row being black unless the colorway maps it.

use std::collections::BTreeMap;

use wmdf_draft::{ColorTable, ColorwayMapping};

/// Color used when a draft carries no color array.
pub const DEFAULT_COLOR: i32 = 1;

/// How one side (warp or weft) uses its colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorUsage {
    /// Most frequent color index.
    pub majority: i32,
    /// How many threads use it.
    pub frequency: usize,
    /// Whether any thread differs from the majority.
    pub needs_listing: bool,
}

impl ColorUsage {
    /// Analyse a per-thread color array.
    pub fn new(colors: &[i32]) -> Self {
        match majority_color(colors) {
            Some((majority, frequency)) => Self {
                majority,
                frequency,
                needs_listing: frequency != colors.len(),
            },
            None => Self {
                majority: DEFAULT_COLOR,
                frequency: 0,
                needs_listing: false,
            },
        }
    }

    /// `position = index` lines for threads not in the majority color.
    ///
    /// Positions are offset by two to match the WIF reader convention.
    pub fn exceptions(&self, colors: &[i32]) -> Vec<(usize, i32)> {
        colors
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c != self.majority)
            .map(|(i, &c)| (i + 2, c))
            .collect()
    }
}

/// Most frequent value and its count; ties go to the lowest value.
pub fn majority_color(colors: &[i32]) -> Option<(i32, usize)> {
    let mut counts = BTreeMap::new();
    for &c in colors {
        *counts.entry(c).or_insert(0usize) += 1;
    }
    let mut best: Option<(i32, usize)> = None;
    for (color, count) in counts {
        if best.is_none_or(|(_, n)| count > n) {
            best = Some((color, count));
        }
    }
    best
}

/// The `[COLOR TABLE]` rows, numbered from 1.
pub fn color_table(
    colors: &ColorTable,
    mapping: Option<&ColorwayMapping>,
) -> Vec<(usize, [u8; 3])> {
    let last = colors.len();
    (1..=last)
        .map(|k| {
            let mapped = mapping
                .and_then(|m| m.swatch_for(k as i32))
                .map(|s| s.rgb);
            let fallback = if k < last {
                colors.get(k).map_or([0, 0, 0], |s| s.rgb)
            } else {
                [0, 0, 0]
            };
            (k, mapped.unwrap_or(fallback))
        })
        .collect()
}

/// Warnings for color indices the colorway maps differently on warp and weft.
///
/// WIF has one color table shared by both sides, and [`color_table`] keeps
/// the warp swatch for such an index.
pub fn shared_index_conflicts(colorway: usize, mapping: &ColorwayMapping) -> Vec<String> {
    mapping
        .warp_map
        .iter()
        .filter_map(|warp| {
            mapping
                .weft_map
                .iter()
                .find(|weft| weft.index == warp.index && weft.swatch.rgb != warp.swatch.rgb)
                .map(|weft| {
                    format!(
                        "Colorway {}: color index {} is {} on the warp but {} on the weft; \
                         the WIF color table keeps {}.",
                        colorway + 1,
                        warp.index,
                        warp.swatch.label,
                        weft.swatch.label,
                        warp.swatch.label
                    )
                })
        })
        .collect()
}

/// Warnings for thread color indices that have no table row.
pub fn unmapped_references(side: &str, colors: &[i32], table_len: usize) -> Vec<String> {
    let mut seen = Vec::new();
    for &c in colors {
        if (c < 1 || c as usize > table_len) && !seen.contains(&c) {
            seen.push(c);
        }
    }
    seen.into_iter()
        .map(|c| {
            format!(
                "{} color index {} has no entry in the WIF color table (1..={}).",
                side, c, table_len
            )
        })
        .collect()
}

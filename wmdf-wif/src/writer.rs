//! WIF text serializer.

use std::fmt::Display;

use tracing::debug;
use wmdf_core::{Grid, Result, WmdfError};
use wmdf_draft::{ColorwayMapping, DraftModel, WeaveMode};

use crate::colors::{ColorUsage, color_table, shared_index_conflicts, unmapped_references};
use crate::config::{ConvertOptions, WifConfig};
use crate::filename::{display_title, wif_filename};

/// One rendered WIF file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Suggested output filename.
    pub filename: String,
    /// 0-based colorway this file was rendered with.
    pub colorway: usize,
    /// The WIF text.
    pub text: String,
    /// Problems found while rendering this colorway.
    pub warnings: Vec<String>,
}

/// Line-oriented builder for `[SECTION]` / `key=value` text.
#[derive(Debug, Default)]
struct WifWriter {
    out: String,
}

impl WifWriter {
    fn section(&mut self, name: &str) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        self.out.push('[');
        self.out.push_str(name);
        self.out.push_str("]\n");
    }

    fn entry(&mut self, key: impl Display, value: impl Display) {
        self.out.push_str(&format!("{}={}\n", key, value));
    }

    fn flag(&mut self, key: &str) {
        self.entry(key, "true");
    }

    /// One `n=a,b,c` line per row, listing 1-based active positions.
    fn grid_rows(&mut self, grid: &Grid) {
        for i in 0..grid.len() {
            let active = grid
                .active(i)
                .iter()
                .map(|p| (p + 1).to_string())
                .collect::<Vec<_>>()
                .join(",");
            self.entry(i + 1, active);
        }
    }

    fn finish(self) -> String {
        self.out
    }
}

/// Number of colorways a draft can be rendered with.
///
/// A draft without a colorway table still renders once, straight from its
/// color table.
pub fn renderable_colorways(draft: &DraftModel) -> usize {
    draft.colorway_count().max(1)
}

/// Render one colorway of a draft.
pub fn render(draft: &DraftModel, options: &ConvertOptions) -> Result<Rendered> {
    let mapping = select_colorway(draft, options.colorway)?;
    let config = &options.config;

    let warp = ColorUsage::new(&draft.warp_colors);
    let weft = ColorUsage::new(&draft.weft_colors);
    let palette = color_table(&draft.colors, mapping);

    let mut warnings = unmapped_references("Warp", &draft.warp_colors, palette.len());
    warnings.extend(unmapped_references("Weft", &draft.weft_colors, palette.len()));
    if let Some(mapping) = mapping {
        warnings.extend(shared_index_conflicts(options.colorway, mapping));
    }

    let mut w = WifWriter::default();
    write_header(&mut w, config, draft.mode(), &warp, &weft);

    w.section("TEXT");
    w.entry("Title", display_title(&draft.filename));
    if let Some(author) = &draft.author {
        w.entry("Author", author);
    }

    w.section("THREADING");
    for i in 0..draft.threading.len() {
        let shaft = draft.threading.first_active(i).map_or(0, |p| p + 1);
        w.entry(i + 1, shaft);
    }

    w.section("NOTES");
    for (i, line) in notes(draft).iter().enumerate() {
        w.entry(i + 1, line);
    }

    let treadles = match draft.mode() {
        WeaveMode::Liftplan => {
            w.section("LIFTPLAN");
            if let Some(pegplan) = &draft.pegplan {
                w.grid_rows(pegplan);
            }
            draft.shaft_count
        }
        WeaveMode::Tieup => {
            // stored one row per shaft; WIF wants one line per treadle
            w.section("TIEUP");
            if let Some(tieup) = &draft.tieup {
                w.grid_rows(&tieup.transpose());
            }
            w.section("TREADLING");
            if let Some(treadling) = &draft.treadling {
                w.grid_rows(treadling);
            }
            draft.treadle_count()
        }
    };

    if warp.needs_listing {
        w.section("WARP COLORS");
        for (pos, color) in warp.exceptions(&draft.warp_colors) {
            w.entry(pos, color);
        }
    }
    if weft.needs_listing {
        w.section("WEFT COLORS");
        for (pos, color) in weft.exceptions(&draft.weft_colors) {
            w.entry(pos, color);
        }
    }

    w.section("COLOR PALETTE");
    w.entry("Range", "0,255");
    w.entry("Entries", palette.len());

    w.section("COLOR TABLE");
    for (k, [r, g, b]) in &palette {
        w.entry(k, format!("{},{},{}", r, g, b));
    }

    w.section("WEAVING");
    w.entry("Rising Shed", config.rising_shed);
    w.entry("Treadles", treadles);
    w.entry("Shafts", draft.shaft_count);

    write_threads(&mut w, "WARP", config, warp.majority, draft.warp_count());
    write_threads(&mut w, "WEFT", config, weft.majority, draft.weft_count);

    debug!(
        file = %draft.filename,
        colorway = options.colorway,
        mode = %draft.mode(),
        warnings = warnings.len(),
        "rendered WIF"
    );

    Ok(Rendered {
        filename: wif_filename(&draft.filename, options.colorway),
        colorway: options.colorway,
        text: w.finish(),
        warnings,
    })
}

/// Render every colorway of a draft.
pub fn render_all(draft: &DraftModel, config: &WifConfig) -> Result<Vec<Rendered>> {
    (0..renderable_colorways(draft))
        .map(|n| {
            let options = ConvertOptions::new().with_colorway(n).with_config(*config);
            render(draft, &options)
        })
        .collect()
}

fn select_colorway(draft: &DraftModel, index: usize) -> Result<Option<&ColorwayMapping>> {
    if draft.colorways.is_empty() {
        return if index == 0 {
            Ok(None)
        } else {
            Err(WmdfError::colorway_out_of_range(index, 1))
        };
    }
    draft.colorway(index).map(Some)
}

fn write_header(
    w: &mut WifWriter,
    config: &WifConfig,
    mode: WeaveMode,
    warp: &ColorUsage,
    weft: &ColorUsage,
) {
    w.section("WIF");
    w.entry("Version", config.wif_version);
    w.entry("Date", config.wif_date);
    w.entry("Developers", config.developers);
    w.entry("Source Program", config.source_program);
    w.entry("Source Version", config.source_version);

    w.section("CONTENTS");
    for key in [
        "COLOR PALETTE",
        "TEXT",
        "WEAVING",
        "WARP",
        "WEFT",
        "COLOR TABLE",
        "THREADING",
        "NOTES",
    ] {
        w.flag(key);
    }
    if warp.needs_listing {
        w.flag("WARP COLORS");
    }
    if weft.needs_listing {
        w.flag("WEFT COLORS");
    }
    match mode {
        WeaveMode::Liftplan => w.flag("LIFTPLAN"),
        WeaveMode::Tieup => {
            w.flag("TIEUP");
            w.flag("TREADLING");
        }
    }
}

fn write_threads(w: &mut WifWriter, name: &str, config: &WifConfig, color: i32, threads: usize) {
    w.section(name);
    w.entry("Units", config.units);
    w.entry("Color", color);
    w.entry("Threads", threads);
    w.entry("Spacing", config.spacing);
    w.entry("Thickness", config.thickness);
}

fn notes(draft: &DraftModel) -> Vec<String> {
    let version = draft.version.as_deref().unwrap_or("(version unknown)");
    let mut lines = vec![format!(
        "From: {} Weavemaker version = {}",
        draft.filename, version
    )];
    if let Some(comments) = &draft.comments {
        lines.push("Comments:".to_string());
        lines.extend(split_lines(comments));
    }
    if let Some(remarks) = &draft.remarks {
        lines.push("Remarks:".to_string());
        lines.extend(split_lines(remarks));
    }
    lines
}

/// Split on `\n`, `\r\n` and the bare `\r` classic Mac files use.
fn split_lines(text: &str) -> Vec<String> {
    text.trim_end_matches(['\r', '\n'])
        .lines()
        .flat_map(|line| line.split('\r'))
        .map(str::to_string)
        .collect()
}

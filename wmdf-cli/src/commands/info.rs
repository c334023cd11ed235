//! Info command implementation.

use crate::utils::{print_lines, read_draft, rgb};
use serde::Serialize;
use std::path::Path;
use wmdf_draft::{ColorwayMapping, MapEntry, Summary, Swatch};

/// JSON output for the info command.
#[derive(Debug, Serialize)]
struct InfoJson<'a> {
    #[serde(flatten)]
    summary: Summary,
    shafts: usize,
    treadles: usize,
    colors: &'a [Swatch],
    colorway_maps: &'a [ColorwayMapping],
}

pub fn cmd_info(file: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let draft = read_draft(file)?;
    let summary = Summary::new(&draft);

    if json {
        let output = InfoJson {
            summary,
            shafts: draft.shaft_count,
            treadles: draft.treadle_count(),
            colors: draft.colors.swatches(),
            colorway_maps: &draft.colorways,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_lines(&summary.lines());
    println!("Shafts: {}, treadles: {}", draft.shaft_count, draft.treadle_count());

    for (n, colorway) in draft.colorways.iter().enumerate() {
        println!();
        println!("Colorway {}:", n + 1);
        print_map("warp", &colorway.warp_map);
        print_map("weft", &colorway.weft_map);
    }

    let notes = summary.note_lines();
    if !notes.is_empty() {
        println!();
        print_lines(&notes);
    }
    let warnings = summary.warning_lines();
    if !warnings.is_empty() {
        println!();
        print_lines(&warnings);
    }
    Ok(())
}

fn print_map(side: &str, entries: &[MapEntry]) {
    for entry in entries {
        println!(
            "  {:<4} {:>3} -> {:>3}  {:<11}  {}",
            side,
            entry.index,
            entry.palette_index,
            rgb(entry.swatch.rgb),
            entry.swatch.label
        );
    }
}

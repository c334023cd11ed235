//! Utility functions for the CLI.

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use wmdf_draft::DraftModel;

/// Create a progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░ ");
    pb.set_style(style);
    pb
}

/// File name without its directory, as shown in reports and WIF titles.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read and parse one draft.
pub fn read_draft(path: &Path) -> Result<DraftModel, Box<dyn std::error::Error>> {
    let data = std::fs::read(path)?;
    Ok(DraftModel::parse(&data, display_name(path))?)
}

/// Print lines to stdout.
pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

/// Format an RGB triple for display.
pub fn rgb(rgb: [u8; 3]) -> String {
    format!("{},{},{}", rgb[0], rgb[1], rgb[2])
}

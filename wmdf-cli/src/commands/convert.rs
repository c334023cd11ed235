//! Convert command implementation.

use crate::utils::{create_progress_bar, print_lines, read_draft};
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use tracing::info;
use wmdf_draft::Summary;
use wmdf_wif::{ConvertOptions, Rendered, WifConfig, render, render_all};

/// Options for converting drafts.
pub struct ConvertArgs<'a> {
    pub files: &'a [PathBuf],
    pub output: Option<&'a Path>,
    /// 0-based colorway; `None` means the first.
    pub colorway: Option<usize>,
    pub all_colorways: bool,
    pub config: WifConfig,
}

/// Convert every file, continuing past failures.
///
/// Returns the paths written.
pub fn cmd_convert(args: &ConvertArgs) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let pb = create_progress_bar(args.files.len() as u64, args.files.len() > 1);
    let mut written = Vec::new();
    let mut failed = 0usize;

    for path in args.files {
        pb.set_message(path.display().to_string());
        match convert_file(path, args, &pb) {
            Ok(paths) => written.extend(paths),
            Err(e) => {
                failed += 1;
                pb.suspend(|| eprintln!("Error: {}: {}", path.display(), e));
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if failed > 0 {
        return Err(format!("{} of {} files failed to convert", failed, args.files.len()).into());
    }
    Ok(written)
}

fn convert_file(
    path: &Path,
    args: &ConvertArgs,
    pb: &ProgressBar,
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let draft = read_draft(path)?;
    let summary = Summary::new(&draft);

    let rendered: Vec<Rendered> = if args.all_colorways {
        render_all(&draft, &args.config)?
    } else {
        let options = ConvertOptions::new()
            .with_colorway(args.colorway.unwrap_or(0))
            .with_config(args.config);
        vec![render(&draft, &options)?]
    };

    let out_dir = match args.output {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            dir.to_path_buf()
        }
        None => path.parent().map(Path::to_path_buf).unwrap_or_default(),
    };

    let mut written = Vec::with_capacity(rendered.len());
    for wif in &rendered {
        let target = out_dir.join(&wif.filename);
        std::fs::write(&target, &wif.text)?;
        info!(path = %target.display(), colorway = wif.colorway + 1, "wrote WIF");
        written.push(target);
    }

    pb.suspend(|| {
        print_lines(&summary.lines());
        print_lines(&summary.note_lines());
        print_lines(&summary.warning_lines());
        for (wif, target) in rendered.iter().zip(&written) {
            println!("Wrote {} (colorway {})", target.display(), wif.colorway + 1);
            for warning in &wif.warnings {
                println!("  Warning: {}", warning);
            }
        }
        println!();
    });

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Threading-only draft: four threads on a straight draw, one swatch.
    fn minimal_draft() -> Vec<u8> {
        let mut data = vec![0x00, 0x01, b'Q', 0, 0];
        data.extend_from_slice(&[0x00, 0x04, b't', 4]);
        for shaft in 0..4u32 {
            data.extend_from_slice(&(1u32 << (31 - shaft)).to_be_bytes());
        }
        data
    }

    #[test]
    fn test_convert_writes_next_to_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("straight.wmdf");
        std::fs::write(&input, minimal_draft()).unwrap();
        let out = dir.path().join("out");

        let files = [input];
        let written = cmd_convert(&ConvertArgs {
            files: &files,
            output: Some(&out),
            colorway: None,
            all_colorways: false,
            config: WifConfig::DEFAULT,
        })
        .unwrap();

        assert_eq!(written, vec![out.join("straight_colorway1.wif")]);
        let text = std::fs::read_to_string(&written[0]).unwrap();
        assert!(text.starts_with("[WIF]\n"));
        assert!(text.contains("Title=straight.wmdf\n"));
    }

    #[test]
    fn test_convert_reports_failures() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.wmdf");
        let bad = dir.path().join("bad.wmdf");
        std::fs::write(&good, minimal_draft()).unwrap();
        std::fs::write(&bad, [0x00]).unwrap();

        let files = [good, bad];
        let err = cmd_convert(&ConvertArgs {
            files: &files,
            output: None,
            colorway: None,
            all_colorways: true,
            config: WifConfig::DEFAULT,
        })
        .unwrap_err();
        assert!(err.to_string().contains("1 of 2"));
        assert!(dir.path().join("good_colorway1.wif").exists());
    }

    #[test]
    fn test_missing_colorway_fails() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("plain.wmdf");
        std::fs::write(&input, minimal_draft()).unwrap();
        let files = [input];
        assert!(
            cmd_convert(&ConvertArgs {
                files: &files,
                output: None,
                colorway: Some(3),
                all_colorways: false,
                config: WifConfig::DEFAULT,
            })
            .is_err()
        );
    }
}

//! Structure command implementation.

use crate::utils::print_lines;
use std::path::Path;
use wmdf_draft::{SegmentDirectory, StructureReport, split_container};

pub fn cmd_structure(file: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let data = std::fs::read(file)?;
    // Scan only; the draft is never assembled.
    let (_, segments_start) = split_container(&data)?;
    let directory = SegmentDirectory::parse(&data, segments_start)?;
    let report = StructureReport::new(&directory);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_lines(&report.lines());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::read_draft;
    use tempfile::tempdir;

    /// Name and treadling, but no threading.
    fn unthreaded_draft() -> Vec<u8> {
        let mut data = vec![0x00, 0x01, b'Q', 0, 0];
        data.extend_from_slice(&[0x00, 0x03, b'n', 1]);
        data.extend_from_slice(b"abc");
        data.extend_from_slice(&[0x00, 0x01, b'r', 4]);
        data.extend_from_slice(&0x8000_0000u32.to_be_bytes());
        data
    }

    #[test]
    fn test_structure_without_threading() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("unthreaded.wmdf");
        std::fs::write(&input, unthreaded_draft()).unwrap();

        assert!(read_draft(&input).is_err());
        cmd_structure(&input, false).unwrap();
        cmd_structure(&input, true).unwrap();
    }

    #[test]
    fn test_structure_bad_header_fails() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("short.wmdf");
        std::fs::write(&input, [0x00]).unwrap();
        assert!(cmd_structure(&input, false).is_err());
    }
}

//! Human-readable and machine-readable reports about a parsed draft.

use serde::Serialize;

use crate::directory::{SegmentDirectory, SkipReason};
use crate::draft::DraftModel;

/// One row of the structural report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentRow {
    /// Segment id.
    pub id: char,
    /// Number of entities.
    pub entities: usize,
    /// Whether the converter decodes it.
    pub supported: bool,
    /// Bytes per entity.
    pub entity_size: usize,
    /// Payload length.
    pub bytes: usize,
    /// Absolute offset of the prologue.
    pub offset: usize,
    /// What the segment holds.
    pub description: &'static str,
}

/// A byte skipped while scanning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// Absolute offset.
    pub offset: usize,
    /// Why it was skipped.
    pub reason: String,
}

/// What the file contains, segment by segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructureReport {
    /// Number of distinct segments.
    pub segment_count: usize,
    /// One row per segment, in file order.
    pub segments: Vec<SegmentRow>,
    /// Bytes skipped during recovery.
    pub skipped: Vec<SkippedRow>,
}

impl StructureReport {
    /// Build the report from a scanned directory.
    ///
    /// Works on files that fail to assemble into a draft.
    pub fn new(directory: &SegmentDirectory) -> Self {
        let segments = directory
            .segments()
            .iter()
            .map(|s| SegmentRow {
                id: s.id.as_char(),
                entities: s.entity_count(),
                supported: s.id.is_supported(),
                entity_size: s.entity_size,
                bytes: s.byte_len(),
                offset: s.offset,
                description: s.id.description(),
            })
            .collect::<Vec<_>>();
        let skipped = directory
            .skipped()
            .iter()
            .map(|s| SkippedRow {
                offset: s.offset,
                reason: match s.reason {
                    SkipReason::UnknownId(b) => format!("unknown segment id {:#04x}", b),
                    SkipReason::BadEntitySize(size) => format!("entity size {}", size),
                    SkipReason::ShortPrologue => "truncated prologue".to_string(),
                },
            })
            .collect();
        Self {
            segment_count: segments.len(),
            segments,
            skipped,
        }
    }

    /// Render as text lines.
    pub fn lines(&self) -> Vec<String> {
        let mut msg = vec![
            "File Structure:".to_string(),
            format!("Report: {} segments found", self.segment_count),
            format!(
                " - [{}]",
                self.segments
                    .iter()
                    .map(|s| format!("'{}'", s.id))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        ];
        for s in &self.segments {
            let supported = if s.supported { "OK" } else { "unparsed" };
            msg.push(format!(
                " - {}  {:>3} entities.  ({})  (size:{}  bytes:{}) - {}",
                s.id, s.entities, supported, s.entity_size, s.bytes, s.description
            ));
        }
        if !self.skipped.is_empty() {
            msg.push(format!("Skipped {} bytes:", self.skipped.len()));
            for s in &self.skipped {
                msg.push(format!(" - offset {}: {}", s.offset, s.reason));
            }
        }
        msg
    }
}

/// Overview of a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Display filename.
    pub filename: String,
    /// Application version code.
    pub version: Option<String>,
    /// "Liftplan" or "Tieup".
    pub mode: String,
    /// Warp thread count.
    pub warps: usize,
    /// Weft pick count.
    pub wefts: usize,
    /// Number of colorways.
    pub colorways: usize,
    /// Colors used by the first colorway.
    pub colors_used: usize,
    /// Colors defined in the color table.
    pub colors_defined: usize,
    /// Private remarks.
    pub remarks: Option<String>,
    /// Public remarks.
    pub comments: Option<String>,
    /// Conversion notes.
    pub conversion_notes: Vec<String>,
    /// Warnings.
    pub warnings: Vec<String>,
}

impl Summary {
    /// Build the summary for a draft.
    pub fn new(draft: &DraftModel) -> Self {
        Self {
            filename: draft.filename.clone(),
            version: draft.version.clone(),
            mode: draft.mode().to_string(),
            warps: draft.warp_count(),
            wefts: draft.weft_count,
            colorways: draft.colorway_count(),
            colors_used: draft.colors_used(),
            colors_defined: draft.colors.len(),
            remarks: draft.remarks.clone(),
            comments: draft.comments.clone(),
            conversion_notes: draft.conversion_notes.clone(),
            warnings: draft.warnings.clone(),
        }
    }

    /// Render the overview as text lines.
    pub fn lines(&self) -> Vec<String> {
        let version = match &self.version {
            Some(v) => format!("(version {})", v),
            None => "(no version)".to_string(),
        };
        let mut msg = vec![
            format!("For: {} {}", self.filename, version),
            format!("Has a {}.", self.mode),
            format!("Contains {} warps, and {} wefts.", self.warps, self.wefts),
        ];
        if self.colorways == 1 {
            msg.push("A single colorway is specified,".to_string());
        } else {
            msg.push(format!("{} colorways are specified,", self.colorways));
        }
        msg.push(format!(
            "{} colors are used from {} defined.",
            self.colors_used, self.colors_defined
        ));
        if let Some(remarks) = &self.remarks {
            msg.push(format!("Remarks: {}", remarks));
        }
        if let Some(comments) = &self.comments {
            msg.push(format!("Comments: {}", comments));
        }
        msg
    }

    /// Render the conversion notes, or nothing if there are none.
    pub fn note_lines(&self) -> Vec<String> {
        titled("Conversion notes:", &self.conversion_notes)
    }

    /// Render the warnings, or nothing if there are none.
    pub fn warning_lines(&self) -> Vec<String> {
        if self.warnings.is_empty() {
            return Vec::new();
        }
        let mut msg = vec![
            "Warning:".to_string(),
            "The following problems with conversion were found:".to_string(),
        ];
        msg.extend(self.warnings.iter().cloned());
        msg
    }
}

fn titled(title: &str, items: &[String]) -> Vec<String> {
    if items.is_empty() {
        return Vec::new();
    }
    let mut msg = vec![title.to_string()];
    msg.extend(items.iter().cloned());
    msg
}

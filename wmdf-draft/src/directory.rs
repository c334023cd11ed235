//! Container framing: color block location and the segment directory.
//!
//! File layout:
//!
//! ```text
//! offset 0      u16 BE  datastart
//! offset 2      color block ('Q' tag, header, swatch records) .. datastart + 4
//! datastart + 4 segments until end of file:
//!                 u16 BE  entity count
//!                 u8      ASCII id
//!                 i8      entity size
//!                 [count * size] payload
//! ```
//!
//! An unrecognized id is not an error: the scanner logs it, skips a single
//! byte and tries again from there. Skipping one byte can land inside the
//! unknown segment's payload and desynchronize the scan; that matches the
//! format's reference reader.

use tracing::{debug, warn};
use wmdf_core::{ByteCursor, FromSegment, Result, Segment, SegmentId, WmdfError};

/// Size of the fixed prologue in front of every segment payload.
pub const PROLOGUE_LEN: usize = 4;

/// Offset of the color block in the file.
pub const COLOR_BLOCK_START: usize = 2;

/// Why the scanner stepped over a byte instead of reading a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The id byte is not in the capability table.
    UnknownId(u8),
    /// The entity size is zero or negative.
    BadEntitySize(i8),
    /// Fewer than four bytes remain.
    ShortPrologue,
}

/// A byte the scanner skipped during recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedByte {
    /// Absolute file offset.
    pub offset: usize,
    /// What was wrong at that offset.
    pub reason: SkipReason,
}

/// Result of reading one prologue.
enum ScanStep {
    Segment(Segment),
    Skip(SkippedByte),
}

/// Split a file into its color block and segment area.
///
/// Returns the color block slice and its absolute offset, plus the offset
/// where segments begin.
pub fn split_container(data: &[u8]) -> Result<(&[u8], usize)> {
    let mut cursor = ByteCursor::new(data);
    let datastart = cursor
        .read_u16_be()
        .map_err(|_| WmdfError::invalid_header("file is shorter than the 2-byte header"))?
        as usize;
    let segments_start = datastart + 4;
    if segments_start > data.len() {
        return Err(WmdfError::invalid_header(format!(
            "color block ends at offset {} but file is {} bytes",
            segments_start,
            data.len()
        )));
    }
    Ok((&data[COLOR_BLOCK_START..segments_start], segments_start))
}

/// The segments of one file, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct SegmentDirectory {
    segments: Vec<Segment>,
    skipped: Vec<SkippedByte>,
}

impl SegmentDirectory {
    /// Scan segments from `start` to the end of `data`.
    ///
    /// If an id occurs more than once, the last occurrence wins but keeps the
    /// position of the first in [`segments`](Self::segments).
    pub fn parse(data: &[u8], start: usize) -> Result<Self> {
        let mut directory = Self::default();
        let mut pos = start;

        while pos < data.len() {
            match read_segment(data, pos)? {
                ScanStep::Segment(segment) => {
                    debug!(
                        id = %segment.id,
                        offset = segment.offset,
                        entities = segment.entity_count(),
                        size = segment.entity_size,
                        "segment"
                    );
                    pos += PROLOGUE_LEN + segment.byte_len();
                    directory.insert(segment);
                }
                ScanStep::Skip(skipped) => {
                    warn!(offset = skipped.offset, reason = ?skipped.reason, "skipping byte");
                    directory.skipped.push(skipped);
                    pos += 1;
                }
            }
        }

        Ok(directory)
    }

    fn insert(&mut self, segment: Segment) {
        match self.segments.iter_mut().find(|s| s.id == segment.id) {
            Some(existing) => *existing = segment,
            None => self.segments.push(segment),
        }
    }

    /// All segments in order of first occurrence.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Bytes skipped during recovery.
    pub fn skipped(&self) -> &[SkippedByte] {
        &self.skipped
    }

    /// Number of distinct segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether no segments were found.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Look up a segment.
    pub fn get(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.iter().find(|s| s.id == id)
    }

    /// Check whether a segment is present.
    pub fn contains(&self, id: SegmentId) -> bool {
        self.get(id).is_some()
    }

    /// Decode a segment if present.
    pub fn decode<T: FromSegment>(&self, id: SegmentId) -> Result<Option<T>> {
        self.get(id).map(T::from_segment).transpose()
    }
}

fn read_segment(data: &[u8], pos: usize) -> Result<ScanStep> {
    let mut cursor = ByteCursor::with_base(&data[pos..], pos);
    if cursor.remaining() < PROLOGUE_LEN {
        return Ok(ScanStep::Skip(SkippedByte {
            offset: pos,
            reason: SkipReason::ShortPrologue,
        }));
    }

    let count = cursor.read_u16_be()? as usize;
    let id_byte = cursor.read_u8()?;
    let entity_size = cursor.read_i8()?;

    let Some(id) = SegmentId::from_byte(id_byte) else {
        return Ok(ScanStep::Skip(SkippedByte {
            offset: pos,
            reason: SkipReason::UnknownId(id_byte),
        }));
    };
    if entity_size <= 0 {
        return Ok(ScanStep::Skip(SkippedByte {
            offset: pos,
            reason: SkipReason::BadEntitySize(entity_size),
        }));
    }

    let entity_size = entity_size as usize;
    let needed = count * entity_size;
    let payload = cursor.take(needed).map_err(|_| {
        WmdfError::truncated_segment(id.as_char(), pos, needed, data.len() - pos - PROLOGUE_LEN)
    })?;

    Ok(ScanStep::Segment(Segment::new(
        id,
        entity_size,
        payload.to_vec(),
        pos,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prologue(count: u16, id: u8, size: i8) -> Vec<u8> {
        let mut out = count.to_be_bytes().to_vec();
        out.push(id);
        out.push(size as u8);
        out
    }

    #[test]
    fn test_split_container() {
        // datastart = 1 -> color block is bytes [2, 5)
        let data = [0x00, 0x01, b'Q', 0, 0, 0xAA];
        let (block, start) = split_container(&data).unwrap();
        assert_eq!(block, &[b'Q', 0, 0]);
        assert_eq!(start, 5);
    }

    #[test]
    fn test_split_container_bad_offset() {
        let data = [0x00, 0x10, b'Q'];
        assert!(matches!(
            split_container(&data),
            Err(WmdfError::InvalidHeader { .. })
        ));
        assert!(split_container(&[0x00]).is_err());
    }

    #[test]
    fn test_parse_segments() {
        let mut data = prologue(2, b's', 1);
        data.extend_from_slice(&[3, 4]);
        data.extend(prologue(3, b'n', 1));
        data.extend_from_slice(b"abc");

        let dir = SegmentDirectory::parse(&data, 0).unwrap();
        assert_eq!(dir.len(), 2);
        let s = dir.get(SegmentId::WarpColors).unwrap();
        assert_eq!(s.payload, vec![3, 4]);
        assert_eq!(s.offset, 0);
        let n = dir.get(SegmentId::Name).unwrap();
        assert_eq!(n.offset, 6);
        assert_eq!(n.entity_count() * n.entity_size, n.byte_len());
        assert!(dir.skipped().is_empty());
    }

    #[test]
    fn test_last_occurrence_wins() {
        let mut data = prologue(1, b'n', 1);
        data.push(b'a');
        data.extend(prologue(1, b'D', 1));
        data.push(b'8');
        data.extend(prologue(1, b'n', 1));
        data.push(b'b');

        let dir = SegmentDirectory::parse(&data, 0).unwrap();
        assert_eq!(dir.len(), 2);
        assert_eq!(dir.segments()[0].id, SegmentId::Name);
        assert_eq!(dir.get(SegmentId::Name).unwrap().payload, vec![b'b']);
    }

    #[test]
    fn test_unknown_id_skips_one_byte() {
        // A stray byte in front of a valid segment.
        let mut data = vec![0xEE];
        data.extend(prologue(1, b'n', 1));
        data.push(b'x');

        let dir = SegmentDirectory::parse(&data, 0).unwrap();
        assert_eq!(dir.len(), 1);
        assert_eq!(dir.get(SegmentId::Name).unwrap().offset, 1);
        assert_eq!(dir.skipped().len(), 1);
        assert_eq!(dir.skipped()[0].offset, 0);
        assert!(matches!(dir.skipped()[0].reason, SkipReason::UnknownId(_)));
    }

    #[test]
    fn test_bad_entity_size_is_skipped() {
        let data = prologue(1, b'n', -1);
        let dir = SegmentDirectory::parse(&data, 0).unwrap();
        assert!(dir.is_empty());
        assert_eq!(dir.skipped()[0].reason, SkipReason::BadEntitySize(-1));
    }

    #[test]
    fn test_trailing_fragment_is_skipped() {
        let mut data = prologue(1, b'n', 1);
        data.push(b'x');
        data.extend_from_slice(&[0, 1]);
        let dir = SegmentDirectory::parse(&data, 0).unwrap();
        assert_eq!(dir.len(), 1);
        assert_eq!(dir.skipped().len(), 2);
        assert!(
            dir.skipped()
                .iter()
                .all(|s| s.reason == SkipReason::ShortPrologue)
        );
    }

    #[test]
    fn test_truncated_payload_is_fatal() {
        let mut data = prologue(10, b't', 4);
        data.extend_from_slice(&[0; 8]);
        let err = SegmentDirectory::parse(&data, 0).unwrap_err();
        match err {
            WmdfError::TruncatedSegment {
                id,
                offset,
                needed,
                available,
            } => {
                assert_eq!(id, 't');
                assert_eq!(offset, 0);
                assert_eq!(needed, 40);
                assert_eq!(available, 8);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_decode_missing_is_none() {
        let dir = SegmentDirectory::default();
        let grid: Option<wmdf_core::Grid> = dir.decode(SegmentId::Threading).unwrap();
        assert!(grid.is_none());
    }
}

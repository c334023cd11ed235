//! Text segments and label decoding.
//!
//! WeaveMaker is a classic Mac application: newer files store UTF-8, older
//! ones Mac OS Roman. Text is decoded as UTF-8 when it is valid and as Mac OS
//! Roman otherwise.

use encoding_rs::{MACINTOSH, UTF_8};
use wmdf_core::{FromSegment, Result, Segment};

/// Decode a byte string from the file.
pub fn decode_text(bytes: &[u8]) -> String {
    let (text, had_errors) = UTF_8.decode_without_bom_handling(bytes);
    if !had_errors {
        return text.into_owned();
    }
    let (text, _) = MACINTOSH.decode_without_bom_handling(bytes);
    text.into_owned()
}

/// The payload of a text segment (`n`, `D`, `Y`, `*`, `g`, `R`, `T`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentText(pub String);

impl SegmentText {
    /// Borrow the text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the text, or `None` when it is empty.
    pub fn non_empty(self) -> Option<String> {
        if self.0.is_empty() { None } else { Some(self.0) }
    }
}

impl FromSegment for SegmentText {
    fn from_segment(segment: &Segment) -> Result<Self> {
        Ok(Self(decode_text(&segment.payload)))
    }
}

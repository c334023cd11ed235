//! Core traits for segment decoding.
//!
//! Segments carry no type information beyond their id and entity size, so
//! each payload interpretation (bit grid, index array, text) is a separate
//! decoder. They all implement [`FromSegment`], which lets the draft
//! assembler ask for "segment `t` as a grid" without caring how the bytes are
//! laid out.

use crate::error::Result;
use crate::segment::Segment;

/// A value that can be decoded from one segment payload.
pub trait FromSegment: Sized {
    /// Decode the segment.
    fn from_segment(segment: &Segment) -> Result<Self>;
}

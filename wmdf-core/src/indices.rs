//! Integer index arrays (`s`, `q`, `C`, `A`, `M`).

use crate::error::{Result, WmdfError};
use crate::segment::Segment;
use crate::traits::FromSegment;

/// One signed integer per entity.
///
/// Warp and weft color segments use these as per-thread palette indices; the
/// colorway segment uses them as a flat table of counts and remaps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexArray(Vec<i32>);

impl IndexArray {
    /// Wrap already-decoded values.
    pub fn new(values: Vec<i32>) -> Self {
        Self(values)
    }

    /// Borrow the values.
    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }

    /// Take ownership of the values.
    pub fn into_vec(self) -> Vec<i32> {
        self.0
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the array is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromSegment for IndexArray {
    fn from_segment(segment: &Segment) -> Result<Self> {
        let values = match segment.entity_size {
            1 => segment.entities().map(|e| e[0] as i8 as i32).collect(),
            2 => segment
                .entities()
                .map(|e| i16::from_be_bytes([e[0], e[1]]) as i32)
                .collect(),
            4 => segment
                .entities()
                .map(|e| i32::from_be_bytes([e[0], e[1], e[2], e[3]]))
                .collect(),
            size => {
                return Err(WmdfError::unsupported_entity_size(
                    segment.id.as_char(),
                    segment.offset,
                    size,
                ));
            }
        };
        Ok(Self(values))
    }
}

//! Bit-pattern grids: threading, treadling, tieup and pegplan.
//!
//! Each entity of a grid segment is one row. Bit position `k` of a row means
//! "shaft (or treadle) `k + 1` is active".
//!
//! # Entity layouts
//!
//! The entity size selects one of two layouts:
//!
//! - **Narrow** (`entity_size <= 4`): the entity is one big-endian unsigned
//!   integer, widened to 32 bits. Position 0 is the most significant bit.
//! - **Wide** (`entity_size > 4`): the entity is a byte array read with its
//!   bytes in reverse order; within each byte position 0 is the most
//!   significant bit. This is how drafts wider than 32 shafts are stored.
//!
//! After decoding, every row is truncated to the width actually used by the
//! grid: one past the highest set position across all rows.

use crate::error::{Result, WmdfError};
use crate::segment::Segment;
use crate::traits::FromSegment;

/// Maximum grid width the format can describe.
pub const MAX_GRID_WIDTH: usize = 150;

/// Largest entity that still uses the narrow (single integer) layout.
pub const NARROW_ENTITY_BYTES: usize = 4;

/// The raw bits of one grid row, resolved once from the entity size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityBits {
    /// Single integer, at most 32 bits.
    Narrow(u32),
    /// Byte array, stored last-byte-first.
    Wide(Vec<u8>),
}

impl EntityBits {
    /// Interpret one entity.
    pub fn from_entity(bytes: &[u8]) -> Self {
        if bytes.len() <= NARROW_ENTITY_BYTES {
            let value = bytes.iter().fold(0u32, |acc, &b| (acc << 8) | b as u32);
            Self::Narrow(value)
        } else {
            Self::Wide(bytes.to_vec())
        }
    }

    /// Number of bit positions in the row.
    pub fn bit_len(&self) -> usize {
        match self {
            Self::Narrow(_) => 32,
            Self::Wide(bytes) => bytes.len() * 8,
        }
    }

    /// Check whether position `pos` is set.
    pub fn is_set(&self, pos: usize) -> bool {
        if pos >= self.bit_len() {
            return false;
        }
        match self {
            Self::Narrow(value) => (value >> (31 - pos)) & 1 == 1,
            Self::Wide(bytes) => {
                let byte = bytes[bytes.len() - 1 - pos / 8];
                (byte >> (7 - pos % 8)) & 1 == 1
            }
        }
    }

    /// Highest set position, if any.
    pub fn last_set(&self) -> Option<usize> {
        (0..self.bit_len()).rev().find(|&pos| self.is_set(pos))
    }

    /// Expand into a row of `width` booleans.
    pub fn to_row(&self, width: usize) -> Vec<bool> {
        (0..width).map(|pos| self.is_set(pos)).collect()
    }
}

/// A decoded bit-pattern grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    rows: Vec<Vec<bool>>,
}

impl Grid {
    /// Build a grid from raw rows, truncating to the used width.
    pub fn from_entities(entities: &[EntityBits]) -> Self {
        let width = entities
            .iter()
            .filter_map(EntityBits::last_set)
            .max()
            .map_or(0, |last| last + 1);
        let rows = entities.iter().map(|e| e.to_row(width)).collect();
        Self { width, rows }
    }

    /// Build a grid from boolean rows.
    ///
    /// Rows shorter than the widest row are padded with `false`.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, false);
                row
            })
            .collect();
        Self { width, rows }
    }

    /// Number of shafts/treadles (columns).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the grid has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows.
    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    /// One row.
    pub fn row(&self, index: usize) -> Option<&[bool]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// 0-based positions set in row `index`.
    pub fn active(&self, index: usize) -> Vec<usize> {
        self.row(index)
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter_map(|(pos, &set)| set.then_some(pos))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// First set position in row `index`.
    pub fn first_active(&self, index: usize) -> Option<usize> {
        self.row(index)?.iter().position(|&set| set)
    }

    /// Swap rows and columns.
    pub fn transpose(&self) -> Grid {
        let rows = (0..self.width)
            .map(|col| self.rows.iter().map(|row| row[col]).collect())
            .collect();
        Grid {
            width: self.rows.len(),
            rows,
        }
    }
}

impl FromSegment for Grid {
    fn from_segment(segment: &Segment) -> Result<Self> {
        let entities: Vec<EntityBits> = segment.entities().map(EntityBits::from_entity).collect();
        let grid = Grid::from_entities(&entities);
        if grid.width > MAX_GRID_WIDTH {
            return Err(WmdfError::invalid_grid(
                segment.id.as_char(),
                segment.offset,
                format!("width {} exceeds {}", grid.width, MAX_GRID_WIDTH),
            ));
        }
        Ok(grid)
    }
}

//! Color table (`Q` block) decoding.
//!
//! The color block sits between the 2-byte header and the first segment. It
//! begins with the tag `Q` and two header bytes, followed by one record per
//! swatch:
//!
//! ```text
//! 'a' u16 u16 u16        screen RGB (0..=65535)   used
//! 'b' u16 u16 u16        print RGB                ignored
//! 'c' [12]               creation date            ignored
//! 'd' len [len]          label part 1             used
//! 'e' len [len]          label part 2             used
//! 'f'..'i' len [len]     numeric arrays           ignored
//! 'n'..'v'               nine fixed fields        ignored
//! ```
//!
//! The variable-length fields must appear with exactly the expected tags; any
//! mismatch aborts decoding, since the record boundaries can no longer be
//! trusted.

use serde::Serialize;
use tracing::debug;
use wmdf_core::{ByteCursor, Result, WmdfError};

use crate::text::decode_text;

/// Tag byte that starts the color block.
pub const COLOR_BLOCK_TAG: u8 = b'Q';

/// Length of the block header (tag plus two bytes).
pub const COLOR_BLOCK_HEADER_LEN: usize = 3;

/// Tags of the variable-length fields, in order.
const VARIABLE_TAGS: [u8; 6] = [b'd', b'e', b'f', b'g', b'h', b'i'];

/// Widths of the trailing fixed fields `n`..`v`.
const TRAILING_WIDTHS: [usize; 9] = [12, 5, 5, 5, 5, 12, 12, 12, 12];

/// One palette color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Swatch {
    /// Red, green, blue in `0..=255`.
    pub rgb: [u8; 3],
    /// Display label.
    pub label: String,
}

impl Swatch {
    /// Create a swatch.
    pub fn new(rgb: [u8; 3], label: impl Into<String>) -> Self {
        Self {
            rgb,
            label: label.into(),
        }
    }

    /// The fixed white sentinel (palette index 0).
    pub fn white() -> Self {
        Self::new([255, 255, 255], "WHITE")
    }

    /// The fixed black sentinel (palette index 1).
    pub fn black() -> Self {
        Self::new([0, 0, 0], "BLACK")
    }

    /// Build a swatch from 16-bit screen channels.
    pub fn from_screen_rgb(channels: [u16; 3], label: impl Into<String>) -> Self {
        Self::new(channels.map(rescale_channel), label)
    }
}

/// Rescale a 16-bit channel to 8 bits, truncating.
pub fn rescale_channel(value: u16) -> u8 {
    (value as u32 * 256 / 65536) as u8
}

/// Ordered swatch list; the order defines the palette index space.
///
/// Index 0 is white, index 1 is black, index `k >= 2` is the `(k - 1)`-th
/// decoded record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorTable {
    swatches: Vec<Swatch>,
}

impl Default for ColorTable {
    fn default() -> Self {
        Self {
            swatches: vec![Swatch::white(), Swatch::black()],
        }
    }
}

impl ColorTable {
    /// Decode the color block.
    ///
    /// `base` is the absolute file offset of `block[0]`, used in errors.
    pub fn decode(block: &[u8], base: usize) -> Result<Self> {
        let mut table = Self::default();
        if block.is_empty() {
            return Ok(table);
        }
        if block[0] != COLOR_BLOCK_TAG {
            return Err(WmdfError::malformed_color_block(
                base,
                format!("expected tag 'Q', found {:#04x}", block[0]),
            ));
        }
        if block.len() <= COLOR_BLOCK_HEADER_LEN {
            return Ok(table);
        }

        let mut cursor = ByteCursor::with_base(block, base);
        cursor.seek(COLOR_BLOCK_HEADER_LEN);
        while !cursor.is_eof() {
            let swatch = read_record(&mut cursor).map_err(into_block_error)?;
            debug!(
                index = table.swatches.len(),
                label = %swatch.label,
                rgb = ?swatch.rgb,
                "swatch"
            );
            table.swatches.push(swatch);
        }
        Ok(table)
    }

    /// Build a table from explicit records (sentinels are prepended).
    pub fn from_records(records: impl IntoIterator<Item = Swatch>) -> Self {
        let mut table = Self::default();
        table.swatches.extend(records);
        table
    }

    /// All swatches, sentinels first.
    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    /// Swatch at a palette index.
    pub fn get(&self, index: usize) -> Option<&Swatch> {
        self.swatches.get(index)
    }

    /// Number of swatches including sentinels.
    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    /// Always false: the sentinels are always present.
    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }
}

fn read_record(cursor: &mut ByteCursor<'_>) -> Result<Swatch> {
    expect_tag(cursor, b'a')?;
    let screen = cursor.read_u16_triple()?;
    // print RGB
    cursor.skip(1 + 6)?;
    // creation date
    cursor.skip(1 + 12)?;

    let mut label = String::new();
    for tag in VARIABLE_TAGS {
        expect_tag(cursor, tag)?;
        let len_offset = cursor.offset();
        let len = cursor.read_i8()?;
        if len < 0 {
            return Err(WmdfError::malformed_color_block(
                len_offset,
                format!("field '{}' declares negative length {}", tag as char, len),
            ));
        }
        let bytes = cursor.take(len as usize)?;
        if tag == b'd' || tag == b'e' {
            label.push_str(&decode_text(bytes));
        }
    }

    for width in TRAILING_WIDTHS {
        cursor.skip(1 + width)?;
    }

    Ok(Swatch::from_screen_rgb(screen, label))
}

fn expect_tag(cursor: &mut ByteCursor<'_>, tag: u8) -> Result<()> {
    let offset = cursor.offset();
    let found = cursor.read_u8()?;
    if found != tag {
        return Err(WmdfError::malformed_color_block(
            offset,
            format!("expected field tag '{}', found {:#04x}", tag as char, found),
        ));
    }
    Ok(())
}

fn into_block_error(err: WmdfError) -> WmdfError {
    match err {
        WmdfError::UnexpectedEof { offset, expected } => WmdfError::malformed_color_block(
            offset,
            format!("record truncated, {} more bytes expected", expected),
        ),
        other => other,
    }
}

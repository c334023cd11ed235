//! Synthetic WeaveMaker files for tests.

#![allow(dead_code)]

/// Widths of the trailing fixed fields of a swatch record.
const TRAILING_WIDTHS: [usize; 9] = [12, 5, 5, 5, 5, 12, 12, 12, 12];

/// Builds a WeaveMaker container byte by byte.
#[derive(Debug, Default, Clone)]
pub struct FileBuilder {
    records: Vec<u8>,
    segments: Vec<u8>,
}

impl FileBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a swatch record to the color block.
    pub fn swatch(mut self, rgb: [u16; 3], name: &str) -> Self {
        let out = &mut self.records;
        out.push(b'a');
        for c in rgb {
            out.extend_from_slice(&c.to_be_bytes());
        }
        out.push(b'b');
        out.extend_from_slice(&[0; 6]);
        out.push(b'c');
        out.extend_from_slice(b"01/02/2020  ");
        for (tag, payload) in [
            (b'd', name.as_bytes()),
            (b'e', &[][..]),
            (b'f', &[][..]),
            (b'g', &[][..]),
            (b'h', &[][..]),
            (b'i', &[][..]),
        ] {
            out.push(tag);
            out.push(payload.len() as u8);
            out.extend_from_slice(payload);
        }
        for (tag, width) in (b'n'..=b'v').zip(TRAILING_WIDTHS) {
            out.push(tag);
            out.extend(std::iter::repeat_n(0u8, width));
        }
        self
    }

    /// Append a segment with an explicit entity size.
    pub fn segment(mut self, id: u8, entity_size: u8, payload: &[u8]) -> Self {
        let count = (payload.len() / entity_size as usize) as u16;
        self.segments.extend_from_slice(&count.to_be_bytes());
        self.segments.push(id);
        self.segments.push(entity_size);
        self.segments.extend_from_slice(payload);
        self
    }

    /// Append raw bytes to the segment area.
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.segments.extend_from_slice(bytes);
        self
    }

    /// Append a text segment.
    pub fn text(self, id: u8, text: &str) -> Self {
        self.segment(id, 1, text.as_bytes())
    }

    /// Append a one-byte-per-entity index segment.
    pub fn indices(self, id: u8, values: &[i8]) -> Self {
        let payload: Vec<u8> = values.iter().map(|&v| v as u8).collect();
        self.segment(id, 1, &payload)
    }

    /// Append a 4-byte-per-row grid; each row lists its 0-based set positions.
    pub fn grid(self, id: u8, rows: &[&[usize]]) -> Self {
        let mut payload = Vec::new();
        for positions in rows {
            let mut value = 0u32;
            for &p in *positions {
                value |= 1 << (31 - p);
            }
            payload.extend_from_slice(&value.to_be_bytes());
        }
        self.segment(id, 4, &payload)
    }

    /// Append a wide grid with `entity_size` bytes per row.
    pub fn wide_grid(self, id: u8, entity_size: u8, rows: &[&[usize]]) -> Self {
        let size = entity_size as usize;
        let mut payload = Vec::new();
        for positions in rows {
            let mut entity = vec![0u8; size];
            for &p in *positions {
                entity[size - 1 - p / 8] |= 0x80 >> (p % 8);
            }
            payload.extend_from_slice(&entity);
        }
        self.segment(id, entity_size, &payload)
    }

    /// Produce the file bytes.
    pub fn build(&self) -> Vec<u8> {
        let mut block = vec![b'Q', 0, 0];
        block.extend_from_slice(&self.records);
        let datastart = (block.len() - 2) as u16;
        let mut out = datastart.to_be_bytes().to_vec();
        out.extend_from_slice(&block);
        out.extend_from_slice(&self.segments);
        out
    }
}

/// Threading rows for a straight draw over `shafts` shafts, `threads` long.
pub fn straight_draw(shafts: usize, threads: usize) -> Vec<Vec<usize>> {
    (0..threads).map(|i| vec![i % shafts]).collect()
}

/// Borrow rows as slices for the builder.
pub fn as_rows(rows: &[Vec<usize>]) -> Vec<&[usize]> {
    rows.iter().map(Vec::as_slice).collect()
}

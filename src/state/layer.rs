use crate::codec::{gid, BinaryReader, Payload};
use crate::error::{Error, Result};

/// A tile layer with its decoded grid of bare tile identifiers
#[derive(Debug, Clone)]
pub struct Layer {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub payload: Payload,
    cells: Vec<u32>,
}

impl Layer {
    /// Decode `payload` into a `width * height` grid. The grid is never
    /// modified afterwards.
    pub fn build(
        name: impl Into<String>,
        width: u32,
        height: u32,
        payload: Payload,
    ) -> Result<Self> {
        let name = name.into();
        let cells = build_grid(&name, width, height, &payload)?;
        tracing::debug!(layer = %name, width, height, tiles = cells.len(), "decoded layer");
        Ok(Self {
            name,
            width,
            height,
            payload,
            cells,
        })
    }

    /// Row-major tile identifiers with orientation flags cleared
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<u32> {
        self.cells.get(index).copied()
    }

    pub fn cell_at(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cell(y as usize * self.width as usize + x as usize)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Decode a payload and unpack its little-endian 32-bit records into bare
/// tile identifiers. Inflation stops just past the expected size, so an
/// oversized stream reports `expected + 1` as its actual length.
pub fn build_grid(layer: &str, width: u32, height: u32, payload: &Payload) -> Result<Vec<u32>> {
    let count = (width as usize).saturating_mul(height as usize);
    let expected = count.saturating_mul(4);

    let data = payload
        .decode_at_most(expected)
        .map_err(|source| Error::Decode {
            layer: layer.to_string(),
            source,
        })?;
    let size_error = || Error::Size {
        layer: layer.to_string(),
        expected,
        actual: data.len(),
    };

    let mut reader = BinaryReader::new(&data);
    let mut cells = Vec::with_capacity(count.min(data.len() / 4));
    for _ in 0..count {
        let raw = reader.read_u32_le().map_err(|_| size_error())?;
        cells.push(gid::clear(raw));
    }
    if !reader.is_empty() {
        return Err(size_error());
    }
    Ok(cells)
}

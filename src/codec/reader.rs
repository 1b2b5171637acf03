use byteorder::{ByteOrder, LittleEndian};

/// Not enough bytes left for the requested read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unexpected end of data: need {need} bytes, have {have}")]
pub struct UnexpectedEof {
    pub need: usize,
    pub have: usize,
}

/// Bounds-checked little-endian cursor over decoded layer data
pub struct BinaryReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BinaryReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], UnexpectedEof> {
        if self.remaining() < n {
            return Err(UnexpectedEof { need: n, have: self.remaining() });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u32_le(&mut self) -> Result<u32, UnexpectedEof> {
        let bytes = self.read_bytes(4)?;
        Ok(LittleEndian::read_u32(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_u32_le() {
        let data = [0x05, 0x00, 0x00, 0x80, 0x01, 0x02, 0x03, 0x04];
        let mut reader = BinaryReader::new(&data);

        assert_eq!(reader.read_u32_le().unwrap(), 0x8000_0005);
        assert_eq!(reader.read_u32_le().unwrap(), 0x0403_0201);
        assert!(reader.is_empty());
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_short_tail() {
        let data = [0x01, 0x00, 0x00, 0x00, 0x02, 0x00];
        let mut reader = BinaryReader::new(&data);

        assert_eq!(reader.read_u32_le().unwrap(), 1);
        let err = reader.read_u32_le().unwrap_err();
        assert_eq!(err, UnexpectedEof { need: 4, have: 2 });
        // A failed read does not advance
        assert_eq!(reader.remaining(), 2);
    }
}

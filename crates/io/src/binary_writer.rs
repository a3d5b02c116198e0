//! Binary writer for serializing Neo wire-format data.

use crate::{IoResult, Serializable};
use bytes::{BufMut, BytesMut};

/// A little-endian writer over a growable byte buffer.
pub struct BinaryWriter {
    buffer: BytesMut,
}

impl BinaryWriter {
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(capacity),
        }
    }

    pub fn position(&self) -> usize {
        self.buffer.len()
    }

    pub fn write_byte(&mut self, value: u8) -> IoResult<()> {
        self.buffer.put_u8(value);
        Ok(())
    }

    pub fn write_bool(&mut self, value: bool) -> IoResult<()> {
        self.write_byte(if value { 1 } else { 0 })
    }

    pub fn write_u16(&mut self, value: u16) -> IoResult<()> {
        self.buffer.put_u16_le(value);
        Ok(())
    }

    pub fn write_u32(&mut self, value: u32) -> IoResult<()> {
        self.buffer.put_u32_le(value);
        Ok(())
    }

    pub fn write_u64(&mut self, value: u64) -> IoResult<()> {
        self.buffer.put_u64_le(value);
        Ok(())
    }

    pub fn write_i64(&mut self, value: i64) -> IoResult<()> {
        self.buffer.put_i64_le(value);
        Ok(())
    }

    /// Writes a self-delimiting length prefix: 1 byte for values below
    /// `0xFD`, otherwise a marker byte plus 2, 4, or 8 little-endian bytes.
    pub fn write_var_int(&mut self, value: u64) -> IoResult<()> {
        if value < 0xfd {
            self.write_byte(value as u8)
        } else if value <= 0xffff {
            self.write_byte(0xfd)?;
            self.write_u16(value as u16)
        } else if value <= 0xffff_ffff {
            self.write_byte(0xfe)?;
            self.write_u32(value as u32)
        } else {
            self.write_byte(0xff)?;
            self.write_u64(value)
        }
    }

    pub fn write_var_bytes(&mut self, value: &[u8]) -> IoResult<()> {
        self.write_var_int(value.len() as u64)?;
        self.write_bytes(value)
    }

    pub fn write_bytes(&mut self, value: &[u8]) -> IoResult<()> {
        self.buffer.put_slice(value);
        Ok(())
    }

    pub fn write_serializable<T: Serializable>(&mut self, value: &T) -> IoResult<()> {
        value.serialize(self)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.buffer.to_vec()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for BinaryWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn var_int_boundaries() {
        let mut w = BinaryWriter::new();
        w.write_var_int(0xfc).unwrap();
        assert_eq!(w.to_bytes(), vec![0xfc]);

        let mut w = BinaryWriter::new();
        w.write_var_int(0xfd).unwrap();
        assert_eq!(w.to_bytes(), vec![0xfd, 0xfd, 0x00]);

        let mut w = BinaryWriter::new();
        w.write_var_int(0x1_0000).unwrap();
        assert_eq!(w.to_bytes(), vec![0xfe, 0x00, 0x00, 0x01, 0x00]);
    }
}

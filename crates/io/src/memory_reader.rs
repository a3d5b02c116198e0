//! Memory reader for deserializing Neo wire-format data.

use crate::error::{IoError, IoResult};
use std::convert::TryInto;

/// A cursor-based reader over an in-memory byte slice.
pub struct MemoryReader {
    data: Vec<u8>,
    pos: usize,
}

impl MemoryReader {
    pub fn new(data: &[u8]) -> Self {
        Self {
            data: data.to_vec(),
            pos: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    fn ensure(&self, needed: usize) -> IoResult<()> {
        if self.pos + needed > self.data.len() {
            return Err(IoError::end_of_stream(needed, "memory reader"));
        }
        Ok(())
    }

    pub fn read_byte(&mut self) -> IoResult<u8> {
        self.ensure(1)?;
        let b = self.data[self.pos];
        self.pos += 1;
        Ok(b)
    }

    pub fn read_bool(&mut self) -> IoResult<bool> {
        match self.read_byte()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(IoError::format_exception(
                "read_bool",
                &format!("invalid boolean byte {other:#x}"),
            )),
        }
    }

    pub fn read_bytes(&mut self, count: usize) -> IoResult<Vec<u8>> {
        self.ensure(count)?;
        let bytes = self.data[self.pos..self.pos + count].to_vec();
        self.pos += count;
        Ok(bytes)
    }

    pub fn read_u16(&mut self) -> IoResult<u16> {
        self.ensure(2)?;
        let bytes: [u8; 2] = self.data[self.pos..self.pos + 2].try_into()?;
        self.pos += 2;
        Ok(u16::from_le_bytes(bytes))
    }

    pub fn read_u32(&mut self) -> IoResult<u32> {
        self.ensure(4)?;
        let bytes: [u8; 4] = self.data[self.pos..self.pos + 4].try_into()?;
        self.pos += 4;
        Ok(u32::from_le_bytes(bytes))
    }

    pub fn read_u64(&mut self) -> IoResult<u64> {
        self.ensure(8)?;
        let bytes: [u8; 8] = self.data[self.pos..self.pos + 8].try_into()?;
        self.pos += 8;
        Ok(u64::from_le_bytes(bytes))
    }

    pub fn read_i64(&mut self) -> IoResult<i64> {
        self.ensure(8)?;
        let bytes: [u8; 8] = self.data[self.pos..self.pos + 8].try_into()?;
        self.pos += 8;
        Ok(i64::from_le_bytes(bytes))
    }

    /// Reads a self-delimiting length prefix (see `BinaryWriter::write_var_int`).
    pub fn read_var_int(&mut self, max: u64) -> IoResult<u64> {
        let first = self.read_byte()?;
        let value = match first {
            0xfd => self.read_u16()? as u64,
            0xfe => self.read_u32()? as u64,
            0xff => self.read_u64()?,
            small => small as u64,
        };
        if value > max {
            return Err(IoError::format_exception(
                "read_var_int",
                &format!("value {value} exceeds cap {max}"),
            ));
        }
        Ok(value)
    }

    pub fn read_var_bytes(&mut self, max: usize) -> IoResult<Vec<u8>> {
        let len = self.read_var_int(max as u64)? as usize;
        self.read_bytes(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn var_int_round_trips_through_writer() {
        use crate::BinaryWriter;
        let mut w = BinaryWriter::new();
        w.write_var_int(70000).unwrap();
        let bytes = w.to_bytes();
        let mut r = MemoryReader::new(&bytes);
        assert_eq!(r.read_var_int(u64::MAX).unwrap(), 70000);
    }

    #[test]
    fn truncated_stream_errors() {
        let mut r = MemoryReader::new(&[0x01]);
        assert!(r.read_u32().is_err());
    }
}

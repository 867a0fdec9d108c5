//! Read buffer
//!
//! Bounded cursor over an encoded byte string. Forward reads advance the
//! head; `reverse_read_byte` consumes the trailer from the tail.

use bytes::Buf;

use crate::config::ByteOrder;
use crate::error::{CodecError, Result};

/// Cursor over a borrowed key or value byte string
#[derive(Debug, Clone)]
pub struct ReadBuf<'a> {
    data: &'a [u8],
    /// Next forward read position
    pos: usize,
    /// One past the last byte still readable from the head
    end: usize,
    order: ByteOrder,
}

impl<'a> ReadBuf<'a> {
    pub fn new(data: &'a [u8], order: ByteOrder) -> Self {
        Self {
            data,
            pos: 0,
            end: data.len(),
            order,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left between the forward and reverse cursors
    pub fn remaining(&self) -> usize {
        self.end - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn require(&self, n: usize) -> Result<()> {
        if self.remaining() < n {
            return Err(CodecError::truncated(n, self.remaining()));
        }
        Ok(())
    }

    /// Take the next `n` bytes, advancing the forward cursor
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.require(n)?;
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Advance past `n` bytes without looking at them
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.require(n)?;
        self.pos += n;
        Ok(())
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        self.require(1)?;
        let byte = self.data[self.pos];
        self.pos += 1;
        Ok(byte)
    }

    /// Read an i32 in the configured byte order
    pub fn read_int32(&mut self) -> Result<i32> {
        let mut src = self.read_bytes(4)?;
        Ok(match self.order {
            ByteOrder::Big => src.get_i32(),
            ByteOrder::Little => src.get_i32_le(),
        })
    }

    /// Read an i64 in the configured byte order
    pub fn read_int64(&mut self) -> Result<i64> {
        let mut src = self.read_bytes(8)?;
        Ok(match self.order {
            ByteOrder::Big => src.get_i64(),
            ByteOrder::Little => src.get_i64_le(),
        })
    }

    pub fn read_u32_be(&mut self) -> Result<u32> {
        let mut src = self.read_bytes(4)?;
        Ok(src.get_u32())
    }

    pub fn read_u64_be(&mut self) -> Result<u64> {
        let mut src = self.read_bytes(8)?;
        Ok(src.get_u64())
    }

    /// Read the i32 length prefix
    fn read_length(&mut self) -> Result<usize> {
        let len = self.read_int32()?;
        usize::try_from(len)
            .map_err(|_| CodecError::SchemaMismatch(format!("negative length prefix {}", len)))
    }

    /// Read an i32 length (configured order) and that many payload bytes
    pub fn read_bytes_with_length(&mut self) -> Result<&'a [u8]> {
        let len = self.read_length()?;
        self.read_bytes(len)
    }

    /// Skip an i32-length-prefixed payload
    pub fn skip_bytes_with_length(&mut self) -> Result<()> {
        let len = self.read_length()?;
        self.skip(len)
    }

    /// Read a non-negative i32 element count
    pub fn read_count(&mut self) -> Result<usize> {
        self.read_length()
    }

    /// Consume one byte from the tail
    pub fn reverse_read_byte(&mut self) -> Result<u8> {
        self.require(1)?;
        self.end -= 1;
        Ok(self.data[self.end])
    }
}

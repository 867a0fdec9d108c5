//! Write buffer
//!
//! Forward/reverse byte sink over one fixed-capacity region.

use bytes::BufMut;

use crate::config::ByteOrder;
use crate::error::{CodecError, Result};

use super::MIN_CAPACITY;

/// Single-use byte accumulator for one encode call
#[derive(Debug)]
pub struct WriteBuf {
    /// Backing region; its length is the current capacity
    buf: Vec<u8>,
    /// Bytes written from the head
    forward: usize,
    /// Bytes written from the tail
    reverse: usize,
    /// Byte order for `write_int32` / `write_int64`
    order: ByteOrder,
}

impl WriteBuf {
    /// Create a buffer pre-sized to `capacity` bytes
    pub fn new(capacity: usize, order: ByteOrder) -> Self {
        Self {
            buf: vec![0u8; capacity.max(MIN_CAPACITY)],
            forward: 0,
            reverse: 0,
            order,
        }
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Current size of the backing region
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Bytes written from the head so far
    pub fn forward_len(&self) -> usize {
        self.forward
    }

    /// Bytes written from the tail so far
    pub fn reverse_len(&self) -> usize {
        self.reverse
    }

    /// Free bytes between the forward and reverse cursors
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.forward - self.reverse
    }

    /// Guarantee at least `n` free bytes, growing the region if needed
    pub fn ensure_remaining(&mut self, n: usize) {
        if self.remaining() < n {
            self.grow(self.forward + self.reverse + n);
        }
    }

    fn grow(&mut self, needed: usize) {
        let old_len = self.buf.len();
        let new_len = needed.max(old_len * 2);

        let mut grown = vec![0u8; new_len];
        grown[..self.forward].copy_from_slice(&self.buf[..self.forward]);
        grown[new_len - self.reverse..].copy_from_slice(&self.buf[old_len - self.reverse..]);
        self.buf = grown;

        tracing::trace!(old_len, new_len, "write buffer grown");
    }

    // =========================================================================
    // Forward writes
    // =========================================================================

    pub fn write_byte(&mut self, byte: u8) {
        self.ensure_remaining(1);
        self.buf[self.forward] = byte;
        self.forward += 1;
    }

    /// Append raw bytes with no length prefix
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.ensure_remaining(bytes.len());
        self.buf[self.forward..self.forward + bytes.len()].copy_from_slice(bytes);
        self.forward += bytes.len();
    }

    /// Append `n` zero bytes
    pub fn write_zeros(&mut self, n: usize) {
        self.ensure_remaining(n);
        self.buf[self.forward..self.forward + n].fill(0);
        self.forward += n;
    }

    /// Append an i32 in the configured byte order
    pub fn write_int32(&mut self, value: i32) {
        self.ensure_remaining(4);
        let mut dst = &mut self.buf[self.forward..self.forward + 4];
        match self.order {
            ByteOrder::Big => dst.put_i32(value),
            ByteOrder::Little => dst.put_i32_le(value),
        }
        self.forward += 4;
    }

    /// Append an i64 in the configured byte order
    pub fn write_int64(&mut self, value: i64) {
        self.ensure_remaining(8);
        let mut dst = &mut self.buf[self.forward..self.forward + 8];
        match self.order {
            ByteOrder::Big => dst.put_i64(value),
            ByteOrder::Little => dst.put_i64_le(value),
        }
        self.forward += 8;
    }

    /// Append a u32 big-endian regardless of configuration (sortable fields)
    pub fn write_u32_be(&mut self, value: u32) {
        self.ensure_remaining(4);
        let mut dst = &mut self.buf[self.forward..self.forward + 4];
        dst.put_u32(value);
        self.forward += 4;
    }

    /// Append a u64 big-endian regardless of configuration (sortable fields)
    pub fn write_u64_be(&mut self, value: u64) {
        self.ensure_remaining(8);
        let mut dst = &mut self.buf[self.forward..self.forward + 8];
        dst.put_u64(value);
        self.forward += 8;
    }

    /// Append an i32 length (configured order) followed by the payload
    pub fn write_bytes_with_length(&mut self, bytes: &[u8]) -> Result<()> {
        let len = i32::try_from(bytes.len()).map_err(|_| {
            CodecError::SchemaMismatch(format!(
                "payload of {} bytes exceeds the i32 length prefix",
                bytes.len()
            ))
        })?;
        self.ensure_remaining(4 + bytes.len());
        self.write_int32(len);
        self.write_bytes(bytes);
        Ok(())
    }

    // =========================================================================
    // Reverse writes
    // =========================================================================

    /// Write one byte at the tail, moving the reverse cursor toward the head
    pub fn reverse_write(&mut self, byte: u8) {
        self.ensure_remaining(1);
        let at = self.buf.len() - self.reverse - 1;
        self.buf[at] = byte;
        self.reverse += 1;
    }

    // =========================================================================
    // Finalize
    // =========================================================================

    /// Forward content followed by the tail region, as one owned byte string
    pub fn to_bytes(self) -> Vec<u8> {
        let Self {
            mut buf,
            forward,
            reverse,
            ..
        } = self;

        let len = buf.len();
        if forward + reverse == len {
            return buf;
        }
        buf.copy_within(len - reverse.., forward);
        buf.truncate(forward + reverse);
        buf
    }
}

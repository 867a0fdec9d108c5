//! Tests for WriteBuf and ReadBuf
//!
//! These tests verify:
//! - Fixed-width writes honor the configured byte order
//! - Reverse writes land at the tail and survive growth
//! - Length-prefixed payloads
//! - Truncation detection on the read side

use rowcodec::buffer::{ReadBuf, WriteBuf, MIN_CAPACITY};
use rowcodec::{ByteOrder, CodecError};

// =============================================================================
// WriteBuf Tests
// =============================================================================

#[test]
fn test_new_buffer_is_empty() {
    let buf = WriteBuf::new(32, ByteOrder::Big);

    assert_eq!(buf.capacity(), 32);
    assert_eq!(buf.forward_len(), 0);
    assert_eq!(buf.reverse_len(), 0);
    assert_eq!(buf.remaining(), 32);
    assert!(buf.to_bytes().is_empty());
}

#[test]
fn test_capacity_has_a_floor() {
    let buf = WriteBuf::new(0, ByteOrder::Big);
    assert_eq!(buf.capacity(), MIN_CAPACITY);
}

#[test]
fn test_write_int32_big_endian() {
    let mut buf = WriteBuf::new(16, ByteOrder::Big);
    buf.write_int32(0x0102_0304);
    assert_eq!(buf.to_bytes(), vec![0x01, 0x02, 0x03, 0x04]);
}

#[test]
fn test_write_int32_little_endian() {
    let mut buf = WriteBuf::new(16, ByteOrder::Little);
    buf.write_int32(0x0102_0304);
    assert_eq!(buf.to_bytes(), vec![0x04, 0x03, 0x02, 0x01]);
}

#[test]
fn test_write_int64_both_orders() {
    let mut big = WriteBuf::new(16, ByteOrder::Big);
    big.write_int64(-2);
    assert_eq!(big.to_bytes(), vec![0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE]);

    let mut little = WriteBuf::new(16, ByteOrder::Little);
    little.write_int64(-2);
    assert_eq!(little.to_bytes(), vec![0xFE, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
}

#[test]
fn test_sortable_writes_ignore_byte_order() {
    let mut buf = WriteBuf::new(16, ByteOrder::Little);
    buf.write_u32_be(1);
    buf.write_u64_be(2);
    assert_eq!(
        buf.to_bytes(),
        vec![0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 2]
    );
}

#[test]
fn test_write_bytes_with_length() {
    let mut buf = WriteBuf::new(16, ByteOrder::Big);
    buf.write_bytes_with_length(b"hi").unwrap();
    assert_eq!(buf.to_bytes(), vec![0, 0, 0, 2, b'h', b'i']);
}

#[test]
fn test_reverse_write_lands_after_forward_content() {
    let mut buf = WriteBuf::new(16, ByteOrder::Big);
    buf.write_byte(1);
    buf.reverse_write(9);
    buf.reverse_write(8);
    buf.write_byte(2);

    assert_eq!(buf.forward_len(), 2);
    assert_eq!(buf.reverse_len(), 2);
    assert_eq!(buf.to_bytes(), vec![1, 2, 8, 9]);
}

#[test]
fn test_exactly_full_buffer() {
    let mut buf = WriteBuf::new(16, ByteOrder::Big);
    buf.write_bytes(&[7u8; 12]);
    for b in [4, 3, 2, 1] {
        buf.reverse_write(b);
    }

    assert_eq!(buf.remaining(), 0);
    assert_eq!(buf.capacity(), 16);

    let bytes = buf.to_bytes();
    assert_eq!(&bytes[..12], &[7u8; 12]);
    assert_eq!(&bytes[12..], &[1, 2, 3, 4]);
}

#[test]
fn test_growth_preserves_tail() {
    let mut buf = WriteBuf::new(16, ByteOrder::Big);
    for b in [4, 3, 2, 1] {
        buf.reverse_write(b);
    }
    buf.write_bytes(&[0xAB; 100]);

    assert!(buf.capacity() >= 104);

    let bytes = buf.to_bytes();
    assert_eq!(bytes.len(), 104);
    assert!(bytes[..100].iter().all(|&b| b == 0xAB));
    assert_eq!(&bytes[100..], &[1, 2, 3, 4]);
}

#[test]
fn test_ensure_remaining_grows() {
    let mut buf = WriteBuf::new(16, ByteOrder::Big);
    buf.write_bytes(&[1; 10]);
    buf.ensure_remaining(100);

    assert!(buf.remaining() >= 100);
    assert_eq!(buf.forward_len(), 10);
}

#[test]
fn test_write_zeros() {
    let mut buf = WriteBuf::new(16, ByteOrder::Big);
    buf.write_byte(0xFF);
    buf.write_zeros(3);
    assert_eq!(buf.to_bytes(), vec![0xFF, 0, 0, 0]);
}

// =============================================================================
// ReadBuf Tests
// =============================================================================

#[test]
fn test_read_primitives_big_endian() {
    let data = [0x07, 0, 0, 0, 5, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE];
    let mut buf = ReadBuf::new(&data, ByteOrder::Big);

    assert_eq!(buf.read_byte().unwrap(), 7);
    assert_eq!(buf.read_int32().unwrap(), 5);
    assert_eq!(buf.read_int64().unwrap(), -2);
    assert!(buf.is_empty());
}

#[test]
fn test_read_primitives_little_endian() {
    let data = [5, 0, 0, 0];
    let mut buf = ReadBuf::new(&data, ByteOrder::Little);
    assert_eq!(buf.read_int32().unwrap(), 5);
}

#[test]
fn test_read_bytes_with_length() {
    let data = [0, 0, 0, 3, b'a', b'b', b'c', 9];
    let mut buf = ReadBuf::new(&data, ByteOrder::Big);

    assert_eq!(buf.read_bytes_with_length().unwrap(), b"abc");
    assert_eq!(buf.position(), 7);
    assert_eq!(buf.remaining(), 1);
}

#[test]
fn test_read_past_end_is_truncated() {
    let data = [1, 2];
    let mut buf = ReadBuf::new(&data, ByteOrder::Big);

    match buf.read_int32() {
        Err(CodecError::TruncatedInput { needed, remaining }) => {
            assert_eq!(needed, 4);
            assert_eq!(remaining, 2);
        }
        other => panic!("Expected TruncatedInput, got {:?}", other),
    }
}

#[test]
fn test_length_prefix_longer_than_data() {
    let data = [0, 0, 0, 10, b'a'];
    let mut buf = ReadBuf::new(&data, ByteOrder::Big);

    assert!(matches!(
        buf.read_bytes_with_length(),
        Err(CodecError::TruncatedInput { needed: 10, remaining: 1 })
    ));
}

#[test]
fn test_negative_length_prefix() {
    let data = [0xFF, 0xFF, 0xFF, 0xFF];
    let mut buf = ReadBuf::new(&data, ByteOrder::Big);

    assert!(matches!(
        buf.read_bytes_with_length(),
        Err(CodecError::SchemaMismatch(_))
    ));
}

#[test]
fn test_reverse_read_limits_forward_reads() {
    let data = [1, 2, 3, 4];
    let mut buf = ReadBuf::new(&data, ByteOrder::Big);

    assert_eq!(buf.reverse_read_byte().unwrap(), 4);
    assert_eq!(buf.reverse_read_byte().unwrap(), 3);
    assert_eq!(buf.remaining(), 2);
    assert_eq!(buf.read_bytes(2).unwrap(), &[1, 2]);
    assert!(buf.read_byte().is_err());
}

#[test]
fn test_skip() {
    let data = [0u8; 8];
    let mut buf = ReadBuf::new(&data, ByteOrder::Big);

    buf.skip(6).unwrap();
    assert_eq!(buf.remaining(), 2);
    assert!(buf.skip(3).is_err());
    buf.skip(2).unwrap();
    assert!(buf.is_empty());
}

#[test]
fn test_write_then_read_back() {
    let mut out = WriteBuf::new(4, ByteOrder::Little);
    out.write_int32(-20);
    out.write_int64(214_748_364_700);
    out.write_bytes_with_length("中文".as_bytes()).unwrap();
    out.reverse_write(0x01);
    let bytes = out.to_bytes();

    let mut input = ReadBuf::new(&bytes, ByteOrder::Little);
    assert_eq!(input.reverse_read_byte().unwrap(), 0x01);
    assert_eq!(input.read_int32().unwrap(), -20);
    assert_eq!(input.read_int64().unwrap(), 214_748_364_700);
    assert_eq!(input.read_bytes_with_length().unwrap(), "中文".as_bytes());
    assert!(input.is_empty());
}

//! Per-column encodings
//!
//! Key path: order-preserving, always big-endian.
//! Value path: direct encoding in the configured byte order.

use crate::buffer::{ReadBuf, WriteBuf};
use crate::error::{CodecError, Result};
use crate::schema::{ColumnSchema, ColumnType, Value};

use super::{NOT_NULL_MARKER, NULL_MARKER};

const SIGN_BIT_32: u32 = 1 << 31;
const SIGN_BIT_64: u64 = 1 << 63;

/// Data bytes per memcomparable string group
const GROUP_SIZE: usize = 8;

/// Marker of a full group with more groups following
const GROUP_MARKER: u8 = 0xFF;

// =============================================================================
// Order-preserving transforms
// =============================================================================

fn order_i32(v: i32) -> u32 {
    (v as u32) ^ SIGN_BIT_32
}

fn unorder_i32(encoded: u32) -> i32 {
    (encoded ^ SIGN_BIT_32) as i32
}

fn order_i64(v: i64) -> u64 {
    (v as u64) ^ SIGN_BIT_64
}

fn unorder_i64(encoded: u64) -> i64 {
    (encoded ^ SIGN_BIT_64) as i64
}

fn order_f32(v: f32) -> u32 {
    let bits = v.to_bits();
    if bits & SIGN_BIT_32 != 0 {
        !bits
    } else {
        bits | SIGN_BIT_32
    }
}

fn unorder_f32(encoded: u32) -> f32 {
    let bits = if encoded & SIGN_BIT_32 != 0 {
        encoded & !SIGN_BIT_32
    } else {
        !encoded
    };
    f32::from_bits(bits)
}

fn order_f64(v: f64) -> u64 {
    let bits = v.to_bits();
    if bits & SIGN_BIT_64 != 0 {
        !bits
    } else {
        bits | SIGN_BIT_64
    }
}

fn unorder_f64(encoded: u64) -> f64 {
    let bits = if encoded & SIGN_BIT_64 != 0 {
        encoded & !SIGN_BIT_64
    } else {
        !encoded
    };
    f64::from_bits(bits)
}

/// Memcomparable byte string: 8-byte zero-padded groups, each followed by
/// `0xFF` if more groups follow or `0xFF - pad` for the last one
fn encode_comparable_bytes(buf: &mut WriteBuf, bytes: &[u8]) {
    buf.ensure_remaining((bytes.len() / GROUP_SIZE + 1) * (GROUP_SIZE + 1));

    let mut rest = bytes;
    loop {
        if rest.len() >= GROUP_SIZE {
            buf.write_bytes(&rest[..GROUP_SIZE]);
            buf.write_byte(GROUP_MARKER);
            rest = &rest[GROUP_SIZE..];
        } else {
            let pad = GROUP_SIZE - rest.len();
            buf.write_bytes(rest);
            buf.write_zeros(pad);
            buf.write_byte(GROUP_MARKER - pad as u8);
            return;
        }
    }
}

/// Walk the groups of a memcomparable string, handing each group's data
/// bytes to `sink`
fn scan_comparable_bytes<'a>(
    buf: &mut ReadBuf<'a>,
    mut sink: impl FnMut(&'a [u8]),
) -> Result<()> {
    loop {
        let group = buf.read_bytes(GROUP_SIZE + 1)?;
        let marker = group[GROUP_SIZE];
        if marker == GROUP_MARKER {
            sink(&group[..GROUP_SIZE]);
            continue;
        }

        let pad = usize::from(GROUP_MARKER - marker);
        if pad == 0 || pad > GROUP_SIZE {
            return Err(CodecError::SchemaMismatch(format!(
                "invalid string group marker 0x{:02x}",
                marker
            )));
        }
        sink(&group[..GROUP_SIZE - pad]);
        return Ok(());
    }
}

// =============================================================================
// Null handling
// =============================================================================

fn check_type(column: &ColumnSchema, value: &Value) -> Result<()> {
    if value.column_type() != column.column_type {
        return Err(CodecError::SchemaMismatch(format!(
            "column {} expects {}, got {}",
            column.index,
            column.column_type,
            value.column_type()
        )));
    }
    Ok(())
}

/// Write the null marker of nullable columns. Returns the value to encode,
/// or `None` when the column is null and nothing but padding follows.
fn write_marker<'v>(
    buf: &mut WriteBuf,
    column: &ColumnSchema,
    value: Option<&'v Value>,
) -> Result<Option<&'v Value>> {
    match value {
        Some(v) => {
            check_type(column, v)?;
            if column.nullable {
                buf.write_byte(NOT_NULL_MARKER);
            }
            Ok(Some(v))
        }
        None if column.nullable => {
            buf.write_byte(NULL_MARKER);
            if let Some(width) = column.column_type.fixed_width() {
                buf.write_zeros(width);
            }
            Ok(None)
        }
        None => Err(CodecError::SchemaMismatch(format!(
            "column {} is not nullable but has no value",
            column.index
        ))),
    }
}

/// Consume the null marker of nullable columns. Returns whether a value
/// follows; for nulls the zero padding is already consumed.
fn read_marker(buf: &mut ReadBuf<'_>, column: &ColumnSchema) -> Result<bool> {
    if !column.nullable {
        return Ok(true);
    }
    match buf.read_byte()? {
        NOT_NULL_MARKER => Ok(true),
        NULL_MARKER => {
            if let Some(width) = column.column_type.fixed_width() {
                buf.skip(width)?;
            }
            Ok(false)
        }
        other => Err(CodecError::SchemaMismatch(format!(
            "invalid null marker 0x{:02x} in column {}",
            other, column.index
        ))),
    }
}

fn not_a_key_type(column: &ColumnSchema) -> CodecError {
    CodecError::SchemaMismatch(format!(
        "column {} of type {} cannot be encoded in a key",
        column.index, column.column_type
    ))
}

// =============================================================================
// Key path
// =============================================================================

pub(crate) fn encode_key(buf: &mut WriteBuf, column: &ColumnSchema, value: Option<&Value>) -> Result<()> {
    let Some(value) = write_marker(buf, column, value)? else {
        return Ok(());
    };

    match value {
        Value::Bool(v) => buf.write_byte(u8::from(*v)),
        Value::Int32(v) => buf.write_u32_be(order_i32(*v)),
        Value::Int64(v) => buf.write_u64_be(order_i64(*v)),
        Value::Float32(v) => buf.write_u32_be(order_f32(*v)),
        Value::Float64(v) => buf.write_u64_be(order_f64(*v)),
        Value::String(v) => encode_comparable_bytes(buf, v.as_bytes()),
        Value::BoolList(_)
        | Value::Int32List(_)
        | Value::Int64List(_)
        | Value::Float32List(_)
        | Value::Float64List(_)
        | Value::StringList(_) => return Err(not_a_key_type(column)),
    }
    Ok(())
}

pub(crate) fn decode_key(buf: &mut ReadBuf<'_>, column: &ColumnSchema) -> Result<Option<Value>> {
    if !read_marker(buf, column)? {
        return Ok(None);
    }

    let value = match column.column_type {
        ColumnType::Bool => Value::Bool(buf.read_byte()? != 0),
        ColumnType::Int32 => Value::Int32(unorder_i32(buf.read_u32_be()?)),
        ColumnType::Int64 => Value::Int64(unorder_i64(buf.read_u64_be()?)),
        ColumnType::Float32 => Value::Float32(unorder_f32(buf.read_u32_be()?)),
        ColumnType::Float64 => Value::Float64(unorder_f64(buf.read_u64_be()?)),
        ColumnType::String => {
            let mut bytes = Vec::new();
            scan_comparable_bytes(buf, |data| bytes.extend_from_slice(data))?;
            Value::String(String::from_utf8(bytes)?)
        }
        ColumnType::BoolList
        | ColumnType::Int32List
        | ColumnType::Int64List
        | ColumnType::Float32List
        | ColumnType::Float64List
        | ColumnType::StringList => return Err(not_a_key_type(column)),
    };
    Ok(Some(value))
}

pub(crate) fn skip_key(buf: &mut ReadBuf<'_>, column: &ColumnSchema) -> Result<()> {
    if !read_marker(buf, column)? {
        return Ok(());
    }

    match column.column_type.fixed_width() {
        Some(width) => buf.skip(width),
        None if column.column_type == ColumnType::String => scan_comparable_bytes(buf, |_| {}),
        None => Err(not_a_key_type(column)),
    }
}

// =============================================================================
// Value path
// =============================================================================

fn write_count(buf: &mut WriteBuf, count: usize) -> Result<()> {
    let count = i32::try_from(count).map_err(|_| {
        CodecError::SchemaMismatch(format!("list of {} elements exceeds the i32 count", count))
    })?;
    buf.write_int32(count);
    Ok(())
}

/// Element count of a fixed-width list, checked against the bytes left
fn read_fixed_count(buf: &mut ReadBuf<'_>, width: usize) -> Result<usize> {
    let count = buf.read_count()?;
    let needed = count.saturating_mul(width);
    if needed > buf.remaining() {
        return Err(CodecError::truncated(needed, buf.remaining()));
    }
    Ok(count)
}

fn read_string(buf: &mut ReadBuf<'_>) -> Result<String> {
    let bytes = buf.read_bytes_with_length()?;
    Ok(String::from_utf8(bytes.to_vec())?)
}

pub(crate) fn encode_value(buf: &mut WriteBuf, column: &ColumnSchema, value: Option<&Value>) -> Result<()> {
    let Some(value) = write_marker(buf, column, value)? else {
        return Ok(());
    };

    match value {
        Value::Bool(v) => buf.write_byte(u8::from(*v)),
        Value::Int32(v) => buf.write_int32(*v),
        Value::Int64(v) => buf.write_int64(*v),
        Value::Float32(v) => buf.write_int32(v.to_bits() as i32),
        Value::Float64(v) => buf.write_int64(v.to_bits() as i64),
        Value::String(v) => buf.write_bytes_with_length(v.as_bytes())?,
        Value::BoolList(items) => {
            write_count(buf, items.len())?;
            buf.ensure_remaining(items.len());
            for item in items {
                buf.write_byte(u8::from(*item));
            }
        }
        Value::Int32List(items) => {
            write_count(buf, items.len())?;
            buf.ensure_remaining(items.len() * 4);
            for item in items {
                buf.write_int32(*item);
            }
        }
        Value::Int64List(items) => {
            write_count(buf, items.len())?;
            buf.ensure_remaining(items.len() * 8);
            for item in items {
                buf.write_int64(*item);
            }
        }
        Value::Float32List(items) => {
            write_count(buf, items.len())?;
            buf.ensure_remaining(items.len() * 4);
            for item in items {
                buf.write_int32(item.to_bits() as i32);
            }
        }
        Value::Float64List(items) => {
            write_count(buf, items.len())?;
            buf.ensure_remaining(items.len() * 8);
            for item in items {
                buf.write_int64(item.to_bits() as i64);
            }
        }
        Value::StringList(items) => {
            write_count(buf, items.len())?;
            for item in items {
                buf.write_bytes_with_length(item.as_bytes())?;
            }
        }
    }
    Ok(())
}

pub(crate) fn decode_value(buf: &mut ReadBuf<'_>, column: &ColumnSchema) -> Result<Option<Value>> {
    if !read_marker(buf, column)? {
        return Ok(None);
    }

    let value = match column.column_type {
        ColumnType::Bool => Value::Bool(buf.read_byte()? != 0),
        ColumnType::Int32 => Value::Int32(buf.read_int32()?),
        ColumnType::Int64 => Value::Int64(buf.read_int64()?),
        ColumnType::Float32 => Value::Float32(f32::from_bits(buf.read_int32()? as u32)),
        ColumnType::Float64 => Value::Float64(f64::from_bits(buf.read_int64()? as u64)),
        ColumnType::String => Value::String(read_string(buf)?),
        ColumnType::BoolList => {
            let count = read_fixed_count(buf, 1)?;
            let items = (0..count)
                .map(|_| buf.read_byte().map(|b| b != 0))
                .collect::<Result<Vec<_>>>()?;
            Value::BoolList(items)
        }
        ColumnType::Int32List => {
            let count = read_fixed_count(buf, 4)?;
            let items = (0..count)
                .map(|_| buf.read_int32())
                .collect::<Result<Vec<_>>>()?;
            Value::Int32List(items)
        }
        ColumnType::Int64List => {
            let count = read_fixed_count(buf, 8)?;
            let items = (0..count)
                .map(|_| buf.read_int64())
                .collect::<Result<Vec<_>>>()?;
            Value::Int64List(items)
        }
        ColumnType::Float32List => {
            let count = read_fixed_count(buf, 4)?;
            let items = (0..count)
                .map(|_| buf.read_int32().map(|bits| f32::from_bits(bits as u32)))
                .collect::<Result<Vec<_>>>()?;
            Value::Float32List(items)
        }
        ColumnType::Float64List => {
            let count = read_fixed_count(buf, 8)?;
            let items = (0..count)
                .map(|_| buf.read_int64().map(|bits| f64::from_bits(bits as u64)))
                .collect::<Result<Vec<_>>>()?;
            Value::Float64List(items)
        }
        ColumnType::StringList => {
            // each element carries at least its 4-byte length
            let count = read_fixed_count(buf, 4)?;
            let items = (0..count)
                .map(|_| read_string(buf))
                .collect::<Result<Vec<_>>>()?;
            Value::StringList(items)
        }
    };
    Ok(Some(value))
}

pub(crate) fn skip_value(buf: &mut ReadBuf<'_>, column: &ColumnSchema) -> Result<()> {
    if !read_marker(buf, column)? {
        return Ok(());
    }

    if let Some(width) = column.column_type.fixed_width() {
        return buf.skip(width);
    }

    match column.column_type.element_type() {
        None => buf.skip_bytes_with_length(),
        Some(ColumnType::String) => {
            let count = read_fixed_count(buf, 4)?;
            for _ in 0..count {
                buf.skip_bytes_with_length()?;
            }
            Ok(())
        }
        Some(element) => {
            let width = element.fixed_width().unwrap_or(0);
            let count = read_fixed_count(buf, width)?;
            buf.skip(count * width)
        }
    }
}

//! Schema planner
//!
//! Validates a schema list once, splits it into key and value paths, and
//! estimates encode buffer sizes.

use crate::codec::{KEY_PREFIX_SIZE, NULL_MARKER_SIZE, TRAILER_SIZE, VALUE_HEADER_SIZE};
use crate::config::{ByteOrder, CodecConfig};
use crate::error::{CodecError, Result};

use super::{ColumnSchema, ColumnType, SharedSchema};

/// Length prefix of strings and element count of lists (value path)
const LENGTH_PREFIX_SIZE: usize = 4;

/// Key-path string groups: 8 data bytes + 1 marker byte
const KEY_GROUP_SIZE: usize = 8;

/// Precomputed view of a schema bound to a byte order
#[derive(Debug, Clone)]
pub struct SchemaPlan {
    columns: SharedSchema,
    /// Positions (into `columns`) of key columns, in schema order
    key_positions: Vec<usize>,
    /// Positions of value columns, in schema order
    value_positions: Vec<usize>,
    byte_order: ByteOrder,
}

impl SchemaPlan {
    pub fn columns(&self) -> &SharedSchema {
        &self.columns
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Key columns in schema order
    pub fn key_columns(&self) -> impl Iterator<Item = &ColumnSchema> + '_ {
        self.key_positions.iter().map(move |&pos| &self.columns[pos])
    }

    /// Value (non-key) columns in schema order
    pub fn value_columns(&self) -> impl Iterator<Item = &ColumnSchema> + '_ {
        self.value_positions.iter().map(move |&pos| &self.columns[pos])
    }

    pub fn key_column_count(&self) -> usize {
        self.key_positions.len()
    }

    pub fn value_column_count(&self) -> usize {
        self.value_positions.len()
    }

    /// Number of slots a record of this schema carries
    pub fn record_len(&self) -> usize {
        self.columns.len()
    }
}

/// Validate `columns` and bind them to `byte_order`.
///
/// Checks that every ordinal addresses a record slot (`0..columns.len()`)
/// exactly once and that no list column is marked as a key column. Column
/// semantics are never altered.
pub fn format_schema(columns: &SharedSchema, byte_order: ByteOrder) -> Result<SchemaPlan> {
    let mut seen = vec![false; columns.len()];
    let mut key_positions = Vec::new();
    let mut value_positions = Vec::new();

    for (pos, column) in columns.iter().enumerate() {
        if column.index >= columns.len() {
            return Err(CodecError::InvalidSchema(format!(
                "column {} has ordinal {} but the schema has {} columns",
                pos,
                column.index,
                columns.len()
            )));
        }
        if seen[column.index] {
            return Err(CodecError::InvalidSchema(format!(
                "ordinal {} is used by more than one column",
                column.index
            )));
        }
        seen[column.index] = true;

        if column.is_key {
            if column.column_type.is_list() {
                return Err(CodecError::InvalidSchema(format!(
                    "list column {} ({}) cannot be a key column",
                    column.index, column.column_type
                )));
            }
            key_positions.push(pos);
        } else {
            value_positions.push(pos);
        }
    }

    Ok(SchemaPlan {
        columns: columns.clone(),
        key_positions,
        value_positions,
        byte_order,
    })
}

/// Expected `(key_size, value_size)` of an encoded record.
///
/// Only sizes the initial buffers; encoding grows past it when needed.
pub fn estimate_record_size(columns: &[ColumnSchema], config: &CodecConfig) -> (usize, usize) {
    let mut key_size = KEY_PREFIX_SIZE + TRAILER_SIZE;
    let mut value_size = VALUE_HEADER_SIZE;

    for column in columns {
        let marker = if column.nullable { NULL_MARKER_SIZE } else { 0 };
        if column.is_key {
            key_size += marker + key_width(column.column_type, config);
        } else {
            value_size += marker + value_width(column.column_type, config);
        }
    }

    (key_size, value_size)
}

fn key_width(column_type: ColumnType, config: &CodecConfig) -> usize {
    match column_type.fixed_width() {
        Some(width) => width,
        None => (config.avg_string_len / KEY_GROUP_SIZE + 1) * (KEY_GROUP_SIZE + 1),
    }
}

fn value_width(column_type: ColumnType, config: &CodecConfig) -> usize {
    if let Some(width) = column_type.fixed_width() {
        return width;
    }
    match column_type.element_type() {
        Some(element) => {
            LENGTH_PREFIX_SIZE + config.avg_list_len * value_width(element, config)
        }
        None => LENGTH_PREFIX_SIZE + config.avg_string_len,
    }
}

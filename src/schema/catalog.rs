//! Schema catalog helpers
//!
//! Persist schema lists with bincode and build them from a compact text
//! description such as `int32:key:notnull,string:key,bool`.

use std::fs;
use std::path::Path;

use crate::config::ByteOrder;
use crate::error::{CodecError, Result};

use super::{format_schema, ColumnSchema, ColumnType, SharedSchema};

/// Serialize a schema list
pub fn schema_to_bytes(columns: &[ColumnSchema]) -> Result<Vec<u8>> {
    Ok(bincode::serialize(columns)?)
}

/// Deserialize and validate a schema list
pub fn schema_from_bytes(bytes: &[u8]) -> Result<SharedSchema> {
    let columns: Vec<ColumnSchema> = bincode::deserialize(bytes)?;
    let schema: SharedSchema = columns.into();
    format_schema(&schema, ByteOrder::default())?;
    Ok(schema)
}

/// Write a schema list to `path`
pub fn save_schema(path: &Path, columns: &[ColumnSchema]) -> Result<()> {
    let bytes = schema_to_bytes(columns)?;
    fs::write(path, bytes)?;
    tracing::debug!("Saved {} column schema to {}", columns.len(), path.display());
    Ok(())
}

/// Read a schema list written by `save_schema`
pub fn load_schema(path: &Path) -> Result<SharedSchema> {
    let bytes = fs::read(path)?;
    schema_from_bytes(&bytes)
}

/// Build a schema from `type[:flag]*` entries separated by commas.
///
/// Ordinals follow entry position. Flags: `key`, `null`, `notnull`.
/// Columns are nullable unless `notnull` is given.
pub fn parse_columns(spec: &str) -> Result<SharedSchema> {
    let mut columns = Vec::new();

    for (index, entry) in spec.split(',').map(str::trim).enumerate() {
        if entry.is_empty() {
            return Err(CodecError::InvalidSchema(format!(
                "empty column entry at position {}",
                index
            )));
        }

        let mut parts = entry.split(':');
        let column_type: ColumnType = parts.next().unwrap_or_default().parse()?;
        let mut column = ColumnSchema::new(column_type, index);

        for flag in parts {
            column = match flag.trim().to_ascii_lowercase().as_str() {
                "key" => column.with_key(true),
                "null" => column.with_nullable(true),
                "notnull" => column.with_nullable(false),
                other => {
                    return Err(CodecError::InvalidSchema(format!(
                        "unknown column flag {:?} in {:?}",
                        other, entry
                    )))
                }
            };
        }
        columns.push(column);
    }

    let schema: SharedSchema = columns.into();
    format_schema(&schema, ByteOrder::default())?;
    Ok(schema)
}

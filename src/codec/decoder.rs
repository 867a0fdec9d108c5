//! Record Decoder
//!
//! Inverse of `RecordEncoder`: rebuilds full records or projections from
//! key and value byte strings.

use crate::buffer::ReadBuf;
use crate::config::{ByteOrder, CodecConfig};
use crate::error::{CodecError, Result};
use crate::schema::{format_schema, Record, SchemaPlan, SharedSchema};

use super::column;
use super::{CODEC_VERSION, TRAILER_SIZE};

/// Which record slots a decode materializes
enum Projection {
    All,
    /// `wanted[ordinal]`
    Only(Vec<bool>),
}

impl Projection {
    fn wants(&self, index: usize) -> bool {
        match self {
            Projection::All => true,
            Projection::Only(wanted) => wanted[index],
        }
    }
}

/// Decoder bound to the same schema, schema version and common id as its
/// paired encoder.
#[derive(Debug, Clone)]
pub struct RecordDecoder {
    schema_version: i32,
    plan: SchemaPlan,
    common_id: i64,
}

impl RecordDecoder {
    /// Create a decoder using the host byte order
    pub fn new(schema_version: i32, schema: SharedSchema, common_id: i64) -> Result<Self> {
        Self::with_config(schema_version, schema, common_id, &CodecConfig::native())
    }

    /// Create a decoder with an explicit configuration
    pub fn with_config(
        schema_version: i32,
        schema: SharedSchema,
        common_id: i64,
        config: &CodecConfig,
    ) -> Result<Self> {
        let plan = format_schema(&schema, config.byte_order)?;

        tracing::debug!(
            schema_version,
            common_id,
            key_columns = plan.key_column_count(),
            value_columns = plan.value_column_count(),
            "record decoder bound to schema"
        );

        Ok(Self {
            schema_version,
            plan,
            common_id,
        })
    }

    /// Rebuild every column of a record
    pub fn decode(&self, key: &[u8], value: &[u8]) -> Result<Record> {
        let mut record = Record::with_columns(self.plan.record_len());
        self.decode_key_into(key, &mut record, &Projection::All)?;
        self.decode_value_into(value, &mut record, &Projection::All)?;
        Ok(record)
    }

    /// Rebuild only the columns whose ordinals appear in `selected`.
    ///
    /// Unselected columns stay absent; their bytes are still walked so the
    /// cursor stays aligned. `selected` may be unsorted or repeat indices.
    pub fn decode_selection(&self, key: &[u8], value: &[u8], selected: &[usize]) -> Result<Record> {
        let projection = self.projection(selected)?;
        let mut record = Record::with_columns(self.plan.record_len());
        self.decode_key_into(key, &mut record, &projection)?;
        self.decode_value_into(value, &mut record, &projection)?;
        Ok(record)
    }

    /// Rebuild the key columns only; value columns stay absent
    pub fn decode_key(&self, key: &[u8]) -> Result<Record> {
        let mut record = Record::with_columns(self.plan.record_len());
        self.decode_key_into(key, &mut record, &Projection::All)?;
        Ok(record)
    }

    /// Rebuild the value columns only; key columns stay absent
    pub fn decode_value(&self, value: &[u8]) -> Result<Record> {
        let mut record = Record::with_columns(self.plan.record_len());
        self.decode_value_into(value, &mut record, &Projection::All)?;
        Ok(record)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn projection(&self, selected: &[usize]) -> Result<Projection> {
        let mut wanted = vec![false; self.plan.record_len()];
        for &index in selected {
            match wanted.get_mut(index) {
                Some(slot) => *slot = true,
                None => {
                    return Err(CodecError::SchemaMismatch(format!(
                        "selected column {} is outside the schema's {} columns",
                        index,
                        self.plan.record_len()
                    )))
                }
            }
        }
        Ok(Projection::Only(wanted))
    }

    fn decode_key_into(&self, key: &[u8], record: &mut Record, projection: &Projection) -> Result<()> {
        let mut buf = ReadBuf::new(key, self.plan.byte_order());

        let _prefix = buf.read_byte()?;
        let common_id = buf.read_u64_be()? as i64;
        if common_id != self.common_id {
            return Err(CodecError::CommonIdMismatch {
                expected: self.common_id,
                found: common_id,
            });
        }

        if buf.remaining() < TRAILER_SIZE {
            return Err(CodecError::truncated(TRAILER_SIZE, buf.remaining()));
        }
        let version = buf.reverse_read_byte()?;
        if version != CODEC_VERSION {
            return Err(CodecError::UnsupportedCodecVersion(version));
        }
        for offset in 1..TRAILER_SIZE {
            let reserved = buf.reverse_read_byte()?;
            if reserved != 0 {
                return Err(CodecError::InvalidTrailer { offset, byte: reserved });
            }
        }

        for col in self.plan.key_columns() {
            if projection.wants(col.index) {
                record.set(col.index, column::decode_key(&mut buf, col)?);
            } else {
                column::skip_key(&mut buf, col)?;
            }
        }

        if !buf.is_empty() {
            return Err(CodecError::SchemaMismatch(format!(
                "{} unread bytes after the key columns",
                buf.remaining()
            )));
        }
        Ok(())
    }

    fn decode_value_into(&self, value: &[u8], record: &mut Record, projection: &Projection) -> Result<()> {
        let mut buf = ReadBuf::new(value, self.plan.byte_order());

        let schema_version = buf.read_int32()?;
        if schema_version != self.schema_version {
            return Err(CodecError::SchemaVersionMismatch {
                expected: self.schema_version,
                found: schema_version,
            });
        }

        for col in self.plan.value_columns() {
            if projection.wants(col.index) {
                record.set(col.index, column::decode_value(&mut buf, col)?);
            } else {
                column::skip_value(&mut buf, col)?;
            }
        }

        if !buf.is_empty() {
            return Err(CodecError::SchemaMismatch(format!(
                "{} unread bytes after the value columns",
                buf.remaining()
            )));
        }
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn schema_version(&self) -> i32 {
        self.schema_version
    }

    pub fn common_id(&self) -> i64 {
        self.common_id
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.plan.byte_order()
    }

    pub fn schema(&self) -> &SharedSchema {
        self.plan.columns()
    }
}

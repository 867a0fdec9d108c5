//! Record Encoder
//!
//! Produces key and value byte strings for records of one schema, plus the
//! scan bounds for that schema's common id.

use crate::buffer::WriteBuf;
use crate::config::{ByteOrder, CodecConfig};
use crate::error::{CodecError, Result};
use crate::schema::{
    estimate_record_size, format_schema, ColumnSchema, Record, SchemaPlan, SharedSchema, Value,
};

use super::column;
use super::{CODEC_VERSION, KEY_PREFIX_SIZE, TRAILER_SIZE, VALUE_HEADER_SIZE};

/// Encoder bound to one schema, schema version and common id.
///
/// Configuration is immutable after construction; `&self` methods may be
/// called from many threads at once, each call using its own buffer.
#[derive(Debug, Clone)]
pub struct RecordEncoder {
    schema_version: i32,
    plan: SchemaPlan,
    common_id: i64,
    key_buf_size: usize,
    value_buf_size: usize,
}

impl RecordEncoder {
    /// Create an encoder using the host byte order
    pub fn new(schema_version: i32, schema: SharedSchema, common_id: i64) -> Result<Self> {
        Self::with_config(schema_version, schema, common_id, &CodecConfig::native())
    }

    /// Create an encoder with an explicit configuration
    pub fn with_config(
        schema_version: i32,
        schema: SharedSchema,
        common_id: i64,
        config: &CodecConfig,
    ) -> Result<Self> {
        let plan = format_schema(&schema, config.byte_order)?;
        let (key_buf_size, value_buf_size) = estimate_record_size(&schema, config);

        tracing::debug!(
            schema_version,
            common_id,
            key_columns = plan.key_column_count(),
            value_columns = plan.value_column_count(),
            key_buf_size,
            value_buf_size,
            "record encoder bound to schema"
        );

        Ok(Self {
            schema_version,
            plan,
            common_id,
            key_buf_size,
            value_buf_size,
        })
    }

    // =========================================================================
    // Record encoding
    // =========================================================================

    /// Encode both halves of a record. Nothing is returned unless both
    /// succeed.
    pub fn encode(&self, prefix: u8, record: &Record) -> Result<(Vec<u8>, Vec<u8>)> {
        let key = self.encode_key(prefix, record)?;
        let value = self.encode_value(record)?;
        Ok((key, value))
    }

    /// `prefix | common id | key columns | trailer`
    pub fn encode_key(&self, prefix: u8, record: &Record) -> Result<Vec<u8>> {
        self.check_arity(record)?;

        let mut buf = self.key_buf();
        buf.ensure_remaining(KEY_PREFIX_SIZE + TRAILER_SIZE);
        Self::encode_prefix(&mut buf, prefix, self.common_id);
        Self::encode_reverse_tag(&mut buf);

        for col in self.plan.key_columns() {
            column::encode_key(&mut buf, col, slot(record, col)?)?;
        }

        Ok(buf.to_bytes())
    }

    /// `schema version | value columns`
    pub fn encode_value(&self, record: &Record) -> Result<Vec<u8>> {
        self.check_arity(record)?;

        let mut buf = WriteBuf::new(self.value_buf_size, self.plan.byte_order());
        buf.ensure_remaining(VALUE_HEADER_SIZE);
        buf.write_int32(self.schema_version);

        for col in self.plan.value_columns() {
            column::encode_value(&mut buf, col, slot(record, col)?)?;
        }

        Ok(buf.to_bytes())
    }

    // =========================================================================
    // Scan bounds
    // =========================================================================

    /// Key prefix made of the first `column_count` key columns, without a
    /// trailer. Value columns in between are passed over. The record only
    /// needs slots for the key columns that are encoded.
    pub fn encode_key_prefix(
        &self,
        prefix: u8,
        record: &Record,
        column_count: usize,
    ) -> Result<Vec<u8>> {
        let mut buf = self.key_buf();
        buf.ensure_remaining(KEY_PREFIX_SIZE);
        Self::encode_prefix(&mut buf, prefix, self.common_id);

        for col in self.plan.key_columns().take(column_count) {
            column::encode_key(&mut buf, col, slot(record, col)?)?;
        }

        Ok(buf.to_bytes())
    }

    /// Like `encode_key_prefix`, but each key column's value is parsed from
    /// text first (see `Value::parse`). One text per leading key column.
    pub fn encode_key_prefix_text<S: AsRef<str>>(&self, prefix: u8, texts: &[S]) -> Result<Vec<u8>> {
        if texts.len() > self.plan.key_column_count() {
            return Err(CodecError::SchemaMismatch(format!(
                "{} key values given but the schema has {} key columns",
                texts.len(),
                self.plan.key_column_count()
            )));
        }

        let mut buf = self.key_buf();
        buf.ensure_remaining(KEY_PREFIX_SIZE);
        Self::encode_prefix(&mut buf, prefix, self.common_id);

        for (col, text) in self.plan.key_columns().zip(texts) {
            let value = Value::parse(col.column_type, text.as_ref())?;
            column::encode_key(&mut buf, col, Some(&value))?;
        }

        Ok(buf.to_bytes())
    }

    /// Inclusive lower bound of every key of this schema: `prefix | common id`
    pub fn encode_min_key_prefix(&self, prefix: u8) -> Vec<u8> {
        let mut buf = self.key_buf();
        Self::encode_prefix(&mut buf, prefix, self.common_id);
        buf.to_bytes()
    }

    /// Exclusive upper bound of every key of this schema:
    /// `prefix | common id + 1`.
    ///
    /// Fails with `Overflow` when the common id has no successor: at
    /// `i64::MAX`, and at `-1` whose big-endian bytes are all `0xFF`.
    pub fn encode_max_key_prefix(&self, prefix: u8) -> Result<Vec<u8>> {
        if self.common_id == i64::MAX || self.common_id == -1 {
            return Err(CodecError::Overflow(self.common_id));
        }

        let mut buf = self.key_buf();
        Self::encode_prefix(&mut buf, prefix, self.common_id + 1);
        Ok(buf.to_bytes())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn key_buf(&self) -> WriteBuf {
        WriteBuf::new(self.key_buf_size, self.plan.byte_order())
    }

    fn encode_prefix(buf: &mut WriteBuf, prefix: u8, common_id: i64) {
        buf.write_byte(prefix);
        buf.write_u64_be(common_id as u64);
    }

    /// Trailer read from the end: codec version, then three reserved zeros
    fn encode_reverse_tag(buf: &mut WriteBuf) {
        buf.reverse_write(CODEC_VERSION);
        buf.reverse_write(0);
        buf.reverse_write(0);
        buf.reverse_write(0);
    }

    fn check_arity(&self, record: &Record) -> Result<()> {
        if record.len() != self.plan.record_len() {
            return Err(CodecError::SchemaMismatch(format!(
                "record has {} values but the schema has {} columns",
                record.len(),
                self.plan.record_len()
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

    /// Initial key buffer capacity
    pub fn key_buf_size(&self) -> usize {
        self.key_buf_size
    }

    /// Initial value buffer capacity
    pub fn value_buf_size(&self) -> usize {
        self.value_buf_size
    }
}

/// The record slot a column reads from
fn slot<'r>(record: &'r Record, column: &ColumnSchema) -> Result<Option<&'r Value>> {
    match record.values().get(column.index) {
        Some(value) => Ok(value.as_ref()),
        None => Err(CodecError::SchemaMismatch(format!(
            "record has no slot for column {}",
            column.index
        ))),
    }
}

/// Smallest byte string greater than every string starting with `prefix`:
/// trailing `0xFF` bytes are dropped and the last remaining byte is
/// incremented. `None` when `prefix` is empty or all `0xFF`.
pub fn prefix_successor(prefix: &[u8]) -> Option<Vec<u8>> {
    let last = prefix.iter().rposition(|&b| b != 0xFF)?;
    let mut end = prefix[..=last].to_vec();
    end[last] += 1;
    Some(end)
}

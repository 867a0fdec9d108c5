//! # rowcodec
//!
//! A schema-driven binary row codec for distributed key-value storage:
//! - Order-preserving key encoding (byte order == value order)
//! - Compact value encoding with per-column nullability
//! - Selective decoding of a subset of columns
//! - Codec/schema version tagging for forward compatibility
//!
//! ## Architecture Overview
//!
//! ```text
//!                 ┌──────────────────────────┐
//!                 │  Schema (Arc<[Column]>)  │
//!                 └────────────┬─────────────┘
//!                              │ format_schema / estimate_record_size
//!                 ┌────────────▼─────────────┐
//!                 │        SchemaPlan        │
//!                 └─────┬──────────────┬─────┘
//!                       │              │
//!            ┌──────────▼───┐      ┌───▼──────────┐
//!   Record ─▶│RecordEncoder │      │RecordDecoder │─▶ Record
//!            └──────┬───────┘      └──────▲───────┘
//!                   │  WriteBuf      ReadBuf │
//!                   ▼                        │
//!            (key bytes, value bytes) ───────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod buffer;
pub mod schema;
pub mod codec;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CodecError, Result};
pub use config::{ByteOrder, CodecConfig};
pub use codec::{RecordDecoder, RecordEncoder, CODEC_VERSION};
pub use schema::{ColumnSchema, ColumnType, Record, SharedSchema, Value};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of rowcodec
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

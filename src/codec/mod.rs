//! Record Codec Module
//!
//! Turns a typed record into a sortable key byte string and a value byte
//! string, and back.
//!
//! ## Key Format
//! ```text
//! ┌────────────┬────────────────┬──────────────────────┬───────────────────┐
//! │ Prefix (1) │ Common id (8)  │ Key columns (var)    │ Trailer (4)       │
//! │            │ big-endian     │ order-preserving     │ 00 00 00 version  │
//! └────────────┴────────────────┴──────────────────────┴───────────────────┘
//! ```
//!
//! ## Value Format
//! ```text
//! ┌─────────────────────┬──────────────────────────────────────────────┐
//! │ Schema version (4)  │ Value columns (var), direct encoding         │
//! └─────────────────────┴──────────────────────────────────────────────┘
//! ```
//!
//! ## Null Convention
//! Nullable columns carry a marker byte (`0x00` null, `0x01` present), so a
//! null sorts below every present value of the same column. A null
//! fixed-width scalar keeps its zero-filled payload; a null string or list
//! is the marker alone. Non-nullable columns carry no marker.

mod column;
mod decoder;
mod encoder;

pub use decoder::RecordDecoder;
pub use encoder::{prefix_successor, RecordEncoder};

/// Codec version stored in the last byte of every key
pub const CODEC_VERSION: u8 = 0x01;

/// Prefix byte + common id
pub const KEY_PREFIX_SIZE: usize = 9;

/// Reverse-written key trailer
pub const TRAILER_SIZE: usize = 4;

/// Schema version header of a value
pub const VALUE_HEADER_SIZE: usize = 4;

/// Null marker preceding nullable columns
pub const NULL_MARKER_SIZE: usize = 1;

pub const NULL_MARKER: u8 = 0x00;
pub const NOT_NULL_MARKER: u8 = 0x01;

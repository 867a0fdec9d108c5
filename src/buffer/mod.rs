//! Byte Buffer Module
//!
//! Growable byte sink and bounded byte source used by the record codec.
//!
//! ## Layout of a write buffer
//! ```text
//! ┌──────────────────────────────┬─────────────┬──────────────┐
//! │ forward writes  ──────────▶  │    free     │ ◀── reverse  │
//! └──────────────────────────────┴─────────────┴──────────────┘
//! 0                          forward      len - reverse      len
//! ```
//!
//! Forward writes grow from the head; `reverse_write` fills the fixed-size
//! key trailer from the tail. The two regions never overlap: every write
//! checks `forward + reverse + n <= len` and grows the region (copying the
//! tail to the new end) when it would not hold.

mod reader;
mod writer;

pub use reader::ReadBuf;
pub use writer::WriteBuf;

/// Smallest backing region a write buffer will allocate
pub const MIN_CAPACITY: usize = 16;

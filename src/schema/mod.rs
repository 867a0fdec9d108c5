//! Schema Module
//!
//! Column descriptors, the typed record model, and the one-time planning
//! pass an encoder or decoder runs when it is bound to a schema.
//!
//! ## Responsibilities
//! - Describe each column: type tag, ordinal, key membership, nullability
//! - Hold records as positionally indexed optional values
//! - Split columns into key / value paths and size encode buffers
//! - Persist and parse schema lists (catalog)
//!
//! Schemas are shared as `Arc<[ColumnSchema]>`: once built they are never
//! mutated, so any number of encoders, decoders and threads may hold one.

mod catalog;
mod column;
mod planner;
mod value;

pub use catalog::{load_schema, parse_columns, save_schema, schema_from_bytes, schema_to_bytes};
pub use column::{ColumnSchema, ColumnType, SharedSchema};
pub use planner::{estimate_record_size, format_schema, SchemaPlan};
pub use value::{Record, Value};

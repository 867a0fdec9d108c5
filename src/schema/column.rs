//! Column descriptors
//!
//! One closed set of column types; encode/decode dispatch is an exhaustive
//! match over `ColumnType`.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// Read-only schema list shared between encoders, decoders and callers
pub type SharedSchema = Arc<[ColumnSchema]>;

/// Supported column types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Bool,
    Int32,
    Int64,
    Float32,
    Float64,
    String,
    BoolList,
    Int32List,
    Int64List,
    Float32List,
    Float64List,
    StringList,
}

impl ColumnType {
    pub const ALL: [ColumnType; 12] = [
        ColumnType::Bool,
        ColumnType::Int32,
        ColumnType::Int64,
        ColumnType::Float32,
        ColumnType::Float64,
        ColumnType::String,
        ColumnType::BoolList,
        ColumnType::Int32List,
        ColumnType::Int64List,
        ColumnType::Float32List,
        ColumnType::Float64List,
        ColumnType::StringList,
    ];

    pub fn is_list(self) -> bool {
        self.element_type().is_some()
    }

    /// Scalar type of a list's elements, `None` for scalar columns
    pub fn element_type(self) -> Option<ColumnType> {
        match self {
            ColumnType::BoolList => Some(ColumnType::Bool),
            ColumnType::Int32List => Some(ColumnType::Int32),
            ColumnType::Int64List => Some(ColumnType::Int64),
            ColumnType::Float32List => Some(ColumnType::Float32),
            ColumnType::Float64List => Some(ColumnType::Float64),
            ColumnType::StringList => Some(ColumnType::String),
            ColumnType::Bool
            | ColumnType::Int32
            | ColumnType::Int64
            | ColumnType::Float32
            | ColumnType::Float64
            | ColumnType::String => None,
        }
    }

    /// Encoded payload width of a fixed-width scalar, `None` for strings
    /// and lists
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            ColumnType::Bool => Some(1),
            ColumnType::Int32 | ColumnType::Float32 => Some(4),
            ColumnType::Int64 | ColumnType::Float64 => Some(8),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ColumnType::Bool => "bool",
            ColumnType::Int32 => "int32",
            ColumnType::Int64 => "int64",
            ColumnType::Float32 => "float32",
            ColumnType::Float64 => "float64",
            ColumnType::String => "string",
            ColumnType::BoolList => "bool[]",
            ColumnType::Int32List => "int32[]",
            ColumnType::Int64List => "int64[]",
            ColumnType::Float32List => "float32[]",
            ColumnType::Float64List => "float64[]",
            ColumnType::StringList => "string[]",
        }
    }

    fn scalar_from_name(name: &str) -> Option<ColumnType> {
        match name {
            "bool" | "boolean" => Some(ColumnType::Bool),
            "int32" | "int" | "integer" => Some(ColumnType::Int32),
            "int64" | "long" | "bigint" => Some(ColumnType::Int64),
            "float32" | "float" => Some(ColumnType::Float32),
            "float64" | "double" => Some(ColumnType::Float64),
            "string" | "varchar" => Some(ColumnType::String),
            _ => None,
        }
    }

    fn list_of(element: ColumnType) -> Option<ColumnType> {
        match element {
            ColumnType::Bool => Some(ColumnType::BoolList),
            ColumnType::Int32 => Some(ColumnType::Int32List),
            ColumnType::Int64 => Some(ColumnType::Int64List),
            ColumnType::Float32 => Some(ColumnType::Float32List),
            ColumnType::Float64 => Some(ColumnType::Float64List),
            ColumnType::String => Some(ColumnType::StringList),
            _ => None,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for ColumnType {
    type Err = CodecError;

    /// Accepts `int32`, `long`, `string[]`, `list<double>` and similar spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let parsed = if let Some(element) = name.strip_suffix("[]") {
            Self::scalar_from_name(element).and_then(Self::list_of)
        } else if let Some(element) = name
            .strip_prefix("list<")
            .and_then(|rest| rest.strip_suffix('>'))
        {
            Self::scalar_from_name(element).and_then(Self::list_of)
        } else {
            Self::scalar_from_name(&name)
        };

        parsed.ok_or_else(|| CodecError::InvalidSchema(format!("unknown column type {:?}", s)))
    }
}

/// Descriptor for one record column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Declared type of the column's values
    pub column_type: ColumnType,

    /// Position of this column's value within a record
    pub index: usize,

    /// Whether the column contributes to the key byte string
    pub is_key: bool,

    /// Whether the column's value may be absent
    pub nullable: bool,
}

impl ColumnSchema {
    /// A nullable value column
    pub fn new(column_type: ColumnType, index: usize) -> Self {
        Self {
            column_type,
            index,
            is_key: false,
            nullable: true,
        }
    }

    pub fn with_key(mut self, is_key: bool) -> Self {
        self.is_key = is_key;
        self
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }
}

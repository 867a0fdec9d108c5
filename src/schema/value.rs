//! Record model
//!
//! A record is one optional value per schema column, addressed by the
//! column's ordinal index.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use crate::error::{CodecError, Result};

use super::ColumnType;

/// Separator between list elements in the text form of a list value
pub const LIST_TEXT_SEPARATOR: char = ';';

/// A present column value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    String(String),
    BoolList(Vec<bool>),
    Int32List(Vec<i32>),
    Int64List(Vec<i64>),
    Float32List(Vec<f32>),
    Float64List(Vec<f64>),
    StringList(Vec<String>),
}

impl Value {
    /// The column type this value belongs to
    pub fn column_type(&self) -> ColumnType {
        match self {
            Value::Bool(_) => ColumnType::Bool,
            Value::Int32(_) => ColumnType::Int32,
            Value::Int64(_) => ColumnType::Int64,
            Value::Float32(_) => ColumnType::Float32,
            Value::Float64(_) => ColumnType::Float64,
            Value::String(_) => ColumnType::String,
            Value::BoolList(_) => ColumnType::BoolList,
            Value::Int32List(_) => ColumnType::Int32List,
            Value::Int64List(_) => ColumnType::Int64List,
            Value::Float32List(_) => ColumnType::Float32List,
            Value::Float64List(_) => ColumnType::Float64List,
            Value::StringList(_) => ColumnType::StringList,
        }
    }

    /// Parse human-supplied text into a value of `column_type`.
    ///
    /// Booleans: `"0"` and `"false"` are false, anything else is true.
    /// Numbers use Rust's locale-independent parsers; surrounding
    /// whitespace is ignored. Strings are taken verbatim. List elements are
    /// separated by `;` and an empty text is an empty list.
    pub fn parse(column_type: ColumnType, text: &str) -> Result<Value> {
        match column_type {
            ColumnType::Bool => Ok(Value::Bool(parse_bool(text))),
            ColumnType::Int32 => parse_number(column_type, text).map(Value::Int32),
            ColumnType::Int64 => parse_number(column_type, text).map(Value::Int64),
            ColumnType::Float32 => parse_number(column_type, text).map(Value::Float32),
            ColumnType::Float64 => parse_number(column_type, text).map(Value::Float64),
            ColumnType::String => Ok(Value::String(text.to_string())),
            ColumnType::BoolList => Ok(Value::BoolList(
                list_items(text).map(parse_bool).collect(),
            )),
            ColumnType::Int32List => parse_list(column_type, text).map(Value::Int32List),
            ColumnType::Int64List => parse_list(column_type, text).map(Value::Int64List),
            ColumnType::Float32List => parse_list(column_type, text).map(Value::Float32List),
            ColumnType::Float64List => parse_list(column_type, text).map(Value::Float64List),
            ColumnType::StringList => Ok(Value::StringList(
                list_items(text).map(str::to_string).collect(),
            )),
        }
    }
}

fn parse_bool(text: &str) -> bool {
    !(text == "0" || text == "false")
}

fn parse_number<T>(column_type: ColumnType, text: &str) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    text.trim()
        .parse::<T>()
        .map_err(|e| CodecError::InvalidTextValue {
            column_type: column_type.to_string(),
            text: text.to_string(),
            reason: e.to_string(),
        })
}

fn list_items(text: &str) -> impl Iterator<Item = &str> {
    let text = if text.is_empty() { None } else { Some(text) };
    text.into_iter()
        .flat_map(|t| t.split(LIST_TEXT_SEPARATOR))
}

fn parse_list<T>(column_type: ColumnType, text: &str) -> Result<Vec<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    list_items(text)
        .map(|item| parse_number(column_type, item))
        .collect()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
            f.write_str("[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(f, "{}", LIST_TEXT_SEPARATOR)?;
                }
                write!(f, "{}", item)?;
            }
            f.write_str("]")
        }

        match self {
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int32(v) => write!(f, "{}", v),
            Value::Int64(v) => write!(f, "{}", v),
            Value::Float32(v) => write!(f, "{}", v),
            Value::Float64(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{:?}", v),
            Value::BoolList(v) => join(f, v),
            Value::Int32List(v) => join(f, v),
            Value::Int64List(v) => join(f, v),
            Value::Float32List(v) => join(f, v),
            Value::Float64List(v) => join(f, v),
            Value::StringList(v) => join(f, v),
        }
    }
}

macro_rules! impl_from_for_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from_for_value! {
    bool => Bool,
    i32 => Int32,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
    String => String,
    Vec<bool> => BoolList,
    Vec<i32> => Int32List,
    Vec<i64> => Int64List,
    Vec<f32> => Float32List,
    Vec<f64> => Float64List,
    Vec<String> => StringList,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

/// One row: an optional value per column, indexed by ordinal
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    values: Vec<Option<Value>>,
}

impl Record {
    pub fn new(values: Vec<Option<Value>>) -> Self {
        Self { values }
    }

    /// A record of `n` absent values
    pub fn with_columns(n: usize) -> Self {
        Self {
            values: vec![None; n],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `index`; `None` when absent or out of range
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index).and_then(Option::as_ref)
    }

    /// Replace the value at `index`, growing the record if needed
    pub fn set(&mut self, index: usize, value: Option<Value>) {
        if index >= self.values.len() {
            self.values.resize(index + 1, None);
        }
        self.values[index] = value;
    }

    pub fn values(&self) -> &[Option<Value>] {
        &self.values
    }

    pub fn into_inner(self) -> Vec<Option<Value>> {
        self.values
    }
}

impl From<Vec<Option<Value>>> for Record {
    fn from(values: Vec<Option<Value>>) -> Self {
        Self::new(values)
    }
}

impl FromIterator<Option<Value>> for Record {
    fn from_iter<I: IntoIterator<Item = Option<Value>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Index<usize> for Record {
    type Output = Option<Value>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

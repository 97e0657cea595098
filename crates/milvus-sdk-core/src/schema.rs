//! Collection schema and insert-data model.
//!
//! A collection schema is an ordered list of [`FieldDescriptor`]s. Insert
//! data arrives as a batch of [`EntityColumn`]s matched to fields by name.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Field data types, with the discriminants used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum DataType {
    /// Unset.
    None = 0,
    /// Boolean.
    Bool = 1,
    /// 8-bit integer.
    Int8 = 2,
    /// 16-bit integer.
    Int16 = 3,
    /// 32-bit integer.
    Int32 = 4,
    /// 64-bit integer.
    Int64 = 5,
    /// 32-bit float.
    Float = 10,
    /// 64-bit float.
    Double = 11,
    /// Unbounded string.
    String = 20,
    /// Length-bounded string.
    #[serde(rename = "VARCHAR")]
    VarChar = 21,
    /// Packed bit vector, 8 dimensions per byte.
    BinaryVector = 100,
    /// Dense `f32` vector.
    FloatVector = 101,
    /// Unrecognised type.
    Unknown = 999,
}

impl DataType {
    /// Returns the wire discriminant.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Returns true for `FloatVector` and `BinaryVector`.
    #[must_use]
    pub const fn is_vector(self) -> bool {
        matches!(self, Self::FloatVector | Self::BinaryVector)
    }

    /// Upper-case wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Bool => "BOOL",
            Self::Int8 => "INT8",
            Self::Int16 => "INT16",
            Self::Int32 => "INT32",
            Self::Int64 => "INT64",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::String => "STRING",
            Self::VarChar => "VARCHAR",
            Self::BinaryVector => "BINARY_VECTOR",
            Self::FloatVector => "FLOAT_VECTOR",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<i32> for DataType {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self> {
        let data_type = match code {
            0 => Self::None,
            1 => Self::Bool,
            2 => Self::Int8,
            3 => Self::Int16,
            4 => Self::Int32,
            5 => Self::Int64,
            10 => Self::Float,
            11 => Self::Double,
            20 => Self::String,
            21 => Self::VarChar,
            100 => Self::BinaryVector,
            101 => Self::FloatVector,
            999 => Self::Unknown,
            other => {
                return Err(Error::InvalidArgument(format!(
                    "unknown data type code {other}"
                )))
            }
        };
        Ok(data_type)
    }
}

/// Type-specific field parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldParams {
    /// Vector dimension, required for vector fields.
    pub dim: Option<i64>,
}

/// Declaration of one column of a collection schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name.
    pub name: String,
    /// Declared type.
    #[serde(rename = "type")]
    pub data_type: DataType,
    /// Whether this field is the primary key.
    #[serde(default)]
    pub is_primary: bool,
    /// Whether values are generated server-side.
    #[serde(default)]
    pub auto_id: bool,
    /// Type-specific parameters.
    #[serde(default)]
    pub params: FieldParams,
}

impl FieldDescriptor {
    /// Creates a plain scalar field.
    #[must_use]
    pub fn new(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
            is_primary: false,
            auto_id: false,
            params: FieldParams::default(),
        }
    }

    /// Creates a vector field with the given dimension.
    #[must_use]
    pub fn vector(name: &str, data_type: DataType, dim: i64) -> Self {
        Self::new(name, data_type).with_dim(dim)
    }

    /// Marks this field as the primary key (builder pattern).
    #[must_use]
    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }

    /// Marks this field as server-generated (builder pattern).
    #[must_use]
    pub fn auto_id(mut self) -> Self {
        self.auto_id = true;
        self
    }

    /// Sets the vector dimension (builder pattern).
    #[must_use]
    pub fn with_dim(mut self, dim: i64) -> Self {
        self.params.dim = Some(dim);
        self
    }
}

/// One row value of an entity column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// String value.
    String(String),
    /// Raw bytes, used for packed binary vectors.
    Bytes(Vec<u8>),
    /// Dense float vector.
    FloatVector(Vec<f32>),
}

impl Value {
    /// Length of a vector-shaped value: element count for float vectors,
    /// byte count for byte strings. `None` for scalars.
    #[must_use]
    pub fn vector_len(&self) -> Option<usize> {
        match self {
            Self::FloatVector(v) => Some(v.len()),
            Self::Bytes(b) => Some(b.len()),
            _ => None,
        }
    }

    /// Returns the bytes if this is a byte string.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

impl From<Vec<f32>> for Value {
    fn from(v: Vec<f32>) -> Self {
        Self::FloatVector(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

/// A user-supplied column of insert data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityColumn {
    /// Column name, matched against field names.
    pub name: String,
    /// Declared type of the values.
    #[serde(rename = "type")]
    pub data_type: DataType,
    /// Row values.
    pub values: Vec<Value>,
}

impl EntityColumn {
    /// Creates a column from any iterator of values.
    #[must_use]
    pub fn new<I, V>(name: &str, data_type: DataType, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            name: name.to_string(),
            data_type,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Dimension inferred from the first row's length.
    ///
    /// Empty columns and scalar first values yield 0.
    #[must_use]
    pub fn first_row_len(&self) -> usize {
        self.values.first().and_then(Value::vector_len).unwrap_or(0)
    }
}

/// Field name to positional index in the schema.
pub type FieldLocationMap = HashMap<String, usize>;

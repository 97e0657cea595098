//! Wire-format column messages and their element count.
//!
//! A column is either scalar data (one of seven typed arrays) or vector data
//! (a flat float buffer with a dimension, or packed binary vectors). Optional
//! payloads mirror the unset states a decoded message can carry.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::schema::DataType;

/// One of the seven scalar arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarData {
    /// Boolean values.
    BoolData(Vec<bool>),
    /// 32-bit integers (also carries INT8 and INT16).
    IntData(Vec<i32>),
    /// 64-bit integers.
    LongData(Vec<i64>),
    /// 32-bit floats.
    FloatData(Vec<f32>),
    /// 64-bit floats.
    DoubleData(Vec<f64>),
    /// Strings.
    StringData(Vec<String>),
    /// Byte strings.
    BytesData(Vec<Vec<u8>>),
}

impl ScalarData {
    /// Number of values in the array.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::BoolData(d) => d.len(),
            Self::IntData(d) => d.len(),
            Self::LongData(d) => d.len(),
            Self::FloatData(d) => d.len(),
            Self::DoubleData(d) => d.len(),
            Self::StringData(d) => d.len(),
            Self::BytesData(d) => d.len(),
        }
    }

    /// Returns true if the array holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Scalar column payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScalarField {
    /// The typed array, unset if the sender used an unknown variant.
    pub data: Option<ScalarData>,
}

/// Flat vector buffers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorData {
    /// Row-major `f32` values, `dim` per vector.
    FloatVector(Vec<f32>),
    /// Packed bits, `dim / 8` bytes per vector.
    BinaryVector(Vec<u8>),
}

/// Vector column payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorField {
    /// Dimension of every vector.
    pub dim: i64,
    /// Flat buffer.
    pub data: Option<VectorData>,
}

/// Scalar or vector payload of a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldPayload {
    /// Scalar column.
    Scalars(ScalarField),
    /// Vector column.
    Vectors(VectorField),
}

/// A decoded column message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldData {
    /// Column name.
    pub field_name: String,
    /// Declared column type.
    #[serde(rename = "type")]
    pub data_type: DataType,
    /// Payload, unset for empty messages.
    pub field: Option<FieldPayload>,
}

impl FieldData {
    /// Builds a scalar column.
    #[must_use]
    pub fn scalars(field_name: &str, data_type: DataType, data: ScalarData) -> Self {
        Self {
            field_name: field_name.to_string(),
            data_type,
            field: Some(FieldPayload::Scalars(ScalarField { data: Some(data) })),
        }
    }

    /// Builds a vector column.
    #[must_use]
    pub fn vectors(field_name: &str, dim: i64, data: VectorData) -> Self {
        let data_type = match data {
            VectorData::FloatVector(_) => DataType::FloatVector,
            VectorData::BinaryVector(_) => DataType::BinaryVector,
        };
        Self {
            field_name: field_name.to_string(),
            data_type,
            field: Some(FieldPayload::Vectors(VectorField {
                dim,
                data: Some(data),
            })),
        }
    }

    /// Number of rows in this column. See [`len_of`].
    pub fn num_rows(&self) -> Result<usize> {
        len_of(self)
    }
}

/// Returns the logical element count of a column message.
///
/// Scalars count their values. Float vectors divide the flat length by
/// `dim` and require an exact fit. Binary vectors divide the byte count by
/// `dim / 8` without a remainder check. A vector payload without data is
/// counted as an empty binary buffer.
///
/// # Errors
///
/// - [`Error::UnsupportedType`] for a scalar payload with no typed array.
/// - [`Error::InvalidVectorLength`] when float data does not divide evenly
///   by `dim`, or `dim` is too small to describe a vector.
/// - [`Error::UnknownDataType`] when the message has no payload.
pub fn len_of(field_data: &FieldData) -> Result<usize> {
    match &field_data.field {
        Some(FieldPayload::Scalars(scalars)) => {
            let data = scalars.data.as_ref().ok_or_else(|| {
                Error::UnsupportedType(format!(
                    "field {} carries no scalar array",
                    field_data.field_name
                ))
            })?;
            tracing::trace!(field = %field_data.field_name, len = data.len(), "scalar field length");
            Ok(data.len())
        }
        Some(FieldPayload::Vectors(vectors)) => vector_len(vectors),
        None => Err(Error::UnknownDataType),
    }
}

fn vector_len(vectors: &VectorField) -> Result<usize> {
    let dim = vectors.dim;
    match &vectors.data {
        Some(VectorData::FloatVector(data)) => {
            let total_len = data.len();
            match usize::try_from(dim) {
                Ok(d) if d > 0 && total_len % d == 0 => {
                    tracing::trace!(total_len, dim, "float vector field length");
                    Ok(total_len / d)
                }
                _ => Err(Error::InvalidVectorLength { total_len, dim }),
            }
        }
        Some(VectorData::BinaryVector(data)) => binary_len(data.len(), dim),
        None => binary_len(0, dim),
    }
}

fn binary_len(total_len: usize, dim: i64) -> Result<usize> {
    let dim_bits = usize::try_from(dim)
        .ok()
        .filter(|&d| d > 0)
        .ok_or(Error::InvalidVectorLength { total_len, dim })?;
    tracing::trace!(total_len, dim, "binary vector field length");
    Ok(total_len * 8 / dim_bits)
}

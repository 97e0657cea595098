//! Error types for the client helpers.
//!
//! Every helper in this crate fails fast with one of these variants. Error
//! codes follow the pattern `MVS-XXX` so SDK callers can match on them
//! without parsing messages.

use thiserror::Error;

/// Result type alias for client helper operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the timestamp codec, the schema reconciler and the
/// field-length inspector.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Wrong shape or value of an input parameter (MVS-001).
    #[error("[MVS-001] Invalid argument: {0}")]
    InvalidArgument(String),

    /// Entity column type or dimension disagrees with the schema (MVS-002).
    #[error("[MVS-002] Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// A required parameter or field is missing (MVS-003).
    #[error("[MVS-003] Parameter error: {0}")]
    ParamError(String),

    /// Scalar field data without a recognised payload (MVS-004).
    #[error("[MVS-004] Unsupported scalar type: {0}")]
    UnsupportedType(String),

    /// Field data carrying neither scalars nor vectors (MVS-005).
    #[error("[MVS-005] Unknown data type")]
    UnknownDataType,

    /// Flat vector buffer not divisible by the declared dimension (MVS-006).
    #[error("[MVS-006] Invalid vector length: total_len={total_len}, dim={dim}")]
    InvalidVectorLength {
        /// Number of elements in the flat buffer.
        total_len: usize,
        /// Declared vector dimension.
        dim: i64,
    },

    /// Binary vector rows are empty, ragged or not byte strings (MVS-007).
    #[error("[MVS-007] Invalid binary vector: {0}")]
    InvalidBinaryVector(String),

    /// Configuration error (MVS-008).
    #[error("[MVS-008] Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns the error code (e.g., "MVS-001").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "MVS-001",
            Self::SchemaMismatch(_) => "MVS-002",
            Self::ParamError(_) => "MVS-003",
            Self::UnsupportedType(_) => "MVS-004",
            Self::UnknownDataType => "MVS-005",
            Self::InvalidVectorLength { .. } => "MVS-006",
            Self::InvalidBinaryVector(_) => "MVS-007",
            Self::Config(_) => "MVS-008",
        }
    }

    /// Returns true if the error stems from user data not matching the
    /// collection schema.
    #[must_use]
    pub const fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Self::SchemaMismatch(_) | Self::ParamError(_) | Self::InvalidBinaryVector(_)
        )
    }
}

impl From<crate::config::ConfigError> for Error {
    fn from(err: crate::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

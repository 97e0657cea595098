//! # Milvus SDK Core
//!
//! Client-side helpers shared by the SDK's insert, query and timestamp-bound
//! calls. Everything here is a pure, synchronous computation that runs
//! before or after a remote call.
//!
//! ## Features
//!
//! - **Hybrid timestamps**: pack and unpack the 46/18-bit physical/logical
//!   layout used by the server's timestamp oracle
//! - **Schema reconciliation**: match insert columns to field descriptors,
//!   checking types and vector dimensions
//! - **Field lengths**: count rows in decoded column messages
//! - **Index parameters**: validate index types, build keys and binary metrics
//!
//! ## Quick Start
//!
//! ```rust
//! use milvus_sdk_core::{traverse_info, DataType, EntityColumn, FieldDescriptor};
//!
//! let fields = vec![
//!     FieldDescriptor::new("id", DataType::Int64).primary().auto_id(),
//!     FieldDescriptor::vector("vec", DataType::FloatVector, 4),
//! ];
//! let entities = vec![EntityColumn::new(
//!     "vec",
//!     DataType::FloatVector,
//!     [vec![1.0f32, 2.0, 3.0, 4.0]],
//! )];
//!
//! let traversal = traverse_info(&fields, &entities).unwrap();
//! assert_eq!(traversal.location["vec"], 1);
//! assert_eq!(traversal.primary_key_index, Some(0));
//! assert_eq!(traversal.auto_id_index, Some(0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
// Timestamp and dimension arithmetic moves between u64/i64/f64 on purpose;
// every conversion is range-checked or bounded by the 46-bit layout.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod config;
#[cfg(test)]
mod config_tests;
pub mod error;
pub mod field_data;
pub mod index_params;
pub mod reconcile;
#[cfg(test)]
mod reconcile_tests;
pub mod schema;
pub mod timestamp;

pub use config::{ConfigError, LoggingConfig, SdkConfig, ValidationConfig};
pub use error::{Error, Result};
pub use field_data::{
    len_of, FieldData, FieldPayload, ScalarData, ScalarField, VectorData, VectorField,
};
pub use index_params::{
    is_valid_binary_metric_type, is_valid_index_params_key, is_valid_index_type,
    validate_index_params, IndexType,
};
pub use reconcile::{check_invalid_binary_vector, traverse_info, Reconciler, Traversal};
pub use schema::{DataType, EntityColumn, FieldDescriptor, FieldLocationMap, FieldParams, Value};
pub use timestamp::{
    hybridts_to_unixtime, mkts_from_datetime, mkts_from_datetime_str, mkts_from_hybridts,
    mkts_from_unixtime, HybridTimestamp, LOGICAL_BITS, LOGICAL_BITS_MASK,
};

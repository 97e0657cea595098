//! Schema reconciliation for insert batches.
//!
//! [`traverse_info`] matches user-supplied entity columns to the collection's
//! field descriptors and fails fast on the first disagreement.
//! [`check_invalid_binary_vector`] is a boolean predicate and never errors;
//! [`Reconciler`] combines both behind a [`ValidationConfig`].

use serde::{Deserialize, Serialize};

use crate::config::ValidationConfig;
use crate::error::{Error, Result};
use crate::schema::{DataType, EntityColumn, FieldDescriptor, FieldLocationMap};

/// Outcome of matching entity columns against a schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Traversal {
    /// Schema position of every matched field.
    pub location: FieldLocationMap,
    /// Position of the primary-key field, if any.
    pub primary_key_index: Option<usize>,
    /// Position of the auto-id field, if any.
    pub auto_id_index: Option<usize>,
}

/// Matches `entities` to `fields` by name, in field order.
///
/// Auto-id fields are recorded and skipped. Every other field must have a
/// column of the same name and type; vector columns must also agree on
/// dimension, judged from the first row only. Columns that match no field
/// are ignored. When several fields are marked primary the last one wins.
///
/// # Errors
///
/// - [`Error::SchemaMismatch`] on a type or dimension disagreement.
/// - [`Error::ParamError`] if a non-auto-id field has no column, or a vector
///   field declares no dimension.
pub fn traverse_info(fields: &[FieldDescriptor], entities: &[EntityColumn]) -> Result<Traversal> {
    let mut traversal = Traversal::default();

    for (i, field) in fields.iter().enumerate() {
        if field.is_primary {
            if let Some(previous) = traversal.primary_key_index {
                tracing::warn!(
                    previous,
                    current = i,
                    field = %field.name,
                    "multiple primary fields declared, last one wins"
                );
            }
            traversal.primary_key_index = Some(i);
        }

        if field.auto_id {
            traversal.auto_id_index = Some(i);
            continue;
        }

        let entity = entities
            .iter()
            .find(|entity| entity.name == field.name)
            .ok_or_else(|| {
                Error::ParamError(format!("Field {} don't match in entities", field.name))
            })?;

        check_field_matches(field, entity)?;

        tracing::debug!(field = %field.name, index = i, "matched entity column");
        traversal.location.insert(field.name.clone(), i);
    }

    Ok(traversal)
}

fn check_field_matches(field: &FieldDescriptor, entity: &EntityColumn) -> Result<()> {
    if field.data_type != entity.data_type {
        return Err(Error::SchemaMismatch(format!(
            "Collection field type is {}, but entities field type is {}",
            field.data_type, entity.data_type
        )));
    }

    if !field.data_type.is_vector() {
        return Ok(());
    }

    let field_dim = field.params.dim.ok_or_else(|| {
        Error::ParamError(format!("Vector field {} has no dim parameter", field.name))
    })?;
    let entity_len = entity.first_row_len() as i64;

    let entity_dim = match field.data_type {
        DataType::BinaryVector => entity_len * 8,
        _ => entity_len,
    };

    if entity_dim != field_dim {
        return Err(Error::SchemaMismatch(format!(
            "Collection field dim is {field_dim}, but entities field dim is {entity_dim}"
        )));
    }

    Ok(())
}

/// Returns true if every binary-vector column holds byte strings of one
/// uniform, non-zero length.
///
/// Columns of other types are not inspected. This never errors; callers
/// decide how to report `false`.
#[must_use]
pub fn check_invalid_binary_vector(entities: &[EntityColumn]) -> bool {
    entities
        .iter()
        .filter(|entity| entity.data_type == DataType::BinaryVector)
        .all(is_uniform_binary_column)
}

fn is_uniform_binary_column(entity: &EntityColumn) -> bool {
    let Some(first) = entity.values.first() else {
        return false;
    };

    let dim = first.vector_len().unwrap_or(0) * 8;
    if dim == 0 {
        return false;
    }

    entity
        .values
        .iter()
        .all(|value| value.as_bytes().is_some_and(|bytes| bytes.len() * 8 == dim))
}

/// Reconciles insert batches under a [`ValidationConfig`].
///
/// # Example
///
/// ```rust
/// use milvus_sdk_core::{DataType, EntityColumn, FieldDescriptor, Reconciler};
///
/// let fields = [
///     FieldDescriptor::new("id", DataType::Int64).primary().auto_id(),
///     FieldDescriptor::vector("vec", DataType::FloatVector, 2),
/// ];
/// let entities = [EntityColumn::new("vec", DataType::FloatVector, [vec![0.5f32, 1.0]])];
///
/// let traversal = Reconciler::default().reconcile(&fields, &entities).unwrap();
/// assert_eq!(traversal.location["vec"], 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    config: ValidationConfig,
}

impl Reconciler {
    /// Creates a reconciler with the given validation settings.
    #[must_use]
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Returns the active validation settings.
    #[must_use]
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validates binary vectors (if enabled), enforces a single primary key
    /// (if strict), then runs [`traverse_info`].
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidBinaryVector`] when the binary-vector check fails.
    /// - [`Error::SchemaMismatch`] when strict mode sees several primary fields.
    /// - Any error from [`traverse_info`].
    pub fn reconcile(&self, fields: &[FieldDescriptor], entities: &[EntityColumn]) -> Result<Traversal> {
        if self.config.check_binary_vectors && !check_invalid_binary_vector(entities) {
            return Err(Error::InvalidBinaryVector(
                "binary vector rows must be non-empty byte strings of equal length".to_string(),
            ));
        }

        if self.config.strict_primary_key {
            let primaries: Vec<&str> = fields
                .iter()
                .filter(|f| f.is_primary)
                .map(|f| f.name.as_str())
                .collect();
            if primaries.len() > 1 {
                return Err(Error::SchemaMismatch(format!(
                    "Collection declares {} primary fields: {}",
                    primaries.len(),
                    primaries.join(", ")
                )));
            }
        }

        traverse_info(fields, entities)
    }
}

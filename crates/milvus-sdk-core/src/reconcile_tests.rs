//! Tests for `reconcile` module

use super::config::ValidationConfig;
use super::error::Error;
use super::reconcile::*;
use super::schema::{DataType, EntityColumn, FieldDescriptor, Value};

fn auto_id_schema(dim: i64) -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new("id", DataType::Int64).primary().auto_id(),
        FieldDescriptor::vector("vec", DataType::FloatVector, dim),
    ]
}

fn float_column(name: &str, rows: &[&[f32]]) -> EntityColumn {
    EntityColumn::new(name, DataType::FloatVector, rows.iter().map(|r| r.to_vec()))
}

fn binary_column(name: &str, row_lens: &[usize]) -> EntityColumn {
    EntityColumn::new(
        name,
        DataType::BinaryVector,
        row_lens.iter().map(|&len| vec![0xAAu8; len]),
    )
}

// =========================================================================
// traverse_info tests
// =========================================================================

#[test]
fn test_traverse_info_skips_auto_id_field() {
    // Arrange
    let fields = auto_id_schema(4);
    let entities = vec![float_column("vec", &[&[1.0, 2.0, 3.0, 4.0]])];

    // Act
    let traversal = traverse_info(&fields, &entities).expect("traverse");

    // Assert
    assert_eq!(traversal.location.len(), 1);
    assert_eq!(traversal.location["vec"], 1);
    assert_eq!(traversal.primary_key_index, Some(0));
    assert_eq!(traversal.auto_id_index, Some(0));
}

#[test]
fn test_traverse_info_maps_every_supplied_field() {
    let fields = vec![
        FieldDescriptor::new("pk", DataType::Int64).primary(),
        FieldDescriptor::new("age", DataType::Int32),
        FieldDescriptor::vector("bits", DataType::BinaryVector, 16),
    ];
    let entities = vec![
        binary_column("bits", &[2, 2]),
        EntityColumn::new("age", DataType::Int32, [31i64, 32]),
        EntityColumn::new("pk", DataType::Int64, [1i64, 2]),
    ];

    let traversal = traverse_info(&fields, &entities).expect("traverse");

    assert_eq!(traversal.location["pk"], 0);
    assert_eq!(traversal.location["age"], 1);
    assert_eq!(traversal.location["bits"], 2);
    assert_eq!(traversal.primary_key_index, Some(0));
    assert_eq!(traversal.auto_id_index, None);
}

#[test]
fn test_traverse_info_ignores_extra_columns() {
    let fields = auto_id_schema(2);
    let entities = vec![
        float_column("vec", &[&[1.0, 2.0]]),
        EntityColumn::new("unused", DataType::Bool, [true]),
    ];

    let traversal = traverse_info(&fields, &entities).expect("traverse");

    assert!(!traversal.location.contains_key("unused"));
}

#[test]
fn test_traverse_info_last_primary_wins() {
    let fields = vec![
        FieldDescriptor::new("a", DataType::Int64).primary(),
        FieldDescriptor::new("b", DataType::Int64).primary(),
    ];
    let entities = vec![
        EntityColumn::new("a", DataType::Int64, [1i64]),
        EntityColumn::new("b", DataType::Int64, [2i64]),
    ];

    let traversal = traverse_info(&fields, &entities).expect("traverse");

    assert_eq!(traversal.primary_key_index, Some(1));
}

#[test]
fn test_traverse_info_rejects_type_mismatch() {
    let fields = vec![FieldDescriptor::new("age", DataType::Int64)];
    let entities = vec![EntityColumn::new("age", DataType::VarChar, ["thirty"])];

    let err = traverse_info(&fields, &entities).unwrap_err();

    assert!(matches!(err, Error::SchemaMismatch(_)));
    assert!(err.to_string().contains("INT64"));
    assert!(err.to_string().contains("VARCHAR"));
}

#[test]
fn test_traverse_info_rejects_float_dim_mismatch() {
    let fields = auto_id_schema(4);
    let entities = vec![float_column("vec", &[&[1.0, 2.0, 3.0]])];

    let err = traverse_info(&fields, &entities).unwrap_err();

    assert_eq!(
        err,
        Error::SchemaMismatch(
            "Collection field dim is 4, but entities field dim is 3".to_string()
        )
    );
}

#[test]
fn test_traverse_info_rejects_binary_dim_mismatch() {
    let fields = vec![FieldDescriptor::vector("bits", DataType::BinaryVector, 16)];
    let entities = vec![binary_column("bits", &[1])];

    let err = traverse_info(&fields, &entities).unwrap_err();

    assert_eq!(
        err,
        Error::SchemaMismatch(
            "Collection field dim is 16, but entities field dim is 8".to_string()
        )
    );
}

#[test]
fn test_traverse_info_only_checks_first_row() {
    let fields = auto_id_schema(2);
    let entities = vec![float_column("vec", &[&[1.0, 2.0], &[1.0, 2.0, 3.0]])];

    assert!(traverse_info(&fields, &entities).is_ok());
}

#[test]
fn test_traverse_info_reports_missing_field() {
    let fields = vec![
        FieldDescriptor::new("id", DataType::Int64).primary().auto_id(),
        FieldDescriptor::new("age", DataType::Int64),
    ];
    let entities = vec![EntityColumn::new("name", DataType::VarChar, ["bob"])];

    let err = traverse_info(&fields, &entities).unwrap_err();

    assert_eq!(
        err,
        Error::ParamError("Field age don't match in entities".to_string())
    );
}

#[test]
fn test_traverse_info_requires_vector_dim() {
    let fields = vec![FieldDescriptor::new("vec", DataType::FloatVector)];
    let entities = vec![float_column("vec", &[&[1.0]])];

    let err = traverse_info(&fields, &entities).unwrap_err();

    assert!(matches!(err, Error::ParamError(_)));
}

#[test]
fn test_traverse_info_empty_vector_column_has_zero_dim() {
    let fields = auto_id_schema(4);
    let entities = vec![EntityColumn::new(
        "vec",
        DataType::FloatVector,
        Vec::<Value>::new(),
    )];

    let err = traverse_info(&fields, &entities).unwrap_err();

    assert!(err.to_string().contains("entities field dim is 0"));
}

// =========================================================================
// check_invalid_binary_vector tests
// =========================================================================

#[test]
fn test_binary_vector_uniform_rows_pass() {
    assert!(check_invalid_binary_vector(&[binary_column("bits", &[2, 2, 2])]));
}

#[test]
fn test_binary_vector_ragged_rows_fail() {
    assert!(!check_invalid_binary_vector(&[binary_column("bits", &[2, 2, 3])]));
}

#[test]
fn test_binary_vector_zero_dim_fails() {
    assert!(!check_invalid_binary_vector(&[binary_column("bits", &[0, 0])]));
    assert!(!check_invalid_binary_vector(&[binary_column("bits", &[])]));
}

#[test]
fn test_binary_vector_non_bytes_row_fails() {
    let mut column = binary_column("bits", &[1]);
    column.values.push(Value::FloatVector(vec![1.0]));

    assert!(!check_invalid_binary_vector(&[column]));
}

#[test]
fn test_binary_vector_check_ignores_other_types() {
    let entities = vec![
        float_column("vec", &[&[1.0], &[1.0, 2.0]]),
        EntityColumn::new("age", DataType::Int64, Vec::<Value>::new()),
    ];

    assert!(check_invalid_binary_vector(&entities));
}

// =========================================================================
// Reconciler tests
// =========================================================================

#[test]
fn test_reconciler_default_matches_traverse_info() {
    let fields = auto_id_schema(4);
    let entities = vec![float_column("vec", &[&[1.0, 2.0, 3.0, 4.0]])];

    let via_reconciler = Reconciler::default()
        .reconcile(&fields, &entities)
        .expect("reconcile");

    assert_eq!(via_reconciler, traverse_info(&fields, &entities).expect("traverse"));
}

#[test]
fn test_reconciler_translates_binary_check_failure() {
    let fields = vec![FieldDescriptor::vector("bits", DataType::BinaryVector, 16)];
    let entities = vec![binary_column("bits", &[2, 3])];

    let err = Reconciler::default().reconcile(&fields, &entities).unwrap_err();

    assert!(matches!(err, Error::InvalidBinaryVector(_)));
}

#[test]
fn test_reconciler_can_skip_binary_check() {
    let config = ValidationConfig {
        check_binary_vectors: false,
        ..ValidationConfig::default()
    };
    let fields = vec![FieldDescriptor::vector("bits", DataType::BinaryVector, 16)];
    let entities = vec![binary_column("bits", &[2, 3])];

    let traversal = Reconciler::new(config)
        .reconcile(&fields, &entities)
        .expect("first row decides the dimension");

    assert_eq!(traversal.location["bits"], 0);
}

#[test]
fn test_reconciler_strict_primary_key() {
    let config = ValidationConfig {
        strict_primary_key: true,
        ..ValidationConfig::default()
    };
    let fields = vec![
        FieldDescriptor::new("a", DataType::Int64).primary(),
        FieldDescriptor::new("b", DataType::Int64).primary(),
    ];
    let entities = vec![
        EntityColumn::new("a", DataType::Int64, [1i64]),
        EntityColumn::new("b", DataType::Int64, [2i64]),
    ];

    let err = Reconciler::new(config).reconcile(&fields, &entities).unwrap_err();

    assert!(matches!(err, Error::SchemaMismatch(_)));
    assert!(err.to_string().contains("a, b"));
}

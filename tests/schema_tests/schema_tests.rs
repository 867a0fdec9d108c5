//! Tests for column types, values, records and the schema planner
//!
//! These tests verify:
//! - Column type names and classification
//! - Text parsing of values (booleans, numbers, lists)
//! - Record slot handling
//! - Schema validation and buffer-size estimates

use std::sync::Arc;

use rowcodec::schema::{estimate_record_size, format_schema};
use rowcodec::{
    ByteOrder, CodecConfig, CodecError, ColumnSchema, ColumnType, Record, RecordEncoder,
    SharedSchema, Value,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn schema(columns: Vec<ColumnSchema>) -> SharedSchema {
    Arc::from(columns)
}

fn assert_invalid_text(result: rowcodec::Result<Value>) {
    match result {
        Err(CodecError::InvalidTextValue { .. }) => {}
        other => panic!("Expected InvalidTextValue, got {:?}", other),
    }
}

// =============================================================================
// ColumnType Tests
// =============================================================================

#[test]
fn test_column_type_from_str() {
    assert_eq!("int32".parse::<ColumnType>().unwrap(), ColumnType::Int32);
    assert_eq!("LONG".parse::<ColumnType>().unwrap(), ColumnType::Int64);
    assert_eq!("double".parse::<ColumnType>().unwrap(), ColumnType::Float64);
    assert_eq!("string[]".parse::<ColumnType>().unwrap(), ColumnType::StringList);
    assert_eq!("list<float>".parse::<ColumnType>().unwrap(), ColumnType::Float32List);
    assert!(matches!(
        "decimal".parse::<ColumnType>(),
        Err(CodecError::InvalidSchema(_))
    ));
    assert!("int32[][]".parse::<ColumnType>().is_err());
}

#[test]
fn test_column_type_names_round_trip() {
    for column_type in ColumnType::ALL {
        assert_eq!(column_type.name().parse::<ColumnType>().unwrap(), column_type);
    }
}

#[test]
fn test_column_type_classification() {
    assert!(!ColumnType::String.is_list());
    assert!(ColumnType::BoolList.is_list());
    assert_eq!(ColumnType::Int64List.element_type(), Some(ColumnType::Int64));
    assert_eq!(ColumnType::Float64.element_type(), None);

    assert_eq!(ColumnType::Bool.fixed_width(), Some(1));
    assert_eq!(ColumnType::Int32.fixed_width(), Some(4));
    assert_eq!(ColumnType::Float32.fixed_width(), Some(4));
    assert_eq!(ColumnType::Int64.fixed_width(), Some(8));
    assert_eq!(ColumnType::Float64.fixed_width(), Some(8));
    assert_eq!(ColumnType::String.fixed_width(), None);
    assert_eq!(ColumnType::Int32List.fixed_width(), None);
}

#[test]
fn test_column_type_display_pads() {
    assert_eq!(format!("{:<8}|", ColumnType::Bool), "bool    |");
}

#[test]
fn test_column_schema_defaults() {
    let column = ColumnSchema::new(ColumnType::Int32, 3);
    assert_eq!(column.index, 3);
    assert!(!column.is_key);
    assert!(column.nullable);

    let key = column.with_key(true).with_nullable(false);
    assert!(key.is_key);
    assert!(!key.nullable);
}

// =============================================================================
// Value Parsing Tests
// =============================================================================

#[test]
fn test_parse_bool() {
    assert_eq!(Value::parse(ColumnType::Bool, "0").unwrap(), Value::Bool(false));
    assert_eq!(Value::parse(ColumnType::Bool, "false").unwrap(), Value::Bool(false));
    assert_eq!(Value::parse(ColumnType::Bool, "1").unwrap(), Value::Bool(true));
    assert_eq!(Value::parse(ColumnType::Bool, "true").unwrap(), Value::Bool(true));
    assert_eq!(Value::parse(ColumnType::Bool, "yes").unwrap(), Value::Bool(true));
    assert_eq!(Value::parse(ColumnType::Bool, "").unwrap(), Value::Bool(true));
}

#[test]
fn test_parse_numbers() {
    assert_eq!(Value::parse(ColumnType::Int32, "-20").unwrap(), Value::Int32(-20));
    assert_eq!(Value::parse(ColumnType::Int32, " 42 ").unwrap(), Value::Int32(42));
    assert_eq!(
        Value::parse(ColumnType::Int64, "214748364700").unwrap(),
        Value::Int64(214_748_364_700)
    );
    assert_eq!(Value::parse(ColumnType::Float32, "1.5").unwrap(), Value::Float32(1.5));
    assert_eq!(
        Value::parse(ColumnType::Float64, "873485.4234").unwrap(),
        Value::Float64(873_485.4234)
    );
}

#[test]
fn test_parse_invalid_numbers() {
    assert_invalid_text(Value::parse(ColumnType::Int32, "12x"));
    assert_invalid_text(Value::parse(ColumnType::Int32, "4294967296"));
    assert_invalid_text(Value::parse(ColumnType::Int64, ""));
    assert_invalid_text(Value::parse(ColumnType::Float64, "1,5"));
}

#[test]
fn test_parse_string_is_verbatim() {
    assert_eq!(
        Value::parse(ColumnType::String, " a b ").unwrap(),
        Value::String(" a b ".to_string())
    );
}

#[test]
fn test_parse_lists() {
    assert_eq!(
        Value::parse(ColumnType::Int32List, "1;2;3").unwrap(),
        Value::Int32List(vec![1, 2, 3])
    );
    assert_eq!(
        Value::parse(ColumnType::Int64List, "").unwrap(),
        Value::Int64List(vec![])
    );
    assert_eq!(
        Value::parse(ColumnType::BoolList, "1;0;false;true").unwrap(),
        Value::BoolList(vec![true, false, false, true])
    );
    assert_eq!(
        Value::parse(ColumnType::StringList, "a;;b").unwrap(),
        Value::StringList(vec!["a".to_string(), String::new(), "b".to_string()])
    );
    assert_invalid_text(Value::parse(ColumnType::Float64List, "1.0;x"));
}

#[test]
fn test_value_column_type_and_display() {
    assert_eq!(Value::from(7i64).column_type(), ColumnType::Int64);
    assert_eq!(Value::from("x").column_type(), ColumnType::String);
    assert_eq!(Value::from(vec![1.0f32]).column_type(), ColumnType::Float32List);

    assert_eq!(Value::Int32List(vec![1, 2]).to_string(), "[1;2]");
    assert_eq!(Value::String("tn".to_string()).to_string(), "\"tn\"");
}

// =============================================================================
// Record Tests
// =============================================================================

#[test]
fn test_record_slots() {
    let mut record = Record::with_columns(3);
    assert_eq!(record.len(), 3);
    assert!(record.get(0).is_none());

    record.set(1, Some(Value::Int32(5)));
    assert_eq!(record.get(1), Some(&Value::Int32(5)));
    assert_eq!(record[1], Some(Value::Int32(5)));

    record.set(5, Some(Value::Bool(true)));
    assert_eq!(record.len(), 6);
    assert!(record.get(4).is_none());
    assert!(record.get(100).is_none());
}

#[test]
fn test_record_from_iterator() {
    let record: Record = vec![Some(Value::Int32(1)), None].into_iter().collect();
    assert_eq!(record, Record::new(vec![Some(Value::Int32(1)), None]));
    assert_eq!(record.into_inner().len(), 2);
}

// =============================================================================
// Planner Tests
// =============================================================================

#[test]
fn test_format_schema_splits_columns() {
    let columns = schema(vec![
        ColumnSchema::new(ColumnType::Int32, 0).with_key(true),
        ColumnSchema::new(ColumnType::String, 1),
        ColumnSchema::new(ColumnType::Int64, 2).with_key(true),
        ColumnSchema::new(ColumnType::StringList, 3),
    ]);

    let plan = format_schema(&columns, ByteOrder::Little).unwrap();

    assert_eq!(plan.key_column_count(), 2);
    assert_eq!(plan.value_column_count(), 2);
    assert_eq!(plan.record_len(), 4);
    assert_eq!(plan.byte_order(), ByteOrder::Little);

    let keys: Vec<usize> = plan.key_columns().map(|c| c.index).collect();
    let values: Vec<usize> = plan.value_columns().map(|c| c.index).collect();
    assert_eq!(keys, vec![0, 2]);
    assert_eq!(values, vec![1, 3]);
}

#[test]
fn test_format_schema_rejects_list_key() {
    let columns = schema(vec![ColumnSchema::new(ColumnType::Int32List, 0).with_key(true)]);
    assert!(matches!(
        format_schema(&columns, ByteOrder::Big),
        Err(CodecError::InvalidSchema(_))
    ));
}

#[test]
fn test_format_schema_rejects_duplicate_ordinal() {
    let columns = schema(vec![
        ColumnSchema::new(ColumnType::Int32, 0),
        ColumnSchema::new(ColumnType::Int32, 0),
    ]);
    assert!(matches!(
        format_schema(&columns, ByteOrder::Big),
        Err(CodecError::InvalidSchema(_))
    ));
}

#[test]
fn test_format_schema_rejects_out_of_range_ordinal() {
    let columns = schema(vec![
        ColumnSchema::new(ColumnType::Int32, 0),
        ColumnSchema::new(ColumnType::Int32, 2),
    ]);
    assert!(matches!(
        format_schema(&columns, ByteOrder::Big),
        Err(CodecError::InvalidSchema(_))
    ));
}

#[test]
fn test_ordinals_need_not_follow_schema_order() {
    let columns = schema(vec![
        ColumnSchema::new(ColumnType::Int32, 1).with_key(true),
        ColumnSchema::new(ColumnType::String, 0),
    ]);
    let plan = format_schema(&columns, ByteOrder::Big).unwrap();
    assert_eq!(plan.key_columns().next().unwrap().index, 1);
}

#[test]
fn test_estimate_record_size() {
    let columns = vec![
        ColumnSchema::new(ColumnType::Int32, 0).with_key(true).with_nullable(false),
        ColumnSchema::new(ColumnType::String, 1).with_key(true),
        ColumnSchema::new(ColumnType::Bool, 2).with_nullable(false),
        ColumnSchema::new(ColumnType::Int64List, 3),
    ];

    let (key_size, value_size) = estimate_record_size(&columns, &CodecConfig::default());

    // 9 prefix + 4 trailer + 4 int32 + (1 marker + 5 groups * 9)
    assert_eq!(key_size, 63);
    // 4 header + 1 bool + (1 marker + 4 count + 8 * 8)
    assert_eq!(value_size, 74);
}

#[test]
fn test_estimate_follows_config() {
    let columns = vec![ColumnSchema::new(ColumnType::String, 0).with_nullable(false)];
    let config = CodecConfig::builder().avg_string_len(100).build();

    let (_, value_size) = estimate_record_size(&columns, &config);
    assert_eq!(value_size, 4 + 4 + 100);
}

#[test]
fn test_encoder_caches_estimates() {
    let columns = vec![
        ColumnSchema::new(ColumnType::Int64, 0).with_key(true).with_nullable(false),
        ColumnSchema::new(ColumnType::Float64, 1),
    ];
    let config = CodecConfig::default();
    let expected = estimate_record_size(&columns, &config);

    let encoder = RecordEncoder::with_config(1, schema(columns), 9, &config).unwrap();
    assert_eq!((encoder.key_buf_size(), encoder.value_buf_size()), expected);
    assert_eq!(expected, (9 + 4 + 8, 4 + 1 + 8));
}

use super::*;
use crate::records::*;
use crate::row::{MemoryRow, ResultRow, Value};

fn sample_task() -> LaunchTaskRecord {
    LaunchTaskRecord {
        id: 42,
        release_key: "gog_1207658919".to_string(),
        user_id: 46_988_221_349_126_400,
        order: 3,
        type_id: 1,
        type_name: "FileTask".to_string(),
        is_primary: true,
    }
}

#[test]
fn fields_follow_column_order() {
    let names: Vec<_> = sample_task().fields().iter().map(|f| f.name).collect();
    assert_eq!(
        names,
        ["id", "gameReleaseKey", "userId", "order", "typeId", "type", "isPrimary"]
    );
}

#[test]
fn fields_carry_kind_and_text_value() {
    let fields = sample_task().fields();
    let user = fields.iter().find(|f| f.name == "userId").unwrap();
    assert_eq!(user.kind, FieldKind::Number);
    assert_eq!(user.value, "46988221349126400");

    let primary = fields.iter().find(|f| f.name == "isPrimary").unwrap();
    assert_eq!(primary.kind, FieldKind::Boolean);
    assert_eq!(primary.value, "true");
}

#[test]
fn every_column_is_settable() {
    // Setting each column to its zero value must bring a record back to default.
    let mut task = sample_task();
    for column in LaunchTaskRecord::COLUMNS {
        (column.set)(&mut task, FieldValue::zero(column.kind));
    }
    assert_eq!(task, LaunchTaskRecord::default());
}

#[test]
fn getters_return_the_declared_kind() {
    let task = sample_task();
    for column in LaunchTaskRecord::COLUMNS {
        assert_eq!((column.get)(&task).kind(), column.kind, "{}", column.name);
    }
    let product = ProductRecord::default();
    for column in ProductRecord::COLUMNS {
        assert_eq!((column.get)(&product).kind(), column.kind, "{}", column.name);
    }
}

#[test]
fn column_lookup_is_case_sensitive() {
    assert!(ProductRecord::column("releaseKey").is_some());
    assert!(ProductRecord::column("releasekey").is_none());
    assert!(ProductRecord::column("RELEASEKEY").is_none());
}

#[test]
fn field_to_value_restores_raw_types() {
    let fields = sample_task().fields();
    let values: Vec<_> = fields.iter().map(Field::to_value).collect();
    assert_eq!(values[0], Value::Integer(42));
    assert_eq!(values[1], Value::Text("gog_1207658919".to_string()));
    assert_eq!(values[6], Value::Integer(1));
}

#[test]
fn field_value_coercions() {
    assert_eq!(FieldValue::Text(" 17 ".to_string()).into_i64(), 17);
    assert_eq!(FieldValue::Text("abc".to_string()).into_i64(), 0);
    assert_eq!(FieldValue::Boolean(true).into_i64(), 1);
    assert!(FieldValue::Number(2).into_bool());
    assert!(!FieldValue::Number(0).into_bool());
    assert!(FieldValue::Text("TRUE".to_string()).into_bool());
    assert_eq!(FieldValue::Number(-5).into_string(), "-5");
    assert_eq!(FieldValue::zero(FieldKind::String), FieldValue::Text(String::new()));
}

#[test]
fn memory_row_exposes_columns_in_order() {
    let row = MemoryRow::from_record(&UserRecord { id: 7 });
    assert_eq!(row.column_count(), 1);
    assert_eq!(row.column_name(0), Some("id"));
    assert_eq!(row.value(0), Some(Value::Integer(7)));
    assert_eq!(row.column_name(1), None);
    assert_eq!(row.value(1), None);
}

#[test]
fn record_kinds_have_names() {
    assert_eq!(ProductRecord::KIND.to_string(), "product");
    assert_eq!(LaunchParametersRecord::KIND.name(), "launch parameters");
    assert_eq!(SchemaEntry::KIND, RecordKind::SchemaEntry);
}

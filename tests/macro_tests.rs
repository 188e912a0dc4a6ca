use serde_record::{document, from_value, to_string, Map, Number, Record, Value};

#[test]
fn test_document_macro_null() {
    assert_eq!(document!(null), Value::Null);
}

#[test]
fn test_document_macro_booleans() {
    assert_eq!(document!(true), Value::Bool(true));
    assert_eq!(document!(false), Value::Bool(false));
}

#[test]
fn test_document_macro_numbers() {
    assert_eq!(document!(42), Value::Number(Number::Integer(42)));
    assert_eq!(document!(3.5), Value::Number(Number::Float(3.5)));
    assert_eq!(document!(-123), Value::Number(Number::Integer(-123)));
}

#[test]
fn test_document_macro_strings() {
    assert_eq!(
        document!("hello world"),
        Value::String("hello world".to_string())
    );
    assert_eq!(document!(""), Value::String(String::new()));
}

#[test]
fn test_document_macro_arrays() {
    assert_eq!(document!([]), Value::Array(vec![]));
    assert_eq!(
        document!([1, (-2), "three", null]),
        Value::Array(vec![
            Value::from(1),
            Value::from(-2),
            Value::from("three"),
            Value::Null,
        ])
    );
}

#[test]
fn test_document_macro_objects() {
    assert_eq!(document!({}), Value::Object(Map::new()));

    let doc = document!({ "val": 5, "label": "five", });
    let mut expected = Map::new();
    expected.insert("val".to_string(), Value::from(5));
    expected.insert("label".to_string(), Value::from("five"));
    assert_eq!(doc, Value::Object(expected));
}

#[test]
fn test_document_macro_keeps_member_order() {
    let doc = document!({ "z": 1, "a": 2, "m": 3 });
    assert_eq!(to_string(&doc).unwrap(), r#"{"z":1,"a":2,"m":3}"#);
}

#[test]
fn test_document_macro_expressions() {
    let name = "sensor";
    let readings = vec![1.5, 2.0];
    let doc = document!({ "name": name, "readings": readings, "count": (readings.len() as i64) });

    assert_eq!(doc.get("name"), Some(&Value::from("sensor")));
    assert_eq!(
        doc.get("readings"),
        Some(&Value::Array(vec![Value::from(1.5), Value::from(2.0)]))
    );
    assert_eq!(doc.get("count"), Some(&Value::from(2)));
}

#[test]
fn test_document_macro_nested() {
    let doc = document!({
        "records": [{ "val": 1 }, { "val": 2 }],
        "meta": { "source": "test", "empty": [] }
    });

    let records: Vec<Record> = from_value(doc.get("records").cloned().unwrap()).unwrap();
    assert_eq!(records, vec![Record::new(1), Record::new(2)]);
    assert_eq!(
        doc.get("meta").and_then(|m| m.get("source")),
        Some(&Value::from("test"))
    );
}

#[test]
fn test_document_macro_feeds_record_decoding() {
    let record = Record::from_document(document!({ "val": 5, "ignored": true })).unwrap();
    assert_eq!(record.val(), 5);

    let err = Record::from_document(document!({ "val": 5.5 })).unwrap_err();
    assert!(err.is_field());
    assert_eq!(err.path(), Some("$.val"));
}

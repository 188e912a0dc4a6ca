use serde_record::{
    decode, decode_with, extract_val, gimme_five, Error, ErrorKind, Grammar, ParseOptions, Record,
};
use std::thread;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_quoted_five() {
    init_logging();
    let record = decode(r#"{"val": 5}"#).unwrap();
    assert_eq!(extract_val(&record), 5);
}

#[test]
fn test_zero_is_a_value() {
    let record = decode(r#"{"val": 0}"#).unwrap();
    assert_eq!(extract_val(&record), 0);
}

#[test]
fn test_string_val_is_field_error() {
    init_logging();
    let err = decode(r#"{"val": "five"}"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Field);
    assert_eq!(err.path(), Some("$.val"));
    assert!(err.to_string().contains(r#"found string "five""#));
}

#[test]
fn test_unquoted_key_depends_on_grammar() {
    let err = decode("{val: 5}").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert_eq!(err.position(), Some((1, 2)));

    let strict = ParseOptions::new().with_grammar(Grammar::Strict);
    assert!(decode_with("{val: 5}", &strict).unwrap_err().is_parse());

    let relaxed = ParseOptions::new().with_grammar(Grammar::Relaxed);
    assert_eq!(extract_val(&decode_with("{val: 5}", &relaxed).unwrap()), 5);
}

#[test]
fn test_gimme_five() {
    assert_eq!(gimme_five().unwrap(), 5);
}

#[test]
fn test_not_json_at_all() {
    for options in [ParseOptions::strict(), ParseOptions::relaxed()] {
        let err = decode_with("not json at all", &options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}

#[test]
fn test_decoding_is_idempotent() {
    let text = r#"{"val": 42, "ignored": [true, null]}"#;
    let first = decode(text).unwrap();
    let second = decode(text).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_missing_val() {
    let err = decode(r#"{"value": 5}"#).unwrap_err();
    assert_eq!(err, Error::missing_field("val"));
    assert!(err.is_field());
}

#[test]
fn test_wrong_number_kinds_are_field_errors() {
    for text in [
        r#"{"val": 5.5}"#,
        r#"{"val": 5.0}"#,
        r#"{"val": 4294967296}"#,
        r#"{"val": -2147483649}"#,
        r#"{"val": null}"#,
        r#"{"val": [5]}"#,
    ] {
        let err = decode(text).unwrap_err();
        assert!(err.is_field(), "{} gave {:?}", text, err);
        assert_eq!(err.path(), Some("$.val"), "{}", text);
    }
}

#[test]
fn test_i32_bounds() {
    assert_eq!(decode(r#"{"val": 2147483647}"#).unwrap(), Record::new(i32::MAX));
    assert_eq!(decode(r#"{"val": -2147483648}"#).unwrap(), Record::new(i32::MIN));
}

#[test]
fn test_document_must_be_an_object() {
    let err = decode("[5]").unwrap_err();
    assert!(err.is_field());
    assert!(decode("5").unwrap_err().is_field());
}

#[test]
fn test_trailing_content_is_parse_error() {
    let err = decode(r#"{"val": 5} {"val": 6}"#).unwrap_err();
    assert!(matches!(err, Error::TrailingCharacters { line: 1, col: 12 }));
}

#[test]
fn test_multiline_error_position() {
    let text = "{\n  \"val\": 5\n  \"other\": 1\n}";
    let err = decode(text).unwrap_err();
    assert!(err.is_parse());
    assert_eq!(err.position(), Some((3, 3)));
}

#[test]
fn test_concurrent_decodes() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                let text = format!("{{val: {}}}", i);
                decode_with(&text, &ParseOptions::relaxed()).map(|r| r.val())
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap().unwrap(), i as i32);
    }
}

//! Building, printing and reading documents.
//!
//! Run with: cargo run --example documents

use serde::{Deserialize, Serialize};
use serde_record::{
    document, from_str_with_options, from_value, to_string, to_string_pretty, ParseOptions,
    Record, Value,
};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Batch {
    name: String,
    records: Vec<Record>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let doc = document!({
        "name": "nightly",
        "records": [{ "val": 1 }, { "val": 5 }, { "val": (-3) }]
    });
    println!("compact: {}", doc);

    let batch: Batch = from_value(doc)?;
    println!("pretty:\n{}\n", to_string_pretty(&batch)?);

    let config = r#"
        // hand-written, so the relaxed grammar is used
        {
            name: 'hand edited',
            records: [
                { val: 10 },
                { val: 20 }, /* trailing comma below */
            ],
        }
    "#;
    let edited: Batch = from_str_with_options(config, &ParseOptions::relaxed())?;
    println!("relaxed input re-encoded: {}", to_string(&edited)?);

    let total: i32 = edited.records.iter().map(Record::val).sum();
    println!("sum of vals: {}", total);

    let value: Value = from_str_with_options(config, &ParseOptions::relaxed())?;
    println!("top-level members: {:?}", value_keys(&value));
    Ok(())
}

fn value_keys(value: &Value) -> Vec<String> {
    match value {
        Value::Object(map) => map.keys().cloned().collect(),
        _ => Vec::new(),
    }
}

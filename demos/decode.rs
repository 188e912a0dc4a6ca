//! Decoding the five document under both grammars.
//!
//! Run with: RUST_LOG=trace cargo run --example decode

use serde_record::{decode, decode_with, extract_val, gimme_five, ParseOptions, FIVE_DOCUMENT};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    println!("document: {}", FIVE_DOCUMENT);

    match decode(FIVE_DOCUMENT) {
        Ok(record) => println!("strict:  val = {}", extract_val(&record)),
        Err(err) => println!("strict:  {:?} error\n{}", err.kind(), err),
    }

    let record = decode_with(FIVE_DOCUMENT, &ParseOptions::relaxed())?;
    println!("relaxed: val = {}", extract_val(&record));

    match decode(r#"{"val": "five"}"#) {
        Ok(record) => println!("unexpected success: {:?}", record),
        Err(err) => println!("mistyped member: {:?} error at {:?}: {}", err.kind(), err.path(), err),
    }

    println!("gimme_five() = {}", gimme_five()?);
    Ok(())
}

//! Common functionality shared between tests.

// Different tests may use only a subset of the available functionality
#![allow(dead_code)]

use bignum_vectors::{CsvSink, RowSink, TestVector};
use flate2::read::GzDecoder;
use num_bigint::BigInt;
use num_traits::Num;
use std::{
    io::Read,
    path::{Path, PathBuf},
};

/// One decoded CSV row.
#[derive(Debug)]
pub struct Row {
    pub a: BigInt,
    pub b: BigInt,
    pub result: BigInt,
    pub comment: Option<String>,
    pub fields: Vec<String>,
}

/// Parse a lowercase, optionally `-`-prefixed hexadecimal field.
pub fn parse_hex(field: &str) -> BigInt {
    assert!(!field.starts_with("0x"), "unexpected prefix in {field:?}");
    assert_eq!(field, field.to_lowercase(), "hex must be lowercase");
    BigInt::from_str_radix(field, 16).expect("hex field")
}

/// Split CSV text into its header and decoded rows.
pub fn parse_csv(text: &str) -> (String, Vec<Row>) {
    let mut lines = text.lines();
    let header = lines.next().expect("header").to_owned();
    let rows = lines
        .map(|line| {
            let fields: Vec<String> = line.split(',').map(str::to_owned).collect();
            Row {
                a: parse_hex(&fields[0]),
                b: parse_hex(&fields[1]),
                result: parse_hex(&fields[2]),
                comment: fields.get(3).cloned(),
                fields,
            }
        })
        .collect();
    (header, rows)
}

/// Render vectors through an in-memory sink.
pub fn render(header: &str, vectors: &[TestVector]) -> String {
    let mut sink = CsvSink::new(Vec::new());
    let mut rows = vec![header.to_owned()];
    rows.extend(vectors.iter().map(TestVector::to_row));
    sink.append(&rows).expect("in-memory append");
    String::from_utf8(sink.finish().expect("flush")).expect("utf-8")
}

/// Decompress a gzip file into text.
pub fn read_gz(path: &Path) -> String {
    let file = std::fs::File::open(path).expect("open output");
    let mut text = String::new();
    GzDecoder::new(file)
        .read_to_string(&mut text)
        .expect("gunzip");
    text
}

/// Fresh scratch directory unique to this process and `name`.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "bignum-vectors-{}-{name}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

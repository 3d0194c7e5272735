//! Load a delimited-text file into a Table
//!
//! Decoding tries UTF-8 first and falls back to the configured single-byte
//! encoding. Anything else that goes wrong is a `FileDecode` error for the
//! whole load.

use crate::core::config::AssistantConfig;
use crate::core::error::{AssistantError, Result};
use crate::table::Table;
use ahash::AHashMap;
use std::fs;
use std::path::Path;

/// Text encodings the loader understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    /// ISO-8859-1: every byte is the code point of the same value
    Latin1,
}

impl Encoding {
    /// Resolve an encoding label, case-insensitively
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Some(Encoding::Utf8),
            "iso-8859-1" | "iso8859-1" | "latin1" | "latin-1" | "l1" => Some(Encoding::Latin1),
            _ => None,
        }
    }

    fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Encoding::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_owned),
            Encoding::Latin1 => Some(bytes.iter().map(|&b| b as char).collect()),
        }
    }
}

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Read and parse a CSV file
pub fn load_path(path: &Path, config: &AssistantConfig) -> Result<Table> {
    let source_name = path.display().to_string();
    let bytes = fs::read(path).map_err(|e| AssistantError::decode(&source_name, e.to_string()))?;
    load_bytes(&bytes, &source_name, config)
}

/// Parse CSV bytes; `source_name` only labels errors and logs
pub fn load_bytes(bytes: &[u8], source_name: &str, config: &AssistantConfig) -> Result<Table> {
    let (text, encoding) = decode_text(bytes, &config.fallback_encoding, source_name)?;
    let table = parse_csv(&text, source_name, &config.na_values)?;
    tracing::info!(
        source = source_name,
        ?encoding,
        rows = table.row_count(),
        columns = table.column_count(),
        "loaded table"
    );
    Ok(table)
}

/// Decode bytes as UTF-8, retrying with the fallback encoding
pub fn decode_text(bytes: &[u8], fallback: &str, source_name: &str) -> Result<(String, Encoding)> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if let Some(text) = Encoding::Utf8.decode(bytes) {
        return Ok((text, Encoding::Utf8));
    }

    let encoding = Encoding::from_label(fallback).ok_or_else(|| {
        AssistantError::decode(source_name, format!("unsupported fallback encoding '{}'", fallback))
    })?;
    tracing::warn!(source = source_name, fallback, "file is not valid UTF-8, retrying");
    encoding
        .decode(bytes)
        .map(|text| (text, encoding))
        .ok_or_else(|| AssistantError::decode(source_name, format!("not decodable as {}", fallback)))
}

fn parse_csv(text: &str, source_name: &str, na_values: &[String]) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let raw_headers: Vec<String> = reader
        .headers()
        .map_err(|e| AssistantError::decode(source_name, e.to_string()))?
        .iter()
        .map(str::to_owned)
        .collect();

    if raw_headers.is_empty() || (raw_headers.len() == 1 && raw_headers[0].is_empty()) {
        return Err(AssistantError::decode(source_name, "no columns to parse from file"));
    }
    let headers = dedupe_headers(raw_headers);

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|e| AssistantError::decode(source_name, e.to_string()))?;
        if record.len() > headers.len() {
            return Err(AssistantError::decode(
                source_name,
                format!(
                    "expected {} fields in line {}, saw {}",
                    headers.len(),
                    line + 2,
                    record.len()
                ),
            ));
        }
        rows.push(record.iter().map(str::to_owned).collect());
    }

    Ok(Table::from_rows(headers, rows, na_values))
}

/// Name blank headers "Unnamed: i" and suffix repeats with ".1", ".2", ...
fn dedupe_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen: AHashMap<String, usize> = AHashMap::new();
    raw.into_iter()
        .enumerate()
        .map(|(i, name)| {
            let base = if name.is_empty() {
                format!("Unnamed: {}", i)
            } else {
                name
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let unique = if *count == 0 {
                base
            } else {
                format!("{}.{}", base, count)
            };
            *count += 1;
            unique
        })
        .collect()
}

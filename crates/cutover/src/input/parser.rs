//! CSV/TSV loader with delimiter and encoding detection.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use indexmap::IndexSet;
use sha2::{Digest, Sha256};
use tracing::debug;

use super::source::{Encoding, SourceMetadata};
use crate::error::{CutoverError, Result};
use crate::table::{Table, Value};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Loads extract files into [`Table`]s.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Load a file as the input called `name`.
    pub fn parse_file(
        &self,
        name: &str,
        path: impl AsRef<Path>,
    ) -> Result<(Table, SourceMetadata)> {
        let path = path.as_ref();
        let io_err = |e| CutoverError::Io {
            path: path.to_path_buf(),
            source: e,
        };

        let mut file = File::open(path).map_err(io_err)?;
        let size_bytes = file.metadata().map_err(io_err)?.len();

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(io_err)?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let (text, encoding, had_bom) = decode(&contents);
        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(text.as_bytes())?,
        };

        let table = self.parse_text(name, &text, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        debug!(
            input = name,
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            %encoding,
            "loaded extract"
        );

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format,
            encoding,
            had_bom,
            table.row_count(),
            table.column_count(),
        );
        Ok((table, metadata))
    }

    /// Parse raw bytes, detecting encoding and delimiter.
    pub fn parse_bytes(&self, name: &str, bytes: &[u8]) -> Result<Table> {
        let (text, _, _) = decode(bytes);
        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(text.as_bytes())?,
        };
        self.parse_text(name, &text, delimiter)
    }

    fn parse_text(&self, name: &str, text: &str, delimiter: u8) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(text.as_bytes());

        let raw_headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        if raw_headers.iter().all(|h| h.is_empty()) {
            return Err(CutoverError::EmptyData(format!(
                "'{}' has no header row",
                name
            )));
        }
        let headers = disambiguate_headers(raw_headers.iter().map(|h| h.as_str()));

        let expected_cols = headers.len();
        let mut rows = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }

            let record = result?;
            let mut row: Vec<Value> = record.iter().map(Value::parse).collect();
            // Pad short rows, drop surplus cells
            row.resize(expected_cols, Value::Empty);
            rows.push(row);
        }

        Table::new(name, headers, rows)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode as UTF-8 (stripping a BOM), falling back to Latin-1.
fn decode(bytes: &[u8]) -> (String, Encoding, bool) {
    let (body, had_bom) = match bytes.strip_prefix(UTF8_BOM) {
        Some(rest) => (rest, true),
        None => (bytes, false),
    };
    match std::str::from_utf8(body) {
        Ok(s) => (s.to_string(), Encoding::Utf8, had_bom),
        // Latin-1 maps every byte to the code point of the same value
        Err(_) => (
            body.iter().map(|&b| b as char).collect(),
            Encoding::Latin1,
            had_bom,
        ),
    }
}

/// Rename repeated header names to `name.1`, `name.2`, ... keeping the first as is.
fn disambiguate_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: IndexSet<String> = IndexSet::new();
    let mut headers = Vec::new();
    for header in raw {
        let mut candidate = header.to_string();
        let mut n = 0;
        while seen.contains(&candidate) {
            n += 1;
            candidate = format!("{}.{}", header, n);
        }
        seen.insert(candidate.clone());
        headers.push(candidate);
    }
    headers
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(CutoverError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Higher count with lower variance wins; tab gets a small bonus
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

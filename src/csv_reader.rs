use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tracing::{debug, warn};

use crate::data::Dataset;
use crate::error::{ChartError, Result};
use crate::value::CellValue;

const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b'\t', b';', b'|'];
const SNIFF_LINES: usize = 5;

/// Read and parse a CSV file into a [`Dataset`].
///
/// Files with a `.tsv` extension are always tab-separated; otherwise the
/// delimiter is detected from the content.
pub fn read_csv_file(path: &Path) -> Result<Dataset> {
    let mut file = File::open(path).map_err(ChartError::parse)?;
    let mut content = String::new();
    file.read_to_string(&mut content).map_err(ChartError::parse)?;

    let is_tsv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("tsv"));
    let delimiter = if is_tsv { b'\t' } else { detect_delimiter(&content) };

    debug!(path = %path.display(), delimiter = ?(delimiter as char), "reading csv file");
    parse_csv(&content, delimiter)
}

/// Read CSV from stdin into a [`Dataset`]
pub fn read_csv_from_stdin() -> Result<Dataset> {
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .map_err(ChartError::parse)?;
    read_csv_str(&content)
}

/// Parse CSV text, detecting the delimiter.
pub fn read_csv_str(content: &str) -> Result<Dataset> {
    parse_csv(content, detect_delimiter(content))
}

/// Pick the candidate delimiter that occurs most often in the first lines.
/// Ties resolve in candidate order, so plain comma wins by default.
pub fn detect_delimiter(content: &str) -> u8 {
    let sample: Vec<&str> = content.lines().take(SNIFF_LINES).collect();

    let mut best = b',';
    let mut best_count = 0;
    for &candidate in &CANDIDATE_DELIMITERS {
        let count: usize = sample
            .iter()
            .map(|line| line.bytes().filter(|&b| b == candidate).count())
            .sum();
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }
    best
}

fn parse_csv(content: &str, delimiter: u8) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(content.as_bytes());

    let raw_headers: Vec<String> = reader
        .headers()
        .map_err(ChartError::parse)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if raw_headers.iter().all(|h| h.trim().is_empty()) {
        return Err(ChartError::parse(io::Error::new(
            io::ErrorKind::InvalidData,
            "missing header row",
        )));
    }
    let headers = dedupe_headers(raw_headers);

    let mut records = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result.map_err(ChartError::parse)?;
        if record.len() > headers.len() {
            warn!(
                row = row_idx + 1,
                cells = record.len(),
                columns = headers.len(),
                "dropping cells beyond the header row"
            );
        }
        let values: Vec<CellValue> = record.iter().map(CellValue::infer).collect();
        records.push(values);
    }

    debug!(columns = headers.len(), rows = records.len(), "parsed csv");
    Ok(Dataset::new(headers, records))
}

/// Make header names unique by suffixing repeats with `_1`, `_2`, ...
fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(headers.len());
    for header in headers {
        let mut name = header.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{}_{}", header, suffix);
            suffix += 1;
        }
        seen.insert(name.clone());
        out.push(name);
    }
    out
}

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::PassError;

/// Positional layout of one crawl export record. The crawler writes a fixed
/// 26-column table; the pipeline only reads a handful of these, but the full
/// contract is kept here so the positions stay documented in one place.
#[derive(Debug, Clone, Copy)]
#[allow(dead_code)]
pub enum Field {
    Input,
    ResultNumber,
    Widget,
    Source,
    ResultRowNumber,
    SourcePageUrl,
    /// Human-readable crumb string, e.g. "Home Plumbing Sinks".
    Crumb,
    Sku,
    ShortDesc,
    Image,
    ImageSource,
    ImageTitle,
    ImageAlt,
    Price,
    PriceSource,
    PriceCurrency,
    PriceTitle,
    PriceText,
    ManuImage,
    ManuImageSource,
    ManuImageTitle,
    ManuImageAlt,
    /// Raw specification markup with embedded `content="..."` markers.
    SpecsRaw,
    Desc,
    PdfLink,
    /// Underlying crumb markup with the anchor trail.
    CrumbRaw,
}

/// One raw record from the row source, fields addressed by position.
#[derive(Debug, Clone)]
pub struct RawRow(Vec<String>);

impl RawRow {
    pub fn new(fields: Vec<String>) -> Self {
        RawRow(fields)
    }

    /// A field missing from a short row reads as empty; the export can be
    /// ragged in its trailing columns.
    pub fn get(&self, field: Field) -> &str {
        self.0.get(field as usize).map(String::as_str).unwrap_or("")
    }
}

/// Read a delimited crawl export into rows, skipping the header line.
/// I/O failure is a pass-fatal `RowRead`.
pub fn read_rows(path: &Path, delimiter: char) -> Result<Vec<RawRow>, PassError> {
    let text = fs::read_to_string(path).map_err(|source| PassError::RowRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut records = parse_delimited(&text, delimiter);
    if !records.is_empty() {
        records.remove(0); // header row
    }
    debug!("Read {} data rows from {}", records.len(), path.display());

    Ok(records.into_iter().map(RawRow::new).collect())
}

/// Minimal delimited-text parser: double-quote fields, `""` escapes, CRLF
/// tolerant. The crawl export quotes any field containing markup, so a
/// naive split would shred it.
fn parse_delimited(text: &str, delimiter: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            c if c == delimiter && !in_quotes => {
                row.push(std::mem::take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) {
                    chars.next();
                }
                row.push(std::mem::take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(std::mem::take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Flush a trailing record with no final newline.
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

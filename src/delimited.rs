//! Delimited text encoding and decoding
//!
//! Survey exports come in as CSV or TSV with a header row, possibly preceded by
//! title rows. Campaign files go out as comma separated text, quoted only where
//! a cell needs it (RFC 4180).

use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use tracing::debug;

use crate::models::{OutputRow, RawRow};
use crate::{EcosanteError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    #[must_use]
    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
        }
    }
}

/// How to read one kind of export
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    pub delimiter: Delimiter,
    /// Rows before the header (form title, question blurbs)
    pub preamble_rows: usize,
    /// Header labels replaced before rows are mapped, first occurrence only
    pub header_renames: &'static [(&'static str, &'static str)],
}

impl ParseOptions {
    #[must_use]
    pub const fn csv() -> Self {
        Self {
            delimiter: Delimiter::Comma,
            preamble_rows: 0,
            header_renames: &[],
        }
    }
}

/// Header and rows of a parsed export
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Header labels after renames
    pub columns: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// Parse delimited text into rows, keeping input order
pub fn parse(text: &str, options: &ParseOptions) -> Result<Vec<RawRow>> {
    Ok(parse_table(text, options)?.rows)
}

/// Parse delimited text, keeping the header alongside the rows
///
/// Fails on empty input, input ending before the header, and data rows whose
/// field count differs from the header.
pub fn parse_table(text: &str, options: &ParseOptions) -> Result<Table> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if text.trim().is_empty() {
        return Err(EcosanteError::parse("input is empty"));
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter.as_byte())
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut records = reader.records();

    // Preamble rows are whole records: a quoted cell may span several lines
    for skipped in 0..options.preamble_rows {
        if records.next().transpose()?.is_none() {
            return Err(EcosanteError::parse(format!(
                "input ends after {skipped} rows, before the header row"
            )));
        }
    }

    let header = records
        .next()
        .transpose()?
        .ok_or_else(|| EcosanteError::parse("no header row"))?;
    let columns = rename_columns(&header, options.header_renames);
    debug!("Header has {} columns", columns.len());

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        if record.len() != columns.len() {
            let line = record.position().map_or(0, |p| p.line());
            return Err(EcosanteError::parse(format!(
                "line {line} has {} fields, expected {}",
                record.len(),
                columns.len()
            )));
        }
        rows.push(
            columns
                .iter()
                .map(String::as_str)
                .zip(record.iter())
                .collect::<RawRow>(),
        );
    }

    Ok(Table { columns, rows })
}

fn rename_columns(header: &StringRecord, renames: &[(&str, &str)]) -> Vec<String> {
    let mut columns: Vec<String> = header.iter().map(str::to_string).collect();
    for (from, to) in renames {
        if let Some(column) = columns.iter_mut().find(|c| c.as_str() == *from) {
            *column = (*to).to_string();
        }
    }
    columns
}

/// Serialize rows as comma separated text under the given header
///
/// Cells for columns a row does not carry are left empty.
pub fn format(columns: &[&str], rows: &[OutputRow]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .delimiter(Delimiter::Comma.as_byte())
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(columns)?;
    for row in rows {
        writer.write_record(columns.iter().map(|c| row.get(c).unwrap_or_default()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| EcosanteError::general(format!("Failed to flush CSV output: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| EcosanteError::general(format!("CSV output is not UTF-8: {e}")))
}

//! CSV persistence for history rows.
//!
//! The file is a plain table with the header `operation,a,b,result` and one
//! row per calculation. Numbers are always written as float text. Loading
//! accepts the columns in any order (extra columns are ignored) but requires
//! all four to be present, and trusts the stored `result` as-is.

use crate::error::{CalcError, Result};
use crate::types::{format_number, HistoryEntry};
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::BufWriter;
use std::path::Path;
use tracing::{debug, info};

/// Required columns, in the order they are written.
pub const COLUMNS: [&str; 4] = ["operation", "a", "b", "result"];

/// Write every row to `path`, replacing its contents.
///
/// Nothing is checked up front; an unwritable destination fails on the
/// write attempt itself.
pub fn save_history(entries: &[HistoryEntry], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)?;
    FileExt::lock_exclusive(&file)?;
    file.set_len(0)?;

    {
        let mut writer = WriterBuilder::new().from_writer(BufWriter::new(&file));
        writer.write_record(COLUMNS)?;
        for entry in entries {
            writer.write_record([
                entry.operation.clone(),
                format_number(entry.a),
                format_number(entry.b),
                format_number(entry.result),
            ])?;
        }
        writer.flush()?;
    }

    file.sync_all()?;
    FileExt::unlock(&file)?;

    info!(path = %path.display(), rows = entries.len(), "saved history");
    Ok(())
}

/// Read every row from `path`.
///
/// Fails with [`CalcError::NotFound`] when the file does not exist,
/// [`CalcError::Schema`] when a required column is missing, and
/// [`CalcError::Parse`] when a numeric field does not parse. Nothing is
/// returned unless the whole file is valid.
pub fn load_history(path: impl AsRef<Path>) -> Result<Vec<HistoryEntry>> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CalcError::NotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    FileExt::lock_shared(&file)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(&file);

    let headers = reader.headers()?.clone();
    let columns = ColumnPositions::locate(&headers)?;

    let mut entries = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        entries.push(columns.entry(&record, index + 1)?);
    }

    FileExt::unlock(&file)?;

    info!(path = %path.display(), rows = entries.len(), "loaded history");
    Ok(entries)
}

/// Index of each required column within a header row.
#[derive(Debug)]
struct ColumnPositions {
    operation: usize,
    a: usize,
    b: usize,
    result: usize,
}

impl ColumnPositions {
    fn locate(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);

        let found: Vec<Option<usize>> = COLUMNS.iter().map(|name| find(*name)).collect();
        let missing: Vec<String> = COLUMNS
            .iter()
            .zip(&found)
            .filter(|(_, pos)| pos.is_none())
            .map(|(name, _)| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(CalcError::Schema { missing });
        }

        if headers.len() > COLUMNS.len() {
            debug!(columns = headers.len(), "ignoring extra history columns");
        }

        match found.as_slice() {
            [Some(operation), Some(a), Some(b), Some(result)] => Ok(Self {
                operation: *operation,
                a: *a,
                b: *b,
                result: *result,
            }),
            _ => Err(CalcError::Malformed("unreadable header row".into())),
        }
    }

    fn entry(&self, record: &StringRecord, row: usize) -> Result<HistoryEntry> {
        Ok(HistoryEntry {
            operation: field(record, self.operation, row, "operation")?.to_string(),
            a: number(record, self.a, row, "a")?,
            b: number(record, self.b, row, "b")?,
            result: number(record, self.result, row, "result")?,
        })
    }
}

fn field<'r>(record: &'r StringRecord, index: usize, row: usize, column: &str) -> Result<&'r str> {
    record.get(index).ok_or_else(|| {
        CalcError::Malformed(format!("row {} has no '{}' field", row, column))
    })
}

fn number(record: &StringRecord, index: usize, row: usize, column: &str) -> Result<f64> {
    let text = field(record, index, row, column)?;
    text.parse::<f64>().map_err(|_| CalcError::Parse {
        row,
        column: column.to_string(),
        value: text.to_string(),
    })
}

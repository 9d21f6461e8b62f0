//! Load the logger export into a [`TimeIndexedTable`].
//!
//! Both workbook files and CSV exports go through the same row builder: the
//! readers only differ in how a cell is turned into a [`Cell`].

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use chrono::{DurationRound, NaiveDateTime, TimeDelta};
use log::{debug, info};

use super::error::{LoadError, LoadResult};
use crate::models::{Channel, Reading, TimeIndexedTable};
use crate::transformations::mask_sentinel;

/// Text format of the logger's timestamp column (`month/day/year hour:minute`).
pub const TIMESTAMP_FORMAT: &str = "%m/%d/%Y %H:%M";

/// Header of the timestamp column in CR1000 exports.
pub const DEFAULT_TIMESTAMP_COLUMN: &str = "TIMESTAMP";

/// Source file flavours, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Workbook,
    Csv,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> LoadResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Self::Workbook),
            "csv" => Ok(Self::Csv),
            other => Err(LoadError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// A cell normalized across readers.
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Empty,
    Number(f64),
    Text(String),
    DateTime(NaiveDateTime),
}

impl Cell {
    fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    fn describe(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Number(v) => v.to_string(),
            Cell::Text(s) => s.clone(),
            Cell::DateTime(dt) => dt.to_string(),
        }
    }
}

/// Load `path` and keep the timestamp column plus the given channels.
///
/// Fails on the first malformed timestamp, non-numeric measurement or missing
/// column; there is no partial result.
pub fn load_table(
    path: &Path,
    timestamp_column: &str,
    channels: &[Channel],
) -> LoadResult<TimeIndexedTable> {
    let (headers, rows) = match SourceFormat::from_path(path)? {
        SourceFormat::Workbook => read_workbook(path)?,
        SourceFormat::Csv => read_csv(path)?,
    };
    debug!("Read {} rows with header {:?} from {}", rows.len(), headers, path.display());

    let table = build_table(&headers, rows, timestamp_column, channels)?;
    if table.is_empty() {
        return Err(LoadError::Empty(path.to_path_buf()));
    }

    info!(
        "Loaded {} readings for {} channels from {}",
        table.len(),
        channels.len(),
        path.display()
    );
    Ok(table)
}

fn read_workbook(path: &Path) -> LoadResult<(Vec<String>, Vec<Vec<Cell>>)> {
    let workbook_error = |message: String| LoadError::Workbook {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::NoWorksheet(path.to_path_buf()))?
        .map_err(|e| workbook_error(e.to_string()))?;

    let mut rows = range.rows();
    let headers = rows
        .next()
        .map(|row| row.iter().map(|c| c.to_string().trim().to_string()).collect())
        .unwrap_or_default();
    let cells = rows
        .map(|row| row.iter().map(workbook_cell).collect())
        .collect();

    Ok((headers, cells))
}

fn workbook_cell(cell: &Data) -> Cell {
    match cell {
        Data::Empty => Cell::Empty,
        Data::Float(v) => Cell::Number(*v),
        Data::Int(v) => Cell::Number(*v as f64),
        Data::String(s) => Cell::Text(s.clone()),
        // Serial day fractions carry float noise below one second.
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|t| Cell::DateTime(t.duration_round(TimeDelta::seconds(1)).unwrap_or(t)))
            .unwrap_or(Cell::Number(dt.as_f64())),
        Data::DateTimeIso(s) => s
            .parse::<NaiveDateTime>()
            .map(Cell::DateTime)
            .unwrap_or_else(|_| Cell::Text(s.clone())),
        other => Cell::Text(other.to_string()),
    }
}

fn read_csv(path: &Path) -> LoadResult<(Vec<String>, Vec<Vec<Cell>>)> {
    let csv_error = |source: csv::Error| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_error)?;

    let headers = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok((headers, rows))
}

fn column_position(headers: &[String], column: &str) -> LoadResult<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| LoadError::MissingColumn {
            column: column.to_string(),
        })
}

fn build_table(
    headers: &[String],
    rows: Vec<Vec<Cell>>,
    timestamp_column: &str,
    channels: &[Channel],
) -> LoadResult<TimeIndexedTable> {
    let ts_idx = column_position(headers, timestamp_column)?;
    let channel_idx = channels
        .iter()
        .map(|c| column_position(headers, &c.column))
        .collect::<LoadResult<Vec<_>>>()?;

    let mut readings = Vec::with_capacity(rows.len());
    for (offset, row) in rows.into_iter().enumerate() {
        // Row 1 is the header.
        let row_number = offset + 2;
        if row.iter().all(Cell::is_empty) {
            continue;
        }

        let timestamp = parse_timestamp(row.get(ts_idx).unwrap_or(&Cell::Empty), row_number)?;
        let values = channels
            .iter()
            .zip(&channel_idx)
            .map(|(channel, &idx)| {
                parse_measurement(row.get(idx).unwrap_or(&Cell::Empty), row_number, channel)
            })
            .collect::<LoadResult<Vec<_>>>()?;

        readings.push(Reading::new(timestamp, values));
    }

    Ok(TimeIndexedTable::new(channels.to_vec(), readings))
}

/// Parse a timestamp cell. Text must follow [`TIMESTAMP_FORMAT`].
fn parse_timestamp(cell: &Cell, row: usize) -> LoadResult<NaiveDateTime> {
    match cell {
        Cell::DateTime(dt) => Ok(*dt),
        Cell::Text(s) => NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT).map_err(|_| {
            LoadError::InvalidTimestamp {
                row,
                value: s.clone(),
            }
        }),
        other => Err(LoadError::InvalidTimestamp {
            row,
            value: other.describe(),
        }),
    }
}

/// Parse a measurement cell, masking the sentinel.
fn parse_measurement(cell: &Cell, row: usize, channel: &Channel) -> LoadResult<Option<f64>> {
    let invalid = || LoadError::InvalidValue {
        row,
        column: channel.column.clone(),
        value: cell.describe(),
    };

    match cell {
        Cell::Empty => Ok(None),
        Cell::Number(v) => Ok(mask_sentinel(*v)),
        Cell::Text(s) if s.trim().is_empty() => Ok(None),
        Cell::Text(s) => s
            .trim()
            .parse::<f64>()
            .map(mask_sentinel)
            .map_err(|_| invalid()),
        Cell::DateTime(_) => Err(invalid()),
    }
}

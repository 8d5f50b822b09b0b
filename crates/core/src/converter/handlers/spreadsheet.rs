//! Spreadsheet handlers: JSON -> XLSX and XLSX -> CSV.

use async_trait::async_trait;
use calamine::{open_workbook, Data, DataType, Reader, Xlsx, XlsxError as ReadError};
use rust_xlsxwriter::{Format, Workbook, XlsxError as WriteError};
use serde_json::{Number, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

use super::run_blocking;
use super::table::{cell_text, Table};
use super::tabular::read_json_table;
use crate::converter::error::ConversionError;
use crate::converter::traits::Handler;
use crate::converter::types::{Category, HandlerJob};

/// Largest integer an f64 cell holds exactly.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

fn read_error(e: ReadError) -> ConversionError {
    match e {
        ReadError::Io(io) => ConversionError::Io(io),
        other => ConversionError::decode("xlsx", other),
    }
}

fn write_error(e: WriteError) -> ConversionError {
    match e {
        WriteError::IoError(io) => ConversionError::Io(io),
        other => ConversionError::conversion_failed(other.to_string(), None),
    }
}

/// Numeric cells that hold whole numbers come back as integers.
fn float_value(f: f64) -> Value {
    if f.fract() == 0.0 && f.abs() < MAX_EXACT_INT {
        Value::from(f as i64)
    } else {
        Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
    }
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) => Value::String(s.clone()),
        Data::Int(i) => Value::from(*i),
        Data::Float(f) => float_value(*f),
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(_) => match cell.as_datetime() {
            Some(dt) => Value::String(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => Value::String(cell.to_string()),
        },
        other => Value::String(other.to_string()),
    }
}

/// Reads the first worksheet; the first row is the header.
fn read_first_sheet(path: &Path) -> Result<Table, ConversionError> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(read_error)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ConversionError::conversion_failed("workbook has no worksheets", None))?
        .map_err(read_error)?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Table::default());
    };
    let columns = header
        .iter()
        .enumerate()
        .map(|(i, cell)| match cell_text(&cell_value(cell)) {
            name if name.is_empty() => format!("Unnamed: {}", i),
            name => name,
        })
        .collect();
    let rows = rows
        .map(|row| row.iter().map(cell_value).collect())
        .collect();

    Ok(Table { columns, rows })
}

fn write_workbook(table: &Table, path: &Path) -> Result<(), ConversionError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let header = Format::new().set_bold();

    for (c, name) in table.columns.iter().enumerate() {
        let col = column_index(c)?;
        worksheet
            .write_string_with_format(0, col, name, &header)
            .map_err(write_error)?;
    }

    for (r, row) in table.rows.iter().enumerate() {
        let row_index = u32::try_from(r + 1)
            .map_err(|_| ConversionError::conversion_failed("too many rows for a worksheet", None))?;
        for (c, value) in row.iter().enumerate() {
            let col = column_index(c)?;
            let written = match value {
                Value::Null => continue,
                Value::Bool(b) => worksheet.write_boolean(row_index, col, *b),
                Value::Number(n) => {
                    worksheet.write_number(row_index, col, n.as_f64().unwrap_or_default())
                }
                Value::String(s) => worksheet.write_string(row_index, col, s),
                nested => worksheet.write_string(row_index, col, nested.to_string()),
            };
            written.map_err(write_error)?;
        }
    }

    workbook.save(path).map_err(write_error)
}

fn column_index(c: usize) -> Result<u16, ConversionError> {
    u16::try_from(c)
        .map_err(|_| ConversionError::conversion_failed("too many columns for a worksheet", None))
}

/// Writes JSON records into a single-sheet workbook.
#[derive(Debug, Default, Clone)]
pub struct TabularToSpreadsheetHandler;

impl TabularToSpreadsheetHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Handler for TabularToSpreadsheetHandler {
    fn category(&self) -> Category {
        Category::TabularToSpreadsheet
    }

    async fn handle(&self, job: &HandlerJob) -> Result<(), ConversionError> {
        if job.source_ext != "json" {
            return Err(ConversionError::unsupported(job.source_ext.clone()));
        }
        if job.target_ext != "xlsx" {
            return Err(ConversionError::unsupported(job.target_ext.clone()));
        }
        let job = job.clone();
        run_blocking(move || {
            let table = read_json_table(&job.source_path)?;
            debug!("Writing {} rows to workbook", table.len());
            write_workbook(&table, &job.output_path)
        })
        .await
    }
}

/// Reads the first worksheet of a workbook into CSV.
///
/// Other worksheets are ignored.
#[derive(Debug, Default, Clone)]
pub struct SpreadsheetToTabularHandler;

impl SpreadsheetToTabularHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Handler for SpreadsheetToTabularHandler {
    fn category(&self) -> Category {
        Category::SpreadsheetToTabular
    }

    async fn handle(&self, job: &HandlerJob) -> Result<(), ConversionError> {
        if !matches!(job.source_ext.as_str(), "xlsx" | "xlsm") {
            return Err(ConversionError::unsupported(job.source_ext.clone()));
        }
        if job.target_ext != "csv" {
            return Err(ConversionError::unsupported(job.target_ext.clone()));
        }
        let job = job.clone();
        run_blocking(move || {
            let table = read_first_sheet(&job.source_path)?;
            debug!("Read {} rows from first worksheet", table.len());
            let mut writer = BufWriter::new(File::create(&job.output_path)?);
            table.write_csv(&mut writer)?;
            writer.flush()?;
            Ok(())
        })
        .await
    }
}

//! In-memory row/column table shared by the tabular handlers.

use serde_json::{Map, Number, Value};
use std::collections::HashMap;
use std::io::{Read, Write};

use crate::converter::error::ConversionError;

/// A header plus rows of JSON-typed cells.
///
/// Every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// Type chosen for a CSV column from all of its non-empty cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnType {
    Integer,
    Float,
    Boolean,
    Text,
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

fn parse_float(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|f| f.is_finite())
}

fn infer_column(cells: &[&str]) -> ColumnType {
    let filled: Vec<&str> = cells.iter().copied().filter(|c| !c.is_empty()).collect();
    if filled.is_empty() {
        ColumnType::Text
    } else if filled.iter().all(|c| c.parse::<i64>().is_ok()) {
        ColumnType::Integer
    } else if filled.iter().all(|c| parse_float(c).is_some()) {
        ColumnType::Float
    } else if filled.iter().all(|c| parse_bool(c).is_some()) {
        ColumnType::Boolean
    } else {
        ColumnType::Text
    }
}

fn typed_cell(raw: &str, column_type: ColumnType) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }
    match column_type {
        ColumnType::Integer => raw
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or_else(|_| Value::String(raw.to_string())),
        ColumnType::Float => parse_float(raw)
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(raw.to_string())),
        ColumnType::Boolean => parse_bool(raw)
            .map(Value::Bool)
            .unwrap_or_else(|| Value::String(raw.to_string())),
        ColumnType::Text => Value::String(raw.to_string()),
    }
}

/// Text form of a cell for delimited output.
pub(crate) fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        nested => nested.to_string(),
    }
}

/// Renames repeated header names to `name.1`, `name.2`, ... so every
/// column keeps its own key in record output.
fn dedupe_columns<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    let mut repeats: HashMap<String, usize> = HashMap::new();
    for header in headers {
        let mut name = header.to_string();
        if columns.contains(&name) {
            let count = repeats.entry(header.to_string()).or_insert(0);
            loop {
                *count += 1;
                name = format!("{}.{}", header, count);
                if !columns.contains(&name) {
                    break;
                }
            }
        }
        columns.push(name);
    }
    columns
}

impl Table {
    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Parses CSV with a header row, inferring each column's type.
    pub fn from_csv<R: Read>(reader: R) -> Result<Self, ConversionError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let columns = dedupe_columns(
            csv_reader
                .headers()
                .map_err(|e| ConversionError::decode("csv", e))?
                .iter(),
        );
        if columns.is_empty() {
            return Err(ConversionError::decode("csv", "missing header row"));
        }

        let mut raw_rows: Vec<Vec<String>> = Vec::new();
        for record in csv_reader.records() {
            let record = record.map_err(|e| ConversionError::decode("csv", e))?;
            if record.len() > columns.len() {
                return Err(ConversionError::decode(
                    "csv",
                    format!(
                        "row {} has {} fields, header has {}",
                        raw_rows.len() + 1,
                        record.len(),
                        columns.len()
                    ),
                ));
            }
            let mut row: Vec<String> = record.iter().map(|f| f.to_string()).collect();
            row.resize(columns.len(), String::new());
            raw_rows.push(row);
        }

        let column_types: Vec<ColumnType> = (0..columns.len())
            .map(|i| {
                let cells: Vec<&str> = raw_rows.iter().map(|r| r[i].as_str()).collect();
                infer_column(&cells)
            })
            .collect();

        let rows = raw_rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&column_types)
                    .map(|(raw, ty)| typed_cell(raw, *ty))
                    .collect()
            })
            .collect();

        Ok(Self { columns, rows })
    }

    /// Parses JSON records or a column-oriented object.
    ///
    /// Accepted shapes:
    /// - `[{"a": 1, "b": 2}, ...]`, columns are the union of keys in first-seen order
    /// - `{"a": [1, ...], "b": [2, ...]}`
    /// - `{"a": {"0": 1, ...}, "b": {"0": 2, ...}}`
    pub fn from_json(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Array(items) => Self::from_records(items),
            Value::Object(columns) => Self::from_columns(columns),
            other => Err(ConversionError::decode(
                "json",
                format!("expected an array of records or an object of columns, got {}", kind_of(&other)),
            )),
        }
    }

    fn from_records(items: Vec<Value>) -> Result<Self, ConversionError> {
        let mut columns: Vec<String> = Vec::new();
        let mut records = Vec::with_capacity(items.len());
        for (i, item) in items.into_iter().enumerate() {
            let record = match item {
                Value::Object(record) => record,
                other => {
                    return Err(ConversionError::decode(
                        "json",
                        format!("record {} is {}, expected an object", i, kind_of(&other)),
                    ))
                }
            };
            for key in record.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
            records.push(record);
        }

        let rows = records
            .into_iter()
            .map(|mut record| {
                columns
                    .iter()
                    .map(|c| record.remove(c).unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Ok(Self { columns, rows })
    }

    fn from_columns(object: Map<String, Value>) -> Result<Self, ConversionError> {
        let mut columns = Vec::with_capacity(object.len());
        let mut row_keys: Vec<String> = Vec::new();
        let mut cells: Vec<Map<String, Value>> = Vec::with_capacity(object.len());

        for (name, column) in object {
            let by_row = match column {
                Value::Array(values) => values
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), v))
                    .collect::<Map<String, Value>>(),
                Value::Object(map) => map,
                other => {
                    return Err(ConversionError::decode(
                        "json",
                        format!("column {:?} is {}, expected an array or object", name, kind_of(&other)),
                    ))
                }
            };
            for key in by_row.keys() {
                if !row_keys.iter().any(|k| k == key) {
                    row_keys.push(key.clone());
                }
            }
            columns.push(name);
            cells.push(by_row);
        }

        let rows = row_keys
            .iter()
            .map(|key| {
                cells
                    .iter_mut()
                    .map(|column| column.remove(key).unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Ok(Self { columns, rows })
    }

    /// Writes the header and rows as CSV.
    pub fn write_csv<W: Write>(&self, mut writer: W) -> Result<(), ConversionError> {
        // A record with no fields would be written as `""`.
        if self.columns.is_empty() {
            for _ in 0..=self.rows.len() {
                writer.write_all(b"\n")?;
            }
            writer.flush()?;
            return Ok(());
        }
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(&self.columns).map_err(csv_write_error)?;
        for row in &self.rows {
            csv_writer
                .write_record(row.iter().map(cell_text))
                .map_err(csv_write_error)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Returns the rows as JSON objects keyed by column, in column order.
    pub fn to_records(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let record: Map<String, Value> = self
                    .columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect();
                Value::Object(record)
            })
            .collect()
    }

    /// Writes the rows as a 4-space indented JSON array of records.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<(), ConversionError> {
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
        serde::Serialize::serialize(&self.to_records(), &mut serializer)
            .map_err(|e| ConversionError::conversion_failed(e.to_string(), None))
    }
}

fn csv_write_error(e: csv::Error) -> ConversionError {
    if e.is_io_error() {
        match e.into_kind() {
            csv::ErrorKind::Io(io) => ConversionError::Io(io),
            other => ConversionError::conversion_failed(format!("{:?}", other), None),
        }
    } else {
        ConversionError::conversion_failed(e.to_string(), None)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

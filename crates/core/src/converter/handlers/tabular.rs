//! CSV <-> JSON records handler.

use async_trait::async_trait;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

use super::run_blocking;
use super::table::Table;
use crate::converter::error::ConversionError;
use crate::converter::traits::Handler;
use crate::converter::types::{Category, HandlerJob};

/// Converts between delimited text and a JSON array of records.
#[derive(Debug, Default, Clone)]
pub struct TabularInterchangeHandler;

impl TabularInterchangeHandler {
    pub fn new() -> Self {
        Self
    }
}

/// Reads a JSON document into a table.
pub(crate) fn read_json_table(path: &Path) -> Result<Table, ConversionError> {
    let reader = BufReader::new(File::open(path)?);
    let value: serde_json::Value = serde_json::from_reader(reader).map_err(|e| {
        if e.is_io() {
            ConversionError::Io(e.into())
        } else {
            ConversionError::decode("json", e)
        }
    })?;
    Table::from_json(value)
}

fn convert_tabular(
    source: &Path,
    output: &Path,
    source_ext: &str,
    target_ext: &str,
) -> Result<(), ConversionError> {
    if !matches!(target_ext, "csv" | "json") {
        return Err(ConversionError::unsupported(target_ext));
    }
    let table = match source_ext {
        "csv" => Table::from_csv(BufReader::new(File::open(source)?))?,
        "json" => read_json_table(source)?,
        other => return Err(ConversionError::unsupported(other)),
    };
    debug!(
        "Read {} rows x {} columns from {}",
        table.len(),
        table.columns.len(),
        source_ext
    );

    let mut writer = BufWriter::new(File::create(output)?);
    match target_ext {
        "csv" => table.write_csv(&mut writer)?,
        "json" => table.write_json(&mut writer)?,
        other => return Err(ConversionError::unsupported(other)),
    }
    writer.flush()?;
    Ok(())
}

#[async_trait]
impl Handler for TabularInterchangeHandler {
    fn category(&self) -> Category {
        Category::TabularInterchange
    }

    async fn handle(&self, job: &HandlerJob) -> Result<(), ConversionError> {
        let job = job.clone();
        run_blocking(move || {
            convert_tabular(
                &job.source_path,
                &job.output_path,
                &job.source_ext,
                &job.target_ext,
            )
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn job(dir: &TempDir, source: &str, output: &str) -> HandlerJob {
        let ext = |name: &str| name.rsplit('.').next().unwrap().to_string();
        HandlerJob {
            source_path: dir.path().join(source),
            output_path: dir.path().join(output),
            source_ext: ext(source),
            target_ext: ext(output),
        }
    }

    #[tokio::test]
    async fn test_csv_to_json_records() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.csv"), "name,age\nAnn,30\n").unwrap();

        let job = job(&dir, "a.csv", "a_converted.json");
        TabularInterchangeHandler::new().handle(&job).await.unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&job.output_path).unwrap()).unwrap();
        assert_eq!(written, json!([{"name": "Ann", "age": 30}]));
    }

    #[tokio::test]
    async fn test_json_to_csv() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("people.json"),
            r#"[{"name": "Ann", "age": 30}, {"name": "Bob, Jr.", "age": null}]"#,
        )
        .unwrap();

        let job = job(&dir, "people.json", "people_converted.csv");
        TabularInterchangeHandler::new().handle(&job).await.unwrap();

        let text = std::fs::read_to_string(&job.output_path).unwrap();
        assert_eq!(text, "name,age\nAnn,30\n\"Bob, Jr.\",\n");
    }

    #[tokio::test]
    async fn test_malformed_json_is_decode_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("bad.json"), "[{\"a\": 1,").unwrap();

        let job = job(&dir, "bad.json", "bad_converted.csv");
        let err = TabularInterchangeHandler::new().handle(&job).await.unwrap_err();
        assert!(matches!(err, ConversionError::DecodeError { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn test_missing_source_is_io_error() {
        let dir = TempDir::new().unwrap();
        let job = job(&dir, "gone.csv", "gone_converted.json");
        let err = TabularInterchangeHandler::new().handle(&job).await.unwrap_err();
        assert!(matches!(err, ConversionError::Io(_)));
    }
}

// Loads an input table from disk, choosing the reader by file extension
use super::csv_parser::StatementCsvParser;
use super::json_parser::StatementJsonParser;
use crate::config::CsvSettings;
use crate::error::EngineError;
use shared::InputTable;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self, EngineError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "csv" | "txt" => Ok(InputFormat::Csv),
            "json" => Ok(InputFormat::Json),
            _ => Err(EngineError::CsvDataFormatError(format!(
                "Unsupported input file '{}': expected .csv or .json",
                path.display()
            ))),
        }
    }
}

pub fn load_input(
    path: impl AsRef<Path>,
    settings: &CsvSettings,
) -> Result<InputTable, EngineError> {
    let path = path.as_ref();
    match InputFormat::from_path(path)? {
        InputFormat::Csv => {
            StatementCsvParser::load_table_from_csv(&path.to_string_lossy(), settings)
        }
        InputFormat::Json => {
            let file = File::open(path)?;
            StatementJsonParser::load_table_from_reader(BufReader::new(file), settings)
        }
    }
}

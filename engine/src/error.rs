use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Required columns are missing: {}", .missing.join(", "))]
    SchemaViolation { missing: Vec<String> },

    #[error("Duplicate fiscal year label: {0}")]
    DuplicateYear(String),

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("JSON error: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },

    #[error("CSV data format error: {0}")]
    CsvDataFormatError(String),

    #[error("JSON data format error: {0}")]
    JsonDataFormatError(String),

    #[error("Unknown stage: {0}")]
    UnknownStage(String),

    // Wraps contextual errors raised with anyhow inside the parser.
    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl EngineError {
    /// True for errors that mean the input table itself is unusable, as
    /// opposed to failures reaching it.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            EngineError::SchemaViolation { .. }
                | EngineError::DuplicateYear(_)
                | EngineError::CsvDataFormatError(_)
                | EngineError::JsonDataFormatError(_)
                | EngineError::JsonError { .. }
                | EngineError::CsvSystemError { .. }
        )
    }
}

// Engine settings, loaded from the embedded default.json or a JSON file
use crate::error::EngineError;
use serde::Deserialize;
use shared::utils::number_format::NumberFormat;
use std::path::Path;

const DEFAULT_CONFIG: &str = include_str!("default.json");

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct EngineSettings {
    pub log_level: String,
    pub cache_enabled: bool,
    pub csv: CsvSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvSettings {
    pub delimiter: String,         // Single ASCII character
    pub decimal_separator: String, // Single character
    #[serde(default)]
    pub thousand_separator: String, // Empty disables digit grouping
}

impl Default for EngineSettings {
    fn default() -> Self {
        // The embedded file is covered by test_default_matches_embedded_file.
        EngineSettings {
            log_level: "info".to_string(),
            cache_enabled: true,
            csv: CsvSettings::default(),
        }
    }
}

impl Default for CsvSettings {
    fn default() -> Self {
        CsvSettings {
            delimiter: ",".to_string(),
            decimal_separator: ".".to_string(),
            thousand_separator: ",".to_string(),
        }
    }
}

impl EngineSettings {
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        let settings: EngineSettings = serde_json::from_str(json)
            .map_err(|e| EngineError::ConfigError(format!("Invalid settings JSON: {}", e)))?;
        settings.csv.validate()?;
        Ok(settings)
    }

    pub fn load_default() -> Result<Self, EngineError> {
        Self::from_json_str(DEFAULT_CONFIG)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            EngineError::ConfigError(format!(
                "Failed to read settings file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&json)
    }
}

impl CsvSettings {
    pub fn validate(&self) -> Result<(), EngineError> {
        self.delimiter_byte()?;
        self.number_format()?;
        Ok(())
    }

    pub fn delimiter_byte(&self) -> Result<u8, EngineError> {
        match self.delimiter.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(EngineError::ConfigError(format!(
                "CSV delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            ))),
        }
    }

    pub fn number_format(&self) -> Result<NumberFormat, EngineError> {
        let decimal_separator = single_char(&self.decimal_separator).ok_or_else(|| {
            EngineError::ConfigError(format!(
                "Decimal separator must be a single character, got '{}'",
                self.decimal_separator
            ))
        })?;
        let thousand_separator = if self.thousand_separator.is_empty() {
            None
        } else {
            Some(single_char(&self.thousand_separator).ok_or_else(|| {
                EngineError::ConfigError(format!(
                    "Thousand separator must be a single character, got '{}'",
                    self.thousand_separator
                ))
            })?)
        };
        if Some(decimal_separator) == thousand_separator {
            return Err(EngineError::ConfigError(
                "Decimal and thousand separators must differ".to_string(),
            ));
        }
        Ok(NumberFormat {
            decimal_separator,
            thousand_separator,
        })
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

use crate::config::CsvSettings;
use crate::error::EngineError;
use serde_json::{Map, Value};
use shared::columns;
use shared::utils::number_format::{coerce_numeric, NumberFormat};
use shared::{FiscalYearRow, InputTable};
use std::io::Read;

pub struct StatementJsonParser;

impl StatementJsonParser {
    // JSON array of records: [{"year": 2023, "revenue": "1,250,000", "inventory": null, ...}]
    // Keys accept the same captions as CSV headers; cells are coerced like CSV cells.
    pub fn load_table_from_reader<R: Read>(
        reader: R,
        settings: &CsvSettings,
    ) -> Result<InputTable, EngineError> {
        let format = settings.number_format()?;
        let records: Vec<Map<String, Value>> = serde_json::from_reader(reader)?;

        let mut table = InputTable::new();
        for (idx, record) in records.into_iter().enumerate() {
            table.push_row(parse_record(record, idx + 1, &format)?);
        }

        tracing::debug!(
            rows = table.len(),
            columns = table.columns().len(),
            "Parsed statement JSON"
        );
        Ok(table)
    }
}

fn parse_record(
    record: Map<String, Value>,
    position: usize,
    format: &NumberFormat,
) -> Result<FiscalYearRow, EngineError> {
    let mut year = None;
    let mut items: Vec<(String, f64)> = Vec::new();

    for (key, value) in record {
        let name = match columns::canonical_name(&key) {
            Some(canonical) => canonical.to_string(),
            None => key,
        };
        if name == columns::YEAR {
            year = year_label(&value);
        } else {
            items.push((name, coerce_cell(&value, format)));
        }
    }

    let year = year.ok_or_else(|| {
        EngineError::JsonDataFormatError(format!("Missing year label in record {}", position))
    })?;
    Ok(items
        .into_iter()
        .fold(FiscalYearRow::new(year), |row, (name, value)| row.with(&name, value)))
}

// Year labels are opaque; a numeric label keeps its JSON spelling.
fn year_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn coerce_cell(value: &Value, format: &NumberFormat) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => coerce_numeric(s, format),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<InputTable, EngineError> {
        StatementJsonParser::load_table_from_reader(json.as_bytes(), &CsvSettings::default())
    }

    #[test]
    fn test_null_and_non_numeric_cells_read_zero() {
        let table = parse(
            r#"[{"year":"2023","revenue":null,"inventory":true,"headcount":"n/a","rent":[1]}]"#,
        )
        .unwrap();
        assert_eq!(table.column("revenue"), Some(vec![0.0]));
        assert_eq!(table.column("inventory"), Some(vec![0.0]));
        assert_eq!(table.column("headcount"), Some(vec![0.0]));
        assert_eq!(table.column("rent"), Some(vec![0.0]));
    }

    #[test]
    fn test_string_cells_use_number_format() {
        let table = parse(r#"[{"year":"2023","revenue":"1,000","inventory":"△250"}]"#).unwrap();
        assert_eq!(table.column("revenue"), Some(vec![1000.0]));
        assert_eq!(table.column("inventory"), Some(vec![-250.0]));
    }

    #[test]
    fn test_comma_decimal_settings_apply_to_string_cells() {
        let settings = CsvSettings {
            delimiter: ";".to_string(),
            decimal_separator: ",".to_string(),
            thousand_separator: ".".to_string(),
        };
        let json = r#"[{"year":"2023","revenue":"1.234,5"}]"#;
        let table =
            StatementJsonParser::load_table_from_reader(json.as_bytes(), &settings).unwrap();
        assert_eq!(table.column("revenue"), Some(vec![1234.5]));
    }

    #[test]
    fn test_numeric_year_label_is_kept_as_text() {
        let table = parse(r#"[{"year":2022,"revenue":1},{"年度":2023,"売上高":2}]"#).unwrap();
        assert_eq!(table.years(), vec!["2022", "2023"]);
        assert_eq!(table.column("revenue"), Some(vec![1.0, 2.0]));
    }

    #[test]
    fn test_missing_year_label_is_rejected() {
        let err = parse(r#"[{"year":"2022"},{"year":null,"revenue":1}]"#).unwrap_err();
        assert!(matches!(err, EngineError::JsonDataFormatError(_)));
        assert!(err.to_string().contains("record 2"));
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        assert!(matches!(parse("{not json"), Err(EngineError::JsonError { .. })));
        assert!(matches!(parse(r#"{"year":"2023"}"#), Err(EngineError::JsonError { .. })));
    }
}

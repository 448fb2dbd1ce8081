use crate::config::CsvSettings;
use crate::error::EngineError;
use anyhow::anyhow;
use csv::{ReaderBuilder, StringRecord};
use shared::columns;
use shared::utils::number_format::{coerce_numeric, NumberFormat};
use shared::{FiscalYearRow, InputTable};
use std::fs::File;
use std::io::{BufReader, Read};

pub struct StatementCsvParser;

impl StatementCsvParser {
    // CSV Header: year,revenue,material_cost,... (or the workbook captions: 年度,売上高,材料費,...)
    // Example Row: 2023,"1,250,000",480000,...
    pub fn load_table_from_csv(
        file_path: &str,
        settings: &CsvSettings,
    ) -> Result<InputTable, EngineError> {
        let file = File::open(file_path)
            .map_err(|e| anyhow!("Failed to open CSV file '{}': {}", file_path, e))?;
        Self::load_table_from_reader(BufReader::new(file), settings)
    }

    pub fn load_table_from_reader<R: Read>(
        reader: R,
        settings: &CsvSettings,
    ) -> Result<InputTable, EngineError> {
        let format = settings.number_format()?;
        let mut rdr = ReaderBuilder::new()
            .delimiter(settings.delimiter_byte()?)
            .has_headers(true)
            .flexible(true) // Short rows read the missing trailing cells as zero
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let layout = HeaderLayout::from_headers(&headers)?;
        let mut table = InputTable::with_columns(layout.items.iter().map(|(_, name)| name.clone()));

        for (idx, result) in rdr.records().enumerate() {
            let line = idx + 2;
            let record = result
                .map_err(|e| anyhow!("Error reading CSV record at line {}: {}", line, e))?;
            if record.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            table.push_row(layout.parse_row(&record, line, &format)?);
        }

        tracing::debug!(
            rows = table.len(),
            columns = table.columns().len(),
            "Parsed statement CSV"
        );
        Ok(table)
    }
}

// Positions of the year key and of every line-item column in the header row.
struct HeaderLayout {
    year: usize,
    items: Vec<(usize, String)>,
}

impl HeaderLayout {
    fn from_headers(headers: &StringRecord) -> Result<Self, EngineError> {
        let mut year = None;
        let mut items: Vec<(usize, String)> = Vec::new();

        for (pos, raw) in headers.iter().enumerate() {
            let raw = raw.trim_start_matches('\u{feff}').trim();
            if raw.is_empty() {
                continue;
            }
            let name = match columns::canonical_name(raw) {
                Some(canonical) => canonical.to_string(),
                None => {
                    tracing::debug!(header = raw, "Keeping unrecognised CSV column as-is");
                    raw.to_string()
                }
            };
            if name == columns::YEAR {
                if year.replace(pos).is_some() {
                    return Err(EngineError::CsvDataFormatError(
                        "Duplicate 'year' column".to_string(),
                    ));
                }
                continue;
            }
            if items.iter().any(|(_, existing)| *existing == name) {
                return Err(EngineError::CsvDataFormatError(format!("Duplicate column '{}'", name)));
            }
            items.push((pos, name));
        }

        let year = year
            .ok_or_else(|| EngineError::CsvDataFormatError("Missing 'year' column".to_string()))?;
        Ok(HeaderLayout { year, items })
    }

    fn parse_row(
        &self,
        record: &StringRecord,
        line: usize,
        format: &NumberFormat,
    ) -> Result<FiscalYearRow, EngineError> {
        let year = record.get(self.year).map(str::trim).unwrap_or_default();
        if year.is_empty() {
            return Err(EngineError::CsvDataFormatError(format!(
                "Empty year label at line {}",
                line
            )));
        }

        let mut row = FiscalYearRow::new(year);
        for (pos, name) in &self.items {
            let cell = record.get(*pos).unwrap_or_default();
            row.items.insert(name.clone(), coerce_numeric(cell, format));
        }
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file
    }

    fn parse(content: &str) -> Result<InputTable, EngineError> {
        StatementCsvParser::load_table_from_reader(content.as_bytes(), &CsvSettings::default())
    }

    #[test]
    fn test_load_table_from_csv_valid_data() {
        let csv_content = "\
year,revenue,material_cost,headcount
2022,\"1,000\",600,10
2023,1100,650,11";
        let tmp_file = create_test_csv(csv_content);
        let path = tmp_file.path().to_str().unwrap();
        let table = StatementCsvParser::load_table_from_csv(path, &CsvSettings::default()).unwrap();

        assert_eq!(table.years(), vec!["2022", "2023"]);
        assert_eq!(table.column("revenue"), Some(vec![1000.0, 1100.0]));
        assert_eq!(table.column("material_cost"), Some(vec![600.0, 650.0]));
        assert_eq!(table.column("headcount"), Some(vec![10.0, 11.0]));
    }

    #[test]
    fn test_caption_headers_map_to_canonical_names() {
        let table = parse("年度,売上高,棚卸資産,減価償却費_販管\nR5,500,△20,3").unwrap();
        assert_eq!(table.years(), vec!["R5"]);
        assert_eq!(table.column("revenue"), Some(vec![500.0]));
        assert_eq!(table.column("inventory"), Some(vec![-20.0]));
        assert_eq!(table.column("depreciation_sga"), Some(vec![3.0]));
    }

    #[test]
    fn test_unparseable_and_short_cells_become_zero() {
        let table = parse("year,revenue,rent,advertising\n2023,n/a,-\n2024,,5,7").unwrap();
        assert_eq!(table.column("revenue"), Some(vec![0.0, 0.0]));
        assert_eq!(table.column("rent"), Some(vec![0.0, 5.0]));
        assert_eq!(table.column("advertising"), Some(vec![0.0, 7.0]));
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let table = parse("year,revenue\n2022,1\n,\n2023,2").unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_unknown_headers_are_kept() {
        let table = parse("year,revenue,goodwill\n2023,1,2").unwrap();
        assert_eq!(table.column("goodwill"), Some(vec![2.0]));
    }

    #[test]
    fn test_load_table_from_csv_missing_year_column() {
        let err = parse("revenue,headcount\n100,2").unwrap_err();
        assert!(matches!(err, EngineError::CsvDataFormatError(_)));
        assert!(err.to_string().contains("Missing 'year' column"));
    }

    #[test]
    fn test_duplicate_column_after_alias_resolution() {
        let err = parse("year,revenue,売上高\n2023,1,1").unwrap_err();
        assert!(err.to_string().contains("Duplicate column 'revenue'"));
    }

    #[test]
    fn test_empty_year_label_is_rejected() {
        let err = parse("year,revenue\n,100").unwrap_err();
        assert!(err.to_string().contains("Empty year label at line 2"));
    }

    #[test]
    fn test_semicolon_delimited_with_comma_decimals() {
        let settings = CsvSettings {
            delimiter: ";".to_string(),
            decimal_separator: ",".to_string(),
            thousand_separator: ".".to_string(),
        };
        let csv = "year;revenue\n2023;1.234,5";
        let table = StatementCsvParser::load_table_from_reader(csv.as_bytes(), &settings).unwrap();
        assert_eq!(table.column("revenue"), Some(vec![1234.5]));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let path = "/nonexistent/statements.csv";
        let err =
            StatementCsvParser::load_table_from_csv(path, &CsvSettings::default()).unwrap_err();
        assert!(err.to_string().contains("Failed to open CSV file"));
    }
}

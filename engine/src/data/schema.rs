// Input validation performed before a table reaches the calculation stages
use crate::error::EngineError;
use shared::columns;
use shared::InputTable;

/// Fails with the sorted list of required line items the table lacks.
pub fn validate_required_columns(table: &InputTable) -> Result<(), EngineError> {
    let required = columns::all_required_columns();
    let mut missing: Vec<String> = table
        .missing_columns(&required)
        .into_iter()
        .map(str::to_string)
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    missing.sort();
    Err(EngineError::SchemaViolation { missing })
}

/// Year labels are the table key and must be unique.
pub fn validate_year_labels(table: &InputTable) -> Result<(), EngineError> {
    let years = table.years();
    for (i, year) in years.iter().enumerate() {
        if years[..i].contains(year) {
            return Err(EngineError::DuplicateYear(year.clone()));
        }
    }
    Ok(())
}

pub fn validate(table: &InputTable) -> Result<(), EngineError> {
    validate_required_columns(table)?;
    validate_year_labels(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::FiscalYearRow;

    fn complete_row(year: &str) -> FiscalYearRow {
        columns::all_required_columns()
            .into_iter()
            .fold(FiscalYearRow::new(year), |row, name| row.with(name, 1.0))
    }

    #[test]
    fn test_complete_table_passes() {
        let table = InputTable::from_rows(vec![complete_row("2022"), complete_row("2023")]);
        assert!(validate(&table).is_ok());
    }

    #[test]
    fn test_missing_columns_are_listed_sorted() {
        let mut row = complete_row("2023");
        row.items.remove("revenue");
        row.items.remove("headcount");
        let err = validate(&InputTable::from_rows(vec![row])).unwrap_err();
        match err {
            EngineError::SchemaViolation { missing } => {
                assert_eq!(missing, vec!["headcount", "revenue"])
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_year_is_rejected() {
        let table = InputTable::from_rows(vec![complete_row("2023"), complete_row("2023")]);
        assert!(matches!(validate(&table), Err(EngineError::DuplicateYear(y)) if y == "2023"));
    }

    #[test]
    fn test_empty_table_with_full_schema_passes() {
        let table = InputTable::with_columns(columns::all_required_columns());
        assert!(validate(&table).is_ok());
    }
}

// Borrowing dependency: interest-bearing debt as a share of total assets
use super::aggregator::safe_sum;
use super::{new_table, AggregatedTable, RatioStage, StageKind};
use shared::columns;
use shared::utils::percent_series;
use shared::DerivedTable;

pub struct Other;

impl RatioStage for Other {
    fn kind(&self) -> StageKind {
        StageKind::Other
    }

    fn columns(&self) -> &'static [&'static str] {
        &["borrowing_dependency"]
    }

    fn calculate(&self, data: &AggregatedTable) -> DerivedTable {
        let mut diagnostics = Vec::new();
        let borrowings =
            safe_sum(data.input(), &columns::BORROWINGS).collect_into(&mut diagnostics);
        let dependency = percent_series(&borrowings, &data.total_assets());

        new_table(self, data)
            .with_column("borrowing_dependency", dependency)
            .with_diagnostics(diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::aggregate;
    use crate::stages::test_support::{assert_f64_vec_eq, two_year_table};
    use shared::{Diagnostic, FiscalYearRow, InputTable};

    #[test]
    fn test_borrowing_dependency() {
        let out = Other.calculate(&aggregate(&two_year_table()));
        assert_f64_vec_eq(
            out.column("borrowing_dependency").unwrap(),
            &[0.0, 50.0 / 920.0 * 100.0],
        );
        assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn test_missing_borrowing_columns_are_reported() {
        let table = InputTable::from_rows(vec![FiscalYearRow::new("2023")
            .with("cash_and_deposits", 400.0)
            .with("short_term_borrowings", 100.0)]);
        let out = Other.calculate(&aggregate(&table));
        assert_f64_vec_eq(out.column("borrowing_dependency").unwrap(), &[25.0]);
        assert_eq!(
            out.diagnostics,
            vec![Diagnostic::MissingColumns {
                group: "borrowings".to_string(),
                columns: vec!["long_term_borrowings".to_string(), "bonds_payable".to_string()],
            }]
        );
    }

    #[test]
    fn test_no_assets_is_undefined() {
        let row = FiscalYearRow::new("2023").with("long_term_borrowings", 10.0);
        let table = InputTable::from_rows(vec![row]);
        let out = Other.calculate(&aggregate(&table));
        assert!(out.value("borrowing_dependency", 0).unwrap().is_nan());
    }
}

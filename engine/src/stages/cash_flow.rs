//! Indirect cash-flow estimate from consecutive balance sheets.
//!
//! Investing, financing and net cash change are first differences, so their
//! first row is 0. Figures stay in input units.

use super::aggregator::safe_sum;
use super::{new_table, AggregatedTable, RatioStage, StageKind};
use shared::columns;
use shared::utils::{add_series, first_difference};
use shared::DerivedTable;

pub struct CashFlow;

impl RatioStage for CashFlow {
    fn kind(&self) -> StageKind {
        StageKind::CashFlow
    }

    fn columns(&self) -> &'static [&'static str] {
        &["operating_cf", "investing_cf", "financing_cf", "net_cash_change"]
    }

    fn calculate(&self, data: &AggregatedTable) -> DerivedTable {
        let mut diagnostics = Vec::new();
        let fixed_gross =
            safe_sum(data.input(), &columns::FIXED_ASSETS).collect_into(&mut diagnostics);
        let borrowings =
            safe_sum(data.input(), &columns::BORROWINGS).collect_into(&mut diagnostics);

        let add_backs = add_series(
            &data.item(columns::DEPRECIATION),
            &data.item(columns::DEPRECIATION_SGA),
        );
        let operating = add_series(&data.net_income, &add_backs);
        // Outflow when fixed assets grow.
        let fixed_outflow: Vec<f64> = fixed_gross.iter().map(|v| -v).collect();

        let cash = data.item(columns::CASH_AND_DEPOSITS);

        new_table(self, data)
            .with_column("operating_cf", operating)
            .with_column("investing_cf", first_difference(&fixed_outflow))
            .with_column("financing_cf", first_difference(&borrowings))
            .with_column("net_cash_change", first_difference(&cash))
            .with_diagnostics(diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::aggregate;
    use crate::stages::test_support::{assert_f64_vec_eq, two_year_table, zero_row};
    use shared::InputTable;

    #[test]
    fn test_cash_flow_worked_example() {
        let out = CashFlow.calculate(&aggregate(&two_year_table()));
        assert_f64_vec_eq(out.column("operating_cf").unwrap(), &[200.0, 240.0]);
        assert_f64_vec_eq(out.column("investing_cf").unwrap(), &[0.0, -20.0]);
        assert_f64_vec_eq(out.column("financing_cf").unwrap(), &[0.0, 50.0]);
        assert_f64_vec_eq(out.column("net_cash_change").unwrap(), &[0.0, 60.0]);
    }

    #[test]
    fn test_depreciation_is_added_back() {
        let table = InputTable::from_rows(vec![zero_row("2023")
            .with("revenue", 1000.0)
            .with("depreciation", 30.0)
            .with("depreciation_sga", 20.0)
            .with("rent", 100.0)]);
        let out = CashFlow.calculate(&aggregate(&table));
        // Net income 1000 - 30 - 120 = 850, plus 50 of depreciation.
        assert_eq!(out.value("operating_cf", 0), Some(900.0));
    }

    #[test]
    fn test_first_row_deltas_are_zero() {
        let table = InputTable::from_rows(vec![zero_row("2023")
            .with("land", 5000.0)
            .with("bonds_payable", 900.0)
            .with("cash_and_deposits", 70.0)]);
        let out = CashFlow.calculate(&aggregate(&table));
        assert_eq!(out.value("investing_cf", 0), Some(0.0));
        assert_eq!(out.value("financing_cf", 0), Some(0.0));
        assert_eq!(out.value("net_cash_change", 0), Some(0.0));
    }

    #[test]
    fn test_investing_uses_gross_fixed_assets() {
        // Accumulated depreciation does not move investing cash flow.
        let table = InputTable::from_rows(vec![
            zero_row("2022")
                .with("machinery_and_equipment", 100.0)
                .with("accumulated_depreciation", 10.0),
            zero_row("2023")
                .with("machinery_and_equipment", 140.0)
                .with("accumulated_depreciation", 30.0),
        ]);
        let out = CashFlow.calculate(&aggregate(&table));
        assert_f64_vec_eq(out.column("investing_cf").unwrap(), &[0.0, -40.0]);
    }
}

// Asset turnover (times per year) and working-capital periods (days)
use super::{new_table, AggregatedTable, RatioStage, StageKind};
use shared::columns;
use shared::utils::{ratio, ratio_series};
use shared::DerivedTable;

const DAYS_PER_YEAR: f64 = 365.0;

pub struct Turnover;

fn days(balance: &[f64], flow: &[f64]) -> Vec<f64> {
    balance
        .iter()
        .zip(flow)
        .map(|(b, f)| ratio(*b, *f) * DAYS_PER_YEAR)
        .collect()
}

impl RatioStage for Turnover {
    fn kind(&self) -> StageKind {
        StageKind::Turnover
    }

    fn columns(&self) -> &'static [&'static str] {
        &[
            "total_asset_turnover",
            "fixed_asset_turnover",
            "receivables_days",
            "inventory_days",
            "payables_days",
        ]
    }

    fn calculate(&self, data: &AggregatedTable) -> DerivedTable {
        let revenue = data.revenue();

        new_table(self, data)
            .with_column("total_asset_turnover", ratio_series(&revenue, &data.total_assets()))
            .with_column("fixed_asset_turnover", ratio_series(&revenue, &data.fixed_assets))
            .with_column("receivables_days", days(&data.item(columns::RECEIVABLES), &revenue))
            .with_column("inventory_days", days(&data.item(columns::INVENTORY), &data.cogs))
            .with_column("payables_days", days(&data.item(columns::PAYABLES), &data.cogs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::aggregate;
    use crate::stages::test_support::{assert_f64_vec_eq, two_year_table, zero_row};
    use shared::InputTable;

    #[test]
    fn test_turnover_worked_example() {
        let out = Turnover.calculate(&aggregate(&two_year_table()));
        assert_f64_vec_eq(out.column("total_asset_turnover").unwrap(), &[1.25, 1100.0 / 920.0]);
        assert_f64_vec_eq(
            out.column("fixed_asset_turnover").unwrap(),
            &[1000.0 / 300.0, 1100.0 / 320.0],
        );
        assert_f64_vec_eq(out.column("receivables_days").unwrap(), &[73.0, 220.0 / 1100.0 * 365.0]);
        assert_f64_vec_eq(
            out.column("inventory_days").unwrap(),
            &[100.0 / 600.0 * 365.0, 120.0 / 650.0 * 365.0],
        );
        assert_f64_vec_eq(
            out.column("payables_days").unwrap(),
            &[100.0 / 600.0 * 365.0, 110.0 / 650.0 * 365.0],
        );
    }

    #[test]
    fn test_zero_denominators_are_undefined() {
        let table = InputTable::from_rows(vec![zero_row("2023")
            .with("inventory", 50.0)
            .with("notes_and_accounts_receivable", 20.0)]);
        let out = Turnover.calculate(&aggregate(&table));
        // Current assets exist, so total assets are non-zero; revenue is zero.
        assert_eq!(out.value("total_asset_turnover", 0), Some(0.0));
        for name in [
            "fixed_asset_turnover",
            "receivables_days",
            "inventory_days",
            "payables_days",
        ] {
            assert!(out.value(name, 0).unwrap().is_nan(), "{} should be undefined", name);
        }
    }
}

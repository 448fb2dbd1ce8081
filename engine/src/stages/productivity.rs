// Per-employee revenue and net income
use super::{new_table, AggregatedTable, RatioStage, StageKind};
use shared::utils::ratio_series;
use shared::DerivedTable;

pub struct Productivity;

impl RatioStage for Productivity {
    fn kind(&self) -> StageKind {
        StageKind::Productivity
    }

    fn columns(&self) -> &'static [&'static str] {
        &["revenue_per_head", "net_income_per_head"]
    }

    fn calculate(&self, data: &AggregatedTable) -> DerivedTable {
        let headcount = data.headcount();
        new_table(self, data)
            .with_column("revenue_per_head", ratio_series(&data.revenue(), &headcount))
            .with_column("net_income_per_head", ratio_series(&data.net_income, &headcount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::aggregate;
    use crate::stages::test_support::{assert_f64_vec_eq, two_year_table, zero_row};
    use shared::InputTable;

    #[test]
    fn test_per_head_values() {
        let out = Productivity.calculate(&aggregate(&two_year_table()));
        assert_f64_vec_eq(out.column("revenue_per_head").unwrap(), &[100.0, 100.0]);
        assert_f64_vec_eq(out.column("net_income_per_head").unwrap(), &[20.0, 240.0 / 11.0]);
    }

    #[test]
    fn test_zero_headcount_is_undefined() {
        let table = InputTable::from_rows(vec![zero_row("2023").with("revenue", 100.0)]);
        let out = Productivity.calculate(&aggregate(&table));
        assert!(out.value("revenue_per_head", 0).unwrap().is_nan());
        assert!(out.value("net_income_per_head", 0).unwrap().is_nan());
    }
}

// Break-even sales and break-even ratio, treating cost of goods sold as the variable cost
use super::{new_table, AggregatedTable, RatioStage, StageKind};
use shared::utils::{percent, ratio};
use shared::DerivedTable;

pub struct BreakEven;

impl RatioStage for BreakEven {
    fn kind(&self) -> StageKind {
        StageKind::BreakEven
    }

    fn columns(&self) -> &'static [&'static str] {
        &["break_even_sales", "break_even_ratio"]
    }

    fn calculate(&self, data: &AggregatedTable) -> DerivedTable {
        let revenue = data.revenue();
        let mut sales = Vec::with_capacity(revenue.len());
        let mut be_ratio = Vec::with_capacity(revenue.len());

        for ((rev, cogs), sga) in revenue.iter().zip(&data.cogs).zip(&data.sga_total) {
            // NaN without revenue, and the NaN carries through the margin.
            let variable_cost_ratio = ratio(*cogs, *rev);
            let be = ratio(*sga, 1.0 - variable_cost_ratio);
            sales.push(be);
            be_ratio.push(percent(be, *rev));
        }

        new_table(self, data)
            .with_column("break_even_sales", sales)
            .with_column("break_even_ratio", be_ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::aggregate;
    use crate::stages::test_support::{assert_f64_vec_eq, two_year_table, zero_row};
    use shared::InputTable;

    #[test]
    fn test_break_even_worked_example() {
        let out = BreakEven.calculate(&aggregate(&two_year_table()));
        // Year1: 200 / (1 - 0.6) = 500, 50% of revenue
        let year2_be = 210.0 / (1.0 - 650.0 / 1100.0);
        assert_f64_vec_eq(out.column("break_even_sales").unwrap(), &[500.0, year2_be]);
        assert_f64_vec_eq(
            out.column("break_even_ratio").unwrap(),
            &[50.0, year2_be / 1100.0 * 100.0],
        );
    }

    #[test]
    fn test_zero_revenue_is_undefined() {
        let row = zero_row("2023").with("rent", 100.0).with("material_cost", 40.0);
        let table = InputTable::from_rows(vec![row]);
        let out = BreakEven.calculate(&aggregate(&table));
        assert!(out.value("break_even_sales", 0).unwrap().is_nan());
        assert!(out.value("break_even_ratio", 0).unwrap().is_nan());
    }

    #[test]
    fn test_zero_marginal_profit_is_undefined() {
        let table = InputTable::from_rows(vec![zero_row("2023")
            .with("revenue", 500.0)
            .with("material_cost", 500.0)
            .with("rent", 100.0)]);
        let out = BreakEven.calculate(&aggregate(&table));
        assert!(out.value("break_even_sales", 0).unwrap().is_nan());
        assert!(out.value("break_even_ratio", 0).unwrap().is_nan());
    }
}

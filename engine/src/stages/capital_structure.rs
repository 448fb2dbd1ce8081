// Capital structure: equity/debt shares of total capital and fixed-asset coverage
use super::{new_table, AggregatedTable, RatioStage, StageKind};
use shared::utils::{add_series, percent_series};
use shared::DerivedTable;

pub struct CapitalStructure;

impl RatioStage for CapitalStructure {
    fn kind(&self) -> StageKind {
        StageKind::CapitalStructure
    }

    fn columns(&self) -> &'static [&'static str] {
        &["equity_ratio", "debt_ratio", "fixed_long_term_fit", "fixed_ratio"]
    }

    fn calculate(&self, data: &AggregatedTable) -> DerivedTable {
        let total_liabilities = data.total_liabilities();
        let total_capital = add_series(&total_liabilities, &data.equity);

        new_table(self, data)
            .with_column("equity_ratio", percent_series(&data.equity, &total_capital))
            .with_column("debt_ratio", percent_series(&total_liabilities, &total_capital))
            .with_column("fixed_long_term_fit", percent_series(&data.fixed_assets, &data.equity))
            .with_column("fixed_ratio", percent_series(&data.fixed_assets, &data.total_assets()))
    }
}

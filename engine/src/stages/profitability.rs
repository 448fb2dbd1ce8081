// Profitability ratios (ROA, ROE, margins), all in percent
use super::{new_table, AggregatedTable, RatioStage, StageKind};
use shared::utils::{percent_series, sub_series};
use shared::DerivedTable;

pub struct Profitability;

impl RatioStage for Profitability {
    fn kind(&self) -> StageKind {
        StageKind::Profitability
    }

    fn columns(&self) -> &'static [&'static str] {
        &[
            "roa",
            "roe",
            "gross_margin",
            "operating_margin",
            "ordinary_margin",
            "net_margin",
            "sga_ratio",
        ]
    }

    fn calculate(&self, data: &AggregatedTable) -> DerivedTable {
        let revenue = data.revenue();
        let gross_profit = sub_series(&revenue, &data.cogs);

        new_table(self, data)
            .with_column("roa", percent_series(&data.net_income, &data.total_assets()))
            .with_column("roe", percent_series(&data.net_income, &data.equity))
            .with_column("gross_margin", percent_series(&gross_profit, &revenue))
            .with_column("operating_margin", percent_series(&data.operating_income, &revenue))
            .with_column("ordinary_margin", percent_series(&data.ordinary_income, &revenue))
            .with_column("net_margin", percent_series(&data.net_income, &revenue))
            .with_column("sga_ratio", percent_series(&data.sga_total, &revenue))
    }
}

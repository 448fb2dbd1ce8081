// Short-term solvency: current ratio and quick ratio, in percent
use super::{new_table, AggregatedTable, RatioStage, StageKind};
use shared::columns;
use shared::utils::{percent_series, sub_series};
use shared::DerivedTable;

pub struct Liquidity;

impl RatioStage for Liquidity {
    fn kind(&self) -> StageKind {
        StageKind::Liquidity
    }

    fn columns(&self) -> &'static [&'static str] {
        &["current_ratio", "quick_ratio"]
    }

    fn calculate(&self, data: &AggregatedTable) -> DerivedTable {
        let quick_assets = sub_series(&data.current_assets, &data.item(columns::INVENTORY));
        let current_ratio = percent_series(&data.current_assets, &data.current_liabilities);
        new_table(self, data)
            .with_column("current_ratio", current_ratio)
            .with_column("quick_ratio", percent_series(&quick_assets, &data.current_liabilities))
    }
}

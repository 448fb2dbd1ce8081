// Value-added analysis: processing ratio, labor share, capital productivity, value added per head
use super::{new_table, AggregatedTable, RatioStage, StageKind};
use shared::columns;
use shared::utils::{percent_series, ratio_series};
use shared::DerivedTable;

pub struct ValueAdded;

impl RatioStage for ValueAdded {
    fn kind(&self) -> StageKind {
        StageKind::ValueAdded
    }

    fn columns(&self) -> &'static [&'static str] {
        &[
            "processing_ratio",
            "labor_share",
            "capital_productivity",
            "value_added_per_head",
        ]
    }

    fn calculate(&self, data: &AggregatedTable) -> DerivedTable {
        let value_added = data.item(columns::VALUE_ADDED);
        let processing_value = data.item(columns::PROCESSING_VALUE);
        let personnel_cost = data.item(columns::PERSONNEL_COST);

        new_table(self, data)
            .with_column("processing_ratio", percent_series(&processing_value, &data.revenue()))
            .with_column("labor_share", percent_series(&personnel_cost, &value_added))
            .with_column("capital_productivity", percent_series(&value_added, &data.total_assets()))
            .with_column("value_added_per_head", ratio_series(&value_added, &data.headcount()))
    }
}

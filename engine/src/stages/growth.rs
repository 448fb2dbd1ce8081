//! Year-over-year growth rates in percent.
//!
//! Unlike the other stages the first row has no prior period and is defined
//! as exactly 0, not undefined. A change from zero to zero is also 0; a
//! change away from a zero base is undefined.

use super::{new_table, AggregatedTable, RatioStage, StageKind};
use shared::utils::pct_change;
use shared::DerivedTable;

pub struct Growth;

impl RatioStage for Growth {
    fn kind(&self) -> StageKind {
        StageKind::Growth
    }

    fn columns(&self) -> &'static [&'static str] {
        &[
            "revenue_growth",
            "ordinary_income_growth",
            "sga_growth",
            "headcount_growth",
            "total_assets_growth",
        ]
    }

    fn calculate(&self, data: &AggregatedTable) -> DerivedTable {
        new_table(self, data)
            .with_column("revenue_growth", pct_change(&data.revenue()))
            .with_column("ordinary_income_growth", pct_change(&data.ordinary_income))
            .with_column("sga_growth", pct_change(&data.sga_total))
            .with_column("headcount_growth", pct_change(&data.headcount()))
            .with_column("total_assets_growth", pct_change(&data.total_assets()))
    }
}

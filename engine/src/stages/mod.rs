// Calculation stages: the safe aggregator, the aggregation stage and the ratio stages
pub mod aggregation;
pub mod aggregator;
pub mod break_even;
pub mod capital_structure;
pub mod cash_flow;
pub mod growth;
pub mod liquidity;
pub mod other;
pub mod productivity;
pub mod profitability;
pub mod turnover;
pub mod value_added;

pub use aggregation::{aggregate, AggregatedTable};
pub use aggregator::{safe_sum, ColumnSum};
pub use break_even::BreakEven;
pub use capital_structure::CapitalStructure;
pub use cash_flow::CashFlow;
pub use growth::Growth;
pub use liquidity::Liquidity;
pub use other::Other;
pub use productivity::Productivity;
pub use profitability::Profitability;
pub use turnover::Turnover;
pub use value_added::ValueAdded;

use crate::error::EngineError;
use serde::Serialize;
use shared::DerivedTable;
use std::fmt;
use std::str::FromStr;

/// Common trait for all ratio stages. Implementations are pure: they read
/// only the aggregation output and return a fresh table.
pub trait RatioStage: Send + Sync {
    fn kind(&self) -> StageKind;
    fn columns(&self) -> &'static [&'static str];
    fn calculate(&self, data: &AggregatedTable) -> DerivedTable;

    fn name(&self) -> &'static str {
        self.kind().name()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Profitability,
    BreakEven,
    Turnover,
    Productivity,
    Liquidity,
    CapitalStructure,
    Growth,
    ValueAdded,
    Other,
    CashFlow,
}

impl StageKind {
    pub const ALL: [StageKind; 10] = [
        StageKind::Profitability,
        StageKind::BreakEven,
        StageKind::Turnover,
        StageKind::Productivity,
        StageKind::Liquidity,
        StageKind::CapitalStructure,
        StageKind::Growth,
        StageKind::ValueAdded,
        StageKind::Other,
        StageKind::CashFlow,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StageKind::Profitability => "profitability",
            StageKind::BreakEven => "break_even",
            StageKind::Turnover => "turnover",
            StageKind::Productivity => "productivity",
            StageKind::Liquidity => "liquidity",
            StageKind::CapitalStructure => "capital_structure",
            StageKind::Growth => "growth",
            StageKind::ValueAdded => "value_added",
            StageKind::Other => "other",
            StageKind::CashFlow => "cash_flow",
        }
    }

    pub fn stage(self) -> Box<dyn RatioStage> {
        match self {
            StageKind::Profitability => Box::new(Profitability),
            StageKind::BreakEven => Box::new(BreakEven),
            StageKind::Turnover => Box::new(Turnover),
            StageKind::Productivity => Box::new(Productivity),
            StageKind::Liquidity => Box::new(Liquidity),
            StageKind::CapitalStructure => Box::new(CapitalStructure),
            StageKind::Growth => Box::new(Growth),
            StageKind::ValueAdded => Box::new(ValueAdded),
            StageKind::Other => Box::new(Other),
            StageKind::CashFlow => Box::new(CashFlow),
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StageKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        StageKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| EngineError::UnknownStage(s.to_string()))
    }
}

// Starts an empty table for a stage, keyed by the aggregation's years.
fn new_table(stage: &dyn RatioStage, data: &AggregatedTable) -> DerivedTable {
    DerivedTable::new(stage.name(), data.years())
}

//! Aggregation stage: balance-sheet and income-statement subtotals.
//!
//! Every ratio stage reads from [`AggregatedTable`], never from the caller's
//! input table. Aggregation only adds and subtracts, so none of its columns
//! can be undefined.

use super::aggregator::safe_sum;
use shared::columns::{self, ColumnGroup};
use shared::utils::sub_series;
use shared::{Diagnostic, DerivedTable, InputTable};

pub const STAGE_NAME: &str = "aggregates";

pub const COLUMNS: &[&str] = &[
    "current_assets",
    "fixed_assets",
    "current_liabilities",
    "fixed_liabilities",
    "equity",
    "cogs",
    "sga_total",
    "operating_income",
    "ordinary_income",
    "net_income",
];

#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedTable {
    input: InputTable,
    fingerprint: u64,
    diagnostics: Vec<Diagnostic>,
    pub current_assets: Vec<f64>,
    pub fixed_assets: Vec<f64>,
    pub current_liabilities: Vec<f64>,
    pub fixed_liabilities: Vec<f64>,
    pub equity: Vec<f64>,
    pub cogs: Vec<f64>,
    pub sga_total: Vec<f64>,
    pub operating_income: Vec<f64>,
    // Same as operating income until non-operating items are modelled.
    pub ordinary_income: Vec<f64>,
    // Same as ordinary income until tax and extraordinary items are modelled.
    pub net_income: Vec<f64>,
}

/// Runs the aggregation stage. Non-finite cells are zeroed on a private copy
/// first; partially missing column groups are summed over what is present
/// and reported in [`AggregatedTable::diagnostics`].
pub fn aggregate(table: &InputTable) -> AggregatedTable {
    let input = table.sanitized();
    let mut diagnostics = Vec::new();
    let mut sum = |group: &ColumnGroup| safe_sum(&input, group).collect_into(&mut diagnostics);

    let current_assets = sum(&columns::CURRENT_ASSETS);
    let fixed_gross = sum(&columns::FIXED_ASSETS);
    let current_liabilities = sum(&columns::CURRENT_LIABILITIES);
    let fixed_liabilities = sum(&columns::FIXED_LIABILITIES);
    let equity_gross = sum(&columns::EQUITY);
    let cogs = sum(&columns::COGS);
    let sga_total = sum(&columns::SGA);

    let accumulated_depreciation = input.column_or_zero(columns::DEPRECIATION_OFFSET);
    let fixed_assets = sub_series(&fixed_gross, &accumulated_depreciation);
    let equity = sub_series(&equity_gross, &input.column_or_zero(columns::TREASURY_OFFSET));

    let revenue = input.column_or_zero(columns::REVENUE);
    let operating_income = sub_series(&sub_series(&revenue, &cogs), &sga_total);
    let ordinary_income = operating_income.clone();
    let net_income = ordinary_income.clone();

    AggregatedTable {
        fingerprint: table.fingerprint(),
        input,
        diagnostics,
        current_assets,
        fixed_assets,
        current_liabilities,
        fixed_liabilities,
        equity,
        cogs,
        sga_total,
        operating_income,
        ordinary_income,
        net_income,
    }
}

impl AggregatedTable {
    pub fn years(&self) -> Vec<String> {
        self.input.years()
    }

    pub fn len(&self) -> usize {
        self.input.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Fingerprint of the caller's table this aggregation was derived from.
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    #[cfg(test)]
    pub(crate) fn with_fingerprint(mut self, fingerprint: u64) -> Self {
        self.fingerprint = fingerprint;
        self
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The sanitized copy of the input.
    pub fn input(&self) -> &InputTable {
        &self.input
    }

    /// A raw line item, zero-filled if the input lacks it.
    pub fn item(&self, name: &str) -> Vec<f64> {
        self.input.column_or_zero(name)
    }

    pub fn revenue(&self) -> Vec<f64> {
        self.item(columns::REVENUE)
    }

    pub fn headcount(&self) -> Vec<f64> {
        self.item(columns::HEADCOUNT)
    }

    pub fn total_assets(&self) -> Vec<f64> {
        shared::utils::add_series(&self.current_assets, &self.fixed_assets)
    }

    pub fn total_liabilities(&self) -> Vec<f64> {
        shared::utils::add_series(&self.current_liabilities, &self.fixed_liabilities)
    }

    /// Subtotals as a derived table named `aggregates`.
    pub fn to_derived_table(&self) -> DerivedTable {
        let series: [&Vec<f64>; 10] = [
            &self.current_assets,
            &self.fixed_assets,
            &self.current_liabilities,
            &self.fixed_liabilities,
            &self.equity,
            &self.cogs,
            &self.sga_total,
            &self.operating_income,
            &self.ordinary_income,
            &self.net_income,
        ];
        COLUMNS
            .iter()
            .zip(series)
            .fold(DerivedTable::new(STAGE_NAME, self.years()), |table, (name, values)| {
                table.with_column(name, values.clone())
            })
            .with_diagnostics(self.diagnostics.clone())
    }
}

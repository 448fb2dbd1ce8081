// Safe column aggregation: sums whatever part of a column group is present
use shared::columns::ColumnGroup;
use shared::{Diagnostic, InputTable};

/// Row-wise sum over the present part of a column group, plus the names
/// that were requested but absent.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSum {
    pub group: &'static str,
    pub values: Vec<f64>,
    pub missing: Vec<String>,
}

impl ColumnSum {
    pub fn diagnostic(&self) -> Option<Diagnostic> {
        if self.missing.is_empty() {
            return None;
        }
        Some(Diagnostic::MissingColumns {
            group: self.group.to_string(),
            columns: self.missing.clone(),
        })
    }

    /// Splits into the summed values, pushing any diagnostic onto `sink`.
    pub fn collect_into(self, sink: &mut Vec<Diagnostic>) -> Vec<f64> {
        if let Some(diagnostic) = self.diagnostic() {
            sink.push(diagnostic);
        }
        self.values
    }
}

/// Partitions requested columns into (present, missing) against the
/// columns a table actually declares.
pub fn partition_columns<'a>(
    available: &[String],
    requested: &[&'a str],
) -> (Vec<&'a str>, Vec<String>) {
    let mut present = Vec::new();
    let mut missing = Vec::new();
    for name in requested {
        if available.iter().any(|c| c == name) {
            present.push(*name);
        } else {
            missing.push(name.to_string());
        }
    }
    (present, missing)
}

/// Sums the group's columns that exist in `table`. Absent columns are left
/// out and reported; if none exist every row sums to zero. Never fails.
pub fn safe_sum(table: &InputTable, group: &ColumnGroup) -> ColumnSum {
    let (present, missing) = partition_columns(table.columns(), group.columns);
    let values = table
        .rows()
        .iter()
        .map(|row| present.iter().map(|name| row.get(name)).sum())
        .collect();
    ColumnSum {
        group: group.name,
        values,
        missing,
    }
}

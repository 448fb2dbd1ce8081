use crate::columns;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// One fiscal year's line items. Items not present read as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiscalYearRow {
    pub year: String,
    #[serde(flatten)]
    pub items: BTreeMap<String, f64>,
}

impl FiscalYearRow {
    pub fn new(year: impl Into<String>) -> Self {
        Self {
            year: year.into(),
            items: BTreeMap::new(),
        }
    }

    pub fn with(mut self, name: &str, value: f64) -> Self {
        self.items.insert(name.to_string(), value);
        self
    }

    pub fn get(&self, name: &str) -> f64 {
        self.items.get(name).copied().unwrap_or(0.0)
    }
}

/// Ordered fiscal-year rows sharing one schema.
///
/// The schema is the ordered list of column names; a row that lacks one of
/// them reads zero for it. Row order is the caller's and is never re-sorted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<FiscalYearRow>", into = "Vec<FiscalYearRow>")]
pub struct InputTable {
    columns: Vec<String>,
    rows: Vec<FiscalYearRow>,
}

impl InputTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for name in columns {
            table.declare_column(name.into());
        }
        table
    }

    pub fn from_rows(rows: Vec<FiscalYearRow>) -> Self {
        let mut table = Self::new();
        for row in rows {
            table.push_row(row);
        }
        table
    }

    /// Appends a row, extending the schema with any item it introduces.
    pub fn push_row(&mut self, row: FiscalYearRow) {
        for name in row.items.keys() {
            if !self.has_column(name) {
                self.columns.push(name.clone());
            }
        }
        self.rows.push(row);
    }

    fn declare_column(&mut self, name: String) {
        if !self.has_column(&name) {
            self.columns.push(name);
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[FiscalYearRow] {
        &self.rows
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn years(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.year.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of a column in row order, or `None` if the schema lacks it.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        if !self.has_column(name) {
            return None;
        }
        Some(self.rows.iter().map(|r| r.get(name)).collect())
    }

    pub fn column_or_zero(&self, name: &str) -> Vec<f64> {
        self.column(name).unwrap_or_else(|| vec![0.0; self.rows.len()])
    }

    /// Columns from `required` that the schema does not declare.
    pub fn missing_columns<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|name| !self.has_column(name))
            .collect()
    }

    /// Copy with every non-finite value replaced by zero.
    pub fn sanitized(&self) -> InputTable {
        let rows = self
            .rows
            .iter()
            .map(|row| FiscalYearRow {
                year: row.year.clone(),
                items: row
                    .items
                    .iter()
                    .map(|(k, v)| (k.clone(), if v.is_finite() { *v } else { 0.0 }))
                    .collect(),
            })
            .collect();
        InputTable {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Content hash over year labels, schema and value bit patterns.
    /// Tables with equal content always share a fingerprint.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.columns.hash(&mut hasher);
        for row in &self.rows {
            row.year.hash(&mut hasher);
            for name in &self.columns {
                row.get(name).to_bits().hash(&mut hasher);
            }
        }
        hasher.finish()
    }
}

impl From<Vec<FiscalYearRow>> for InputTable {
    fn from(rows: Vec<FiscalYearRow>) -> Self {
        InputTable::from_rows(rows)
    }
}

impl From<InputTable> for Vec<FiscalYearRow> {
    fn from(table: InputTable) -> Self {
        table.rows
    }
}

/// A named column of computed values. `NaN` marks an undefined ratio.
#[derive(Debug, Clone, Serialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

// Bitwise so that two NaN results from the same input compare equal.
impl PartialEq for Series {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

/// Non-fatal signal raised while computing a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    MissingColumns { group: String, columns: Vec<String> },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingColumns { group, columns } => {
                let names: Vec<String> = columns.iter().map(|name| labelled(name)).collect();
                write!(
                    f,
                    "columns missing from group '{}' were excluded: {}",
                    group,
                    names.join(", ")
                )
            }
        }
    }
}

// "bonds_payable (社債)" for catalogued items, the bare name otherwise.
fn labelled(name: &str) -> String {
    match columns::caption(name) {
        Some(caption) => format!("{} ({})", name, caption),
        None => name.to_string(),
    }
}

/// Output of one calculation stage: the input's year sequence plus computed
/// columns. Diagnostics ride along but are not part of the numeric data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedTable {
    pub stage: String,
    pub years: Vec<String>,
    pub columns: Vec<Series>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl DerivedTable {
    pub fn new(stage: impl Into<String>, years: Vec<String>) -> Self {
        Self {
            stage: stage.into(),
            years,
            columns: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn with_column(mut self, name: &str, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), self.years.len());
        self.columns.push(Series::new(name, values));
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Vec<Diagnostic>) -> Self {
        self.diagnostics.extend(diagnostics);
        self
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.values.as_slice())
    }

    pub fn value(&self, name: &str, row: usize) -> Option<f64> {
        self.column(name).and_then(|values| values.get(row).copied())
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

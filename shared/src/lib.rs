// Statement data model shared by the ratio engine and its callers.
pub mod columns;
pub mod models;
pub mod utils;

pub use models::{Diagnostic, DerivedTable, FiscalYearRow, InputTable, Series};

// Services exposed to callers of the engine
pub mod analysis_service;

pub use analysis_service::{AnalysisReport, StatementAnalyzer};

// Engine library root
// Statement ingestion, the ratio stages and the analysis service.

pub mod config;
pub mod data;
pub mod error;
pub mod services;
pub mod stages;

pub use error::EngineError;
pub use services::{AnalysisReport, StatementAnalyzer};
pub use stages::{RatioStage, StageKind};

// Orchestrates validation, aggregation and the ratio stages for one input table
use crate::config::EngineSettings;
use crate::data::loader;
use crate::data::schema;
use crate::data::stage_cache::{CacheStats, StageCache};
use crate::error::EngineError;
use crate::stages::{aggregate, AggregatedTable, StageKind};
use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::{Diagnostic, DerivedTable, InputTable};
use std::path::Path;
use std::sync::Arc;

/// Everything computed for one input table, ready for a presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub years: Vec<String>,
    pub aggregates: DerivedTable,
    pub stages: Vec<DerivedTable>,
    pub diagnostics: Vec<Diagnostic>,
}

impl AnalysisReport {
    pub fn stage(&self, kind: StageKind) -> Option<&DerivedTable> {
        self.stages.iter().find(|t| t.stage == kind.name())
    }
}

pub struct StatementAnalyzer {
    settings: EngineSettings,
    cache: StageCache,
}

impl StatementAnalyzer {
    pub fn new(settings: EngineSettings) -> Self {
        StatementAnalyzer {
            settings,
            cache: StageCache::new(),
        }
    }

    /// Reads a CSV or JSON statement file and checks it against the schema.
    pub fn load_input(&self, path: impl AsRef<Path>) -> Result<InputTable, EngineError> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "Loading statement input");
        let table = loader::load_input(path, &self.settings.csv)?;
        if let Err(e) = schema::validate(&table) {
            tracing::error!(path = %path.display(), error = %e, "Statement input rejected");
            return Err(e);
        }
        tracing::info!(
            years = table.len(),
            columns = table.columns().len(),
            "Statement input loaded"
        );
        Ok(table)
    }

    pub fn aggregate(&mut self, table: &InputTable) -> Arc<AggregatedTable> {
        if self.settings.cache_enabled {
            self.cache.get_or_aggregate(table)
        } else {
            Arc::new(aggregate(table))
        }
    }

    pub fn run_stage(&mut self, kind: StageKind, data: &AggregatedTable) -> DerivedTable {
        if self.settings.cache_enabled {
            self.cache.get_or_calculate(kind, data)
        } else {
            kind.stage().calculate(data)
        }
    }

    /// Runs every stage.
    pub fn analyze(&mut self, table: &InputTable) -> Result<AnalysisReport, EngineError> {
        self.analyze_stages(table, &StageKind::ALL)
    }

    /// Validates the table, supersedes cache entries from earlier tables and
    /// runs the requested stages in the given order.
    pub fn analyze_stages(
        &mut self,
        table: &InputTable,
        kinds: &[StageKind],
    ) -> Result<AnalysisReport, EngineError> {
        schema::validate(table)?;
        self.cache.retain_fingerprint(table.fingerprint());

        let data = self.aggregate(table);
        let aggregates = data.to_derived_table();
        let stages: Vec<DerivedTable> = kinds
            .iter()
            .map(|kind| self.run_stage(*kind, &data))
            .collect();

        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let raised = stages.iter().flat_map(|t| t.diagnostics.iter());
        for diagnostic in aggregates.diagnostics.iter().chain(raised) {
            if !diagnostics.contains(diagnostic) {
                tracing::warn!(%diagnostic, "Partial column group in statement input");
                diagnostics.push(diagnostic.clone());
            }
        }

        let stats = self.cache.stats();
        tracing::info!(
            years = data.len(),
            stages = stages.len(),
            cache_hits = stats.hits,
            cache_misses = stats.misses,
            "Statement analysis complete"
        );

        Ok(AnalysisReport {
            generated_at: Utc::now(),
            years: data.years(),
            aggregates,
            stages,
            diagnostics,
        })
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

impl Default for StatementAnalyzer {
    fn default() -> Self {
        Self::new(EngineSettings::default())
    }
}

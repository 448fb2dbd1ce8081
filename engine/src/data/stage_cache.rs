// Memoizes stage outputs per input table content
use crate::stages::{aggregate, AggregatedTable, StageKind};
use serde::Serialize;
use shared::{DerivedTable, InputTable};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Explicit cache keyed by (stage, input fingerprint). Results are a pure
/// function of the input, so a hit returns exactly what a recomputation
/// would. The owner decides when entries go stale.
#[derive(Default)]
pub struct StageCache {
    // Source tables are kept so a fingerprint collision is a miss, not a wrong answer.
    aggregates: HashMap<u64, (InputTable, Arc<AggregatedTable>)>,
    tables: HashMap<(StageKind, u64), (InputTable, DerivedTable)>,
    hits: u64,
    misses: u64,
}

impl StageCache {
    pub fn new() -> Self {
        StageCache::default()
    }

    pub fn get_or_aggregate(&mut self, table: &InputTable) -> Arc<AggregatedTable> {
        let fingerprint = table.fingerprint();
        if let Some((source, data)) = self.aggregates.get(&fingerprint) {
            if source == table {
                self.hits += 1;
                return Arc::clone(data);
            }
        }

        self.misses += 1;
        let data = Arc::new(aggregate(table));
        self.aggregates.insert(fingerprint, (table.clone(), Arc::clone(&data)));
        data
    }

    pub fn get_or_calculate(&mut self, kind: StageKind, data: &AggregatedTable) -> DerivedTable {
        let key = (kind, data.fingerprint());
        if let Some((source, table)) = self.tables.get(&key) {
            if source == data.input() {
                self.hits += 1;
                return table.clone();
            }
        }

        self.misses += 1;
        let table = kind.stage().calculate(data);
        self.tables.insert(key, (data.input().clone(), table.clone()));
        table
    }

    /// Drops every entry not derived from the table with `fingerprint`.
    pub fn retain_fingerprint(&mut self, fingerprint: u64) {
        self.aggregates.retain(|fp, _| *fp == fingerprint);
        self.tables.retain(|(_, fp), _| *fp == fingerprint);
    }

    pub fn clear(&mut self) {
        self.aggregates.clear();
        self.tables.clear();
    }

    pub fn len(&self) -> usize {
        self.aggregates.len() + self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.len(),
        }
    }
}

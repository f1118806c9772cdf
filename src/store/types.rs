use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Block, EvaluationResult};

/// Persisted collection of evaluation records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    pub version: u32,
    pub next_id: u64,
    #[serde(default)]
    pub evaluations: Vec<StoredEvaluation>,
}

/// One stored evaluation: the summary numbers plus metadata. Per-indicator
/// normalized values are not persisted; they are request-scoped detail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredEvaluation {
    pub id: u64,
    pub organization: Option<String>,
    pub year: Option<i32>,
    pub total_index: f64,
    pub block_values: BTreeMap<Block, f64>,
    pub recorded_at: DateTime<Utc>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Create a new empty store with version 1
    pub fn new() -> Self {
        Self {
            version: 1,
            next_id: 1,
            evaluations: Vec::new(),
        }
    }

    /// Append an evaluation result as a stored record, returning its id
    pub fn record(&mut self, result: &EvaluationResult) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.evaluations.push(StoredEvaluation {
            id,
            organization: result.organization.clone(),
            year: result.year,
            total_index: result.total_index,
            block_values: result.block_values(),
            recorded_at: Utc::now(),
        });
        id
    }

    /// Records ordered by (year, insertion id), records without a year first.
    pub fn ordered(&self) -> Vec<&StoredEvaluation> {
        let mut records: Vec<&StoredEvaluation> = self.evaluations.iter().collect();
        records.sort_by_key(|r| (r.year, r.id));
        records
    }

    pub fn len(&self) -> usize {
        self.evaluations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.evaluations.is_empty()
    }
}

impl StoredEvaluation {
    pub fn block_value(&self, block: Block) -> f64 {
        self.block_values.get(&block).copied().unwrap_or(0.0)
    }
}

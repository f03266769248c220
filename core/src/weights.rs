//! Discrete weighted choice of the command kind emitted per iteration.
//!
//! The default table reproduces a uniform selector over `0..=70` split into
//! insert `[0, 40)`, delete `[40, 50)`, query `[50, 70)` and a single idle
//! outcome, i.e. relative weights 40:10:20:1.

use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use serde::{Deserialize, Serialize};

use crate::error::{HarnessError, HarnessResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    Insert,
    Delete,
    Query,
    Save,
    Load,
    /// The iteration is consumed without emitting a line.
    Idle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandWeights {
    pub insert: u32,
    pub delete: u32,
    pub query: u32,
    pub idle: u32,
    pub save: u32,
    pub load: u32,
}

impl Default for CommandWeights {
    fn default() -> Self {
        Self {
            insert: 40,
            delete: 10,
            query: 20,
            idle: 1,
            save: 10,
            load: 10,
        }
    }
}

impl CommandWeights {
    /// Entries that take part in sampling. Save and Load only join the table
    /// when persistence commands are enabled.
    pub fn active_entries(&self, persistence: bool) -> Vec<(CommandKind, u32)> {
        let mut entries = vec![
            (CommandKind::Insert, self.insert),
            (CommandKind::Delete, self.delete),
            (CommandKind::Query, self.query),
            (CommandKind::Idle, self.idle),
        ];
        if persistence {
            entries.push((CommandKind::Save, self.save));
            entries.push((CommandKind::Load, self.load));
        }
        entries.retain(|(_, weight)| *weight > 0);
        entries
    }
}

/// Sampling table built from [`CommandWeights`].
#[derive(Debug, Clone)]
pub struct WeightTable {
    kinds: Vec<CommandKind>,
    weights: Vec<u64>,
    index: WeightedIndex<u64>,
}

impl WeightTable {
    pub fn new(weights: &CommandWeights, persistence: bool) -> HarnessResult<Self> {
        let entries = weights.active_entries(persistence);
        if entries.is_empty() {
            return Err(HarnessError::config("command weight table has no positive weight"));
        }
        // summed as u64 so any mix of u32 weights fits
        let (kinds, weights): (Vec<_>, Vec<_>) = entries.into_iter().map(|(k, w)| (k, u64::from(w))).unzip();
        let index = WeightedIndex::new(&weights)
            .map_err(|e| HarnessError::config(format!("invalid command weights: {}", e)))?;
        Ok(Self { kinds, weights, index })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> CommandKind {
        self.kinds[self.index.sample(rng)]
    }

    pub fn total(&self) -> u64 {
        self.weights.iter().sum()
    }

    /// Probability mass assigned to `kind`, `0.0` when it is not in the table.
    pub fn probability(&self, kind: CommandKind) -> f64 {
        let weight: u64 = self
            .kinds
            .iter()
            .zip(&self.weights)
            .filter(|(k, _)| **k == kind)
            .map(|(_, w)| *w)
            .sum();
        weight as f64 / self.total() as f64
    }
}

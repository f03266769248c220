use std::fs::File;
use std::io::{self, BufWriter, Write};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::debug;

use crate::config::HarnessConfig;
use crate::error::{HarnessError, HarnessResult};
use crate::protocol::Command;
use crate::vocab::Vocabulary;
use crate::weights::{CommandKind, WeightTable};

/// What one generation pass produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationStats {
    pub iterations: usize,
    pub inserts: usize,
    pub deletes: usize,
    pub queries: usize,
    pub saves: usize,
    pub loads: usize,
    pub idle: usize,
    /// Load draws dropped because no Save had been emitted yet.
    pub skipped_loads: usize,
}

impl GenerationStats {
    /// Number of lines written.
    pub fn emitted(&self) -> usize {
        self.inserts + self.deletes + self.queries + self.saves + self.loads
    }
}

/// Synthesizes the command stream for one run.
pub struct WorkloadGenerator<R = StdRng> {
    rng: R,
    table: WeightTable,
    vocabulary: Vocabulary,
    line_count: usize,
    value_max: u64,
    snapshot_path: String,
}

impl WorkloadGenerator<StdRng> {
    /// Seeds from `config.seed` when present, from OS entropy otherwise.
    pub fn from_config(config: &HarnessConfig) -> HarnessResult<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> WorkloadGenerator<R> {
    /// Builds the vocabulary up front; it stays fixed for the whole stream.
    pub fn with_rng(config: &HarnessConfig, mut rng: R) -> HarnessResult<Self> {
        config.validate()?;
        let table = WeightTable::new(&config.weights, config.persistence_commands_enabled)?;
        let vocabulary = Vocabulary::generate(&mut rng, config.word_count, config.word_length);
        Ok(Self {
            rng,
            table,
            vocabulary,
            line_count: config.line_count,
            value_max: config.value_max,
            snapshot_path: config.snapshot_file.to_string_lossy().into_owned(),
        })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Writes `line_count` iterations worth of commands to `out`.
    pub fn generate_to_writer<W: Write>(&mut self, out: &mut W) -> io::Result<GenerationStats> {
        let mut stats = GenerationStats {
            iterations: self.line_count,
            ..Default::default()
        };
        let mut saved = false;

        for _ in 0..self.line_count {
            let word = self.vocabulary.pick(&mut self.rng).to_string();
            let command = match self.table.sample(&mut self.rng) {
                CommandKind::Insert => {
                    stats.inserts += 1;
                    let value = self.rng.gen_range(0..=self.value_max);
                    Command::Insert { word, value }
                }
                CommandKind::Delete => {
                    stats.deletes += 1;
                    Command::Delete { word }
                }
                CommandKind::Query => {
                    stats.queries += 1;
                    Command::Query { word }
                }
                CommandKind::Save => {
                    stats.saves += 1;
                    saved = true;
                    Command::Save {
                        path: self.snapshot_path.clone(),
                    }
                }
                CommandKind::Load if saved => {
                    stats.loads += 1;
                    Command::Load {
                        path: self.snapshot_path.clone(),
                    }
                }
                CommandKind::Load => {
                    stats.skipped_loads += 1;
                    continue;
                }
                CommandKind::Idle => {
                    stats.idle += 1;
                    continue;
                }
            };
            command.write_line(out)?;
        }

        Ok(stats)
    }

    /// Creates or truncates `config.command_file` and fills it.
    pub fn generate_file(&mut self, config: &HarnessConfig) -> HarnessResult<GenerationStats> {
        let path = &config.command_file;
        let wrap = |source: io::Error| HarnessError::Generation {
            path: path.clone(),
            source,
        };

        let file = File::create(path).map_err(wrap)?;
        let mut out = BufWriter::new(file);
        let stats = self.generate_to_writer(&mut out).map_err(wrap)?;
        out.flush().map_err(wrap)?;

        debug!(
            path = %path.display(),
            emitted = stats.emitted(),
            idle = stats.idle,
            "wrote command file"
        );
        Ok(stats)
    }
}

/// Generates a fresh workload for `config` into `config.command_file`.
pub fn generate_workload(config: &HarnessConfig) -> HarnessResult<GenerationStats> {
    WorkloadGenerator::from_config(config)?.generate_file(config)
}

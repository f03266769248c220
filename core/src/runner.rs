use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::HarnessConfig;
use crate::engine::{Engine, ProcessEngine};
use crate::error::{HarnessError, HarnessResult};
use crate::generator::WorkloadGenerator;
use crate::report::BenchmarkReport;
use crate::results::ResultsTally;

/// Removes a persisted snapshot left by a previous run. Never fails; returns
/// whether a file was actually removed.
pub fn remove_stale_snapshot(path: &Path) -> bool {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed stale snapshot");
            true
        }
        Err(e) if e.kind() == ErrorKind::NotFound => false,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not remove stale snapshot, continuing");
            false
        }
    }
}

/// Drives one generate, execute, measure cycle per [`BenchmarkRunner::run`].
pub struct BenchmarkRunner<E> {
    config: HarnessConfig,
    engine: E,
}

impl BenchmarkRunner<ProcessEngine> {
    pub fn from_config(config: HarnessConfig) -> Self {
        let engine = ProcessEngine::new(&config.engine).with_timeout(config.timeout());
        Self { config, engine }
    }
}

impl<E: Engine> BenchmarkRunner<E> {
    pub fn new(config: HarnessConfig, engine: E) -> Self {
        Self { config, engine }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn run(&self) -> HarnessResult<BenchmarkReport> {
        let config = &self.config;
        config.validate()?;

        remove_stale_snapshot(&config.snapshot_file);

        let generation = WorkloadGenerator::from_config(config)?.generate_file(config)?;

        let start = Instant::now();
        let outcome = self
            .engine
            .run(&config.command_file, &config.results_file)
            .map_err(|source| HarnessError::Execution {
                program: self.engine.describe(),
                source,
            })?;
        let elapsed = start.elapsed();

        let mut report = BenchmarkReport::new(elapsed, outcome, generation);
        if let Some(warning) = report.engine_warning() {
            warn!("{}", warning);
        }

        if config.inspect_results && !report.timed_out() {
            match ResultsTally::from_path(&config.results_file) {
                Ok(tally) => {
                    if tally.looks_malformed() {
                        warn!(
                            errors = tally.errors,
                            unrecognized = tally.unrecognized,
                            first_unrecognized = ?tally.first_unrecognized,
                            "engine output may be unreliable"
                        );
                    }
                    report.results = Some(tally);
                }
                Err(e) => warn!(error = %e, "could not inspect engine results"),
            }
        }

        let (secs, millis) = report.elapsed_parts();
        info!(secs, millis, emitted = report.generation.emitted(), "benchmark run finished");
        Ok(report)
    }
}

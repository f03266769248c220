use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::engine::EngineOutcome;
use crate::generator::GenerationStats;
use crate::results::ResultsTally;

const NANOS_PER_SEC: u64 = 1_000_000_000;
const NANOS_PER_MILLI: u64 = 1_000_000;

/// Splits a duration into whole seconds and residual milliseconds.
pub fn split_elapsed(elapsed: Duration) -> (u64, u64) {
    let nanos = saturating_nanos(elapsed);
    let secs = nanos / NANOS_PER_SEC;
    let millis = (nanos - secs * NANOS_PER_SEC) / NANOS_PER_MILLI;
    (secs, millis)
}

fn saturating_nanos(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX)
}

/// Outcome of one generate, execute and measure cycle.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    pub generated_at: DateTime<Utc>,
    pub elapsed_ns: u64,
    pub engine: EngineOutcome,
    pub generation: GenerationStats,
    pub results: Option<ResultsTally>,
}

impl BenchmarkReport {
    pub fn new(elapsed: Duration, engine: EngineOutcome, generation: GenerationStats) -> Self {
        Self {
            generated_at: Utc::now(),
            elapsed_ns: saturating_nanos(elapsed),
            engine,
            generation,
            results: None,
        }
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_ns)
    }

    pub fn elapsed_parts(&self) -> (u64, u64) {
        split_elapsed(self.elapsed())
    }

    pub fn timed_out(&self) -> bool {
        self.engine.is_timeout()
    }

    pub fn engine_succeeded(&self) -> bool {
        self.engine.is_success()
    }

    /// Human-readable note when the engine's output may be incomplete.
    pub fn engine_warning(&self) -> Option<String> {
        match self.engine {
            EngineOutcome::Exited { code: Some(0) } => None,
            EngineOutcome::Exited { code: Some(code) } => {
                Some(format!("engine exited with status {}; results may be incomplete", code))
            }
            EngineOutcome::Exited { code: None } => {
                Some("engine was terminated by a signal; results may be incomplete".to_string())
            }
            EngineOutcome::TimedOut { .. } => Some("engine timed out and was killed".to_string()),
        }
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("serialize benchmark report")?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create parent directory for {}", path.display()))?;
        }
        fs::write(path, json).with_context(|| format!("Failed to write report to {}", path.display()))
    }
}

impl fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (secs, millis) = self.elapsed_parts();
        if self.timed_out() {
            write!(f, "timed out after {}s, {}ms", secs, millis)
        } else {
            write!(f, "time: {}s, {}ms", secs, millis)
        }
    }
}

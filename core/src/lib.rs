//! Randomized workload generation and timed execution for line-protocol
//! key/value engines.
//!
//! A run deletes the previous snapshot, writes a fresh command file, feeds it
//! to the engine through stdin and measures how long the engine takes.

pub mod config;
pub mod engine;
pub mod error;
pub mod generator;
pub mod protocol;
pub mod report;
pub mod results;
pub mod runner;
pub mod validate;
pub mod vocab;
pub mod weights;

#[cfg(test)]
mod engine_test;
#[cfg(test)]
mod error_test;
#[cfg(test)]
mod protocol_test;
#[cfg(test)]
mod weights_test;

pub use config::HarnessConfig;
pub use engine::{Engine, EngineOutcome, ProcessEngine};
pub use error::{HarnessError, HarnessResult, Phase};
pub use generator::{GenerationStats, WorkloadGenerator, generate_workload};
pub use protocol::Command;
pub use report::BenchmarkReport;
pub use runner::{BenchmarkRunner, remove_stale_snapshot};

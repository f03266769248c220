use std::path::Path;

use rbbench_core::report::BenchmarkReport;
use rbbench_core::validate::{ValidationSummary, validate_file};
use rbbench_core::{BenchmarkRunner, generate_workload};
use tracing::debug;

use crate::{RunArgs, WorkloadArgs};

const TIMEOUT_EXIT_CODE: i32 = 2;

pub(crate) fn run(args: &RunArgs) -> anyhow::Result<()> {
    let config = args.load_config()?;
    debug!(?config, "starting benchmark run");

    let report = BenchmarkRunner::from_config(config).run()?;

    if let Some(path) = &args.json {
        report.write_json(path)?;
        eprintln!("Wrote report to {}", path.display());
    }

    if report.timed_out() {
        eprintln!("Error: execution phase failed: engine {}", report);
        std::process::exit(TIMEOUT_EXIT_CODE);
    }

    for warning in report_warnings(&report) {
        eprintln!("Warning: {}", warning);
    }
    println!("{}", report);
    Ok(())
}

pub(crate) fn report_warnings(report: &BenchmarkReport) -> Vec<String> {
    let mut warnings = Vec::new();
    if let Some(engine) = report.engine_warning() {
        warnings.push(engine);
    }
    if let Some(tally) = &report.results
        && tally.looks_malformed()
    {
        let mut message = format!(
            "engine output may be unreliable ({} error lines, {} unrecognized lines",
            tally.errors, tally.unrecognized
        );
        if let Some(line) = tally.first_unrecognized {
            message.push_str(&format!(", first at line {}", line));
        }
        message.push(')');
        warnings.push(message);
    }
    warnings
}

pub(crate) fn generate(args: &WorkloadArgs) -> anyhow::Result<()> {
    let config = args.load_config()?;
    let stats = generate_workload(&config)?;
    eprintln!(
        "Wrote {} commands to {} ({} iterations, {} idle)",
        stats.emitted(),
        config.command_file.display(),
        stats.iterations,
        stats.idle
    );
    Ok(())
}

pub(crate) fn validate(file: &Path, max_lines: Option<usize>) -> anyhow::Result<()> {
    let summary = validate_file(file, None)?;
    if let Some(issue) = &summary.first_issue {
        anyhow::bail!("{}:{}: {}", file.display(), issue.line, issue.message);
    }
    if let Some(max) = max_lines
        && summary.lines > max
    {
        anyhow::bail!("{} has {} lines, expected at most {}", file.display(), summary.lines, max);
    }
    println!("{}", describe_summary(&summary));
    Ok(())
}

pub(crate) fn describe_summary(summary: &ValidationSummary) -> String {
    format!(
        "{} lines: {} inserts, {} deletes, {} queries, {} saves, {} loads, {} distinct words",
        summary.lines,
        summary.inserts,
        summary.deletes,
        summary.queries,
        summary.saves,
        summary.loads,
        summary.distinct_words.len()
    )
}

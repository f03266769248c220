use std::path::PathBuf;
use std::sync::Once;

use clap::{Args, Parser, Subcommand};
use rbbench_core::HarnessConfig;

mod commands;

static TRACE_INIT: Once = Once::new();

#[derive(Debug, Parser)]
#[command(
    name = "rbbench",
    author,
    version,
    about = "Randomized workload generator and timed benchmark harness",
    long_about = None,
    args_conflicts_with_subcommands = true
)]
struct CliArgs {
    /// Subcommands like `generate` or `validate FILE`
    #[command(subcommand)]
    command: Option<Commands>,

    /// Without a subcommand, perform a full benchmark run
    #[command(flatten)]
    run: RunArgs,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Delete the old snapshot, generate a workload, time the engine on it.
    Run(RunArgs),
    /// Only write the command file.
    Generate(WorkloadArgs),
    /// Check a command file against the line protocol.
    Validate {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Fail when the file has more lines than this
        #[arg(long, value_name = "N")]
        lines: Option<usize>,
    },
}

#[derive(Debug, Clone, Default, Args)]
struct WorkloadArgs {
    /// TOML configuration file (defaults to ./rbbench.toml when present)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Number of generation iterations
    #[arg(long, value_name = "N")]
    lines: Option<usize>,
    /// Vocabulary size
    #[arg(long, value_name = "N")]
    words: Option<usize>,
    /// Maximum word length
    #[arg(long, value_name = "N")]
    word_length: Option<usize>,
    /// Upper bound of inserted values
    #[arg(long, value_name = "N")]
    value_max: Option<u64>,
    #[arg(long, value_name = "PATH")]
    command_file: Option<PathBuf>,
    #[arg(long, value_name = "PATH")]
    snapshot_file: Option<PathBuf>,
    /// Seed for a reproducible workload
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
    /// Also emit `! Save` / `! Load` commands
    #[arg(long)]
    persistence: bool,
    /// Drop the idle outcome from the command weights
    #[arg(long)]
    close_gap: bool,
}

#[derive(Debug, Clone, Default, Args)]
struct RunArgs {
    #[command(flatten)]
    workload: WorkloadArgs,
    /// Engine binary, run without arguments
    #[arg(long, value_name = "PATH")]
    engine: Option<PathBuf>,
    #[arg(long, value_name = "PATH")]
    results_file: Option<PathBuf>,
    /// Kill the engine after this many seconds
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,
    /// Skip classification of the engine's output
    #[arg(long)]
    no_inspect: bool,
    /// Also write the report as JSON
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,
}

impl WorkloadArgs {
    fn apply(&self, config: &mut HarnessConfig) {
        if let Some(v) = self.lines {
            config.line_count = v;
        }
        if let Some(v) = self.words {
            config.word_count = v;
        }
        if let Some(v) = self.word_length {
            config.word_length = v;
        }
        if let Some(v) = self.value_max {
            config.value_max = v;
        }
        if let Some(v) = &self.command_file {
            config.command_file = v.clone();
        }
        if let Some(v) = &self.snapshot_file {
            config.snapshot_file = v.clone();
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.persistence {
            config.persistence_commands_enabled = true;
        }
        if self.close_gap {
            config.weights.idle = 0;
        }
    }

    fn load_config(&self) -> anyhow::Result<HarnessConfig> {
        let mut config = HarnessConfig::discover(self.config.as_deref())?;
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }
}

impl RunArgs {
    fn apply(&self, config: &mut HarnessConfig) {
        self.workload.apply(config);
        if let Some(v) = &self.engine {
            config.engine = v.clone();
        }
        if let Some(v) = &self.results_file {
            config.results_file = v.clone();
        }
        if self.timeout_secs.is_some() {
            config.timeout_secs = self.timeout_secs;
        }
        if self.no_inspect {
            config.inspect_results = false;
        }
    }

    fn load_config(&self) -> anyhow::Result<HarnessConfig> {
        let mut config = HarnessConfig::discover(self.workload.config.as_deref())?;
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }
}

/// How `RBBENCH_TRACE` asks for diagnostics.
#[derive(Debug, PartialEq, Eq)]
enum TraceSetting {
    Off,
    /// `1`/`true`/`on`: use `RUST_LOG`, else the harness crates at info.
    Defaults,
    /// A bare level such as `debug`, applied to the harness crates only.
    Level(&'static str),
    /// Any other value is taken as a full `EnvFilter` directive.
    Directive(String),
}

impl TraceSetting {
    fn parse(raw: &str) -> Self {
        let value = raw.trim().to_ascii_lowercase();
        match value.as_str() {
            "" | "0" | "false" | "off" => TraceSetting::Off,
            "1" | "true" | "on" => TraceSetting::Defaults,
            "error" => TraceSetting::Level("error"),
            "warn" => TraceSetting::Level("warn"),
            "info" => TraceSetting::Level("info"),
            "debug" => TraceSetting::Level("debug"),
            "trace" => TraceSetting::Level("trace"),
            _ => TraceSetting::Directive(raw.trim().to_string()),
        }
    }

    fn directive(&self) -> Option<String> {
        match self {
            TraceSetting::Off => None,
            TraceSetting::Defaults => {
                Some(std::env::var("RUST_LOG").unwrap_or_else(|_| harness_directive("info")))
            }
            TraceSetting::Level(level) => Some(harness_directive(level)),
            TraceSetting::Directive(directive) => Some(directive.clone()),
        }
    }
}

fn harness_directive(level: &str) -> String {
    format!("rbbench_core={level},rbbench={level}")
}

/// Installs a stderr subscriber when `RBBENCH_TRACE` asks for one. An
/// unparsable directive falls back to the harness crates at info.
fn maybe_init_tracing() {
    let Some(directive) = std::env::var("RBBENCH_TRACE")
        .ok()
        .and_then(|raw| TraceSetting::parse(&raw).directive())
    else {
        return;
    };

    TRACE_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;

        let filter =
            EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(harness_directive("info")));
        let _ = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_env_filter(filter)
            .try_init();
    });
}

fn main() -> anyhow::Result<()> {
    maybe_init_tracing();

    let CliArgs { command, run } = CliArgs::parse();

    match command {
        None => commands::run(&run),
        Some(Commands::Run(args)) => commands::run(&args),
        Some(Commands::Generate(args)) => commands::generate(&args),
        Some(Commands::Validate { file, lines }) => commands::validate(&file, lines),
    }
}

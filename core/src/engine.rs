use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// How an engine invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EngineOutcome {
    /// `code` is `None` when the process was terminated by a signal.
    Exited { code: Option<i32> },
    TimedOut { after: Duration },
}

impl EngineOutcome {
    pub fn success() -> Self {
        EngineOutcome::Exited { code: Some(0) }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, EngineOutcome::Exited { code: Some(0) })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, EngineOutcome::TimedOut { .. })
    }
}

impl From<ExitStatus> for EngineOutcome {
    fn from(status: ExitStatus) -> Self {
        EngineOutcome::Exited { code: status.code() }
    }
}

/// The system under test, reduced to "read this file, write that one".
pub trait Engine {
    fn run(&self, input: &Path, output: &Path) -> io::Result<EngineOutcome>;

    /// Name used in diagnostics.
    fn describe(&self) -> PathBuf {
        PathBuf::from("<engine>")
    }
}

impl<F> Engine for F
where
    F: Fn(&Path, &Path) -> io::Result<EngineOutcome>,
{
    fn run(&self, input: &Path, output: &Path) -> io::Result<EngineOutcome> {
        self(input, output)
    }
}

/// Runs an external binary with stdin and stdout redirected to files.
///
/// On timeout only the direct child is killed. An engine started through a
/// wrapper script should `exec` the real binary, otherwise its own children
/// outlive the kill and keep the inherited stderr open.
#[derive(Debug, Clone)]
pub struct ProcessEngine {
    program: PathBuf,
    timeout: Option<Duration>,
}

impl ProcessEngine {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn wait_bounded(&self, child: &mut Child, limit: Duration) -> io::Result<EngineOutcome> {
        let started = Instant::now();
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status.into());
            }
            let waited = started.elapsed();
            if waited >= limit {
                warn!(program = %self.program.display(), ?limit, "engine timed out, killing it");
                if let Err(e) = child.kill() {
                    // already exited between try_wait and kill
                    debug!(error = %e, "kill after timeout failed");
                }
                child.wait()?;
                return Ok(EngineOutcome::TimedOut { after: waited });
            }
            thread::sleep(POLL_INTERVAL.min(limit - waited));
        }
    }
}

impl Engine for ProcessEngine {
    fn run(&self, input: &Path, output: &Path) -> io::Result<EngineOutcome> {
        let stdin = File::open(input)?;
        let stdout = File::create(output)?;

        debug!(
            program = %self.program.display(),
            input = %input.display(),
            output = %output.display(),
            "launching engine"
        );
        let mut child = Command::new(&self.program)
            .stdin(Stdio::from(stdin))
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::inherit())
            .spawn()?;

        match self.timeout {
            Some(limit) => self.wait_bounded(&mut child, limit),
            None => Ok(child.wait()?.into()),
        }
    }

    fn describe(&self) -> PathBuf {
        self.program.clone()
    }
}

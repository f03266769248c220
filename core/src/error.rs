use std::fmt;
use std::io;
use std::path::PathBuf;

/// Phase of a benchmark run in which a fatal error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Config,
    Generation,
    Execution,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Config => "config",
            Phase::Generation => "generation",
            Phase::Execution => "execution",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fatal harness error. A run that fails with one of these never reports a
/// timing line. The underlying io error is only exposed through `source()`.
#[derive(Debug)]
pub enum HarnessError {
    Config(String),
    Generation { path: PathBuf, source: io::Error },
    Execution { program: PathBuf, source: io::Error },
}

pub type HarnessResult<T> = Result<T, HarnessError>;

impl HarnessError {
    pub fn config(message: impl Into<String>) -> Self {
        HarnessError::Config(message.into())
    }

    pub fn phase(&self) -> Phase {
        match self {
            HarnessError::Config(_) => Phase::Config,
            HarnessError::Generation { .. } => Phase::Generation,
            HarnessError::Execution { .. } => Phase::Execution,
        }
    }
}

impl fmt::Display for HarnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HarnessError::Config(message) => write!(f, "config phase failed: {}", message),
            HarnessError::Generation { path, .. } => write!(
                f,
                "generation phase failed: cannot write command file '{}'",
                path.display()
            ),
            HarnessError::Execution { program, .. } => {
                write!(f, "execution phase failed: cannot run engine '{}'", program.display())
            }
        }
    }
}

impl std::error::Error for HarnessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HarnessError::Config(_) => None,
            HarnessError::Generation { source, .. } | HarnessError::Execution { source, .. } => Some(source),
        }
    }
}

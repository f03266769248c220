//! Line protocol spoken by the engine under test.
//!
//! One command per line, fields separated by a single space:
//!
//! ```text
//! + <word> <value>    insert or update
//! - <word>            delete
//! <word>              query
//! ! Save <path>       persist the tree
//! ! Load <path>       restore the tree
//! ```

use std::fmt;
use std::io::{self, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Insert { word: String, value: u64 },
    Delete { word: String },
    Query { word: String },
    Save { path: String },
    Load { path: String },
}

impl Command {
    pub fn word(&self) -> Option<&str> {
        match self {
            Command::Insert { word, .. } | Command::Delete { word } | Command::Query { word } => Some(word),
            Command::Save { .. } | Command::Load { .. } => None,
        }
    }

    /// Writes the command as a single `\n`-terminated line.
    pub fn write_line<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self)
    }

    /// Parses one line (without its terminator).
    pub fn parse_line(line: &str) -> Result<Command, ProtocolError> {
        let mut fields = line.split(' ');
        let head = fields.next().unwrap_or_default();
        let command = match head {
            "" => return Err(ProtocolError::new("empty line")),
            "+" => {
                let word = expect_word(fields.next(), "insert")?;
                let raw = fields
                    .next()
                    .ok_or_else(|| ProtocolError::new("insert is missing its value"))?;
                let value = raw
                    .parse::<u64>()
                    .map_err(|e| ProtocolError::new(format!("invalid insert value '{}': {}", raw, e)))?;
                Command::Insert { word, value }
            }
            "-" => Command::Delete {
                word: expect_word(fields.next(), "delete")?,
            },
            "!" => return parse_persistence(line),
            word => Command::Query {
                word: expect_word(Some(word), "query")?,
            },
        };

        if fields.next().is_some() {
            return Err(ProtocolError::new("trailing fields after command"));
        }
        Ok(command)
    }
}

/// Persistence commands keep everything after the verb as the path, so paths
/// may contain spaces.
fn parse_persistence(line: &str) -> Result<Command, ProtocolError> {
    let mut fields = line.splitn(3, ' ').skip(1);
    let verb = fields
        .next()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ProtocolError::new("persistence command is missing its verb"))?;
    let path = fields
        .next()
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ProtocolError::new(format!("{} is missing its path", verb)))?;
    match verb {
        "Save" => Ok(Command::Save { path }),
        "Load" => Ok(Command::Load { path }),
        other => Err(ProtocolError::new(format!("unknown persistence verb '{}'", other))),
    }
}

fn expect_word(field: Option<&str>, what: &str) -> Result<String, ProtocolError> {
    match field {
        None | Some("") => Err(ProtocolError::new(format!("{} is missing its word", what))),
        Some(word) if word.chars().any(char::is_whitespace) => {
            Err(ProtocolError::new(format!("{} word '{}' contains whitespace", what, word)))
        }
        Some(word) => Ok(word.to_string()),
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Insert { word, value } => write!(f, "+ {} {}", word, value),
            Command::Delete { word } => write!(f, "- {}", word),
            Command::Query { word } => f.write_str(word),
            Command::Save { path } => write!(f, "! Save {}", path),
            Command::Load { path } => write!(f, "! Load {}", path),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolError {
    pub message: String,
}

impl ProtocolError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ProtocolError {}

//! Offline checks of a generated command file.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::protocol::{Command, ProtocolError};
use crate::vocab::Vocabulary;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineIssue {
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    pub lines: usize,
    pub inserts: usize,
    pub deletes: usize,
    pub queries: usize,
    pub saves: usize,
    pub loads: usize,
    pub distinct_words: BTreeSet<String>,
    /// First line that failed to parse or used an unknown word.
    pub first_issue: Option<LineIssue>,
}

impl ValidationSummary {
    pub fn is_valid(&self) -> bool {
        self.first_issue.is_none()
    }

    fn flag(&mut self, line: usize, message: impl Into<String>) {
        if self.first_issue.is_none() {
            self.first_issue = Some(LineIssue {
                line,
                message: message.into(),
            });
        }
    }

    fn record(&mut self, command: &Command) {
        match command {
            Command::Insert { .. } => self.inserts += 1,
            Command::Delete { .. } => self.deletes += 1,
            Command::Query { .. } => self.queries += 1,
            Command::Save { .. } => self.saves += 1,
            Command::Load { .. } => self.loads += 1,
        }
        if let Some(word) = command.word() {
            self.distinct_words.insert(word.to_string());
        }
    }
}

/// Parses every line and, when `vocabulary` is given, checks that each key
/// belongs to it. Keeps scanning after the first issue so counts cover the
/// whole file.
pub fn validate_reader<R: BufRead>(reader: R, vocabulary: Option<&Vocabulary>) -> Result<ValidationSummary> {
    let mut summary = ValidationSummary::default();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("read line {}", idx + 1))?;
        let number = idx + 1;
        summary.lines += 1;

        let command = match Command::parse_line(&line) {
            Ok(command) => command,
            Err(ProtocolError { message }) => {
                summary.flag(number, message);
                continue;
            }
        };

        if let (Some(vocab), Some(word)) = (vocabulary, command.word())
            && !vocab.contains(word)
        {
            summary.flag(number, format!("word '{}' is not in the vocabulary", word));
        }
        summary.record(&command);
    }
    Ok(summary)
}

pub fn validate_file(path: &Path, vocabulary: Option<&Vocabulary>) -> Result<ValidationSummary> {
    let file = File::open(path).with_context(|| format!("Failed to read file '{}'", path.display()))?;
    validate_reader(BufReader::new(file), vocabulary)
}

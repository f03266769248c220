//! Classification of the engine's response lines.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// Plain `OK` after an insert, delete, save or load.
    Ok,
    /// `OK: <value>` after a successful query.
    Found(u64),
    Exist,
    NoSuchWord,
    Error,
    Unrecognized,
}

impl Response {
    pub fn classify(line: &str) -> Self {
        let line = line.trim_end();
        match line {
            "OK" => Response::Ok,
            "Exist" => Response::Exist,
            "NoSuchWord" => Response::NoSuchWord,
            _ => {
                if let Some(value) = line.strip_prefix("OK: ") {
                    value.parse().map(Response::Found).unwrap_or(Response::Unrecognized)
                } else if line.starts_with("Error:") {
                    Response::Error
                } else {
                    Response::Unrecognized
                }
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultsTally {
    pub lines: usize,
    pub ok: usize,
    pub found: usize,
    pub exist: usize,
    pub no_such_word: usize,
    pub errors: usize,
    pub unrecognized: usize,
    /// 1-based line number of the first unrecognized line.
    pub first_unrecognized: Option<usize>,
}

impl ResultsTally {
    pub fn record(&mut self, response: Response) {
        self.lines += 1;
        match response {
            Response::Ok => self.ok += 1,
            Response::Found(_) => self.found += 1,
            Response::Exist => self.exist += 1,
            Response::NoSuchWord => self.no_such_word += 1,
            Response::Error => self.errors += 1,
            Response::Unrecognized => {
                self.unrecognized += 1;
                self.first_unrecognized.get_or_insert(self.lines);
            }
        }
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut tally = Self::default();
        for line in reader.lines() {
            let line = line.context("read results line")?;
            tally.record(Response::classify(&line));
        }
        Ok(tally)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("open results file {}", path.display()))?;
        Self::from_reader(BufReader::new(file)).with_context(|| format!("read results file {}", path.display()))
    }

    pub fn looks_malformed(&self) -> bool {
        self.errors > 0 || self.unrecognized > 0
    }
}

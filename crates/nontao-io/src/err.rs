// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use std::{fmt::Display, path::PathBuf};

use nontao_core::time::{MalformedTimeString, TimeOfDay};
use nontao_model::err::DuplicateMachineError;

/// Failure to read or write one of the CSV artifacts.
#[derive(Debug)]
pub enum ExchangeError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Csv(csv::Error),
    MalformedTimeString {
        line: Option<u64>,
        source: MalformedTimeString,
    },
    InvalidInterval {
        line: Option<u64>,
        start: TimeOfDay,
        end: TimeOfDay,
    },
    InvalidSpot {
        line: Option<u64>,
    },
    DuplicateMachine(DuplicateMachineError),
}

struct Line(Option<u64>);

impl Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(line) => write!(f, "line {}", line),
            None => write!(f, "unknown line"),
        }
    }
}

impl Display for ExchangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExchangeError::Io { path, source } => {
                write!(f, "I/O error on {}: {}", path.display(), source)
            }
            ExchangeError::Csv(e) => write!(f, "CSV error: {}", e),
            ExchangeError::MalformedTimeString { line, source } => {
                write!(f, "{} at {}", source, Line(*line))
            }
            ExchangeError::InvalidInterval { line, start, end } => write!(
                f,
                "InvalidInterval: event at {} has in {} not before out {}",
                Line(*line),
                start,
                end
            ),
            ExchangeError::InvalidSpot { line } => {
                write!(f, "Spots are numbered from 1; spot 0 at {}", Line(*line))
            }
            ExchangeError::DuplicateMachine(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ExchangeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExchangeError::Io { source, .. } => Some(source),
            ExchangeError::Csv(e) => Some(e),
            ExchangeError::MalformedTimeString { source, .. } => Some(source),
            ExchangeError::DuplicateMachine(e) => Some(e),
            _ => None,
        }
    }
}

impl From<csv::Error> for ExchangeError {
    fn from(e: csv::Error) -> Self {
        ExchangeError::Csv(e)
    }
}

impl From<DuplicateMachineError> for ExchangeError {
    fn from(e: DuplicateMachineError) -> Self {
        ExchangeError::DuplicateMachine(e)
    }
}

impl ExchangeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExchangeError::Io {
            path: path.into(),
            source,
        }
    }
}

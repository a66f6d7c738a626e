//! Operational errors. Registry findings are never reported through here;
//! they are collected as `Issue`s instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LintError {
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("read failed in {name} after line {line}: {source}")]
    Read {
        name: String,
        line: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("bad glob pattern '{pattern}': {source}")]
    Glob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    #[error("invalid configuration in {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, LintError>;

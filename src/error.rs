use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to open pairs file '{path}': {source}")]
    OpenPairs {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error reading {source_name} at line {line}: {source}")]
    ReadPairs {
        source_name: String,
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("{source_name} line {line}: expected two words, found {found}")]
    MalformedPair {
        source_name: String,
        line: usize,
        found: usize,
    },

    #[error("failed to read config file '{path}': {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid benchmark config: {0}")]
    InvalidConfig(String),

    #[error("Arrow IPC error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

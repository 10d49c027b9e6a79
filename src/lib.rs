//! Levenshtein edit distance computed two ways (full cost table and two
//! rolling rows), with a worst-case benchmark sweep, word-pair comparison,
//! and JSON / Arrow IPC reporting.

pub mod benchmark;
pub mod compare;
pub mod config;
pub mod error;
pub mod input;
pub mod levenshtein;
pub mod report;
pub mod wasm;

pub use error::{Error, Result};
pub use levenshtein::{for_each_row, full_table_distance, rolling_row_distance, DistanceTable};

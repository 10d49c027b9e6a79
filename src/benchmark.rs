use std::fmt;
use std::mem::size_of;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::BenchConfig;
use crate::error::Result;
use crate::levenshtein::{full_table_distance, rolling_row_distance};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    FullTable,
    RollingRow,
}

impl Variant {
    pub fn name(self) -> &'static str {
        match self {
            Variant::FullTable => "full-table",
            Variant::RollingRow => "rolling-row",
        }
    }

    pub fn distance<T: PartialEq>(self, a: &[T], b: &[T]) -> usize {
        match self {
            Variant::FullTable => full_table_distance(a, b),
            Variant::RollingRow => rolling_row_distance(a, b),
        }
    }

    /// Textbook memory formula in sequence elements: `m * n` for the table,
    /// `n` for the rolling rows.
    pub fn theoretical_cells(self, m: usize, n: usize) -> u64 {
        match self {
            Variant::FullTable => (m as u64).saturating_mul(n as u64),
            Variant::RollingRow => n as u64,
        }
    }

    /// Bytes actually held by the DP buffers, or `None` if the count overflows.
    pub fn allocated_bytes(self, m: usize, n: usize) -> Option<u64> {
        let cell = size_of::<usize>() as u64;
        match self {
            Variant::FullTable => (m as u64 + 1)
                .checked_mul(n as u64 + 1)?
                .checked_mul(cell),
            Variant::RollingRow => (m.min(n) as u64 + 1).checked_mul(2 * cell),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One timed run of one variant at one size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub size: usize,
    pub variant: Variant,
    pub distance: usize,
    pub elapsed_secs: f64,
    pub theoretical_cells: u64,
    pub theoretical_bytes: u64,
    pub allocated_bytes: u64,
}

/// Two sequences of `size` symbols that differ at every position, so their
/// distance is `size`.
pub fn worst_case_sequences(size: usize, symbol_a: u8, symbol_b: u8) -> (Vec<u8>, Vec<u8>) {
    (vec![symbol_a; size], vec![symbol_b; size])
}

pub fn measure(variant: Variant, a: &[u8], b: &[u8]) -> Measurement {
    let start = Instant::now();
    let distance = variant.distance(a, b);
    let elapsed_secs = start.elapsed().as_secs_f64();

    let theoretical_cells = variant.theoretical_cells(a.len(), b.len());
    Measurement {
        size: a.len(),
        variant,
        distance,
        elapsed_secs,
        theoretical_cells,
        theoretical_bytes: theoretical_cells.saturating_mul(size_of::<u8>() as u64),
        allocated_bytes: variant.allocated_bytes(a.len(), b.len()).unwrap_or(u64::MAX),
    }
}

/// Sweeps every configured size with every configured variant.
///
/// Full-table runs whose buffers would exceed `max_full_table_bytes` are
/// skipped with a warning rather than attempted.
pub fn run<F>(config: &BenchConfig, mut on_measurement: F) -> Result<Vec<Measurement>>
where
    F: FnMut(&Measurement),
{
    config.validate()?;
    let symbol_a = config.symbol_a as u8;
    let symbol_b = config.symbol_b as u8;
    let mut measurements = Vec::with_capacity(config.sizes.len() * config.variants.len());

    for &size in &config.sizes {
        let (a, b) = worst_case_sequences(size, symbol_a, symbol_b);

        for &variant in &config.variants {
            if variant == Variant::FullTable {
                let needed = variant.allocated_bytes(size, size);
                if needed.map_or(true, |bytes| bytes > config.max_full_table_bytes) {
                    warn!(
                        size,
                        needed_bytes = needed.unwrap_or(u64::MAX),
                        limit_bytes = config.max_full_table_bytes,
                        "skipping full-table run over the memory limit"
                    );
                    continue;
                }
            }

            let measurement = measure(variant, &a, &b);
            info!(
                size,
                variant = %variant,
                distance = measurement.distance,
                elapsed_secs = measurement.elapsed_secs,
                "measured"
            );
            on_measurement(&measurement);
            measurements.push(measurement);
        }
    }

    Ok(measurements)
}

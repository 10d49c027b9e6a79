use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::benchmark::Variant;
use crate::error::{Error, Result};

/// Sequence lengths swept when no config overrides them.
pub const DEFAULT_SIZES: &[usize] = &[
    10, 20, 40, 80, 160, 320, 640, 1280, 2560, 5120, 10240, 20480, 30000, 40960, 50000, 60000,
    70000, 81920,
];

/// Full tables above this many allocated bytes are skipped (1 GiB).
pub const DEFAULT_MAX_FULL_TABLE_BYTES: u64 = 1 << 30;

/// Benchmark settings, loaded from a TOML file such as:
///
/// ```toml
/// sizes = [10, 100, 1000]
/// symbol_a = "a"
/// symbol_b = "b"
/// variants = ["full-table", "rolling-row"]
/// max_full_table_bytes = 1073741824
/// ```
///
/// Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    pub sizes: Vec<usize>,
    /// Symbol repeated to build the first worst-case sequence.
    pub symbol_a: char,
    /// Symbol repeated to build the second one. Must differ from `symbol_a`.
    pub symbol_b: char,
    pub variants: Vec<Variant>,
    pub max_full_table_bytes: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            sizes: DEFAULT_SIZES.to_vec(),
            symbol_a: 'a',
            symbol_b: 'b',
            variants: vec![Variant::FullTable, Variant::RollingRow],
            max_full_table_bytes: DEFAULT_MAX_FULL_TABLE_BYTES,
        }
    }
}

impl BenchConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        let config: BenchConfig = toml::from_str(&content).map_err(|source| Error::ParseConfig {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings that cannot produce a worst-case sweep.
    pub fn validate(&self) -> Result<()> {
        if self.sizes.is_empty() {
            return Err(Error::InvalidConfig("size list is empty".to_string()));
        }
        if self.sizes.contains(&0) {
            return Err(Error::InvalidConfig("sizes must be at least 1".to_string()));
        }
        if self.variants.is_empty() {
            return Err(Error::InvalidConfig("no variants selected".to_string()));
        }
        for symbol in [self.symbol_a, self.symbol_b] {
            if !symbol.is_ascii() {
                return Err(Error::InvalidConfig(format!(
                    "symbol '{symbol}' is not a single-byte ASCII character"
                )));
            }
        }
        if self.symbol_a == self.symbol_b {
            return Err(Error::InvalidConfig(format!(
                "symbol_a and symbol_b are both '{}'; worst-case input needs two distinct symbols",
                self.symbol_a
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_cover_full_sweep() {
        let config = BenchConfig::default();
        assert_eq!(config.sizes.first(), Some(&10));
        assert_eq!(config.sizes.last(), Some(&81920));
        assert_eq!(config.variants.len(), 2);
        config.validate().unwrap();
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config: BenchConfig = toml::from_str("sizes = [5, 50]\nsymbol_b = \"z\"").unwrap();
        assert_eq!(config.sizes, vec![5, 50]);
        assert_eq!(config.symbol_a, 'a');
        assert_eq!(config.symbol_b, 'z');
        assert_eq!(config.max_full_table_bytes, DEFAULT_MAX_FULL_TABLE_BYTES);
    }

    #[test]
    fn variants_use_kebab_case() {
        let config: BenchConfig = toml::from_str("variants = [\"rolling-row\"]").unwrap();
        assert_eq!(config.variants, vec![Variant::RollingRow]);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<BenchConfig>("sizez = [1]").is_err());
    }

    #[test]
    fn validate_rejects_bad_settings() {
        let empty = BenchConfig {
            sizes: vec![],
            ..BenchConfig::default()
        };
        assert!(matches!(empty.validate(), Err(Error::InvalidConfig(_))));

        let zero = BenchConfig {
            sizes: vec![10, 0],
            ..BenchConfig::default()
        };
        assert!(zero.validate().is_err());

        let same = BenchConfig {
            symbol_b: 'a',
            ..BenchConfig::default()
        };
        assert!(same.validate().is_err());

        let wide = BenchConfig {
            symbol_a: 'é',
            ..BenchConfig::default()
        };
        assert!(wide.validate().is_err());

        let none = BenchConfig {
            variants: vec![],
            ..BenchConfig::default()
        };
        assert!(none.validate().is_err());
    }

    #[test]
    fn load_reads_and_validates_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sizes = [3, 6]").unwrap();
        writeln!(file, "max_full_table_bytes = 4096").unwrap();
        let config = BenchConfig::load(file.path()).unwrap();
        assert_eq!(config.sizes, vec![3, 6]);
        assert_eq!(config.max_full_table_bytes, 4096);

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        writeln!(bad, "symbol_a = \"b\"").unwrap();
        assert!(matches!(
            BenchConfig::load(bad.path()),
            Err(Error::InvalidConfig(_))
        ));

        let mut broken = tempfile::NamedTempFile::new().unwrap();
        writeln!(broken, "sizes = [").unwrap();
        assert!(matches!(
            BenchConfig::load(broken.path()),
            Err(Error::ParseConfig { .. })
        ));
    }
}

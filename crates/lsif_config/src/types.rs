//! Configuration types deserialized from `lsif.toml`.

use serde::Deserialize;
use std::path::PathBuf;

/// The top-level configuration. Every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Cache storage settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Upload checksum settings.
    #[serde(default)]
    pub checksum: ChecksumConfig,
    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Where identifier caches keep their entries.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Storage backend.
    #[serde(default)]
    pub storage: StorageKind,
    /// Directory for disk-backed caches; the system temporary directory when
    /// absent.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Cache storage backend selection.
#[derive(Debug, Default, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// Temporary files on disk (default).
    #[default]
    Disk,
    /// A hash map in memory.
    Memory,
}

/// Upload checksum settings.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChecksumConfig {
    /// Restrict digests to FIPS-approved algorithms.
    #[serde(default)]
    pub fips: bool,
}

/// Logging settings.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Default log level when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Log levels accepted in `log.level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

//! Configuration discovery for the CLI.

use std::path::{Path, PathBuf};

use lsif_cache::{CacheOptions, Storage};
use lsif_config::{load_config, Config, ConfigError, StorageKind, CONFIG_FILE};

/// Loads the configuration from `explicit`, or from `./lsif.toml` when it
/// exists, or falls back to defaults.
pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    match explicit {
        Some(path) => load_config(path),
        None => {
            let local = PathBuf::from(CONFIG_FILE);
            if local.is_file() {
                load_config(&local)
            } else {
                Ok(Config::default())
            }
        }
    }
}

/// Builds cache options from the configuration, honoring a `--memory`
/// override.
pub fn cache_options(config: &Config, force_memory: bool) -> CacheOptions {
    let storage = match (force_memory, config.cache.storage) {
        (true, _) | (false, StorageKind::Memory) => Storage::Memory,
        (false, StorageKind::Disk) => Storage::Disk,
    };
    CacheOptions {
        storage,
        dir: config.cache.dir.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lsif_config::load_config_from_str;

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[cache]\nstorage = \"memory\"\n").unwrap();
        let config = load(Some(&path)).unwrap();
        assert_eq!(config.cache.storage, StorageKind::Memory);
    }

    #[test]
    fn missing_explicit_path_errors() {
        assert!(load(Some(Path::new("/nonexistent/lsif.toml"))).is_err());
    }

    #[test]
    fn default_is_disk_in_temp_dir() {
        let options = cache_options(&Config::default(), false);
        assert_eq!(options.storage, Storage::Disk);
        assert!(options.dir.is_none());
    }

    #[test]
    fn memory_flag_overrides_config() {
        let config = load_config_from_str("[cache]\nstorage = \"disk\"\ndir = \"/tmp/x\"\n").unwrap();
        let options = cache_options(&config, true);
        assert_eq!(options.storage, Storage::Memory);
        assert_eq!(options.dir, Some(PathBuf::from("/tmp/x")));
    }

    #[test]
    fn memory_from_config() {
        let config = load_config_from_str("[cache]\nstorage = \"memory\"\n").unwrap();
        assert_eq!(cache_options(&config, false).storage, Storage::Memory);
    }
}

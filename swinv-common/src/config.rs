//! Configuration loading and lookup-store path resolution

use std::path::{Path, PathBuf};
use tracing::info;

/// Lookup-store connection configuration.
///
/// Built once in `main` and passed down explicitly; there is no
/// process-wide connection state.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database holding the software metadata table
    pub database_path: PathBuf,
}

impl DbConfig {
    /// Resolve the database path with the following priority order:
    /// 1. Command-line argument (highest priority)
    /// 2. `SWINV_DATABASE` environment variable
    /// 3. TOML config file (`database_path` key)
    /// 4. OS-dependent compiled default (fallback)
    pub fn resolve(cli_arg: Option<&Path>) -> Self {
        // Priority 1: Command-line argument
        if let Some(path) = cli_arg {
            info!("Database path from command line: {}", path.display());
            return Self {
                database_path: path.to_path_buf(),
            };
        }

        // Priority 2: Environment variable
        if let Ok(path) = std::env::var("SWINV_DATABASE") {
            info!("Database path from SWINV_DATABASE: {}", path);
            return Self {
                database_path: PathBuf::from(path),
            };
        }

        // Priority 3: TOML config file
        if let Some(config_path) = find_config_file() {
            if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
                if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                    if let Some(path) = config.get("database_path").and_then(|v| v.as_str()) {
                        info!(
                            "Database path from {}: {}",
                            config_path.display(),
                            path
                        );
                        return Self {
                            database_path: PathBuf::from(path),
                        };
                    }
                }
            }
        }

        // Priority 4: OS-dependent compiled default
        let path = default_database_path();
        info!("Database path defaulted to {}", path.display());
        Self {
            database_path: path,
        }
    }
}

/// Locate the configuration file for the platform, if one exists
fn find_config_file() -> Option<PathBuf> {
    // ~/.config/swinv/config.toml (or the platform equivalent)
    if let Some(path) = dirs::config_dir().map(|d| d.join("swinv").join("config.toml")) {
        if path.exists() {
            return Some(path);
        }
    }

    // /etc/swinv/config.toml as a system-wide fallback on Linux
    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/swinv/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// OS-dependent default database location
fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("swinv").join("swinv.db"))
        .unwrap_or_else(|| PathBuf::from("./swinv.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_arg_takes_priority() {
        let config = DbConfig::resolve(Some(Path::new("/tmp/custom.db")));
        assert_eq!(config.database_path, PathBuf::from("/tmp/custom.db"));
    }

    #[test]
    fn test_default_path_is_nonempty() {
        let path = default_database_path();
        assert!(path.to_string_lossy().contains("swinv"));
    }
}

// Configuration loading and parsing (config/homerun.toml).

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// CSV dataset path, relative to the working directory unless absolute.
    pub data_path: PathBuf,
    pub port: u16,
    pub histogram_bins: usize,
}

// ---------------------------------------------------------------------------
// homerun.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire homerun.toml file.
#[derive(Debug, Clone, Deserialize)]
struct HomerunFile {
    data: DataSection,
    server: ServerSection,
    #[serde(default)]
    charts: ChartsSection,
}

#[derive(Debug, Clone, Deserialize)]
struct DataSection {
    path: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ServerSection {
    port: u16,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartsSection {
    #[serde(default = "default_histogram_bins")]
    histogram_bins: usize,
}

impl Default for ChartsSection {
    fn default() -> Self {
        Self {
            histogram_bins: default_histogram_bins(),
        }
    }
}

fn default_histogram_bins() -> usize {
    homerun_core::profile::DEFAULT_HISTOGRAM_BINS
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

const CONFIG_FILE: &str = "homerun.toml";

/// Load and validate configuration from `config/homerun.toml` relative to
/// `base_dir`. Does not copy defaults; see [`load_config`].
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let file: HomerunFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    let config = Config {
        data_path: PathBuf::from(file.data.path),
        port: file.server.port,
        histogram_bins: file.charts.histogram_bins,
    };

    validate(&config)?;

    Ok(config)
}

/// Seed `config/homerun.toml` from `defaults/homerun.toml` when it is
/// missing. Returns `true` if the file was copied; an existing config is
/// never overwritten.
pub fn seed_config(base_dir: &Path) -> Result<bool, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE);
    if target.exists() {
        return Ok(false);
    }
    let source = base_dir.join("defaults").join(CONFIG_FILE);
    if !source.exists() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "neither config/{CONFIG_FILE} nor defaults/{CONFIG_FILE} found in {}",
                base_dir.display()
            ),
        });
    }

    let copy = |e: std::io::Error| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {} to {}: {e}", source.display(), target.display()),
    };
    std::fs::create_dir_all(base_dir.join("config")).map_err(copy)?;
    std::fs::copy(&source, &target).map_err(copy)?;
    info!("Seeded {} from defaults", target.display());
    Ok(true)
}

/// Load config relative to the current working directory, copying defaults
/// first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    seed_config(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.data_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.path".into(),
            message: "must not be empty".into(),
        });
    }

    if config.port == 0 {
        return Err(ConfigError::ValidationError {
            field: "server.port".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.histogram_bins == 0 {
        return Err(ConfigError::ValidationError {
            field: "charts.histogram_bins".into(),
            message: "must be greater than 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Fresh scratch directory under the system temp dir.
    fn scratch(name: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(format!("homerun_{name}"));
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();
        tmp
    }

    fn write_config(base: &Path, text: &str) {
        let config_dir = base.join("config");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join(CONFIG_FILE), text).unwrap();
    }

    #[test]
    fn load_valid_config_from_defaults() {
        let tmp = scratch("config_defaults");
        let config_dir = tmp.join("config");
        fs::create_dir_all(&config_dir).unwrap();
        fs::copy("defaults/homerun.toml", config_dir.join(CONFIG_FILE)).unwrap();

        let config = load_config_from(&tmp).expect("should load default config");
        assert_eq!(config.data_path, PathBuf::from("data/homeruns.csv"));
        assert_eq!(config.port, 8050);
        assert_eq!(config.histogram_bins, 20);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn charts_section_is_optional() {
        let tmp = scratch("config_no_charts");
        write_config(
            &tmp,
            r#"
[data]
path = "x.csv"

[server]
port = 9000
"#,
        );

        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.histogram_bins, 20);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_port() {
        let tmp = scratch("config_zero_port");
        write_config(
            &tmp,
            r#"
[data]
path = "x.csv"

[server]
port = 0
"#,
        );

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "server.port"),
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_bins() {
        let tmp = scratch("config_zero_bins");
        write_config(
            &tmp,
            r#"
[data]
path = "x.csv"

[server]
port = 8050

[charts]
histogram_bins = 0
"#,
        );

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "charts.histogram_bins")
            }
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_empty_data_path() {
        let tmp = scratch("config_empty_path");
        write_config(
            &tmp,
            r#"
[data]
path = ""

[server]
port = 8050
"#,
        );

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "data.path"),
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_config() {
        let tmp = scratch("config_missing");

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::FileNotFound { path } => assert!(path.ends_with(CONFIG_FILE)),
            other => panic!("expected FileNotFound, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = scratch("config_invalid");
        write_config(&tmp, "this is not valid [[[ toml");

        let err = load_config_from(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn seed_config_copies_missing_file() {
        let tmp = scratch("config_seed_copies");
        let defaults_dir = tmp.join("defaults");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::copy("defaults/homerun.toml", defaults_dir.join(CONFIG_FILE)).unwrap();

        assert!(seed_config(&tmp).expect("should succeed"));
        assert!(tmp.join("config").join(CONFIG_FILE).exists());
        assert!(load_config_from(&tmp).is_ok());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn seed_config_keeps_existing_file() {
        let tmp = scratch("config_seed_keeps");
        let defaults_dir = tmp.join("defaults");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::copy("defaults/homerun.toml", defaults_dir.join(CONFIG_FILE)).unwrap();
        write_config(&tmp, "# custom\n");

        assert!(!seed_config(&tmp).expect("should succeed"));
        let content = fs::read_to_string(tmp.join("config").join(CONFIG_FILE)).unwrap();
        assert_eq!(content, "# custom\n");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn seed_config_errors_when_nothing_to_copy() {
        let tmp = scratch("config_seed_missing");

        let err = seed_config(&tmp).unwrap_err();
        match &err {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("defaults/homerun.toml"));
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }
}

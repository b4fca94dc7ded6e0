use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_watchlist_file")]
    pub watchlist_file: PathBuf,
    #[serde(default = "default_countries_file")]
    pub countries_file: PathBuf,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            watchlist_file: default_watchlist_file(),
            countries_file: default_countries_file(),
            logging: LoggingConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: Format,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: Format,
}

/// Rendering used for logs and for decision output.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    #[default]
    Text,
    Json,
}

// ---------------------------------------------------------------------------
// Default-value functions used by serde
// ---------------------------------------------------------------------------

fn default_watchlist_file() -> PathBuf {
    PathBuf::from("watchlist.json")
}

fn default_countries_file() -> PathBuf {
    PathBuf::from("countries.json")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> Format {
    Format::Json
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

/// Load configuration from a YAML file.
///
/// If the file does not exist a default configuration is returned, so the
/// office can run against the reference files in the working directory
/// without any setup.  The flag is `false` in that case; the caller reports
/// the fallback once logging is up.
pub fn load(path: &Path) -> anyhow::Result<(Config, bool)> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok((Config::default(), false)),
        Err(e) => anyhow::bail!("failed to read config file {}: {e}", path.display()),
    };

    let config = parse(&contents)
        .map_err(|e| anyhow::anyhow!("failed to parse config file {}: {e}", path.display()))?;
    Ok((config, true))
}

fn parse(yaml: &str) -> Result<Config, serde_yml::Error> {
    serde_yml::from_str(yaml)
}

//! Locating and reading the TOML configuration file.
//!
//! The file may set any subset of the `[inference]` and `[render]` sections
//! of [`AppConfig`]; everything else keeps its default.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use plotgraph::{PlotgraphError, config::AppConfig};

/// Per-project configuration file, relative to the working directory.
const LOCAL_CONFIG: &str = "plotgraph/config.toml";

/// Problems with a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Invalid TOML in {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Invalid setting in {}: {message}", .path.display())]
    Validation { path: PathBuf, message: String },
}

impl From<ConfigError> for PlotgraphError {
    fn from(err: ConfigError) -> Self {
        PlotgraphError::Config(err.to_string())
    }
}

/// Where a configuration file was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    /// Named with `--config`.
    Explicit,
    /// `plotgraph/config.toml` under the working directory.
    Local,
    /// The platform configuration directory.
    System,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Origin::Explicit => "explicit",
            Origin::Local => "local",
            Origin::System => "system",
        })
    }
}

/// Returns the configuration file to use, if any.
///
/// An explicit path is always used, even if it does not exist. Otherwise
/// the local file wins over the one in the platform configuration directory.
fn locate(explicit_path: Option<&Path>) -> Option<(Origin, PathBuf)> {
    if let Some(path) = explicit_path {
        return Some((Origin::Explicit, path.to_path_buf()));
    }

    let local = PathBuf::from(LOCAL_CONFIG);
    if local.is_file() {
        return Some((Origin::Local, local));
    }

    let Some(dirs) = ProjectDirs::from("com", "plotgraph", "plotgraph") else {
        debug!("No platform configuration directory");
        return None;
    };
    let system = dirs.config_dir().join("config.toml");
    if system.is_file() {
        return Some((Origin::System, system));
    }
    debug!(path:% = system.display(); "System configuration file not found");
    None
}

/// Loads the configuration for this run.
///
/// # Errors
///
/// Fails if an explicitly named file is missing, or if the chosen file
/// cannot be read, is not valid TOML, or has an unusable inline pattern.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, PlotgraphError> {
    let explicit_path: Option<&Path> = explicit_path.as_ref().map(|path| path.as_ref());
    let Some((origin, path)) = locate(explicit_path) else {
        debug!("No configuration file found, using defaults");
        return Ok(AppConfig::default());
    };

    info!(origin:% = origin, path:% = path.display(); "Loading configuration");
    read_config_file(&path)
}

fn read_config_file(path: &Path) -> Result<AppConfig, PlotgraphError> {
    if !path.is_file() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.message().to_string(),
    })?;

    if let Err(err) = config.inference().inline_regex() {
        return Err(ConfigError::Validation {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
        .into());
    }

    Ok(config)
}

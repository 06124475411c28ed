use std::fs;
use std::path::{Path, PathBuf};

use super::core::DeviqConfig;
use crate::errors::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".deviq.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse and validate config from a TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<DeviqConfig> {
    let config = toml::from_str::<DeviqConfig>(contents)?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from an explicit path. Errors are returned, not masked:
/// a path the user named must exist and be valid.
pub fn load_config_from_path(path: &Path) -> Result<DeviqConfig> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::from(e).with_context(format!("reading {}", path.display())))?;
    let config = parse_and_validate_config(&contents)
        .map_err(|e| e.with_context(format!("loading {}", path.display())))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Try loading config from a discovered location; problems are logged and skipped.
fn try_load_config_from_path(config_path: &Path) -> Option<DeviqConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("Ignoring {}: {}. Using defaults.", config_path.display(), e);
            None
        }
    }
}

// Only log actual errors, not "file not found"
fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Per-user configuration file, e.g. `~/.config/deviq/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("deviq").join("config.toml"))
}

/// Find configuration starting at `start`: nearest `.deviq.toml` up the
/// directory tree, then the user config file, then defaults.
pub fn discover_config(start: PathBuf) -> DeviqConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .chain(user_config_path())
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!("No config found. Using default config.");
            DeviqConfig::default()
        })
}

/// Resolve the configuration for a run: explicit path if given, otherwise discovery
/// from the current directory.
pub fn load_config(explicit: Option<&Path>) -> Result<DeviqConfig> {
    match explicit {
        Some(path) => load_config_from_path(path),
        None => match std::env::current_dir() {
            Ok(dir) => Ok(discover_config(dir)),
            Err(e) => {
                log::warn!(
                    "Failed to get current directory: {}. Using default config.",
                    e
                );
                Ok(DeviqConfig::default())
            }
        },
    }
}

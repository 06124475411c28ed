use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::config::{DeviqConfig, CONFIG_FILE_NAME};
use crate::io;

const HEADER: &str = "# DevIQ configuration\n# Every key is optional; omitted keys keep their defaults.\n\n";

/// Render the default configuration as commented TOML.
pub fn default_config_toml() -> Result<String> {
    let body = toml::to_string_pretty(&DeviqConfig::default())?;
    Ok(format!("{}{}", HEADER, body))
}

pub fn init_config_in(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if io::file_exists(&config_path) && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, &default_config_toml()?)?;
    Ok(config_path)
}

pub fn init_config(force: bool) -> Result<()> {
    let path = init_config_in(Path::new("."), force)?;
    println!("Created {} configuration file", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_and_validate_config;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_parses_back() {
        let toml = default_config_toml().unwrap();
        let config = parse_and_validate_config(&toml).unwrap();
        assert_eq!(config, DeviqConfig::default());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        init_config_in(dir.path(), false).unwrap();
        assert!(init_config_in(dir.path(), false).is_err());
        assert!(init_config_in(dir.path(), true).is_ok());
    }
}

pub mod output;

use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use crate::errors::{Result, ResultExt};

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).context(format!("Failed to read {}", path.display()))
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    fs::write(path, content).context(format!("Failed to write {}", path.display()))
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

pub fn file_exists(path: &Path) -> bool {
    path.exists() && path.is_file()
}

/// Read and deserialize a JSON document.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = read_file(path)?;
    serde_json::from_str(&contents).context(format!("Invalid JSON in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reports/nested/out.json");
        write_file(&path, "{\"ok\": true}").unwrap();
        assert!(file_exists(&path));

        let value: serde_json::Value = read_json(&path).unwrap();
        assert_eq!(value["ok"], true);
    }

    #[test]
    fn test_read_missing_file_has_context() {
        let err = read_file(Path::new("/definitely/missing.json")).unwrap_err();
        assert!(err.to_string().contains("/definitely/missing.json"));
    }
}

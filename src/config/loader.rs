//! Load platform definitions from disk.

use crate::config::types::PlatformConfig;
use crate::error::BuildError;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the declarative definition inside each platform directory.
pub const PLATFORM_CONFIG_FILE: &str = "massdriver.yaml";

/// Parse one massdriver.yaml. A malformed document is a hard error; callers
/// decide what a missing file means (the orchestrator skips those).
pub fn load_platform_config(path: &Path) -> Result<PlatformConfig, BuildError> {
    let raw = fs::read_to_string(path).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&raw).map_err(|source| BuildError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Subdirectories of the platforms root, sorted by name.
pub fn platform_dirs(root: &Path) -> Result<Vec<PathBuf>, BuildError> {
    let entries = fs::read_dir(root).map_err(|source| BuildError::Io {
        path: root.to_path_buf(),
        source,
    })?;
    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| BuildError::Io {
            path: root.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn lists_only_directories_sorted() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("beta")).unwrap();
        fs::create_dir(root.path().join("alpha")).unwrap();
        fs::write(root.path().join("stray.txt"), "not a platform").unwrap();

        let dirs = platform_dirs(root.path()).unwrap();
        let names: Vec<_> = dirs
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["alpha", "beta"]);
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PLATFORM_CONFIG_FILE);
        fs::write(&path, "name: [unterminated\n").unwrap();
        match load_platform_config(&path) {
            Err(BuildError::Parse { .. }) => {}
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn absent_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PLATFORM_CONFIG_FILE);
        match load_platform_config(&path) {
            Err(BuildError::Io { .. }) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}

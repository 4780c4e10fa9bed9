//! Build orchestrator: compile platform definitions into dist artifacts.

pub mod artifact;
pub mod envelope;

pub use artifact::{merge_with_schema, write_artifact, MD_KEY};
pub use envelope::{assemble, MdBlock};

use crate::config::{load_platform_config, platform_dirs, PLATFORM_CONFIG_FILE};
use crate::error::BuildError;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct BuildOptions {
    pub platforms_root: PathBuf,
    pub out_dir: PathBuf,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub built: usize,
    pub skipped: usize,
}

/// Build every platform under the root, or only the named subset.
/// Missing definitions and unknown names warn and skip; parse and io errors
/// abort the whole run.
pub fn build_platforms(options: &BuildOptions, selected: &[String]) -> Result<BuildSummary, BuildError> {
    let root = &options.platforms_root;
    if !root.is_dir() {
        return Err(BuildError::RootMissing(root.clone()));
    }

    let dirs: Vec<PathBuf> = if selected.is_empty() {
        tracing::info!(root = %root.display(), "building all platforms");
        platform_dirs(root)?
    } else {
        tracing::info!(platforms = ?selected, "building selected platforms");
        let mut dirs = Vec::with_capacity(selected.len());
        for name in selected {
            let dir = root.join(name);
            if dir.is_dir() {
                dirs.push(dir);
            } else {
                tracing::warn!(platform = %name, "platform directory not found, skipping");
            }
        }
        dirs
    };

    let mut summary = BuildSummary::default();
    summary.skipped = selected.len().saturating_sub(dirs.len());
    for dir in dirs {
        if build_one(&dir, &options.out_dir)? {
            summary.built += 1;
        } else {
            summary.skipped += 1;
        }
    }
    Ok(summary)
}

/// Build a single platform directory. Returns false when skipped for a
/// missing definition file.
fn build_one(platform_dir: &Path, out_dir: &Path) -> Result<bool, BuildError> {
    let platform_name = platform_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let config_path = platform_dir.join(PLATFORM_CONFIG_FILE);
    if !config_path.is_file() {
        tracing::warn!(platform = %platform_name, "no {PLATFORM_CONFIG_FILE} found, skipping");
        return Ok(false);
    }

    tracing::info!(platform = %platform_name, "building platform");
    let config = load_platform_config(&config_path)?;
    let md = assemble(&config, platform_dir)?;
    let merged = merge_with_schema(md, &config.schema)?;
    let written = write_artifact(out_dir, &config.name, &merged)?;
    tracing::info!(artifact = %written.display(), "built");
    Ok(true)
}

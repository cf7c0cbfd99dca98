//! LaunchProfile and config path resolution.
use std::path::{Path, PathBuf};

use crate::{
    config::{ConfigOverrides, DEFAULT_CONFIG_PATH},
    lib::env::{EnvSnapshot, CONFIG_PATH_ENV},
};

/// Where the config file path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPathSource {
    Cli,
    Env,
    Default,
    Missing,
}

impl ConfigPathSource {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigPathSource::Cli => "cli",
            ConfigPathSource::Env => "env",
            ConfigPathSource::Default => "default",
            ConfigPathSource::Missing => "none",
        }
    }
}

/// Resolved launch profile.
#[derive(Debug, Clone)]
pub struct LaunchProfile {
    pub config_path: Option<PathBuf>,
    pub config_source: ConfigPathSource,
    pub overrides: ConfigOverrides,
    pub dry_run: bool,
    pub launch_args: Vec<String>,
}

/// Resolve config path in the order: CLI override → env var → `sheet-push.toml` if present.
///
/// Explicit paths are returned even when the file is absent so loading reports it.
pub fn resolve_config_path(
    override_path: Option<PathBuf>,
    env: &EnvSnapshot,
    cwd: &Path,
) -> (Option<PathBuf>, ConfigPathSource) {
    let absolute = |path: PathBuf| {
        if path.is_absolute() {
            path
        } else {
            cwd.join(path)
        }
    };

    if let Some(path) = override_path {
        return (Some(absolute(path)), ConfigPathSource::Cli);
    }
    if let Some(path) = env.get(CONFIG_PATH_ENV) {
        return (Some(absolute(PathBuf::from(path))), ConfigPathSource::Env);
    }

    let default = cwd.join(DEFAULT_CONFIG_PATH);
    if default.is_file() {
        return (Some(default), ConfigPathSource::Default);
    }
    (None, ConfigPathSource::Missing)
}

/// Build launch arguments suitable for reproduction/logging. Secrets are never included.
pub fn build_launch_args(
    config: Option<&Path>,
    overrides: &ConfigOverrides,
    dry_run: bool,
) -> Vec<String> {
    let mut args = Vec::new();
    if let Some(config) = config {
        args.push(format!("--config={}", config.display()));
    }
    if let Some(id) = &overrides.spreadsheet_id {
        args.push(format!("--sheet-id={id}"));
    }
    if let Some(path) = &overrides.source_path {
        args.push(format!("--source={path}"));
    }
    if let Some(pattern) = &overrides.source_pattern {
        args.push(format!("--latest={pattern}"));
    }
    if let Some(format) = overrides.format {
        args.push(format!("--format={}", format.as_str().replace('_', "-")));
    }
    if dry_run {
        args.push("--dry-run".into());
    }
    args
}

//! Locate the report file to upload.
use std::{fmt, path::PathBuf};

use glob::glob;
use serde::Serialize;
use tracing::{debug, info};

use crate::lib::{errors::SourceError, fs::is_regular_file};

/// Where the report file comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    /// A single fixed path.
    Fixed(PathBuf),
    /// The lexicographically last regular file matching a glob pattern.
    Latest { pattern: String },
}

impl fmt::Display for SourceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceSpec::Fixed(path) => write!(f, "path `{}`", path.display()),
            SourceSpec::Latest { pattern } => write!(f, "pattern `{pattern}`"),
        }
    }
}

/// What to do when no report file is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPolicy {
    /// Exit successfully without uploading.
    Skip,
    /// Treat the absence as a fatal error.
    Fail,
}

impl MissingPolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            MissingPolicy::Skip => "skip",
            MissingPolicy::Fail => "fail",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "skip" => Some(MissingPolicy::Skip),
            "fail" => Some(MissingPolicy::Fail),
            _ => None,
        }
    }

    /// `Ok(())` means "skip quietly"; `Err` carries the fatal error.
    pub fn apply(&self, spec: &SourceSpec) -> Result<(), SourceError> {
        match self {
            MissingPolicy::Skip => Ok(()),
            MissingPolicy::Fail => Err(SourceError::Missing {
                location: spec.to_string(),
            }),
        }
    }
}

/// A resolved report file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportFile {
    pub path: PathBuf,
    /// Number of candidates considered (1 in fixed-path mode).
    pub candidates: usize,
}

/// Resolve `spec` to a report file, or `None` when nothing is present.
pub fn resolve_source(spec: &SourceSpec) -> Result<Option<ReportFile>, SourceError> {
    match spec {
        SourceSpec::Fixed(path) => {
            if !is_regular_file(path) {
                info!(
                    target: "sheet_push::source",
                    path = %path.display(),
                    "Report file not present"
                );
                return Ok(None);
            }
            Ok(Some(ReportFile {
                path: path.clone(),
                candidates: 1,
            }))
        }
        SourceSpec::Latest { pattern } => {
            let candidates = list_candidates(pattern)?;
            let count = candidates.len();
            let latest = select_latest(candidates);
            match &latest {
                Some(path) => info!(
                    target: "sheet_push::source",
                    pattern = %pattern,
                    candidates = count,
                    selected = %path.display(),
                    "Selected latest report file"
                ),
                None => info!(
                    target: "sheet_push::source",
                    pattern = %pattern,
                    "No report file matched pattern"
                ),
            }
            Ok(latest.map(|path| ReportFile {
                path,
                candidates: count,
            }))
        }
    }
}

/// Enumerate regular files matching `pattern`.
pub fn list_candidates(pattern: &str) -> Result<Vec<PathBuf>, SourceError> {
    let entries = glob(pattern).map_err(|source| SourceError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|source| SourceError::Glob {
            pattern: pattern.to_string(),
            source,
        })?;
        if is_regular_file(&path) {
            paths.push(path);
        } else {
            debug!(
                target: "sheet_push::source",
                path = %path.display(),
                "Ignoring non-file match"
            );
        }
    }
    Ok(paths)
}

/// Pick the path whose string form sorts last.
///
/// Correct as "most recent" only while every candidate embeds a timestamp of
/// the same format and width.
pub fn select_latest(mut candidates: Vec<PathBuf>) -> Option<PathBuf> {
    candidates.sort_by(|a, b| a.to_string_lossy().cmp(&b.to_string_lossy()));
    candidates.pop()
}

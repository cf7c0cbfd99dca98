use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::sheets::non_blank;
use crate::{
    lib::errors::ConfigError,
    report::ReportFormat,
    source::{MissingPolicy, SourceSpec},
};

pub const DEFAULT_SOURCE_PATH: &str = "reports/exports/latest_export.csv";

/// Report input settings.
#[derive(Debug, Clone)]
pub struct SourceSection {
    pub spec: SourceSpec,
    pub format: ReportFormat,
    pub on_missing: MissingPolicy,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawSourceSection {
    pub path: Option<String>,
    pub pattern: Option<String>,
    pub format: Option<String>,
    pub on_missing: Option<String>,
}

pub fn parse_source_section(
    raw: Option<RawSourceSection>,
    path: &Path,
) -> Result<SourceSection, ConfigError> {
    let source_raw = raw.unwrap_or_default();

    let spec = match (non_blank(source_raw.path), non_blank(source_raw.pattern)) {
        (Some(_), Some(_)) => {
            return Err(ConfigError::InvalidField {
                path: path.to_path_buf(),
                field: "source",
                message: "Set either `path` or `pattern`, not both".into(),
            })
        }
        (Some(fixed), None) => SourceSpec::Fixed(PathBuf::from(fixed)),
        (None, Some(pattern)) => {
            validate_pattern(path, &pattern)?;
            SourceSpec::Latest { pattern }
        }
        (None, None) => SourceSpec::Fixed(PathBuf::from(DEFAULT_SOURCE_PATH)),
    };

    let format = match non_blank(source_raw.format) {
        None => ReportFormat::Csv,
        Some(raw) => ReportFormat::parse(&raw).ok_or_else(|| ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "source.format",
            message: format!("Use `csv` or `key_value` (got `{raw}`)"),
        })?,
    };

    let on_missing = match non_blank(source_raw.on_missing) {
        None => MissingPolicy::Skip,
        Some(raw) => MissingPolicy::parse(&raw).ok_or_else(|| ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "source.on_missing",
            message: format!("Use `skip` or `fail` (got `{raw}`)"),
        })?,
    };

    Ok(SourceSection {
        spec,
        format,
        on_missing,
    })
}

fn validate_pattern(path: &Path, pattern: &str) -> Result<(), ConfigError> {
    glob::Pattern::new(pattern)
        .map(|_| ())
        .map_err(|err| ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "source.pattern",
            message: format!("`{pattern}` is not a valid glob: {err}"),
        })
}

use std::path::Path;

use serde::Deserialize;

use super::sheets::non_blank;
use crate::{
    lib::errors::ConfigError,
    sheets::{TabNaming, DEFAULT_TAB_PREFIX},
};

const MAX_PREFIX_CHARS: usize = 50;

/// Destination tab settings.
#[derive(Debug, Clone)]
pub struct TabSection {
    pub prefix: String,
    pub naming: TabNaming,
    pub cleanup_on_failure: bool,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawTabSection {
    pub prefix: Option<String>,
    pub naming: Option<String>,
    pub cleanup_on_failure: Option<bool>,
}

pub fn parse_tab_section(
    raw: Option<RawTabSection>,
    path: &Path,
) -> Result<TabSection, ConfigError> {
    let tab_raw = raw.unwrap_or_default();

    let prefix = tab_raw
        .prefix
        .unwrap_or_else(|| DEFAULT_TAB_PREFIX.to_string());
    validate_prefix(path, &prefix)?;

    let naming = match non_blank(tab_raw.naming) {
        None => TabNaming::Unique,
        Some(raw) => TabNaming::parse(&raw).ok_or_else(|| ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "tab.naming",
            message: format!("Use `unique` or `minute` (got `{raw}`)"),
        })?,
    };

    Ok(TabSection {
        prefix,
        naming,
        cleanup_on_failure: tab_raw.cleanup_on_failure.unwrap_or(true),
    })
}

fn validate_prefix(path: &Path, prefix: &str) -> Result<(), ConfigError> {
    let count = prefix.chars().count();
    if count == 0 || count > MAX_PREFIX_CHARS || prefix.chars().any(char::is_control) {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "tab.prefix",
            message: format!(
                "Provide 1-{MAX_PREFIX_CHARS} printable characters (got {count})"
            ),
        });
    }
    if prefix.contains('\'') {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "tab.prefix",
            message: "Single quotes are not allowed in the tab prefix".into(),
        });
    }
    Ok(())
}

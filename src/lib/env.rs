//! Captured process environment, passed explicitly instead of read ad hoc.

use std::collections::HashMap;

/// Spreadsheet identifier.
pub const SHEET_ID_ENV: &str = "SHEET_ID";
/// Base64-encoded service-account credential document.
pub const CREDENTIALS_ENV: &str = "GOOGLE_SHEETS_CREDENTIALS_BASE64";
/// Optional path to the TOML configuration file.
pub const CONFIG_PATH_ENV: &str = "SHEET_PUSH_CONFIG";

/// Immutable snapshot of the environment variables this tool reads.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the relevant variables from the current process.
    pub fn capture() -> Self {
        Self::from_pairs(
            [SHEET_ID_ENV, CREDENTIALS_ENV, CONFIG_PATH_ENV]
                .into_iter()
                .filter_map(|key| std::env::var(key).ok().map(|value| (key, value))),
        )
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Returns the trimmed value, treating blank values as unset.
    pub fn get(&self, key: &str) -> Option<String> {
        self.vars
            .get(key)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }
}

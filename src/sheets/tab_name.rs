use chrono::{DateTime, Utc};
use serde::Serialize;

/// Prefix used when the configuration does not override it.
pub const DEFAULT_TAB_PREFIX: &str = "Run-";

/// How the destination tab title is derived from the run instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TabNaming {
    /// `<prefix>YYYY-MM-DDTHH-MM-SS-<suffix>`; distinct across rapid reruns.
    Unique,
    /// `<prefix>YYYY-MM-DDTHH-MM`; two runs in the same minute collide.
    Minute,
}

impl TabNaming {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TabNaming::Unique => "unique",
            TabNaming::Minute => "minute",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "unique" => Some(TabNaming::Unique),
            "minute" => Some(TabNaming::Minute),
            _ => None,
        }
    }
}

/// Build the tab title for a run started at `now`.
///
/// The timestamp is the UTC ISO-8601 form with `:` and `.` replaced by `-`,
/// cut at minute (`Minute`) or second (`Unique`) precision.
pub fn tab_name(prefix: &str, naming: TabNaming, now: DateTime<Utc>, suffix: &str) -> String {
    match naming {
        TabNaming::Minute => format!("{prefix}{}", now.format("%Y-%m-%dT%H-%M")),
        TabNaming::Unique => format!("{prefix}{}-{suffix}", now.format("%Y-%m-%dT%H-%M-%S")),
    }
}

//! CLI argument definitions and `LaunchProfile` construction.
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use super::{build_launch_args, resolve_config_path, LaunchProfile};
use crate::{
    config::ConfigOverrides,
    lib::env::{EnvSnapshot, CREDENTIALS_ENV, SHEET_ID_ENV},
    report::ReportFormat,
};

/// Report format selectable on the command line.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum FormatArg {
    /// Comma-separated values, one record per line.
    Csv,
    /// `key: value` pairs, one per line.
    KeyValue,
}

impl From<FormatArg> for ReportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => ReportFormat::Csv,
            FormatArg::KeyValue => ReportFormat::KeyValue,
        }
    }
}

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    author,
    version,
    about = "Upload the latest report file as a new tab in a Google spreadsheet",
    long_about = None,
    after_help = "Environment: SHEET_ID, GOOGLE_SHEETS_CREDENTIALS_BASE64, SHEET_PUSH_CONFIG, RUST_LOG"
)]
pub struct LaunchProfileArgs {
    /// Path to a TOML config file (overrides SHEET_PUSH_CONFIG).
    #[arg(long = "config")]
    pub config_override: Option<PathBuf>,
    /// Spreadsheet ID (overrides SHEET_ID and the config file).
    #[arg(long = "sheet-id")]
    pub sheet_id: Option<String>,
    /// Upload this report file.
    #[arg(long = "source", value_name = "PATH", conflicts_with = "latest")]
    pub source: Option<PathBuf>,
    /// Upload the lexicographically last file matching this glob.
    #[arg(long = "latest", value_name = "PATTERN")]
    pub latest: Option<String>,
    /// Report format.
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,
    /// Resolve and parse the report, print the plan, and skip all remote calls.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

impl LaunchProfileArgs {
    /// Build a `LaunchProfile` from CLI args and a captured environment.
    pub fn build(self, env: &EnvSnapshot) -> Result<LaunchProfile> {
        let cwd = std::env::current_dir().context("failed to obtain current directory")?;
        let (config_path, config_source) =
            resolve_config_path(self.config_override, env, &cwd);

        let overrides = ConfigOverrides {
            spreadsheet_id: self
                .sheet_id
                .filter(|id| !id.trim().is_empty())
                .or_else(|| env.get(SHEET_ID_ENV)),
            credentials_base64: env.get(CREDENTIALS_ENV),
            source_path: self.source.map(|path| path.display().to_string()),
            source_pattern: self.latest,
            format: self.format.map(ReportFormat::from),
        };

        let launch_args = build_launch_args(config_path.as_deref(), &overrides, self.dry_run);

        Ok(LaunchProfile {
            config_path,
            config_source,
            overrides,
            dry_run: self.dry_run,
            launch_args,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_and_latest_conflict() {
        let result = LaunchProfileArgs::try_parse_from([
            "sheet-push",
            "--source",
            "a.csv",
            "--latest",
            "reports/*.csv",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_sheet_id_wins_over_environment() {
        let args = LaunchProfileArgs::try_parse_from([
            "sheet-push",
            "--sheet-id",
            "from-cli",
            "--format",
            "key-value",
            "--latest",
            "reports/key_metrics_*.txt",
        ])
        .expect("args parse");
        let env = EnvSnapshot::from_pairs([(SHEET_ID_ENV, "from-env"), (CREDENTIALS_ENV, "e30=")]);

        let profile = args.build(&env).expect("profile builds");
        assert_eq!(profile.overrides.spreadsheet_id.as_deref(), Some("from-cli"));
        assert_eq!(profile.overrides.credentials_base64.as_deref(), Some("e30="));
        assert_eq!(profile.overrides.format, Some(ReportFormat::KeyValue));
        assert_eq!(
            profile.overrides.source_pattern.as_deref(),
            Some("reports/key_metrics_*.txt")
        );
        assert!(!profile.dry_run);
    }

    #[test]
    fn environment_sheet_id_used_without_flag() {
        let args = LaunchProfileArgs::try_parse_from(["sheet-push", "--dry-run"]).expect("parse");
        let env = EnvSnapshot::from_pairs([(SHEET_ID_ENV, "from-env")]);
        let profile = args.build(&env).expect("profile builds");
        assert_eq!(profile.overrides.spreadsheet_id.as_deref(), Some("from-env"));
        assert!(profile.dry_run);
    }
}

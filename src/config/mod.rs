//! Load and validate push configuration.
//!
//! Layers, lowest to highest precedence: built-in defaults, the optional TOML
//! file, then overrides captured from the environment and the command line.
use std::{
    fmt,
    path::{Path, PathBuf},
};

use config::{builder::DefaultState, ConfigBuilder};
use serde::Deserialize;
use tracing::{error, info};

use crate::{lib::errors::ConfigError, report::ReportFormat};

pub mod sheets;
pub mod source;
pub mod tab;
pub mod telemetry;

pub use sheets::{
    parse_sheets_section, RawSheetsSection, SheetsSection, DEFAULT_API_BASE_URL,
    DEFAULT_TIMEOUT_SECS,
};
pub use source::{parse_source_section, RawSourceSection, SourceSection, DEFAULT_SOURCE_PATH};
pub use tab::{parse_tab_section, RawTabSection, TabSection};

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "sheet-push.toml";
/// Label used in errors when no config file is involved.
pub const ENV_ORIGIN: &str = "<environment>";

/// Top-level configuration container.
#[derive(Debug, Clone)]
pub struct PushConfig {
    pub sheets: SheetsSection,
    pub source: SourceSection,
    pub tab: TabSection,
    /// Config file path, or [`ENV_ORIGIN`].
    pub origin: PathBuf,
}

#[derive(Debug, Deserialize)]
struct RawPushConfig {
    sheets: Option<RawSheetsSection>,
    source: Option<RawSourceSection>,
    tab: Option<RawTabSection>,
}

/// Values that take precedence over the config file.
#[derive(Clone, Default)]
pub struct ConfigOverrides {
    pub spreadsheet_id: Option<String>,
    pub credentials_base64: Option<String>,
    pub source_path: Option<String>,
    pub source_pattern: Option<String>,
    pub format: Option<ReportFormat>,
}

impl fmt::Debug for ConfigOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigOverrides")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field(
                "credentials_base64",
                &self.credentials_base64.as_ref().map(|_| "<redacted>"),
            )
            .field("source_path", &self.source_path)
            .field("source_pattern", &self.source_pattern)
            .field("format", &self.format)
            .finish()
    }
}

impl ConfigOverrides {
    /// A fixed path clears any configured pattern, and vice versa.
    fn apply(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
        let mut builder = builder
            .set_override_option("sheets.spreadsheet_id", self.spreadsheet_id.clone())?
            .set_override_option(
                "sheets.credentials_base64",
                self.credentials_base64.clone(),
            )?
            .set_override_option("source.format", self.format.map(|format| format.as_str()))?;

        if let Some(path) = &self.source_path {
            builder = builder
                .set_override("source.path", path.clone())?
                .set_override("source.pattern", "")?;
        }
        if let Some(pattern) = &self.source_pattern {
            builder = builder
                .set_override("source.pattern", pattern.clone())?
                .set_override("source.path", "")?;
        }
        Ok(builder)
    }
}

impl PushConfig {
    /// Load configuration from an optional file plus overrides.
    pub fn load(
        config_path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let origin = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(ENV_ORIGIN));
        telemetry::log_source(config_path);

        let mut builder = config::Config::builder();
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::from(path.to_path_buf()));
        }
        let builder = overrides
            .apply(builder)
            .map_err(|err| ConfigError::from_parse_error(origin.clone(), err))?;

        let document = builder.build().map_err(|err| {
            let error = ConfigError::from_read_error(origin.clone(), err);
            error!(
                target: "sheet_push::config",
                path = %origin.display(),
                reason = %error,
                "Failed to read configuration"
            );
            error
        })?;

        let raw: RawPushConfig = document.try_deserialize().map_err(|err| {
            let error = ConfigError::from_parse_error(origin.clone(), err);
            error!(
                target: "sheet_push::config",
                path = %origin.display(),
                reason = %error,
                "Failed to parse configuration"
            );
            error
        })?;

        let config = Self::from_raw(raw, origin.clone()).map_err(|err| {
            error!(
                target: "sheet_push::config",
                path = %origin.display(),
                reason = %err,
                "Failed to validate configuration"
            );
            err
        })?;

        telemetry::log_loaded(&config);
        Ok(config)
    }

    /// Load configuration from a file alone.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        Self::load(Some(path), &ConfigOverrides::default())
    }

    fn from_raw(raw: RawPushConfig, origin: PathBuf) -> Result<Self, ConfigError> {
        let sheets = parse_sheets_section(raw.sheets, &origin)?;
        let source = parse_source_section(raw.source, &origin)?;
        let tab = parse_tab_section(raw.tab, &origin)?;
        info!(
            target: "sheet_push::config",
            path = %origin.display(),
            "Configuration validated"
        );

        Ok(Self {
            sheets,
            source,
            tab,
            origin,
        })
    }
}

use std::path::Path;

use tracing::{debug, info};

use super::{PushConfig, DEFAULT_CONFIG_PATH};

pub fn log_source(path: Option<&Path>) {
    match path {
        Some(path) => info!(
            target: "sheet_push::config",
            path = %path.display(),
            "Loading configuration file"
        ),
        None => debug!(
            target: "sheet_push::config",
            default = DEFAULT_CONFIG_PATH,
            "No configuration file; using environment and flags only"
        ),
    }
}

pub fn log_loaded(config: &PushConfig) {
    info!(
        target: "sheet_push::config",
        origin = %config.origin.display(),
        spreadsheet_id = %config.sheets.spreadsheet_id,
        api_base_url = %config.sheets.api_base_url,
        timeout_secs = config.sheets.timeout_secs,
        source = %config.source.spec,
        format = config.source.format.as_str(),
        on_missing = config.source.on_missing.as_str(),
        tab_naming = config.tab.naming.as_str(),
        "Configuration loaded successfully"
    );
}

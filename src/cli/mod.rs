//! CLI entrypoint module structure.
use anyhow::Result;

use crate::runtime::PushOutcome;

pub mod args;
pub mod profile;

pub use args::{FormatArg, LaunchProfileArgs};
pub use profile::{build_launch_args, resolve_config_path, ConfigPathSource, LaunchProfile};

/// Format a run outcome as the JSON document printed on stdout.
pub fn render_outcome(outcome: &PushOutcome) -> Result<String> {
    Ok(serde_json::to_string_pretty(outcome)?)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn planned_outcome_renders_tab_and_shape() {
        let outcome = PushOutcome::Planned {
            source: PathBuf::from("reports/exports/latest_export.csv"),
            tab: "Run-2024-03-05T14-07".into(),
            range: "'Run-2024-03-05T14-07'!A1:C4".into(),
            rows: 4,
            columns: 3,
        };

        let payload = render_outcome(&outcome).expect("renders");
        assert!(payload.contains("\"status\": \"planned\""), "payload: {payload}");
        assert!(payload.contains("\"rows\": 4"), "payload: {payload}");
        assert!(
            payload.contains("\"tab\": \"Run-2024-03-05T14-07\""),
            "payload: {payload}"
        );
    }
}

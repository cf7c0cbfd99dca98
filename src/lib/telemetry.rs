//! Telemetry initialization and per-run span helpers.

use std::time::Instant;

use anyhow::Result;
use serde::Serialize;
use tracing::{info, info_span, Span};
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

/// Number of hex characters of the run id used as a tab-name suffix.
const RUN_SUFFIX_LEN: usize = 6;

/// Initialize `tracing` and format operator logs on stderr.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Span helper recording the start and finish of one push run.
pub struct RunSpan {
    span: Span,
    started_at: Instant,
    run_id: Uuid,
}

impl RunSpan {
    /// Start a run span with a fresh run id.
    pub fn start(mode: &'static str) -> Self {
        Self::with_id(Uuid::new_v4(), mode)
    }

    pub fn with_id(run_id: Uuid, mode: &'static str) -> Self {
        let span = info_span!(target: "sheet_push::runtime", "push_run", %run_id, mode);
        Self {
            span,
            started_at: Instant::now(),
            run_id,
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Short, lowercase hex suffix derived from the run id.
    pub fn suffix(&self) -> String {
        self.run_id.simple().to_string()[..RUN_SUFFIX_LEN].to_string()
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Close the span while recording status and completion info.
    pub fn finish(self, status: &'static str) {
        let elapsed_ms = self.started_at.elapsed().as_millis();
        let _entered = self.span.enter();
        info!(
            target: "sheet_push::runtime",
            run_id = %self.run_id,
            status = status,
            elapsed_ms = elapsed_ms,
            "Completed push run"
        );
    }
}

/// Payload for logging how the run was launched.
#[derive(Debug, Serialize)]
pub struct LaunchTelemetry<'a> {
    pub config_path: Option<&'a str>,
    pub source: &'a str,
    pub format: &'a str,
    pub dry_run: bool,
    pub launch_args: &'a [String],
}

/// Emit launch parameters to `tracing`.
pub fn emit_launch(telemetry: &LaunchTelemetry<'_>) {
    info!(
        target: "sheet_push::runtime",
        config_path = telemetry.config_path.unwrap_or(""),
        source = telemetry.source,
        format = telemetry.format,
        dry_run = telemetry.dry_run,
        launch_args = ?telemetry.launch_args,
        "Starting report push"
    );
}

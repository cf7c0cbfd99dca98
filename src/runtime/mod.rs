//! Push run orchestration.
mod exit;
mod pipeline;

use chrono::Utc;
use tracing::{error, Instrument};

pub use exit::RuntimeExit;
pub use pipeline::{
    plan_tab, prepare, upload, PreparedUpload, PushOutcome, PushStage, TabPlan,
};

use crate::{
    cli::LaunchProfile,
    config::PushConfig,
    lib::{
        errors::PushError,
        telemetry::{emit_launch, LaunchTelemetry, RunSpan},
    },
    sheets::{ServiceAccount, SheetsClient},
};

/// Run one push: resolve the report, then create a tab and write it.
pub async fn run(profile: &LaunchProfile, config: &PushConfig) -> Result<PushOutcome, PushError> {
    let run = RunSpan::start(if profile.dry_run { "dry_run" } else { "upload" });
    let config_path = profile
        .config_path
        .as_ref()
        .map(|path| path.display().to_string());
    let source = config.source.spec.to_string();
    emit_launch(&LaunchTelemetry {
        config_path: config_path.as_deref(),
        source: &source,
        format: config.source.format.as_str(),
        dry_run: profile.dry_run,
        launch_args: &profile.launch_args,
    });

    let suffix = run.suffix();
    let result = execute(profile.dry_run, config, &suffix)
        .instrument(run.span().clone())
        .await;

    match &result {
        Ok(outcome) => run.finish(outcome.status()),
        Err(err) => {
            error!(
                target: "sheet_push::runtime",
                kind = err.kind(),
                error = %err,
                "Push run failed"
            );
            run.finish("failed");
        }
    }
    result
}

async fn execute(
    dry_run: bool,
    config: &PushConfig,
    suffix: &str,
) -> Result<PushOutcome, PushError> {
    // Bad credentials fail before the source is touched.
    let account = if dry_run {
        None
    } else {
        Some(ServiceAccount::from_base64(&config.sheets.credentials_base64)?)
    };

    let Some(prepared) = prepare(&config.source)? else {
        return Ok(PushOutcome::skipped(&config.source));
    };
    let plan = plan_tab(&config.tab, &prepared, Utc::now(), suffix);

    let Some(account) = account else {
        return Ok(PushOutcome::planned(&prepared, &plan));
    };
    let client = SheetsClient::connect(&config.sheets, &account).await?;
    upload(&client, &config.tab, prepared, plan).await
}

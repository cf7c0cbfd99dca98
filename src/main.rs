//! Entry point for sheet-push.
use std::process::ExitCode;

use clap::Parser;
use sheet_push::{
    cli::{render_outcome, LaunchProfileArgs},
    config::PushConfig,
    lib::{env::EnvSnapshot, telemetry},
    runtime::{self, RuntimeExit},
};

#[tokio::main]
async fn main() -> ExitCode {
    match bootstrap().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(exit) => exit.report(),
    }
}

async fn bootstrap() -> Result<(), RuntimeExit> {
    telemetry::init_tracing().map_err(RuntimeExit::from_error)?;
    let args = LaunchProfileArgs::parse();
    let env = EnvSnapshot::capture();
    let profile = args.build(&env).map_err(RuntimeExit::from_error)?;

    let config = PushConfig::load(profile.config_path.as_deref(), &profile.overrides)
        .map_err(RuntimeExit::from_error)?;

    let outcome = runtime::run(&profile, &config)
        .await
        .map_err(RuntimeExit::from_error)?;
    let message = render_outcome(&outcome).map_err(RuntimeExit::from_error)?;
    println!("{message}");
    Ok(())
}

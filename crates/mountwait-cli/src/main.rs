//! # mountwait
//!
//! Mounts a block device, optionally inside the host's mount namespace,
//! waits for a termination signal, then force-unmounts it and exits.
//! Exit status is 0 only after a clean unmount.

mod cli;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use mountwait_common::config::FileConfig;
use mountwait_common::constants::{APP_NAME, exit_code};
use mountwait_common::error::MountWaitError;
use mountwait_core::backend::LinuxBackend;
use mountwait_core::lifecycle;
use mountwait_core::signal::TerminationListener;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, LogFormat};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "{APP_NAME} starting");

    let file = match &cli.config {
        Some(path) => FileConfig::load(path)
            .with_context(|| format!("loading config file {}", path.display()))?,
        None => FileConfig::default(),
    };
    let config = file.overlay(cli.to_file_config()).resolve()?;

    lifecycle::run(&config, LinuxBackend, TerminationListener::install)?;
    Ok(())
}

fn report(err: &anyhow::Error) -> ExitCode {
    let (stage, code) = failure_status(err);
    tracing::error!(stage, error = %format!("{err:#}"), "{APP_NAME} failed");
    ExitCode::from(code)
}

/// Stage name and exit code for a failed run. Context added on the way up
/// does not hide the underlying [`MountWaitError`].
fn failure_status(err: &anyhow::Error) -> (&'static str, u8) {
    err.downcast_ref::<MountWaitError>()
        .map_or(("unknown", exit_code::FAILURE), |e| (e.stage(), e.exit_code()))
}

//! One complete attach, wait, detach cycle.
//!
//! Order of operations:
//! 1. join the configured mount namespace, if any;
//! 2. start listening for termination requests;
//! 3. translate the option tokens;
//! 4. attach;
//! 5. block until a termination request arrives;
//! 6. detach.
//!
//! Any failure ends the cycle immediately and is returned as is. Nothing is
//! retried: the caller exits and an external orchestrator decides what to
//! do next.

use mountwait_common::config::MountWaitConfig;
use mountwait_common::error::Result;

use crate::backend::MountBackend;
use crate::controller::MountController;
use crate::filesystem::options::mount_flags;
use crate::signal::TerminationListener;

/// Runs the full lifecycle for `config` against `backend`.
///
/// `listen` is called after namespace entry and before the mount.
/// Namespace entry must happen while the process is still single-threaded,
/// and listening before the mount means a request that arrives mid-attach
/// is kept until the wait.
///
/// Returns `Ok(())` only after a clean detach.
///
/// # Errors
///
/// Returns the first error of any step; see [`mountwait_common::error`].
pub fn run<B, F>(config: &MountWaitConfig, backend: B, listen: F) -> Result<()>
where
    B: MountBackend,
    F: FnOnce() -> Result<TerminationListener>,
{
    let request = &config.request;

    if let Some(ns_path) = &config.mount_namespace {
        tracing::info!(path = %ns_path.display(), "entering mount namespace");
        backend.enter_namespace(ns_path)?;
    }

    let listener = listen()?;
    let flags = mount_flags(request)?;

    let mut controller = MountController::new(backend);
    tracing::info!(
        source = request.source(),
        target = %request.target().display(),
        fs_type = request.fs_type(),
        read_only = request.is_read_only(),
        "attaching volume"
    );
    controller.attach(request, flags)?;

    listener.wait()?;

    controller.detach()?;
    tracing::info!(target = %request.target().display(), "volume detached");
    Ok(())
}

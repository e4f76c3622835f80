//! Raw attach and detach of a block device.
//!
//! Thin wrappers over `mount(2)` and `umount2(2)` that turn `Errno` into
//! the stage-specific workspace errors.

use std::path::Path;

use mountwait_common::error::{MountWaitError, Result};
use mountwait_common::types::MountRequest;
use nix::mount::{MntFlags, MsFlags, mount, umount2};

/// Mounts the request's source on its target with `flags`.
///
/// No filesystem-specific data string is passed. An empty filesystem type
/// is passed to the kernel as `NULL`.
///
/// # Errors
///
/// Returns [`MountWaitError::MountFailed`] if the `mount(2)` syscall fails.
pub fn mount_device(request: &MountRequest, flags: MsFlags) -> Result<()> {
    let fs_type = Some(request.fs_type()).filter(|t| !t.is_empty());
    mount(
        Some(request.source()),
        request.target(),
        fs_type,
        flags,
        None::<&str>,
    )
    .map_err(|e| MountWaitError::MountFailed {
        device: request.source().to_owned(),
        target: request.target().to_path_buf(),
        cause: e.into(),
    })?;
    tracing::info!(
        source = request.source(),
        target = %request.target().display(),
        fs_type = request.fs_type(),
        flags = flags.bits(),
        "device mounted"
    );
    Ok(())
}

/// Unmounts `target` with `MNT_FORCE`.
///
/// # Errors
///
/// Returns [`MountWaitError::UnmountFailed`] if the `umount2(2)` syscall
/// fails.
pub fn force_unmount(target: &Path) -> Result<()> {
    umount2(target, MntFlags::MNT_FORCE).map_err(|e| MountWaitError::UnmountFailed {
        target: target.to_path_buf(),
        cause: e.into(),
    })?;
    tracing::info!(target = %target.display(), "device unmounted");
    Ok(())
}

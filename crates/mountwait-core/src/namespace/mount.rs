//! Mount namespace entry.
//!
//! Re-associates the calling process with an existing mount namespace so
//! that a later `mount(2)` lands in that namespace's mount table (typically
//! the host's, seen from inside a container).

use std::fs::File;
use std::os::fd::AsFd;
use std::path::Path;

use mountwait_common::constants::SELF_MOUNT_NS;
use mountwait_common::error::{MountWaitError, Result};
use nix::sched::{CloneFlags, setns};

/// Joins the mount namespace referenced by `ns_path`.
///
/// The switch is process-wide and is never undone. The kernel refuses
/// `setns(CLONE_NEWNS)` from a process with more than one thread, so this
/// must run before any thread is spawned.
///
/// # Errors
///
/// Returns [`MountWaitError::NamespaceEntryFailed`] if the handle cannot be
/// opened or `setns(2)` fails.
pub fn join_mount_namespace(ns_path: &Path) -> Result<()> {
    let handle = File::open(ns_path).map_err(|e| MountWaitError::NamespaceEntryFailed {
        path: ns_path.to_path_buf(),
        cause: e,
    })?;
    setns(handle.as_fd(), CloneFlags::CLONE_NEWNS).map_err(|e| {
        MountWaitError::NamespaceEntryFailed {
            path: ns_path.to_path_buf(),
            cause: e.into(),
        }
    })?;

    let current = std::fs::read_link(SELF_MOUNT_NS)
        .map(|ns| ns.display().to_string())
        .unwrap_or_default();
    tracing::debug!(path = %ns_path.display(), ns = %current, "joined mount namespace");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_handle_is_namespace_failure() {
        let err = join_mount_namespace(Path::new("/nonexistent/proc/1/ns/mnt"))
            .expect_err("missing handle must fail");
        match err {
            MountWaitError::NamespaceEntryFailed { path, cause } => {
                assert_eq!(path, Path::new("/nonexistent/proc/1/ns/mnt"));
                assert_eq!(cause.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn regular_file_is_not_a_namespace() {
        let file = tempfile::NamedTempFile::new().expect("temp file");
        let err = join_mount_namespace(file.path()).expect_err("plain file is not a namespace");
        assert_eq!(err.stage(), "namespace");
    }
}

//! Privileged host operations behind a trait.
//!
//! The lifecycle only talks to the host through [`MountBackend`], so it can
//! be driven by an in-memory backend in tests.

use std::path::Path;

use mountwait_common::error::Result;
use mountwait_common::types::MountRequest;
use nix::mount::MsFlags;

use crate::filesystem::mount::{force_unmount, mount_device};
use crate::namespace::mount::join_mount_namespace;

/// The three system calls a mount lifecycle needs.
pub trait MountBackend {
    /// Joins the mount namespace behind `ns_path`.
    ///
    /// # Errors
    ///
    /// Returns `NamespaceEntryFailed` if the namespace cannot be joined.
    fn enter_namespace(&self, ns_path: &Path) -> Result<()>;

    /// Attaches `request.source()` at `request.target()`.
    ///
    /// # Errors
    ///
    /// Returns `MountFailed` if the kernel rejects the mount.
    fn mount(&self, request: &MountRequest, flags: MsFlags) -> Result<()>;

    /// Force-detaches whatever is mounted at `target`.
    ///
    /// # Errors
    ///
    /// Returns `UnmountFailed` if the kernel rejects the unmount.
    fn unmount(&self, target: &Path) -> Result<()>;
}

/// Backend issuing the real `setns(2)`, `mount(2)` and `umount2(2)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinuxBackend;

impl MountBackend for LinuxBackend {
    fn enter_namespace(&self, ns_path: &Path) -> Result<()> {
        join_mount_namespace(ns_path)
    }

    fn mount(&self, request: &MountRequest, flags: MsFlags) -> Result<()> {
        mount_device(request, flags)
    }

    fn unmount(&self, target: &Path) -> Result<()> {
        force_unmount(target)
    }
}

impl<B: MountBackend + ?Sized> MountBackend for &B {
    fn enter_namespace(&self, ns_path: &Path) -> Result<()> {
        (**self).enter_namespace(ns_path)
    }

    fn mount(&self, request: &MountRequest, flags: MsFlags) -> Result<()> {
        (**self).mount(request, flags)
    }

    fn unmount(&self, target: &Path) -> Result<()> {
        (**self).unmount(target)
    }
}

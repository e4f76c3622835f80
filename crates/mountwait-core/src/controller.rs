//! The mount state machine.
//!
//! `Unmounted -> Mounted -> Unmounting -> Terminated`, each step taken at
//! most once. A failed attach leaves the state at `Unmounted`; a failed
//! detach leaves it at `Unmounting`. Neither is retried.

use std::io;
use std::path::PathBuf;

use mountwait_common::error::{MountWaitError, Result};
use mountwait_common::types::{MountRequest, MountState};
use nix::mount::MsFlags;

use crate::backend::MountBackend;

/// Owns the single mount of this process.
#[derive(Debug)]
pub struct MountController<B> {
    backend: B,
    state: MountState,
    target: Option<PathBuf>,
}

impl<B: MountBackend> MountController<B> {
    /// Creates a controller in the `Unmounted` state.
    pub const fn new(backend: B) -> Self {
        Self {
            backend,
            state: MountState::Unmounted,
            target: None,
        }
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> MountState {
        self.state
    }

    /// Mounts the request with `flags` and moves to `Mounted`.
    ///
    /// # Errors
    ///
    /// Returns [`MountWaitError::InvalidState`] unless the controller is
    /// `Unmounted`, and [`MountWaitError::MountFailed`] if the target is not
    /// an existing directory or the mount itself fails.
    pub fn attach(&mut self, request: &MountRequest, flags: MsFlags) -> Result<()> {
        self.require(MountState::Unmounted)?;
        check_target(request)?;

        self.backend.mount(request, flags)?;
        self.target = Some(request.target().to_path_buf());
        self.state = MountState::Mounted;
        Ok(())
    }

    /// Force-unmounts the attached target and moves to `Terminated`.
    ///
    /// # Errors
    ///
    /// Returns [`MountWaitError::InvalidState`] unless the controller is
    /// `Mounted`, and [`MountWaitError::UnmountFailed`] if the unmount fails.
    pub fn detach(&mut self) -> Result<()> {
        self.require(MountState::Mounted)?;
        let target = self.target.clone().ok_or(MountWaitError::InvalidState {
            expected: MountState::Mounted,
            actual: self.state,
        })?;

        self.state = MountState::Unmounting;
        tracing::info!(target = %target.display(), "detaching volume");
        self.backend.unmount(&target)?;
        self.state = MountState::Terminated;
        Ok(())
    }

    fn require(&self, expected: MountState) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(MountWaitError::InvalidState {
                expected,
                actual: self.state,
            })
        }
    }
}

fn check_target(request: &MountRequest) -> Result<()> {
    let target = request.target();
    let problem = if !target.exists() {
        Some(io::Error::new(
            io::ErrorKind::NotFound,
            "mount target does not exist",
        ))
    } else if !target.is_dir() {
        Some(io::Error::new(
            io::ErrorKind::NotADirectory,
            "mount target is not a directory",
        ))
    } else {
        None
    };
    problem.map_or(Ok(()), |cause| {
        Err(MountWaitError::MountFailed {
            device: request.source().to_owned(),
            target: target.to_path_buf(),
            cause,
        })
    })
}

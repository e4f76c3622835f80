//! Unified error type for the mountwait workspace.
//!
//! Every error is terminal for the process. The variants are split by the
//! lifecycle stage that produced them so an operator can tell "never
//! attached" apart from "attached but could not detach".

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum MountWaitError {
    /// An option token outside the supported vocabulary was requested.
    #[error("invalid mount option `{token}`: option not supported")]
    InvalidMountOption {
        /// The offending token, as supplied.
        token: String,
    },

    /// Opening the namespace handle or calling `setns(2)` failed.
    #[error("failed to enter mount namespace {path}: {cause}")]
    NamespaceEntryFailed {
        /// Namespace handle that was requested.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        cause: std::io::Error,
    },

    /// The `mount(2)` call failed. The mount table was not modified.
    #[error("failed to mount {device} on {target}: {cause}")]
    MountFailed {
        /// Device or source path.
        device: String,
        /// Mount point.
        target: PathBuf,
        /// Underlying OS error.
        #[source]
        cause: std::io::Error,
    },

    /// The `umount2(2)` call failed. The volume may still be attached.
    #[error("failed to cleanly unmount {target}: {cause}")]
    UnmountFailed {
        /// Mount point that could not be detached.
        target: PathBuf,
        /// Underlying OS error.
        #[source]
        cause: std::io::Error,
    },

    /// A configuration value is missing or invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file could not be deserialized.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },

    /// Installing or waiting on the termination handler failed.
    #[error("termination listener error: {message}")]
    Signal {
        /// Description of the failure.
        message: String,
    },

    /// A mount state transition was requested from the wrong state.
    #[error("invalid mount state transition: expected {expected}, found {actual}")]
    InvalidState {
        /// State the operation requires.
        expected: crate::types::MountState,
        /// State the controller was actually in.
        actual: crate::types::MountState,
    },
}

impl MountWaitError {
    /// Name of the lifecycle stage that produced this error.
    #[must_use]
    pub const fn stage(&self) -> &'static str {
        match self {
            Self::InvalidMountOption { .. } => "options",
            Self::NamespaceEntryFailed { .. } => "namespace",
            Self::MountFailed { .. } => "mount",
            Self::UnmountFailed { .. } => "unmount",
            Self::Config { .. } | Self::Io { .. } | Self::Serialization { .. } => "config",
            Self::Signal { .. } => "signal",
            Self::InvalidState { .. } => "state",
        }
    }

    /// Process exit code reported for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        use crate::constants::exit_code;

        match self {
            Self::Config { .. } | Self::Io { .. } | Self::Serialization { .. } => exit_code::CONFIG,
            Self::InvalidMountOption { .. } => exit_code::INVALID_OPTION,
            Self::NamespaceEntryFailed { .. } => exit_code::NAMESPACE,
            Self::MountFailed { .. } => exit_code::MOUNT,
            Self::UnmountFailed { .. } => exit_code::UNMOUNT,
            Self::Signal { .. } => exit_code::SIGNAL,
            Self::InvalidState { .. } => exit_code::FAILURE,
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, MountWaitError>;

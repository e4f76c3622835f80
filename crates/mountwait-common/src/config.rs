//! Configuration model for a single mountwait invocation.
//!
//! Values come from three layers, highest first: command-line flags,
//! environment variables, and an optional JSON file. The CLI folds the
//! first two (clap handles the env fallback) into a [`FileConfig`] and
//! overlays it on the file's contents before resolving.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{ENV_DEVICE, ENV_TARGET};
use crate::error::{MountWaitError, Result};
use crate::types::MountRequest;

/// A partially specified configuration, as read from a file or the CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Device or source path.
    pub source: Option<String>,
    /// Mount point.
    pub target: Option<PathBuf>,
    /// Filesystem driver name.
    pub fs_type: Option<String>,
    /// Comma-separated option tokens.
    pub options: Option<String>,
    /// Mount read-only.
    pub read_only: Option<bool>,
    /// Namespace handle to enter before mounting.
    pub mount_namespace: Option<PathBuf>,
}

impl FileConfig {
    /// Reads a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON for
    /// this schema.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| MountWaitError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Returns `self` with every field that `higher` sets replaced.
    #[must_use]
    pub fn overlay(self, higher: Self) -> Self {
        Self {
            source: higher.source.or(self.source),
            target: higher.target.or(self.target),
            fs_type: higher.fs_type.or(self.fs_type),
            options: higher.options.or(self.options),
            read_only: higher.read_only.or(self.read_only),
            mount_namespace: higher.mount_namespace.or(self.mount_namespace),
        }
    }

    /// Resolves into a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MountWaitError::Config`] if the source or target is missing
    /// or empty.
    pub fn resolve(self) -> Result<MountWaitConfig> {
        let source = self.source.ok_or_else(|| MountWaitError::Config {
            message: format!("no device given: pass --rbddev or set {ENV_DEVICE}"),
        })?;
        let target = self.target.ok_or_else(|| MountWaitError::Config {
            message: format!("no mount target given: pass --target or set {ENV_TARGET}"),
        })?;
        let request = MountRequest::new(
            source,
            target,
            self.fs_type.unwrap_or_default(),
            self.options.as_deref().unwrap_or_default(),
            self.read_only.unwrap_or(false),
        )?;
        Ok(MountWaitConfig {
            request,
            mount_namespace: self.mount_namespace,
        })
    }
}

/// Fully resolved configuration for one mount lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountWaitConfig {
    /// The volume to attach.
    pub request: MountRequest,
    /// Namespace handle to enter first, if any.
    pub mount_namespace: Option<PathBuf>,
}

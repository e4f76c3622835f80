//! Domain primitive types used across the mountwait workspace.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::constants::OPTION_SEPARATOR;
use crate::error::{MountWaitError, Result};

/// Everything needed to attach one volume. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountRequest {
    source: String,
    target: PathBuf,
    fs_type: String,
    option_tokens: Vec<String>,
    read_only: bool,
}

impl MountRequest {
    /// Builds a request from raw values.
    ///
    /// `options` is a comma-separated token list. Whitespace around tokens is
    /// trimmed, empty segments are skipped and duplicates collapse onto their
    /// first occurrence. Tokens are not validated here; that happens at flag
    /// translation.
    ///
    /// # Errors
    ///
    /// Returns [`MountWaitError::Config`] if `source` or `target` is empty.
    pub fn new(
        source: impl Into<String>,
        target: impl Into<PathBuf>,
        fs_type: impl Into<String>,
        options: &str,
        read_only: bool,
    ) -> Result<Self> {
        let source = source.into();
        let target = target.into();
        if source.trim().is_empty() {
            return Err(MountWaitError::Config {
                message: "mount source (device path) is empty".into(),
            });
        }
        if target.as_os_str().is_empty() {
            return Err(MountWaitError::Config {
                message: "mount target is empty".into(),
            });
        }
        Ok(Self {
            source,
            target,
            fs_type: fs_type.into(),
            option_tokens: tokenize(options),
            read_only,
        })
    }

    /// Device or source path.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Mount point.
    #[must_use]
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Filesystem driver name, possibly empty.
    #[must_use]
    pub fn fs_type(&self) -> &str {
        &self.fs_type
    }

    /// Deduplicated option tokens, in the order first given.
    pub fn option_tokens(&self) -> impl Iterator<Item = &str> {
        self.option_tokens.iter().map(String::as_str)
    }

    /// Whether read-only was requested directly, ignoring option tokens.
    #[must_use]
    pub const fn read_only_requested(&self) -> bool {
        self.read_only
    }

    /// Effective read-only state: the direct switch or an `ro` token.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.read_only || self.option_tokens.iter().any(|t| t == "ro")
    }
}

/// Splits a raw option string into distinct tokens, keeping input order.
#[must_use]
pub fn tokenize(options: &str) -> Vec<String> {
    options
        .split(OPTION_SEPARATOR)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .fold(Vec::new(), |mut tokens, token| {
            if !tokens.iter().any(|t: &String| t == token) {
                tokens.push(token.to_owned());
            }
            tokens
        })
}

/// Lifecycle state of the single mount owned by the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MountState {
    /// Nothing attached yet.
    #[default]
    Unmounted,
    /// The volume is attached at the target.
    Mounted,
    /// A forced unmount is in progress.
    Unmounting,
    /// The volume was detached; no further transitions.
    Terminated,
}

impl fmt::Display for MountState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unmounted => write!(f, "unmounted"),
            Self::Mounted => write!(f, "mounted"),
            Self::Unmounting => write!(f, "unmounting"),
            Self::Terminated => write!(f, "terminated"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_collapses_duplicates_onto_first_occurrence() {
        assert_eq!(tokenize("sync,noatime,sync"), vec!["sync", "noatime"]);
    }

    #[test]
    fn tokenize_skips_empty_segments_and_whitespace() {
        assert_eq!(tokenize(" ro , ,nodev,"), vec!["ro", "nodev"]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn request_rejects_empty_source() {
        let err = MountRequest::new("", "/mnt", "ext4", "", false)
            .expect_err("empty source must be rejected");
        assert!(matches!(err, MountWaitError::Config { .. }));
    }

    #[test]
    fn request_rejects_empty_target() {
        let err = MountRequest::new("/dev/rbd0", "", "ext4", "", false)
            .expect_err("empty target must be rejected");
        assert!(matches!(err, MountWaitError::Config { .. }));
    }

    #[test]
    fn read_only_is_derived_from_ro_token() {
        let req = MountRequest::new("/dev/rbd0", "/mnt", "xfs", "noatime,ro", false)
            .expect("valid request");
        assert!(!req.read_only_requested());
        assert!(req.is_read_only());
    }

    #[test]
    fn read_only_switch_alone_is_enough() {
        let req =
            MountRequest::new("/dev/rbd0", "/mnt", "xfs", "", true).expect("valid request");
        assert!(req.is_read_only());
        assert_eq!(req.option_tokens().count(), 0);
    }

    #[test]
    fn mount_state_starts_unmounted() {
        assert_eq!(MountState::default(), MountState::Unmounted);
        assert_eq!(MountState::Unmounting.to_string(), "unmounting");
    }
}

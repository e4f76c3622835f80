//! Mount option tokens and their kernel flag bits.
//!
//! The vocabulary is fixed. Anything outside it is rejected rather than
//! passed through, so a typo never turns into a silently different mount.

use std::fmt;
use std::str::FromStr;

use mountwait_common::error::{MountWaitError, Result};
use mountwait_common::types::{MountRequest, tokenize};
use nix::mount::MsFlags;

/// One supported option token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MountOption {
    /// `atime` (default, no bit).
    Atime,
    /// `async` (default, no bit).
    Async,
    /// `dev` (default, no bit).
    Dev,
    /// `diratime` (default, no bit).
    Diratime,
    /// `dirsync`: synchronous directory updates.
    Dirsync,
    /// `exec` (default, no bit).
    Exec,
    /// `mand`: mandatory locking.
    Mand,
    /// `noatime`: never update access times.
    Noatime,
    /// `nodev`: ignore device nodes.
    Nodev,
    /// `nodiratime`: never update directory access times.
    Nodiratime,
    /// `noexec`: disallow program execution.
    Noexec,
    /// `nomand` (default, no bit).
    Nomand,
    /// `norelatime` (accepted, no bit).
    Norelatime,
    /// `nostrictatime` (accepted, no bit).
    Nostrictatime,
    /// `nosuid`: ignore set-user/group-ID bits.
    Nosuid,
    /// `relatime`: relative access time updates.
    Relatime,
    /// `remount`: change flags of an existing mount.
    Remount,
    /// `ro`: read-only.
    Ro,
    /// `rw` (default, no bit).
    Rw,
    /// `strictatime`: always update access times.
    Strictatime,
    /// `suid`: see [`MountOption::flags`].
    Suid,
    /// `sync`: synchronous writes.
    Sync,
}

impl MountOption {
    /// Every supported token.
    pub const ALL: [Self; 22] = [
        Self::Atime,
        Self::Async,
        Self::Dev,
        Self::Diratime,
        Self::Dirsync,
        Self::Exec,
        Self::Mand,
        Self::Noatime,
        Self::Nodev,
        Self::Nodiratime,
        Self::Noexec,
        Self::Nomand,
        Self::Norelatime,
        Self::Nostrictatime,
        Self::Nosuid,
        Self::Relatime,
        Self::Remount,
        Self::Ro,
        Self::Rw,
        Self::Strictatime,
        Self::Suid,
        Self::Sync,
    ];

    /// Canonical token text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Atime => "atime",
            Self::Async => "async",
            Self::Dev => "dev",
            Self::Diratime => "diratime",
            Self::Dirsync => "dirsync",
            Self::Exec => "exec",
            Self::Mand => "mand",
            Self::Noatime => "noatime",
            Self::Nodev => "nodev",
            Self::Nodiratime => "nodiratime",
            Self::Noexec => "noexec",
            Self::Nomand => "nomand",
            Self::Norelatime => "norelatime",
            Self::Nostrictatime => "nostrictatime",
            Self::Nosuid => "nosuid",
            Self::Relatime => "relatime",
            Self::Remount => "remount",
            Self::Ro => "ro",
            Self::Rw => "rw",
            Self::Strictatime => "strictatime",
            Self::Suid => "suid",
            Self::Sync => "sync",
        }
    }

    /// Kernel flag bits contributed by this token.
    ///
    /// The opt-out forms (`atime`, `rw`, `nomand`, ...) contribute nothing.
    /// `suid` sets `MS_NODEV`, the same bit as `nodev`, matching what
    /// existing deployments of this helper receive.
    #[must_use]
    pub const fn flags(self) -> MsFlags {
        match self {
            Self::Atime
            | Self::Async
            | Self::Dev
            | Self::Diratime
            | Self::Exec
            | Self::Nomand
            | Self::Norelatime
            | Self::Nostrictatime
            | Self::Rw => MsFlags::empty(),
            Self::Dirsync => MsFlags::MS_DIRSYNC,
            Self::Mand => MsFlags::MS_MANDLOCK,
            Self::Noatime => MsFlags::MS_NOATIME,
            Self::Nodev | Self::Suid => MsFlags::MS_NODEV,
            Self::Nodiratime => MsFlags::MS_NODIRATIME,
            Self::Noexec => MsFlags::MS_NOEXEC,
            Self::Nosuid => MsFlags::MS_NOSUID,
            Self::Relatime => MsFlags::MS_RELATIME,
            Self::Remount => MsFlags::MS_REMOUNT,
            Self::Ro => MsFlags::MS_RDONLY,
            Self::Strictatime => MsFlags::MS_STRICTATIME,
            Self::Sync => MsFlags::MS_SYNCHRONOUS,
        }
    }
}

impl FromStr for MountOption {
    type Err = MountWaitError;

    fn from_str(token: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|opt| opt.as_str() == token)
            .ok_or_else(|| MountWaitError::InvalidMountOption {
                token: token.to_owned(),
            })
    }
}

impl fmt::Display for MountOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Folds a set of tokens into kernel flags.
///
/// # Errors
///
/// Returns [`MountWaitError::InvalidMountOption`] on the first unknown token.
pub fn translate<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Result<MsFlags> {
    tokens
        .into_iter()
        .try_fold(MsFlags::empty(), |flags, token| -> Result<MsFlags> {
            Ok(flags | token.parse::<MountOption>()?.flags())
        })
}

/// Translates a raw comma-separated option string.
///
/// An empty string yields empty flags.
///
/// # Errors
///
/// Returns [`MountWaitError::InvalidMountOption`] on the first unknown token.
pub fn parse_options(raw: &str) -> Result<MsFlags> {
    translate(tokenize(raw).iter().map(String::as_str))
}

/// Computes the flags for a request: its tokens plus the read-only switch.
///
/// # Errors
///
/// Returns [`MountWaitError::InvalidMountOption`] on the first unknown token.
pub fn mount_flags(request: &MountRequest) -> Result<MsFlags> {
    let flags = translate(request.option_tokens())?;
    let flags = if request.read_only_requested() {
        flags | MsFlags::MS_RDONLY
    } else {
        flags
    };
    tracing::debug!(
        options = ?request.option_tokens().collect::<Vec<_>>(),
        flags = flags.bits(),
        "translated mount options"
    );
    Ok(flags)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ro_sets_only_read_only() {
        assert_eq!(parse_options("ro").expect("valid"), MsFlags::MS_RDONLY);
    }

    #[test]
    fn combined_tokens_or_their_bits() {
        let flags = parse_options("noatime,nodev,sync").expect("valid");
        assert_eq!(
            flags,
            MsFlags::MS_NOATIME | MsFlags::MS_NODEV | MsFlags::MS_SYNCHRONOUS
        );
    }

    #[test]
    fn empty_string_yields_no_flags() {
        assert_eq!(parse_options("").expect("valid"), MsFlags::empty());
    }

    #[test]
    fn order_and_duplicates_do_not_matter() {
        let a = parse_options("sync,noexec,dirsync").expect("valid");
        let b = parse_options("dirsync,sync,noexec,sync,dirsync").expect("valid");
        assert_eq!(a, b);
    }

    #[test]
    fn opt_out_tokens_contribute_nothing() {
        let flags = parse_options("atime,async,dev,diratime,exec,nomand,norelatime,nostrictatime,rw")
            .expect("valid");
        assert!(flags.is_empty());
    }

    #[test]
    fn ro_wins_over_rw() {
        assert_eq!(parse_options("rw,ro").expect("valid"), MsFlags::MS_RDONLY);
    }

    #[test]
    fn suid_maps_to_nodev() {
        assert_eq!(
            parse_options("suid").expect("valid"),
            parse_options("nodev").expect("valid")
        );
    }

    #[test]
    fn unknown_token_is_rejected_by_name() {
        let err = parse_options("noatime,discard").expect_err("discard is unsupported");
        match err {
            MountWaitError::InvalidMountOption { token } => assert_eq!(token, "discard"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn first_unknown_token_in_input_order_is_reported() {
        let err = parse_options("zzbad,noatime,aabad").expect_err("two unknown tokens");
        match err {
            MountWaitError::InvalidMountOption { token } => assert_eq!(token, "zzbad"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn request_reports_first_unknown_token_in_input_order() {
        let request = MountRequest::new("/dev/rbd0", "/mnt", "ext4", "ro,zzbad,aabad", false)
            .expect("valid request");
        let err = mount_flags(&request).expect_err("unknown tokens");
        assert!(err.to_string().contains("`zzbad`"), "{err}");
    }

    #[test]
    fn tokens_are_case_sensitive() {
        assert!(parse_options("RO").is_err());
    }

    #[test]
    fn every_token_round_trips_through_its_name() {
        for opt in MountOption::ALL {
            assert_eq!(opt.to_string().parse::<MountOption>().expect("known"), opt);
        }
    }

    #[test]
    fn translation_is_or_of_each_token() {
        let all: Vec<&str> = MountOption::ALL.iter().map(|o| o.as_str()).collect();
        let expected = MountOption::ALL
            .iter()
            .fold(MsFlags::empty(), |acc, o| acc | o.flags());
        assert_eq!(translate(all.iter().copied()).expect("valid"), expected);
        assert_eq!(translate(all.iter().rev().copied()).expect("valid"), expected);
    }

    #[test]
    fn read_only_switch_adds_rdonly() {
        let request =
            MountRequest::new("/dev/rbd0", "/mnt", "ext4", "noexec", true).expect("valid request");
        assert_eq!(
            mount_flags(&request).expect("valid"),
            MsFlags::MS_NOEXEC | MsFlags::MS_RDONLY
        );
    }

    #[test]
    fn request_without_options_or_read_only_is_empty() {
        let request =
            MountRequest::new("/dev/rbd0", "/mnt", "ext4", "", false).expect("valid request");
        assert!(mount_flags(&request).expect("valid").is_empty());
    }
}

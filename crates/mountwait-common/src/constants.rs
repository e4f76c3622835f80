//! System-wide constants, environment variable names and default paths.

/// Application name used in logs.
pub const APP_NAME: &str = "mountwait";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "mountwait";

/// Mount namespace handle of the host's init process, as seen from a
/// container that bind-mounts the host `/proc` under `/host/proc`.
pub const DEFAULT_HOST_MOUNT_NS: &str = "/host/proc/1/ns/mnt";

/// Mount namespace link of the calling process.
pub const SELF_MOUNT_NS: &str = "/proc/self/ns/mnt";

/// Separator between option tokens.
pub const OPTION_SEPARATOR: char = ',';

/// Environment variable holding the device path.
pub const ENV_DEVICE: &str = "RBD_DEV";
/// Environment variable holding the filesystem type.
pub const ENV_FS_TYPE: &str = "RBD_FS";
/// Environment variable holding the mount point.
pub const ENV_TARGET: &str = "RBD_TARGET";
/// Environment variable holding the option token list.
pub const ENV_OPTIONS: &str = "RBD_OPTS";
/// Environment variable holding the read-only switch.
pub const ENV_READ_ONLY: &str = "RBD_READONLY";
/// Environment variable holding the namespace handle path.
pub const ENV_MOUNT_NS: &str = "RBD_MOUNT_NS";
/// Environment variable holding the config file path.
pub const ENV_CONFIG: &str = "MOUNTWAIT_CONFIG";
/// Environment variable selecting the log format.
pub const ENV_LOG_FORMAT: &str = "MOUNTWAIT_LOG_FORMAT";

/// Process exit codes, one per failure stage.
pub mod exit_code {
    /// Unclassified failure.
    pub const FAILURE: u8 = 1;
    /// Missing or invalid configuration.
    pub const CONFIG: u8 = 2;
    /// Unsupported option token.
    pub const INVALID_OPTION: u8 = 3;
    /// Mount namespace entry failed.
    pub const NAMESPACE: u8 = 4;
    /// The volume was never attached.
    pub const MOUNT: u8 = 5;
    /// The volume was attached but could not be detached.
    pub const UNMOUNT: u8 = 6;
    /// The termination handler could not be installed.
    pub const SIGNAL: u8 = 7;
}

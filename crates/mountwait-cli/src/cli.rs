//! Command-line definition.

use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, ValueEnum};
use mountwait_common::config::FileConfig;
use mountwait_common::constants::{
    BIN_NAME, DEFAULT_HOST_MOUNT_NS, ENV_CONFIG, ENV_DEVICE, ENV_FS_TYPE, ENV_LOG_FORMAT,
    ENV_MOUNT_NS, ENV_OPTIONS, ENV_READ_ONLY, ENV_TARGET,
};

/// Mount an RBD device, hold it until SIGINT/SIGTERM, then force-unmount it.
#[derive(Parser, Debug)]
#[command(name = BIN_NAME, version, about, long_about = None)]
pub struct Cli {
    /// RBD device to mount.
    #[arg(long = "rbddev", env = ENV_DEVICE, value_name = "PATH")]
    pub device: Option<String>,

    /// Filesystem type.
    #[arg(long, env = ENV_FS_TYPE, value_name = "TYPE")]
    pub fstype: Option<String>,

    /// Mount point. Must already exist as a directory.
    #[arg(long, env = ENV_TARGET, value_name = "PATH")]
    pub target: Option<PathBuf>,

    /// Comma-separated mount options (e.g. `noatime,nodev`).
    #[arg(short = 'o', long = "options", env = ENV_OPTIONS, value_name = "LIST")]
    pub options: Option<String>,

    /// Mount read-only. `--read-only=false` (or `RBD_READONLY=false`)
    /// overrides a config file that says `true`.
    #[arg(
        long,
        env = ENV_READ_ONLY,
        value_name = "BOOL",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub read_only: Option<bool>,

    /// Enter this mount namespace before mounting. Without a value, the
    /// host's init namespace under `/host/proc` is used.
    #[arg(
        long = "mount-ns",
        env = ENV_MOUNT_NS,
        value_name = "PATH",
        num_args = 0..=1,
        default_missing_value = DEFAULT_HOST_MOUNT_NS
    )]
    pub mount_ns: Option<PathBuf>,

    /// JSON file with defaults for any of the settings above.
    #[arg(long, env = ENV_CONFIG, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log output format.
    #[arg(long, env = ENV_LOG_FORMAT, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Log output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per event.
    Json,
}

impl Cli {
    /// The settings given by flags or environment, as the top config layer.
    #[must_use]
    pub fn to_file_config(&self) -> FileConfig {
        FileConfig {
            source: self.device.clone(),
            target: self.target.clone(),
            fs_type: self.fstype.clone(),
            options: self.options.clone(),
            read_only: self.read_only,
            mount_namespace: self.mount_ns.clone(),
        }
    }
}

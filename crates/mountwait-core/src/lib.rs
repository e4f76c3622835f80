//! # mountwait-core
//!
//! The mount lifecycle of a single block-storage volume.
//!
//! This crate provides:
//! - **Option translation**: a fixed vocabulary of `mount(8)` option tokens
//!   folded into kernel `MS_*` flags.
//! - **Namespace entry**: joining another process's mount namespace with
//!   `setns(2)` so the mount is visible outside a container.
//! - **Mount control**: `mount(2)` and forced `umount2(2)` behind a
//!   [`backend::MountBackend`] seam, driving a strict state machine.
//! - **Termination**: a blocking wait on SIGINT/SIGTERM/SIGHUP.
//!
//! All unsafe system calls go through `nix`; this crate contains no
//! `unsafe` of its own.

#[cfg(not(target_os = "linux"))]
compile_error!("mountwait-core requires Linux mount namespaces and mount(2)");

pub mod backend;
pub mod controller;
pub mod filesystem;
pub mod lifecycle;
pub mod namespace;
pub mod signal;

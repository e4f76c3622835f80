//! Filesystem attachment for a single volume.
//!
//! Provides the option token vocabulary and the raw `mount(2)` /
//! `umount2(2)` wrappers.

pub mod mount;
pub mod options;

//! # mountwait-common
//!
//! Shared types, error definitions, configuration models, and constants
//! used across the mountwait workspace.
//!
//! This crate is the leaf of the dependency graph. It depends on no other
//! internal crate and on no system-call bindings, so every type here can be
//! built and tested on any host.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;

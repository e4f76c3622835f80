//! Linux namespace handling.
//!
//! Only the mount namespace matters here: the process may join the host's
//! mount table before attaching a volume, and never leaves it again.

pub mod mount;

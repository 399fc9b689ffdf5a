//! External process execution.
//!
//! All subprocess management lives here, free of HTTP concerns, so the
//! probe and the initialization runner share one capture/timeout path.

pub mod executor;
pub mod init_script;
pub mod subprocess;

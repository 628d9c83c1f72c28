//! Logging utilities.
//!
//! This module centralizes logger initialization for native hosts.
//! Browser hosts install their own `log` backend; everything else in the crate
//! only talks to the `log` facade.

mod init;

pub use init::{init_logging, LoggingConfig};

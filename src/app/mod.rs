//! Binary-local command orchestration.
//!
//! `main.rs` parses arguments and dispatches; each subcommand lives in its
//! own module and returns the process exit code.

pub(crate) mod chat;
pub(crate) mod dashboard;
pub(crate) mod init;
pub(crate) mod start;
pub(crate) mod startup;

//! Internals of the `pdrisk` command-line client.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod preflight;
pub mod summary;

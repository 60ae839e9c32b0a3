//! Library surface of the Docmate CLI.
//!
//! The binary in `main.rs` is a thin shell over these modules; keeping them
//! in a library crate makes the command implementations testable.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod package_json;
pub mod sink;

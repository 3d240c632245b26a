//! Output handling for the CLI.
//!
//! This module provides:
//! - The JSON output envelope
//! - Exit codes shared by all commands

pub mod envelope;
pub mod exit_code;

pub use envelope::{
    EntityType, Envelope, ErrorDetails, MessageType, Meta, ResultCode, SCHEMA_VERSION, Status,
};
pub use exit_code::ExitCode;

//! Terminal presentation helpers shared by CLI commands.

pub mod tables;
pub mod theme;

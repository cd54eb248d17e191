//! Command-line interface module
//!
//! Handles argument parsing and dispatches commands to the API client

pub mod args;
pub mod commands;

pub use args::*;
pub use commands::*;

//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `scaffold-ops` command-line tool, one file per subcommand.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and calls into the
//!   `scaffold_ops` library to do the work.

pub mod apply;
pub mod identifier;
pub mod requirements;

//! # Scaffold Operations Library
//!
//! This library is the file-materialization layer of a project scaffolding
//! tool. Given the desired layout of a project (paths mapped to content) and
//! the run options (`force`, `update`, `pretend`), it decides for every path
//! whether and how to touch the filesystem. It is used by the `scaffold-ops`
//! command-line tool but has no dependency on it.
//!
//! ## Quick Example
//!
//! ```
//! use scaffold_ops::operations::{create, no_overwrite, skip_on_update};
//! use scaffold_ops::options::ScaffoldOpts;
//! use scaffold_ops::report::RecordingReporter;
//! use scaffold_ops::structure::{create_structure, Structure};
//!
//! let dir = tempfile::tempdir().unwrap();
//!
//! let mut structure = Structure::new();
//! structure.insert_file("README.md", "# My Project");
//! structure.insert("setup.cfg", Some("[metadata]".into()), Box::new(no_overwrite(create())));
//! structure.insert("LICENSE", Some("MIT".into()), Box::new(skip_on_update(create())));
//!
//! let reporter = RecordingReporter::new();
//! let opts = ScaffoldOpts::new();
//! let written = create_structure(&structure, dir.path(), &opts, &reporter).unwrap();
//!
//! assert_eq!(written.len(), 3);
//! assert_eq!(reporter.actions(), vec!["create", "create", "create"]);
//! ```
//!
//! ## Core Concepts
//!
//! - **File operations (`operations`)**: functions from (path, content,
//!   options) to "acted on this path" or nothing. Policies such as
//!   `no_overwrite`, `skip_on_update` and `add_permissions` wrap a base
//!   `create` operation and compose by nesting.
//! - **Reporting (`report`)**: every decision, including skips and simulated
//!   actions in pretend mode, goes to an explicitly passed `Reporter`.
//! - **Primitives (`fs_utils`)**: pretend-aware create/chmod/move/chdir.
//! - **Layouts (`config`, `structure`)**: YAML layout files and their
//!   materialization below a project root.
//! - **Requirements (`requirements`)**: merging a project's declared
//!   dependency requirements with the tool's own pinned versions.
//! - **Identifiers (`identifier`)** and **suggestions (`suggestions`)**:
//!   namespace sanitization and Levenshtein-based typo hints.

pub mod config;
pub mod error;
pub mod fs_utils;
pub mod identifier;
pub mod operations;
pub mod options;
pub mod output;
pub mod report;
pub mod requirements;
pub mod structure;
pub mod suggestions;

#[cfg(test)]
mod proptest_tests;

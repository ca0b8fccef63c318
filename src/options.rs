//! Run options shared by every file operation.

use serde::{Deserialize, Serialize};

/// Flags recognised by the file operations.
///
/// Treat a value as immutable once a run has started; clone it to derive a
/// variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScaffoldOpts {
    /// Overwrite existing files and regenerate skip-on-update files.
    pub force: bool,
    /// Decide and report everything, but never mutate the disk.
    pub pretend: bool,
    /// The run targets an existing project rather than a fresh one.
    pub update: bool,
}

impl ScaffoldOpts {
    /// Names of the recognised option keys.
    pub const KEYS: [&'static str; 3] = ["force", "pretend", "update"];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_pretend(mut self, pretend: bool) -> Self {
        self.pretend = pretend;
        self
    }

    pub fn with_update(mut self, update: bool) -> Self {
        self.update = update;
        self
    }
}

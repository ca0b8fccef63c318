//! Shared test utilities for the CLI end-to-end tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_layout(layouts::MINIMAL);
//!     fixture.apply().assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::layouts;
    #[allow(unused_imports)]
    pub use super::TestFixture;
}

/// Layout file snippets for testing.
#[allow(dead_code)]
pub mod layouts {
    /// A single plain file.
    pub const MINIMAL: &str = r##"
files:
  README.md:
    content: "# Project"
"##;

    /// One file per wrapper combination the CLI supports.
    pub const WRAPPED: &str = r##"
files:
  README.md:
    content: "# Project"
  setup.cfg:
    content: "[metadata]"
    ops: [no_overwrite]
  src/pkg/skeleton.py:
    content: "def fib(n): ..."
    ops: [skip_on_update]
  run.sh:
    content: "#!/bin/sh"
    ops: [{add_permissions: "755"}, no_overwrite]
"##;

    /// An option name with a typo.
    pub const MISSPELLED_OPTION: &str = r##"
options:
  updte: true
files:
  README.md:
    content: "# Project"
"##;

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "files: [unclosed";
}

/// A temporary project directory with an optional layout file.
#[allow(dead_code)]
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write `.scaffold.yaml` with the given content.
    pub fn with_layout(self, content: &str) -> Self {
        self.temp_dir
            .child(".scaffold.yaml")
            .write_str(content)
            .expect("Failed to write layout file");
        self
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the layout file.
    pub fn layout_path(&self) -> PathBuf {
        self.temp_dir.path().join(".scaffold.yaml")
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Read a file below the fixture root.
    pub fn read(&self, path: &str) -> String {
        std::fs::read_to_string(self.path().join(path)).expect("Failed to read file")
    }

    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("scaffold-ops");
        cmd.current_dir(self.path())
            .env_remove("RUST_LOG")
            .env_remove("SCAFFOLD_OPS_CONFIG")
            .env("NO_COLOR", "1");
        cmd
    }

    /// Create an `apply` command for this fixture's layout.
    pub fn apply(&self) -> assert_cmd::Command {
        let mut cmd = self.command();
        cmd.arg("apply");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_with_layout() {
        let fixture = TestFixture::new().with_layout(layouts::MINIMAL);
        assert!(fixture.layout_path().exists());
    }

    #[test]
    fn test_layouts_are_valid_yaml() {
        for layout in [
            layouts::MINIMAL,
            layouts::WRAPPED,
            layouts::MISSPELLED_OPTION,
        ] {
            serde_yaml::from_str::<serde_yaml::Value>(layout).expect("Layout should be valid YAML");
        }
    }

    #[test]
    fn test_invalid_yaml_is_actually_invalid() {
        let result = serde_yaml::from_str::<serde_yaml::Value>(layouts::INVALID_YAML);
        assert!(result.is_err(), "INVALID_YAML should not parse");
    }
}

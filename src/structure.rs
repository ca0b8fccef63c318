//! # Project Structure
//!
//! A [`Structure`] maps project-relative paths to their content and the file
//! operation responsible for them. [`create_structure`] walks it and hands
//! every entry to its operation.
//!
//! Entries are independent: a failure stops the walk and is returned, but
//! whatever was written before stays on disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::{Layout, Wrapper};
use crate::error::Result;
use crate::operations::{add_permissions, create, no_overwrite, skip_on_update, BoxedFileOp};
use crate::options::ScaffoldOpts;
use crate::report::Reporter;

/// Content plus the operation that materializes it.
pub struct Entry {
    pub contents: Option<String>,
    pub op: BoxedFileOp,
}

impl std::fmt::Debug for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("contents", &self.contents)
            .finish_non_exhaustive()
    }
}

/// Desired project layout, ordered by path.
#[derive(Debug, Default)]
pub struct Structure {
    entries: BTreeMap<PathBuf, Entry>,
}

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the entry for `path`.
    pub fn insert<P: Into<PathBuf>>(&mut self, path: P, contents: Option<String>, op: BoxedFileOp) {
        self.entries.insert(path.into(), Entry { contents, op });
    }

    /// Add `path` with the default [`create`] operation.
    pub fn insert_file<P: Into<PathBuf>, S: Into<String>>(&mut self, path: P, contents: S) {
        self.insert(path, Some(contents.into()), Box::new(create()));
    }

    pub fn get<P: AsRef<Path>>(&self, path: P) -> Option<&Entry> {
        self.entries.get(path.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &Entry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build a structure from a parsed layout file.
    pub fn from_layout(layout: &Layout) -> Self {
        let mut structure = Self::new();
        for (path, file_spec) in &layout.files {
            structure.insert(path.clone(), file_spec.content.clone(), build_op(&file_spec.ops));
        }
        structure
    }
}

/// Wrap [`create`] in `wrappers`, listed outermost first.
pub fn build_op(wrappers: &[Wrapper]) -> BoxedFileOp {
    wrappers
        .iter()
        .rev()
        .fold(
            Box::new(create()) as BoxedFileOp,
            |inner, wrapper| -> BoxedFileOp {
                match wrapper {
                    Wrapper::NoOverwrite => Box::new(no_overwrite(inner)),
                    Wrapper::SkipOnUpdate => Box::new(skip_on_update(inner)),
                    Wrapper::AddPermissions(mode) => Box::new(add_permissions(*mode, inner)),
                }
            },
        )
}

/// Materialize `structure` below `root`.
///
/// Returns the paths whose operation acted, in path order.
pub fn create_structure(
    structure: &Structure,
    root: &Path,
    opts: &ScaffoldOpts,
    reporter: &dyn Reporter,
) -> Result<Vec<PathBuf>> {
    let mut changed = Vec::new();

    for (relative, entry) in structure.iter() {
        let path = root.join(relative);
        let result = entry
            .op
            .apply(&path, entry.contents.as_deref(), opts, reporter)?;

        debug!(
            "{}: {}",
            relative.display(),
            if result.is_some() { "acted" } else { "untouched" }
        );
        changed.extend(result);
    }

    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;
    use crate::report::RecordingReporter;
    use std::fs;
    use tempfile::TempDir;

    const LAYOUT: &str = r##"
files:
  README.md:
    content: "# Project"
  setup.cfg:
    content: "[metadata]"
    ops: [no_overwrite]
  scripts/bootstrap.sh:
    content: "#!/bin/sh"
    ops: [{add_permissions: "755"}, skip_on_update]
  src/pkg/__init__.py:
    content: ""
  unused.txt: {}
"##;

    #[test]
    fn test_create_structure_fresh_project() {
        let temp = TempDir::new().unwrap();
        let layout = config::parse(LAYOUT).unwrap();
        let structure = Structure::from_layout(&layout);
        let reporter = RecordingReporter::new();

        let changed =
            create_structure(&structure, temp.path(), &ScaffoldOpts::new(), &reporter).unwrap();

        assert_eq!(changed.len(), 4);
        assert_eq!(
            fs::read_to_string(temp.path().join("README.md")).unwrap(),
            "# Project"
        );
        assert_eq!(
            fs::read_to_string(temp.path().join("src/pkg/__init__.py")).unwrap(),
            ""
        );
        assert!(!temp.path().join("unused.txt").exists());
        assert_eq!(reporter.count("create"), 4);
        assert_eq!(reporter.count("chmod"), 1);
    }

    #[test]
    fn test_create_structure_update_run() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("setup.cfg"), "user edits").unwrap();
        let structure = Structure::from_layout(&config::parse(LAYOUT).unwrap());
        let reporter = RecordingReporter::new();
        let opts = ScaffoldOpts::new().with_update(true);

        let changed = create_structure(&structure, temp.path(), &opts, &reporter).unwrap();

        let names: Vec<_> = changed
            .iter()
            .map(|p| p.strip_prefix(temp.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![PathBuf::from("README.md"), PathBuf::from("src/pkg/__init__.py")]
        );
        assert_eq!(
            fs::read_to_string(temp.path().join("setup.cfg")).unwrap(),
            "user edits"
        );
        assert!(!temp.path().join("scripts/bootstrap.sh").exists());
        assert_eq!(reporter.count("skip"), 2);
    }

    #[test]
    fn test_create_structure_pretend_touches_nothing() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("project");
        let structure = Structure::from_layout(&config::parse(LAYOUT).unwrap());
        let reporter = RecordingReporter::new();
        let opts = ScaffoldOpts::new().with_pretend(true);

        let changed = create_structure(&structure, &root, &opts, &reporter).unwrap();

        assert_eq!(changed.len(), 4);
        assert!(!root.exists());
        assert_eq!(reporter.count("create"), 4);
        assert_eq!(reporter.actions().last().map(String::as_str), Some("create"));
    }

    #[test]
    fn test_build_op_nests_outermost_first() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("x.sh");
        fs::write(&path, "old").unwrap();
        let reporter = RecordingReporter::new();

        // skip_on_update decides before add_permissions ever runs
        let op = build_op(&[Wrapper::SkipOnUpdate, Wrapper::AddPermissions(0o100)]);
        let result = op
            .apply(&path, Some("new"), &ScaffoldOpts::new().with_update(true), &reporter)
            .unwrap();

        assert_eq!(result, None);
        assert_eq!(reporter.actions(), vec!["skip"]);
    }

    #[test]
    fn test_insert_file_uses_create() {
        let temp = TempDir::new().unwrap();
        let mut structure = Structure::new();
        structure.insert_file("a.txt", "a");
        structure.insert("b.txt", None, Box::new(create()));
        assert_eq!(structure.len(), 2);
        assert!(structure.get("b.txt").unwrap().contents.is_none());

        let changed = create_structure(
            &structure,
            temp.path(),
            &ScaffoldOpts::new(),
            &RecordingReporter::new(),
        )
        .unwrap();

        assert_eq!(changed, vec![temp.path().join("a.txt")]);
    }

    #[test]
    fn test_failure_keeps_earlier_writes() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("blocker"), "file").unwrap();
        let mut structure = Structure::new();
        structure.insert_file("a.txt", "a");
        structure.insert_file("blocker/child.txt", "b");

        let result = create_structure(
            &structure,
            temp.path(),
            &ScaffoldOpts::new(),
            &RecordingReporter::new(),
        );

        assert!(result.is_err());
        assert!(temp.path().join("a.txt").exists());
    }
}

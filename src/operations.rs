//! # File Operations
//!
//! A **file operation** decides whether and how a single path of the project
//! layout is materialized on disk. It receives the path, the content (or
//! `None`, meaning "do not write this file at all", which is different from
//! `Some("")`, an empty file), the run options and the reporting sink. It
//! returns `Some(path)` if it acted on the path and `None` if it did not.
//!
//! [`Create`] is the base operation. Policies are layered on top of it by
//! wrapping: each wrapper owns an inner operation and decides, before
//! delegating, whether to call it at all, and may add an effect afterwards.
//!
//! ```
//! use scaffold_ops::operations::{add_permissions, create, no_overwrite, FileOp};
//! use scaffold_ops::options::ScaffoldOpts;
//! use scaffold_ops::report::RecordingReporter;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let script = dir.path().join("run.sh");
//! let op = add_permissions(0o100, no_overwrite(create()));
//! let reporter = RecordingReporter::new();
//!
//! let opts = ScaffoldOpts::new().with_pretend(true);
//! let result = op.apply(&script, Some("#!/bin/sh\n"), &opts, &reporter).unwrap();
//! assert_eq!(result.as_deref(), Some(script.as_path()));
//! assert!(!script.exists());
//! let chmod = format!("chmod {:03o}", scaffold_ops::fs_utils::new_file_mode() | 0o100);
//! assert_eq!(reporter.actions(), vec!["create".to_string(), chmod]);
//! ```
//!
//! ## Ordering
//!
//! Wrappers do not commute. The outermost wrapper decides first, then
//! delegates inward:
//!
//! - `add_permissions(P, no_overwrite(create()))` asks the overwrite policy
//!   first and adds permissions only if the inner operation acted.
//! - `no_overwrite(add_permissions(P, create()))` refuses before the
//!   permission step is ever reached, so nothing is changed at all for an
//!   existing file.
//!
//! Call sites pick the order they need; both are supported as written.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::fs_utils;
use crate::options::ScaffoldOpts;
use crate::report::Reporter;

/// A function deciding how to materialize one path.
pub trait FileOp {
    /// Run the operation. Returns the path if it acted, `None` otherwise.
    fn apply(
        &self,
        path: &Path,
        contents: Option<&str>,
        opts: &ScaffoldOpts,
        reporter: &dyn Reporter,
    ) -> Result<Option<PathBuf>>;
}

impl<O: FileOp + ?Sized> FileOp for Box<O> {
    fn apply(
        &self,
        path: &Path,
        contents: Option<&str>,
        opts: &ScaffoldOpts,
        reporter: &dyn Reporter,
    ) -> Result<Option<PathBuf>> {
        (**self).apply(path, contents, opts, reporter)
    }
}

impl<O: FileOp + ?Sized> FileOp for &O {
    fn apply(
        &self,
        path: &Path,
        contents: Option<&str>,
        opts: &ScaffoldOpts,
        reporter: &dyn Reporter,
    ) -> Result<Option<PathBuf>> {
        (**self).apply(path, contents, opts, reporter)
    }
}

/// An owned, type-erased file operation.
pub type BoxedFileOp = Box<dyn FileOp>;

/// Adapts a plain function or closure into a [`FileOp`].
#[derive(Clone)]
pub struct FnOp<F>(F);

/// Use `f` as a file operation, so it composes with the wrappers.
pub fn from_fn<F>(f: F) -> FnOp<F>
where
    F: Fn(&Path, Option<&str>, &ScaffoldOpts, &dyn Reporter) -> Result<Option<PathBuf>>,
{
    FnOp(f)
}

impl<F> FileOp for FnOp<F>
where
    F: Fn(&Path, Option<&str>, &ScaffoldOpts, &dyn Reporter) -> Result<Option<PathBuf>>,
{
    fn apply(
        &self,
        path: &Path,
        contents: Option<&str>,
        opts: &ScaffoldOpts,
        reporter: &dyn Reporter,
    ) -> Result<Option<PathBuf>> {
        (self.0)(path, contents, opts, reporter)
    }
}

/// Base operation: write the file whenever there is content.
#[derive(Debug, Clone, Copy, Default)]
pub struct Create;

/// The default operation, see [`Create`].
pub fn create() -> Create {
    Create
}

impl FileOp for Create {
    fn apply(
        &self,
        path: &Path,
        contents: Option<&str>,
        opts: &ScaffoldOpts,
        reporter: &dyn Reporter,
    ) -> Result<Option<PathBuf>> {
        let Some(contents) = contents else {
            return Ok(None);
        };

        fs_utils::create_file(path, contents, opts.pretend, reporter).map(Some)
    }
}

/// Runs the inner operation unless the file exists and `force` is off.
#[derive(Debug, Clone)]
pub struct NoOverwrite<O> {
    inner: O,
}

/// Protect existing files from being overwritten, see [`NoOverwrite`].
pub fn no_overwrite<O: FileOp>(inner: O) -> NoOverwrite<O> {
    NoOverwrite { inner }
}

impl<O: FileOp> FileOp for NoOverwrite<O> {
    fn apply(
        &self,
        path: &Path,
        contents: Option<&str>,
        opts: &ScaffoldOpts,
        reporter: &dyn Reporter,
    ) -> Result<Option<PathBuf>> {
        if opts.force || !path.exists() {
            return self.inner.apply(path, contents, opts, reporter);
        }

        reporter.report_path("skip", path);
        Ok(None)
    }
}

/// Runs the inner operation unless this is an update run and `force` is off.
///
/// Unlike [`NoOverwrite`] this never looks at the disk, only at the run mode.
#[derive(Debug, Clone)]
pub struct SkipOnUpdate<O> {
    inner: O,
}

/// Only materialize the file when creating a project, see [`SkipOnUpdate`].
pub fn skip_on_update<O: FileOp>(inner: O) -> SkipOnUpdate<O> {
    SkipOnUpdate { inner }
}

impl<O: FileOp> FileOp for SkipOnUpdate<O> {
    fn apply(
        &self,
        path: &Path,
        contents: Option<&str>,
        opts: &ScaffoldOpts,
        reporter: &dyn Reporter,
    ) -> Result<Option<PathBuf>> {
        if opts.force || !opts.update {
            return self.inner.apply(path, contents, opts, reporter);
        }

        reporter.report_path("skip", path);
        Ok(None)
    }
}

/// Adds permission bits to whatever the inner operation produced.
///
/// The new mode is `current | permissions`, so bits granted by the OS or the
/// umask are never removed. Best effort on platforms without POSIX
/// permissions.
///
/// The chmod step runs only when the inner operation returned a path. An
/// existing file that the inner operation left alone (refused, skipped or
/// given no content) keeps its mode, so an update run never changes files it
/// did not write. It also keeps pretend runs exact: the only paths that may
/// be missing from disk are the ones the inner operation claims to have
/// created, and those are assumed to have [`fs_utils::new_file_mode`].
#[derive(Debug, Clone)]
pub struct AddPermissions<O> {
    permissions: u32,
    inner: O,
}

/// Add `permissions` on top of the file's mode, see [`AddPermissions`].
pub fn add_permissions<O: FileOp>(permissions: u32, inner: O) -> AddPermissions<O> {
    AddPermissions { permissions, inner }
}

impl<O: FileOp> FileOp for AddPermissions<O> {
    fn apply(
        &self,
        path: &Path,
        contents: Option<&str>,
        opts: &ScaffoldOpts,
        reporter: &dyn Reporter,
    ) -> Result<Option<PathBuf>> {
        let result = self.inner.apply(path, contents, opts, reporter)?;
        if result.is_none() {
            return Ok(None);
        }

        let current = match fs_utils::file_mode(path)? {
            Some(mode) => mode,
            // In pretend mode a freshly "created" file is not on disk yet
            None if opts.pretend => fs_utils::new_file_mode(),
            None => return Ok(result),
        };
        fs_utils::chmod(path, current | self.permissions, opts.pretend, reporter)?;

        Ok(result)
    }
}

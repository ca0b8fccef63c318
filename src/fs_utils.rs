//! # Filesystem Primitives
//!
//! Low-level helpers the file operations are built on. Every primitive takes
//! a `pretend` flag: when it is set the primitive reports what it would do
//! and returns as if it had done it, without touching the disk. Callers never
//! duplicate this logic, they only pass the flag along.
//!
//! Errors are wrapped in [`Error::Filesystem`] with the offending path and
//! propagated as-is. There is no retry.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::report::Reporter;

/// Umask assumed when the process umask cannot be read.
pub const FALLBACK_UMASK: u32 = 0o022;

/// File creation mask of the current process.
///
/// Read from the `Umask:` line of `/proc/self/status`. Setting the mask to
/// read it back would race with other threads creating files, so platforms
/// without that file get [`FALLBACK_UMASK`].
pub fn process_umask() -> u32 {
    fs::read_to_string("/proc/self/status")
        .ok()
        .and_then(|status| parse_umask(&status))
        .unwrap_or(FALLBACK_UMASK)
}

fn parse_umask(status: &str) -> Option<u32> {
    status
        .lines()
        .find_map(|line| line.strip_prefix("Umask:"))
        .and_then(|value| u32::from_str_radix(value.trim(), 8).ok())
        .map(|mask| mask & 0o777)
}

/// Permission bits a file written by [`create_file`] would get.
///
/// Pretend runs use this for paths that do not exist yet, so the `chmod`
/// they report matches the one a real run would.
#[cfg(unix)]
pub fn new_file_mode() -> u32 {
    0o666 & !process_umask()
}

#[cfg(not(unix))]
pub fn new_file_mode() -> u32 {
    0o666
}

/// Write `content` to `path`, creating parent directories as needed.
pub fn create_file(
    path: &Path,
    content: &str,
    pretend: bool,
    reporter: &dyn Reporter,
) -> Result<PathBuf> {
    if !pretend {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| Error::Filesystem {
                    message: format!("Failed to create directory '{}': {}", parent.display(), e),
                })?;
            }
        }

        fs::write(path, content).map_err(|e| Error::Filesystem {
            message: format!("Failed to write file '{}': {}", path.display(), e),
        })?;
    }

    reporter.report_path("create", path);
    Ok(path.to_path_buf())
}

/// Create `path` and any missing parents.
pub fn create_directory(path: &Path, pretend: bool, reporter: &dyn Reporter) -> Result<PathBuf> {
    if !pretend {
        fs::create_dir_all(path).map_err(|e| Error::Filesystem {
            message: format!("Failed to create directory '{}': {}", path.display(), e),
        })?;
    }

    reporter.report_path("create", path);
    Ok(path.to_path_buf())
}

/// Current permission bits of `path`, or `None` if it does not exist.
pub fn file_mode(path: &Path) -> Result<Option<u32>> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(Some(mode_bits(&metadata))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::Filesystem {
            message: format!("Failed to read metadata of '{}': {}", path.display(), e),
        }),
    }
}

#[cfg(unix)]
fn mode_bits(metadata: &fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn mode_bits(metadata: &fs::Metadata) -> u32 {
    if metadata.permissions().readonly() {
        0o444
    } else {
        0o666
    }
}

/// Set the permission bits of `path` to `mode`.
///
/// Reported as `chmod NNN`. On platforms without POSIX permissions only the
/// read-only flag is honoured.
pub fn chmod(path: &Path, mode: u32, pretend: bool, reporter: &dyn Reporter) -> Result<PathBuf> {
    let mode = mode & 0o7777;
    if !pretend {
        set_mode(path, mode).map_err(|e| Error::Filesystem {
            message: format!("Failed to set permissions on '{}': {}", path.display(), e),
        })?;
    }

    reporter.report_path(&format!("chmod {mode:03o}"), path);
    Ok(path.to_path_buf())
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(path: &Path, mode: u32) -> std::io::Result<()> {
    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_readonly(mode & 0o222 == 0);
    fs::set_permissions(path, permissions)
}

/// Move `sources` to `target`.
///
/// If `target` is an existing directory every source is moved inside it,
/// keeping its file name. Otherwise the (single) source is renamed to
/// `target`. A `move` report is emitted per source only when `log` is set.
pub fn move_paths<P: AsRef<Path>>(
    sources: &[P],
    target: &Path,
    pretend: bool,
    log: bool,
    reporter: &dyn Reporter,
) -> Result<()> {
    let into_dir = target.is_dir();
    if !into_dir && sources.len() > 1 {
        return Err(Error::Filesystem {
            message: format!(
                "Cannot move {} paths to '{}': target is not a directory",
                sources.len(),
                target.display()
            ),
        });
    }

    for source in sources {
        let source = source.as_ref();
        let destination = match (into_dir, source.file_name()) {
            (true, Some(name)) => target.join(name),
            (true, None) => {
                return Err(Error::Filesystem {
                    message: format!("Cannot move '{}': no file name", source.display()),
                })
            }
            (false, _) => target.to_path_buf(),
        };

        if log {
            reporter.report(
                "move",
                &format!(
                    "{} to {}",
                    crate::report::display_path(source),
                    crate::report::display_path(target)
                ),
            );
        }

        if !pretend {
            fs::rename(source, &destination).map_err(|e| Error::Filesystem {
                message: format!(
                    "Failed to move '{}' to '{}': {}",
                    source.display(),
                    destination.display(),
                    e
                ),
            })?;
        }
    }

    Ok(())
}

/// Restores the previous working directory when dropped.
#[derive(Debug)]
#[must_use = "the previous directory is restored as soon as the guard is dropped"]
pub struct ChdirGuard {
    previous: Option<PathBuf>,
}

impl Drop for ChdirGuard {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            if let Err(e) = std::env::set_current_dir(&previous) {
                log::warn!("Failed to restore directory '{}': {}", previous.display(), e);
            }
        }
    }
}

/// Change the working directory to `path` until the returned guard drops.
///
/// With `pretend` the directory is left unchanged. The `chdir` report is
/// emitted when either `log` or `pretend` is set.
pub fn chdir(path: &Path, pretend: bool, log: bool, reporter: &dyn Reporter) -> Result<ChdirGuard> {
    if log || pretend {
        reporter.report_path("chdir", path);
    }

    if pretend {
        return Ok(ChdirGuard { previous: None });
    }

    let previous = std::env::current_dir()?;
    std::env::set_current_dir(path).map_err(|e| Error::Filesystem {
        message: format!("Failed to change directory to '{}': {}", path.display(), e),
    })?;

    Ok(ChdirGuard {
        previous: Some(previous),
    })
}

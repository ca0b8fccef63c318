//! # Reporting Sink
//!
//! Every decision taken while materializing files is announced through a
//! [`Reporter`]: real writes, simulated writes in pretend mode, permission
//! changes and policy skips alike. A dry run therefore produces the same
//! sequence of reports as the real run would.
//!
//! The sink is append-only. Nothing in the pipeline reads reports back, so a
//! reporter can forward them to the logger, collect them for later, or drop
//! them.

use std::path::Path;
use std::sync::Mutex;

use log::info;

use crate::output::{format_action, OutputConfig};

/// Width of the action column used by [`LogReporter`].
pub const ACTION_WIDTH: usize = 10;

/// A sink receiving one call per decision point.
pub trait Reporter {
    /// Record `action` (e.g. `create`, `skip`, `chmod 755`) on `target`.
    fn report(&self, action: &str, target: &str);

    /// Convenience wrapper for path targets.
    fn report_path(&self, action: &str, path: &Path) {
        self.report(action, &display_path(path));
    }
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn report(&self, action: &str, target: &str) {
        (**self).report(action, target);
    }
}

/// Sends every report to both sinks, first to `A`.
impl<A: Reporter, B: Reporter> Reporter for (A, B) {
    fn report(&self, action: &str, target: &str) {
        self.0.report(action, target);
        self.1.report(action, target);
    }
}

/// A single recorded report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub action: String,
    pub target: String,
}

/// Forwards reports to the `log` facade at `info` level.
#[derive(Debug, Clone, Default)]
pub struct LogReporter {
    output: OutputConfig,
}

impl LogReporter {
    pub fn new(output: OutputConfig) -> Self {
        Self { output }
    }
}

impl Reporter for LogReporter {
    fn report(&self, action: &str, target: &str) {
        let action = format_action(&self.output, action, ACTION_WIDTH);
        info!("{action}  {target}");
    }
}

/// Keeps every report in memory, in the order received.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    reports: Mutex<Vec<Report>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all reports received so far.
    pub fn reports(&self) -> Vec<Report> {
        self.lock().clone()
    }

    /// Just the action tags, in order.
    pub fn actions(&self) -> Vec<String> {
        self.lock().iter().map(|r| r.action.clone()).collect()
    }

    /// Number of reports whose action starts with `verb`.
    pub fn count(&self, verb: &str) -> usize {
        self.lock()
            .iter()
            .filter(|r| r.action.split_whitespace().next() == Some(verb))
            .count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Report>> {
        // A panic while holding the lock cannot leave a half-pushed report
        self.reports.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, action: &str, target: &str) {
        self.lock().push(Report {
            action: action.to_string(),
            target: target.to_string(),
        });
    }
}

/// Discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&self, _action: &str, _target: &str) {}
}

/// Show `path` relative to the current directory when it lives below it.
pub fn display_path(path: &Path) -> String {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(&cwd).ok().map(Path::to_path_buf))
        .filter(|rel| !rel.as_os_str().is_empty())
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}

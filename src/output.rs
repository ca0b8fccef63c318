//! # Output Configuration
//!
//! Decides whether report lines are colorized and renders the action column.
//!
//! In `auto` mode the usual conventions apply, checked in this order:
//! `NO_COLOR` (any value) and `CLICOLOR=0` turn colors off,
//! `CLICOLOR_FORCE` turns them on, `TERM=dumb` turns them off, and otherwise
//! colors follow whether stderr is a color-capable terminal.

use std::env;
use std::str::FromStr;

use console::style;

/// Value of the `--color` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    Always,
    Never,
    #[default]
    Auto,
}

impl FromStr for ColorChoice {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            "auto" => Ok(Self::Auto),
            other => Err(format!("expected always, never or auto, got '{other}'")),
        }
    }
}

/// Whether report actions should be styled.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    /// Resolve `choice` against the process environment.
    pub fn from_env(choice: ColorChoice) -> Self {
        Self::resolve(choice, |name| {
            env::var_os(name).map(|v| v.to_string_lossy().into_owned())
        })
    }

    /// Resolve `choice` using `lookup` to read environment variables.
    pub fn resolve<F>(choice: ColorChoice, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let use_color = match choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => match env_preference(&lookup) {
                Some(preference) => preference,
                None => console::Term::stderr().features().colors_supported(),
            },
        };

        Self { use_color }
    }

    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env(ColorChoice::Auto)
    }
}

/// The environment's say on colors, or `None` to ask the terminal.
fn env_preference<F: Fn(&str) -> Option<String>>(lookup: &F) -> Option<bool> {
    if lookup("NO_COLOR").is_some() || lookup("CLICOLOR").as_deref() == Some("0") {
        return Some(false);
    }
    if lookup("CLICOLOR_FORCE").is_some_and(|v| !v.is_empty() && v != "0") {
        return Some(true);
    }
    if lookup("TERM").as_deref() == Some("dumb") {
        return Some(false);
    }
    None
}

/// Render a report action, right-aligned in a column of `width` characters.
///
/// Skips are dimmed, permission changes and moves are yellow, everything else
/// is green. Without color the padded action is returned as-is.
pub fn format_action(config: &OutputConfig, action: &str, width: usize) -> String {
    let padded = format!("{action:>width$}");
    if !config.use_color {
        return padded;
    }

    let verb = action.split_whitespace().next().unwrap_or_default();
    let styled = match verb {
        "skip" => style(padded).dim(),
        "chmod" | "move" | "chdir" => style(padded).yellow(),
        _ => style(padded).green(),
    };
    styled.force_styling(true).bold().to_string()
}

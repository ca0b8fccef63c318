//! # Layout Files
//!
//! A layout file describes the project to materialize: run options and, for
//! every path, its content and the policies wrapped around the base `create`
//! operation.
//!
//! ```yaml
//! options:
//!   update: true
//! files:
//!   README.md:
//!     content: "# Title"
//!   setup.cfg:
//!     content: "[metadata]"
//!     ops: [no_overwrite]
//!   scripts/run.sh:
//!     content: "#!/bin/sh"
//!     ops: [{add_permissions: "755"}, skip_on_update]
//!   unused.txt: {}
//! ```
//!
//! `ops` are listed outermost first. An entry without `content` is never
//! written. Modes are octal strings (`"755"`, `"0o755"`). They must be quoted:
//! YAML turns an unquoted `0o755` into the number 493 before this module sees
//! it, so numbers are rejected instead of being guessed at.
//!
//! Unknown option keys and wrapper names are rejected with a hint pointing
//! at the closest known name.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};
use crate::options::ScaffoldOpts;
use crate::suggestions::did_you_mean;

/// Default layout file name.
pub const DEFAULT_LAYOUT_FILE: &str = ".scaffold.yaml";

/// Names accepted in `ops` lists.
pub const WRAPPER_NAMES: [&str; 3] = ["no_overwrite", "skip_on_update", "add_permissions"];

/// A policy wrapped around the base operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wrapper {
    NoOverwrite,
    SkipOnUpdate,
    AddPermissions(u32),
}

/// One path of the layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSpec {
    /// `None` means the file is not written at all.
    pub content: Option<String>,
    /// Wrappers, outermost first.
    pub ops: Vec<Wrapper>,
}

/// A parsed and validated layout file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    pub options: ScaffoldOpts,
    pub files: BTreeMap<PathBuf, FileSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLayout {
    #[serde(default)]
    options: Mapping,
    #[serde(default)]
    files: BTreeMap<String, RawFileSpec>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawFileSpec {
    content: Option<String>,
    ops: Vec<Value>,
}

/// Parse a layout from YAML text.
pub fn parse(yaml_content: &str) -> Result<Layout> {
    let raw: RawLayout = serde_yaml::from_str(yaml_content)?;

    let options = parse_options(raw.options)?;

    let mut files = BTreeMap::new();
    for (path, raw_file) in raw.files {
        let path = validate_path(&path)?;
        let ops = raw_file
            .ops
            .iter()
            .map(|value| parse_wrapper(&path, value))
            .collect::<Result<Vec<_>>>()?;
        files.insert(
            path,
            FileSpec {
                content: raw_file.content,
                ops,
            },
        );
    }

    Ok(Layout { options, files })
}

/// Read and parse a layout file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Layout> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

fn parse_options(options: Mapping) -> Result<ScaffoldOpts> {
    for key in options.keys() {
        let key = key.as_str().ok_or_else(|| Error::ConfigParse {
            message: format!("Option names must be strings, got {key:?}"),
            hint: None,
        })?;
        if !ScaffoldOpts::KEYS.contains(&key) {
            return Err(Error::ConfigParse {
                message: format!("Unknown option '{key}'"),
                hint: did_you_mean(key, &ScaffoldOpts::KEYS).or_else(|| {
                    Some(format!("Known options are: {}", ScaffoldOpts::KEYS.join(", ")))
                }),
            });
        }
    }

    Ok(serde_yaml::from_value(Value::Mapping(options))?)
}

fn validate_path(path: &str) -> Result<PathBuf> {
    let path = PathBuf::from(path);
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));

    if path.as_os_str().is_empty() || escapes {
        return Err(Error::ConfigParse {
            message: format!("Invalid file path '{}'", path.display()),
            hint: Some("Paths must be relative and stay inside the project".to_string()),
        });
    }

    Ok(path)
}

fn unknown_wrapper(path: &Path, name: &str) -> Error {
    Error::ConfigParse {
        message: format!("Unknown operation '{name}' for '{}'", path.display()),
        hint: did_you_mean(name, &WRAPPER_NAMES),
    }
}

fn parse_wrapper(path: &Path, value: &Value) -> Result<Wrapper> {
    match value {
        Value::String(name) => match name.as_str() {
            "no_overwrite" => Ok(Wrapper::NoOverwrite),
            "skip_on_update" => Ok(Wrapper::SkipOnUpdate),
            "add_permissions" => Err(Error::ConfigParse {
                message: format!("'add_permissions' for '{}' needs a mode", path.display()),
                hint: Some("Write it as {add_permissions: \"755\"}".to_string()),
            }),
            other => Err(unknown_wrapper(path, other)),
        },
        Value::Mapping(map) if map.len() == 1 => {
            let (key, mode) = map.iter().next().ok_or_else(|| unknown_wrapper(path, ""))?;
            match key.as_str() {
                Some("add_permissions") => parse_mode(path, mode).map(Wrapper::AddPermissions),
                Some(other) => Err(unknown_wrapper(path, other)),
                None => Err(unknown_wrapper(path, &format!("{key:?}"))),
            }
        }
        other => Err(Error::ConfigParse {
            message: format!("Invalid operation {other:?} for '{}'", path.display()),
            hint: Some(format!("Valid operations are: {}", WRAPPER_NAMES.join(", "))),
        }),
    }
}

/// Parse an octal permission mode such as `"755"` or `"0o644"`.
pub fn parse_octal_mode(text: &str) -> Option<u32> {
    let digits = text.trim();
    let digits = digits.strip_prefix("0o").unwrap_or(digits);
    u32::from_str_radix(digits, 8)
        .ok()
        .filter(|mode| *mode <= 0o7777)
}

fn parse_mode(path: &Path, value: &Value) -> Result<u32> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            return Err(Error::ConfigParse {
                message: format!(
                    "Permission mode for '{}' is the YAML number {n}, not an octal string",
                    path.display()
                ),
                hint: Some("Quote the mode, e.g. \"755\" or \"0o755\"".to_string()),
            });
        }
        other => format!("{other:?}"),
    };

    parse_octal_mode(&text).ok_or_else(|| Error::ConfigParse {
        message: format!("Invalid permission mode '{text}' for '{}'", path.display()),
        hint: Some("Use octal digits, e.g. \"755\"".to_string()),
    })
}

//! Identifier validation and sanitization for namespace and module segments.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

/// Words that can never be used as a namespace segment.
pub const RESERVED_WORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("static pattern"));

/// Whether `name` is reserved.
pub fn is_reserved(name: &str) -> bool {
    RESERVED_WORDS.contains(&name)
}

/// Whether `name` can be used as-is as an identifier.
pub fn is_valid_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name) && !is_reserved(name)
}

/// Turn `name` into a valid identifier.
///
/// The name is trimmed and lower-cased, every run of characters that cannot
/// appear in an identifier becomes a single underscore (runs at either end
/// are dropped) and leading digits are stripped. Reserved words are rejected
/// rather than renamed.
pub fn make_valid_identifier(name: &str) -> Result<String> {
    let lowered = name.trim().to_lowercase();
    let joined = lowered
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("_");
    let identifier = joined.trim_start_matches(|c: char| c.is_ascii_digit());

    if is_reserved(identifier) {
        return Err(Error::InvalidIdentifier {
            identifier: name.to_string(),
            message: format!("'{identifier}' is a reserved word"),
        });
    }

    if !is_valid_identifier(identifier) {
        return Err(Error::InvalidIdentifier {
            identifier: name.to_string(),
            message: "nothing usable is left after sanitization".to_string(),
        });
    }

    Ok(identifier.to_string())
}

/// Expand a dotted namespace into every enclosing namespace.
///
/// `"com.blue_yonder"` becomes `["com", "com.blue_yonder"]`. Every segment
/// must already be a valid identifier.
pub fn prepare_namespace(namespace: &str) -> Result<Vec<String>> {
    let segments: Vec<&str> = namespace.trim().split('.').collect();

    if let Some(bad) = segments.iter().find(|s| !is_valid_identifier(s)) {
        return Err(Error::InvalidIdentifier {
            identifier: namespace.to_string(),
            message: format!("segment '{bad}' is not a valid identifier"),
        });
    }

    Ok((1..=segments.len())
        .map(|n| segments[..n].join("."))
        .collect())
}

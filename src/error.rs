//! # Errors
//!
//! Variants fall into two families:
//! - configuration errors (`InvalidIdentifier`, `InvalidVersion`,
//!   `InvalidRequirement`, `ConfigParse`) fail fast and are never silently
//!   corrected;
//! - filesystem errors (`Filesystem`, `Io`) reach the caller of a file
//!   operation unchanged. Nothing in the crate retries them.
//!
//! A policy skip (a file left alone because of `no_overwrite` or
//! `skip_on_update`) is not an error. It is reported through the
//! [`Reporter`](crate::report::Reporter) and signalled by returning `None`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A string could not be turned into a valid identifier.
    #[error("Invalid identifier '{identifier}': {message}")]
    InvalidIdentifier { identifier: String, message: String },

    /// A version pinned by the tool itself could not be parsed.
    #[error("Invalid version '{version}' for package '{package}': {message}")]
    InvalidVersion {
        package: String,
        version: String,
        message: String,
    },

    /// A declared requirement does not start with a package name.
    #[error("Invalid requirement: '{requirement}'")]
    InvalidRequirement { requirement: String },

    /// The layout file is well-formed YAML but not a valid layout.
    #[error("Invalid layout: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {h}")).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Typo suggestion or list of accepted values.
        hint: Option<String>,
    },

    /// A filesystem primitive failed; the message names the path.
    #[error("{message}")]
    Filesystem { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Malformed layout YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_identifier_names_input() {
        let error = Error::InvalidIdentifier {
            identifier: "def".to_string(),
            message: "'def' is a reserved word".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid identifier 'def': 'def' is a reserved word"
        );
    }

    #[test]
    fn test_invalid_version_names_package() {
        let error = Error::InvalidVersion {
            package: "pkg".to_string(),
            version: "not.a.version".to_string(),
            message: "unexpected character".to_string(),
        };
        let display = error.to_string();
        assert!(display.contains("Invalid version 'not.a.version'"));
        assert!(display.contains("package 'pkg'"));
    }

    #[test]
    fn test_config_parse_hint_on_own_line() {
        let without = Error::ConfigParse {
            message: "Unknown option 'forse'".to_string(),
            hint: None,
        };
        assert_eq!(without.to_string(), "Invalid layout: Unknown option 'forse'");

        let with = Error::ConfigParse {
            message: "Unknown option 'forse'".to_string(),
            hint: Some("Did you mean 'force'?".to_string()),
        };
        assert_eq!(
            with.to_string(),
            "Invalid layout: Unknown option 'forse'\n  hint: Did you mean 'force'?"
        );
    }

    #[test]
    fn test_io_error_is_transparent() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();
        assert_eq!(error.to_string(), "File not found");
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("files: [unclosed").unwrap_err();
        let error: Error = yaml_error.into();
        assert!(error.to_string().starts_with("Malformed layout YAML"));
    }
}

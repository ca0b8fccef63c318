//! # Requirement Reconciliation
//!
//! A generated project declares dependency requirements (`"appdirs==1"`,
//! `"mypkg~=9.0"`, ...). The tool itself also pins a few packages it needs at
//! a known version. This module merges the two lists.
//!
//! ## Rules
//!
//! 1.  Each owned package produces `name>=V,<M.0`, where `M` is the major
//!     component of `V` plus one. These come first, in the owned order.
//! 2.  A declared requirement on an owned package (names compared
//!     case-insensitively) is dropped: the owned pin always wins.
//! 3.  Every other declared requirement passes through verbatim, in its
//!     original order. A later declaration of a name that was already emitted
//!     is dropped, so no name appears twice.
//!
//! Declared requirements may arrive as separate strings or as blocks where
//! items are separated by newlines or `;`; both are flattened into one list
//! before merging.
//!
//! Malformed owned versions are rejected up front by [`OwnedDeps::parse`].

use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::BuildHasher;
use std::sync::LazyLock;

use regex::Regex;
use semver::Version;

use crate::error::{Error, Result};

static DEP_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z0-9][A-Za-z0-9._-]*)").expect("static pattern"));

/// A release number with an optional pre/post/dev tag and local label, as
/// package indexes write them (`1.2.3.4`, `2.0rc1`, `1.0.post2+local`).
static RELEASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^v?(\d+(?:\.\d+)*)(?:[._-]?(?:a|b|c|rc|alpha|beta|pre|preview|dev|post)\.?\d*)*(?:\+[a-z0-9]+(?:[._-][a-z0-9]+)*)?$",
    )
    .expect("static pattern")
});

/// Indentation used by [`get_requirements_str`].
const REQUIREMENT_INDENT: &str = "\n    ";

/// The package name a requirement string refers to, if it has one.
///
/// ```
/// use scaffold_ops::requirements::dep_name;
///
/// assert_eq!(dep_name("pyscaffold>=42.1.0,<43.0"), Some("pyscaffold"));
/// assert_eq!(dep_name("django"), Some("django"));
/// assert_eq!(dep_name(">=1.0"), None);
/// ```
pub fn dep_name(requirement: &str) -> Option<&str> {
    DEP_NAME
        .captures(requirement)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

/// Split a block of requirements on newlines and `;`.
///
/// Items are trimmed and empty items dropped.
pub fn split_deps(text: &str) -> Vec<String> {
    text.split(['\n', ';'])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Anything that can answer "is this package name in here?".
///
/// Only membership of the names matters; associated values of keyed
/// containers are ignored. Lookups are case-insensitive.
pub trait DepNames {
    fn contains_dep(&self, name: &str) -> bool;
}

fn any_matches<'a, I: IntoIterator<Item = &'a str>>(names: I, name: &str) -> bool {
    names.into_iter().any(|n| n.eq_ignore_ascii_case(name))
}

impl<S: AsRef<str>> DepNames for [S] {
    fn contains_dep(&self, name: &str) -> bool {
        any_matches(self.iter().map(AsRef::as_ref), name)
    }
}

impl<S: AsRef<str>, const N: usize> DepNames for [S; N] {
    fn contains_dep(&self, name: &str) -> bool {
        self.as_slice().contains_dep(name)
    }
}

impl<S: AsRef<str>> DepNames for Vec<S> {
    fn contains_dep(&self, name: &str) -> bool {
        self.as_slice().contains_dep(name)
    }
}

impl<K: AsRef<str>, H: BuildHasher> DepNames for HashSet<K, H> {
    fn contains_dep(&self, name: &str) -> bool {
        any_matches(self.iter().map(AsRef::as_ref), name)
    }
}

impl<K: AsRef<str>, V, H: BuildHasher> DepNames for HashMap<K, V, H> {
    fn contains_dep(&self, name: &str) -> bool {
        any_matches(self.keys().map(AsRef::as_ref), name)
    }
}

impl<K: AsRef<str>, V> DepNames for BTreeMap<K, V> {
    fn contains_dep(&self, name: &str) -> bool {
        any_matches(self.keys().map(AsRef::as_ref), name)
    }
}

/// A package pinned by the tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedDep {
    pub name: String,
    /// The version as written, used for the lower bound.
    pub raw_version: String,
    pub version: Version,
}

impl OwnedDep {
    /// `name>=V,<M.0`
    pub fn constraint(&self) -> String {
        format!(
            "{}>={},<{}.0",
            self.name,
            self.raw_version,
            next_major(&self.version)
        )
    }
}

/// First major version that is no longer compatible with `version`.
pub fn next_major(version: &Version) -> u64 {
    version.major + 1
}

/// Parse a pinned version.
///
/// Accepts full semantic versions and shorter release numbers (`"42"`,
/// `"42.0"`), which are padded with zeros. Release numbers with more than
/// three components or a pre/post/dev tag (`"1.2.3.4"`, `"2.0rc1"`) are
/// accepted too: only their first three numeric components are kept, which
/// is all the upper bound needs. Anything else is an error.
pub fn parse_version(package: &str, raw: &str) -> Result<Version> {
    let raw = raw.trim();
    let components = raw.split('.').count();
    let all_numeric = raw
        .split('.')
        .all(|c| !c.is_empty() && c.chars().all(|ch| ch.is_ascii_digit()));
    let padded = if components < 3 && all_numeric {
        format!("{raw}{}", ".0".repeat(3 - components))
    } else {
        raw.to_string()
    };

    let invalid = |message: String| Error::InvalidVersion {
        package: package.to_string(),
        version: raw.to_string(),
        message,
    };

    match Version::parse(&padded) {
        Ok(version) => Ok(version),
        Err(semver_error) => {
            let release = RELEASE
                .captures(raw)
                .and_then(|caps| caps.get(1))
                .ok_or_else(|| invalid(semver_error.to_string()))?;
            let mut numbers = release
                .as_str()
                .split('.')
                .take(3)
                .map(|part| part.parse::<u64>().map_err(|e| invalid(e.to_string())));
            let mut next = || numbers.next().transpose().map(Option::unwrap_or_default);
            Ok(Version::new(next()?, next()?, next()?))
        }
    }
}

/// The tool's own pinned packages, in a fixed order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnedDeps {
    deps: Vec<OwnedDep>,
}

impl OwnedDeps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(name, version)` pairs, failing on the first bad version.
    pub fn parse<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut owned = Self::new();
        for (name, raw) in pairs {
            let name = name.into();
            let version = parse_version(&name, raw.as_ref())?;
            owned.insert(OwnedDep {
                raw_version: raw.as_ref().trim().to_string(),
                name,
                version,
            });
        }
        Ok(owned)
    }

    /// Add a pin, replacing any existing pin for the same name in place.
    pub fn insert(&mut self, dep: OwnedDep) {
        match self
            .deps
            .iter_mut()
            .find(|d| d.name.eq_ignore_ascii_case(&dep.name))
        {
            Some(existing) => *existing = dep,
            None => self.deps.push(dep),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &OwnedDep> {
        self.deps.iter()
    }

    pub fn len(&self) -> usize {
        self.deps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deps.is_empty()
    }
}

impl DepNames for OwnedDeps {
    fn contains_dep(&self, name: &str) -> bool {
        any_matches(self.deps.iter().map(|d| d.name.as_str()), name)
    }
}

/// Whether the package of `requirement` is one of `owned`.
pub fn is_dep_included<N: DepNames + ?Sized>(requirement: &str, owned: &N) -> bool {
    dep_name(requirement).is_some_and(|name| owned.contains_dep(name))
}

/// Drop every requirement whose package is listed in `names`.
pub fn remove_deps<S, N>(requirements: &[S], names: &N) -> Vec<String>
where
    S: AsRef<str>,
    N: DepNames + ?Sized,
{
    requirements
        .iter()
        .map(AsRef::as_ref)
        .filter(|requirement| !is_dep_included(requirement, names))
        .map(str::to_string)
        .collect()
}

/// Merge `declared` requirements with the tool's `owned` pins.
///
/// See the module documentation for the rules.
pub fn reconcile<S: AsRef<str>>(declared: &[S], owned: &OwnedDeps) -> Result<Vec<String>> {
    let mut emitted: Vec<String> = owned.iter().map(|d| d.name.clone()).collect();
    let mut result: Vec<String> = owned.iter().map(OwnedDep::constraint).collect();

    for requirement in declared.iter().flat_map(|item| split_deps(item.as_ref())) {
        let name = dep_name(&requirement).ok_or_else(|| Error::InvalidRequirement {
            requirement: requirement.clone(),
        })?;

        if emitted.contains_dep(name) {
            continue;
        }
        emitted.push(name.to_string());
        result.push(requirement);
    }

    Ok(result)
}

/// [`reconcile`], rendered as an indented block with one requirement per line.
pub fn get_requirements_str<S: AsRef<str>>(declared: &[S], owned: &OwnedDeps) -> Result<String> {
    Ok(reconcile(declared, owned)?
        .iter()
        .map(|requirement| format!("{REQUIREMENT_INDENT}{requirement}"))
        .collect())
}

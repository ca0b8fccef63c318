//! Property-based tests for the string utilities and permission wrapper.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

use crate::identifier::{is_reserved, is_valid_identifier, make_valid_identifier};
use crate::requirements::{dep_name, reconcile, split_deps, OwnedDeps};
use crate::suggestions::levenshtein;
use proptest::prelude::*;

// ============================================================================
// levenshtein property tests
// ============================================================================

proptest! {
    /// Property: the distance from a string to itself is zero
    #[test]
    fn levenshtein_identity(input in ".*") {
        prop_assert_eq!(levenshtein(&input, &input), 0);
    }

    /// Property: the distance does not depend on argument order
    #[test]
    fn levenshtein_is_symmetric(a in ".{0,12}", b in ".{0,12}") {
        prop_assert_eq!(levenshtein(&a, &b), levenshtein(&b, &a));
    }

    /// Property: the distance to the empty string is the character count
    #[test]
    fn levenshtein_empty_is_length(input in ".{0,20}") {
        prop_assert_eq!(levenshtein("", &input), input.chars().count());
        prop_assert_eq!(levenshtein(&input, ""), input.chars().count());
    }

    /// Property: going through a third string is never shorter
    #[test]
    fn levenshtein_triangle_inequality(
        a in "[a-d]{0,8}",
        b in "[a-d]{0,8}",
        c in "[a-d]{0,8}",
    ) {
        prop_assert!(levenshtein(&a, &c) <= levenshtein(&a, &b) + levenshtein(&b, &c));
    }

    /// Property: the distance is bounded by the longer string
    #[test]
    fn levenshtein_bounded_by_longer(a in ".{0,12}", b in ".{0,12}") {
        let longer = a.chars().count().max(b.chars().count());
        prop_assert!(levenshtein(&a, &b) <= longer);
    }
}

// ============================================================================
// make_valid_identifier property tests
// ============================================================================

proptest! {
    /// Property: a successful result is always a valid, unreserved identifier
    #[test]
    fn make_valid_identifier_output_is_valid(input in ".*") {
        if let Ok(identifier) = make_valid_identifier(&input) {
            prop_assert!(is_valid_identifier(&identifier), "got '{}'", identifier);
            prop_assert!(!is_reserved(&identifier));
        }
    }

    /// Property: sanitizing twice gives the same result as sanitizing once
    #[test]
    fn make_valid_identifier_is_idempotent(input in "[a-zA-Z0-9 _%-]{1,24}") {
        if let Ok(once) = make_valid_identifier(&input) {
            let twice = make_valid_identifier(&once);
            prop_assert_eq!(twice.ok(), Some(once));
        }
    }

    /// Property: lowercase identifiers pass through unchanged
    #[test]
    fn make_valid_identifier_preserves_valid_names(input in "[a-z][a-z0-9]{0,12}") {
        prop_assume!(!is_reserved(&input));
        prop_assert_eq!(make_valid_identifier(&input).ok(), Some(input));
    }
}

// ============================================================================
// requirements property tests
// ============================================================================

proptest! {
    /// Property: split_deps never yields blank or padded items
    #[test]
    fn split_deps_items_are_trimmed(input in "[a-z0-9 ;\n<>=.]*") {
        for item in split_deps(&input) {
            prop_assert!(!item.is_empty());
            prop_assert_eq!(item.trim(), item.as_str());
        }
    }

    /// Property: every reconciled requirement names a distinct package
    #[test]
    fn reconcile_names_are_unique(
        declared in prop::collection::vec("[a-c]{1,2}(>=[0-9])?", 0..8),
        owned in prop::collection::vec(("[a-c]{1,2}", 0u64..5), 0..4),
    ) {
        let owned = OwnedDeps::parse(
            owned.into_iter().map(|(name, major)| (name, format!("{major}.0.0"))),
        ).unwrap();
        let result = reconcile(&declared, &owned).unwrap();

        let mut names: Vec<String> = result
            .iter()
            .filter_map(|r| dep_name(r))
            .map(str::to_lowercase)
            .collect();
        let total = names.len();
        names.sort();
        names.dedup();
        prop_assert_eq!(names.len(), total);
        prop_assert_eq!(total, result.len());
    }
}

// ============================================================================
// add_permissions property tests
// ============================================================================

#[cfg(unix)]
mod permissions {
    use crate::fs_utils::file_mode;
    use crate::operations::{add_permissions, create, FileOp};
    use crate::options::ScaffoldOpts;
    use crate::report::NullReporter;
    use proptest::prelude::*;
    use tempfile::TempDir;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Property: the resulting mode always contains the requested bits
        #[test]
        fn add_permissions_sets_requested_bits(bits in 0u32..=0o777) {
            let temp_dir = TempDir::new().unwrap();
            let path = temp_dir.path().join("file");
            let op = add_permissions(bits, create());

            op.apply(&path, Some("x"), &ScaffoldOpts::new(), &NullReporter).unwrap();

            let mode = file_mode(&path).unwrap().unwrap();
            prop_assert_eq!(mode & bits, bits);
        }

        /// Property: applying the same bits twice changes nothing the second time
        #[test]
        fn add_permissions_is_idempotent(bits in 0o400u32..=0o777) {
            let temp_dir = TempDir::new().unwrap();
            let path = temp_dir.path().join("file");
            let op = add_permissions(bits, create());
            let opts = ScaffoldOpts::new();

            op.apply(&path, Some("x"), &opts, &NullReporter).unwrap();
            let first = file_mode(&path).unwrap();
            op.apply(&path, Some("x"), &opts, &NullReporter).unwrap();
            let second = file_mode(&path).unwrap();

            prop_assert_eq!(first, second);
        }
    }
}

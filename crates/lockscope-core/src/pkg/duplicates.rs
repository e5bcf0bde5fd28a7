//! Version-duplicate detection.

use super::ident::SortedPackages;

/// Return every identifier whose base name matches an adjacent entry's.
///
/// Because `SortedPackages` is in byte order, all versions of one package sit
/// next to each other, so one pass over neighbouring pairs finds them all. The
/// result is itself sorted, which makes the operation idempotent.
#[must_use]
pub fn find_duplicates(packages: &SortedPackages) -> SortedPackages {
    packages
        .as_slice()
        .windows(2)
        .filter(|pair| pair[0].base_name() == pair[1].base_name())
        .flat_map(|pair| [pair[0].clone(), pair[1].clone()])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pkg::ident::PackageId;

    fn sorted(ids: &[&str]) -> SortedPackages {
        ids.iter().copied().map(PackageId::from).collect()
    }

    fn strs(packages: &SortedPackages) -> Vec<&str> {
        packages.iter().map(PackageId::as_str).collect()
    }

    #[test]
    fn test_two_versions_are_both_flagged() {
        let dups = find_duplicates(&sorted(&["foo@1.0.0", "foo@2.0.0"]));
        assert_eq!(strs(&dups), vec!["foo@1.0.0", "foo@2.0.0"]);
    }

    #[test]
    fn test_different_names_are_not_flagged() {
        let dups = find_duplicates(&sorted(&["foo@1.0.0", "bar@1.0.0"]));
        assert!(dups.is_empty());
    }

    #[test]
    fn test_three_versions_stored_once_each() {
        let dups = find_duplicates(&sorted(&[
            "foo@1.0.0",
            "foo@2.0.0",
            "foo@3.0.0",
            "zeta@1.0.0",
        ]));
        assert_eq!(strs(&dups), vec!["foo@1.0.0", "foo@2.0.0", "foo@3.0.0"]);
    }

    #[test]
    fn test_scoped_duplicates() {
        let dups = find_duplicates(&sorted(&[
            "@babel/core@7.22.0",
            "@babel/core@7.23.2",
            "@babel/parser@7.23.0",
            "core@1.0.0",
        ]));
        assert_eq!(strs(&dups), vec!["@babel/core@7.22.0", "@babel/core@7.23.2"]);
    }

    #[test]
    fn test_name_prefix_is_not_a_duplicate() {
        let dups = find_duplicates(&sorted(&["foo-bar@1.0.0", "foo@1.0.0", "foo_baz@1.0.0"]));
        assert!(dups.is_empty());
    }

    #[test]
    fn test_peer_variants_count_as_duplicates() {
        let dups = find_duplicates(&sorted(&[
            "react-dom@18.2.0(react@17.0.2)",
            "react-dom@18.2.0(react@18.2.0)",
        ]));
        assert_eq!(dups.len(), 2);
    }

    #[test]
    fn test_idempotent() {
        let input = sorted(&[
            "@types/node@18.0.0",
            "@types/node@20.0.0",
            "a@1.0.0",
            "b@1.0.0",
            "b@2.0.0",
            "c@1.0.0",
        ]);
        let once = find_duplicates(&input);
        let twice = find_duplicates(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_and_single() {
        assert!(find_duplicates(&sorted(&[])).is_empty());
        assert!(find_duplicates(&sorted(&["only@1.0.0"])).is_empty());
    }
}

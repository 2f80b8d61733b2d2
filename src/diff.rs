//! Added/removed classification against the previous snapshot.
//!
//! The diff answers presence/absence only, on version-stripped
//! `namespace-name` identities. Version bumps are owned by the
//! reconciler's `updated` list; stripping versions here is what keeps the
//! two classifications mutually exclusive. A naive whole-string comparison
//! would report every version bump as a simultaneous removal and addition.

use std::collections::BTreeSet;

use crate::identifier::identity_of;

/// Identities that entered or left the dependency set since the last run.
///
/// `BTreeSet` keeps both groups in lexicographic order, so the changelog
/// and the run summary are reproducible.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DependencyDiff {
    /// Identities present now but absent from the previous snapshot
    pub added: BTreeSet<String>,
    /// Identities present in the previous snapshot but absent now
    pub removed: BTreeSet<String>,
}

impl DependencyDiff {
    /// True iff neither group has entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Compare the previous snapshot against the reconciled dependency list.
///
/// Both inputs are reduced to identities before the set comparison, so an
/// entry appearing on both sides with different versions is reported in
/// neither group. Malformed entries keep their full text as identity (see
/// [`identity_of`]) and therefore diff stably across runs.
#[must_use]
pub fn diff(previous_snapshot: &[String], new_dependencies: &[String]) -> DependencyDiff {
    let previous: BTreeSet<String> = previous_snapshot.iter().map(|d| identity_of(d)).collect();
    let current: BTreeSet<String> = new_dependencies.iter().map(|d| identity_of(d)).collect();

    DependencyDiff {
        added: current.difference(&previous).cloned().collect(),
        removed: previous.difference(&current).cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deps(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_added_and_removed() {
        let previous = deps(&["alice-modA-1.0.0", "bob-modB-1.0.0"]);
        let current = deps(&["alice-modA-1.0.0", "carol-modC-2.0.0"]);

        let d = diff(&previous, &current);
        assert_eq!(d.added, BTreeSet::from(["carol-modC".to_string()]));
        assert_eq!(d.removed, BTreeSet::from(["bob-modB".to_string()]));
    }

    #[test]
    fn test_version_bump_is_not_added_or_removed() {
        let previous = deps(&["alice-modA-1.0.0"]);
        let current = deps(&["alice-modA-1.2.0"]);

        let d = diff(&previous, &current);
        assert!(d.is_empty(), "a pure version bump must not appear in the diff: {d:?}");
    }

    #[test]
    fn test_mutual_exclusivity() {
        let previous = deps(&["a-one-1.0.0", "b-two-1.0.0", "c-three-1.0.0"]);
        let current = deps(&["b-two-2.0.0", "c-three-1.0.0", "d-four-1.0.0"]);

        let d = diff(&previous, &current);
        assert!(d.added.is_disjoint(&d.removed));
        assert_eq!(d.added, BTreeSet::from(["d-four".to_string()]));
        assert_eq!(d.removed, BTreeSet::from(["a-one".to_string()]));
    }

    #[test]
    fn test_empty_baseline_marks_everything_added() {
        let d = diff(&[], &deps(&["alice-modA-1.0.0"]));
        assert_eq!(d.added, BTreeSet::from(["alice-modA".to_string()]));
        assert!(d.removed.is_empty());
    }

    #[test]
    fn test_malformed_entries_diff_by_full_text() {
        let previous = deps(&["garbage"]);
        let current = deps(&["garbage"]);
        assert!(diff(&previous, &current).is_empty());

        let d = diff(&[], &deps(&["garbage"]));
        assert_eq!(d.added, BTreeSet::from(["garbage".to_string()]));
    }
}

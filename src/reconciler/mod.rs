//! Reconciliation of declared dependencies against the catalog.
//!
//! The reconciler walks the manifest's dependency list in declaration
//! order and, for each entry, decides whether to upgrade it to the
//! catalog's latest version. It is a pure function over its inputs: no
//! network, no filesystem, no notifier calls. Per-entry problems are
//! returned as structured fields on [`ReconcileOutcome`] so the CLI layer
//! can log them, notify about them, and summarize them without the core
//! ever touching ambient state.
//!
//! Decision per declared dependency:
//! 1. Parse the identifier. Malformed text is kept verbatim in the output
//!    and recorded in `malformed`; the user's manifest is never silently
//!    altered for entries the tool cannot understand.
//! 2. Look up the `namespace-name` identity in the catalog. Misses keep
//!    the declared version and are recorded in `missing` for the notifier.
//! 3. Parse the catalog's latest version string. The lookup carries it
//!    raw, so an unparseable upstream version for a declared dependency
//!    is fatal here; it must not masquerade as "not found".
//! 4. Compare versions under semantic ordering. A strictly newer catalog
//!    version yields an upgraded identifier and an [`UpdatedMod`] record;
//!    otherwise the original text is kept.

use anyhow::Result;

use crate::catalog::CatalogLookup;
use crate::core::SyncError;
use crate::identifier::ModIdentifier;
use semver::Version;

/// One version bump detected during reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatedMod {
    /// Package namespace
    pub namespace: String,
    /// Package name
    pub name: String,
    /// Version declared before this run
    pub old_version: Version,
    /// Latest catalog version the entry was bumped to
    pub new_version: Version,
}

impl UpdatedMod {
    /// The version-independent `namespace-name` identity.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}-{}", self.namespace, self.name)
    }
}

/// Everything one reconciliation pass decided.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// True iff at least one dependency was upgraded
    pub changed: bool,
    /// The full dependency list after reconciliation, input order preserved
    pub dependencies: Vec<String>,
    /// Version bumps, in input order
    pub updated: Vec<UpdatedMod>,
    /// Identifiers absent from the catalog (kept verbatim in `dependencies`)
    pub missing: Vec<String>,
    /// Identifiers the codec rejected (kept verbatim in `dependencies`)
    pub malformed: Vec<String>,
}

/// Reconcile declared dependencies against the catalog lookup.
///
/// Input order is preserved in `dependencies`; the manifest write sorts
/// later, at the persistence boundary.
///
/// # Errors
///
/// Returns [`SyncError::InvalidVersionFormat`] if a declared version
/// splits correctly but is not a semantic version, or if the catalog's
/// latest version for a declared dependency is not one. Comparing such a
/// string numerically is undefined, so the run must abort rather than
/// miscompare.
pub fn reconcile(declared: &[String], lookup: &CatalogLookup) -> Result<ReconcileOutcome> {
    let mut outcome = ReconcileOutcome {
        dependencies: Vec::with_capacity(declared.len()),
        ..ReconcileOutcome::default()
    };

    for dep in declared {
        let identifier = match dep.parse::<ModIdentifier>() {
            Ok(id) => id,
            Err(SyncError::MalformedIdentifier { .. }) => {
                tracing::warn!("skipping malformed dependency: {dep}");
                outcome.malformed.push(dep.clone());
                outcome.dependencies.push(dep.clone());
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let Some(entry) = lookup.get(&identifier.full_name()) else {
            tracing::warn!("dependency not found in catalog: {dep}");
            outcome.missing.push(dep.clone());
            outcome.dependencies.push(dep.clone());
            continue;
        };

        let latest =
            Version::parse(&entry.latest_version).map_err(|_| SyncError::InvalidVersionFormat {
                version: entry.latest_version.clone(),
            })?;

        if latest > identifier.version {
            let upgraded = identifier.with_version(latest.clone());
            tracing::info!("updating {dep} to {latest}");
            outcome.updated.push(UpdatedMod {
                namespace: identifier.namespace,
                name: identifier.name,
                old_version: identifier.version,
                new_version: latest,
            });
            outcome.dependencies.push(upgraded.to_string());
            outcome.changed = true;
        } else {
            outcome.dependencies.push(dep.clone());
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;

    fn lookup_with(entries: &[(&str, &str)]) -> CatalogLookup {
        entries
            .iter()
            .map(|(full_name, version)| {
                (
                    (*full_name).to_string(),
                    CatalogEntry {
                        latest_version: (*version).to_string(),
                        url: format!("https://thunderstore.io/c/repo/p/{full_name}/"),
                    },
                )
            })
            .collect()
    }

    fn deps(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_upgrades_outdated_dependency() {
        let lookup = lookup_with(&[("alice-modA", "1.2.0")]);
        let outcome = reconcile(&deps(&["alice-modA-1.0.0"]), &lookup).unwrap();

        assert!(outcome.changed);
        assert_eq!(outcome.dependencies, deps(&["alice-modA-1.2.0"]));
        assert_eq!(outcome.updated.len(), 1);
        assert_eq!(outcome.updated[0].old_version, Version::new(1, 0, 0));
        assert_eq!(outcome.updated[0].new_version, Version::new(1, 2, 0));
        assert!(outcome.missing.is_empty());
        assert!(outcome.malformed.is_empty());
    }

    #[test]
    fn test_current_dependency_kept_verbatim() {
        let lookup = lookup_with(&[("alice-modA", "1.0.0")]);
        let outcome = reconcile(&deps(&["alice-modA-1.0.0"]), &lookup).unwrap();

        assert!(!outcome.changed);
        assert_eq!(outcome.dependencies, deps(&["alice-modA-1.0.0"]));
        assert!(outcome.updated.is_empty());
    }

    #[test]
    fn test_never_downgrades() {
        // Declared version newer than the catalog's (e.g. a delisted release)
        let lookup = lookup_with(&[("alice-modA", "1.0.0")]);
        let outcome = reconcile(&deps(&["alice-modA-2.0.0"]), &lookup).unwrap();

        assert!(!outcome.changed);
        assert_eq!(outcome.dependencies, deps(&["alice-modA-2.0.0"]));
    }

    #[test]
    fn test_semantic_not_lexicographic_comparison() {
        // Lexicographically "9.0.0" > "10.0.0"; semantically it is not.
        let lookup = lookup_with(&[("alice-modA", "9.0.0")]);
        let outcome = reconcile(&deps(&["alice-modA-10.0.0"]), &lookup).unwrap();
        assert!(!outcome.changed);

        let lookup = lookup_with(&[("alice-modA", "10.0.0")]);
        let outcome = reconcile(&deps(&["alice-modA-9.0.0"]), &lookup).unwrap();
        assert!(outcome.changed);
        assert_eq!(outcome.dependencies, deps(&["alice-modA-10.0.0"]));
    }

    #[test]
    fn test_malformed_passes_through_unchanged() {
        let lookup = lookup_with(&[("alice-modA", "1.2.0")]);
        let outcome =
            reconcile(&deps(&["not_an_identifier", "alice-modA-1.0.0"]), &lookup).unwrap();

        assert_eq!(
            outcome.dependencies,
            deps(&["not_an_identifier", "alice-modA-1.2.0"])
        );
        assert_eq!(outcome.malformed, deps(&["not_an_identifier"]));
        assert!(outcome.changed);
    }

    #[test]
    fn test_missing_passes_through_and_is_flagged() {
        let lookup = lookup_with(&[]);
        let outcome = reconcile(&deps(&["ghost-mod-1.0.0"]), &lookup).unwrap();

        assert!(!outcome.changed);
        assert_eq!(outcome.dependencies, deps(&["ghost-mod-1.0.0"]));
        assert_eq!(outcome.missing, deps(&["ghost-mod-1.0.0"]));
    }

    #[test]
    fn test_unparseable_declared_version_is_fatal() {
        let lookup = lookup_with(&[]);
        let err = reconcile(&deps(&["ns-name-banana"]), &lookup).unwrap_err();
        let sync: &SyncError = err.downcast_ref().unwrap();
        assert!(matches!(sync, SyncError::InvalidVersionFormat { .. }));
    }

    #[test]
    fn test_unparseable_fetched_version_is_fatal_not_missing() {
        // Thunderstore advertising "1.0" for a declared package must abort
        // the run, not report the package as absent.
        let lookup = lookup_with(&[("alice-modA", "1.0")]);
        let err = reconcile(&deps(&["alice-modA-1.0.0"]), &lookup).unwrap_err();
        let sync: &SyncError = err.downcast_ref().unwrap();
        assert!(matches!(
            sync,
            SyncError::InvalidVersionFormat { version } if version == "1.0"
        ));
    }

    #[test]
    fn test_undeclared_garbage_catalog_version_is_ignored() {
        // The bad version belongs to a package nobody declared, so it must
        // not poison the run.
        let lookup = lookup_with(&[("alice-modA", "1.2.0"), ("weird-pkg", "not.a.version")]);
        let outcome = reconcile(&deps(&["alice-modA-1.0.0"]), &lookup).unwrap();
        assert_eq!(outcome.dependencies, deps(&["alice-modA-1.2.0"]));
    }

    #[test]
    fn test_preserves_input_order() {
        let lookup = lookup_with(&[("b-two", "2.0.0"), ("a-one", "1.0.0")]);
        let outcome =
            reconcile(&deps(&["b-two-1.0.0", "a-one-1.0.0"]), &lookup).unwrap();
        assert_eq!(outcome.dependencies, deps(&["b-two-2.0.0", "a-one-1.0.0"]));
    }

    #[test]
    fn test_idempotent_when_everything_current() {
        let lookup = lookup_with(&[("alice-modA", "1.2.0")]);
        let first = reconcile(&deps(&["alice-modA-1.0.0"]), &lookup).unwrap();
        assert!(first.changed);

        // Second run over the first run's output detects nothing
        let second = reconcile(&first.dependencies, &lookup).unwrap();
        assert!(!second.changed);
        assert_eq!(second.dependencies, first.dependencies);
        assert!(second.updated.is_empty());
    }
}

//! The `namespace-name-version` dependency identifier codec.
//!
//! Thunderstore modpacks declare dependencies as single strings joining the
//! package namespace, the package name, and a semantic version with `-`,
//! e.g. `BepInEx-BepInExPack-5.4.2100`. This module parses that textual
//! form into a structured [`ModIdentifier`] and back.
//!
//! # Format limitation
//!
//! The joined form is ambiguous when a namespace or mod name itself
//! contains `-`: such identifiers do not split into exactly three segments
//! and are rejected with [`SyncError::MalformedIdentifier`]. This is a
//! known limitation of the manifest format, not something the parser
//! guesses around. Callers are expected to carry the original text through
//! unchanged rather than drop or rewrite it.

use std::fmt;
use std::str::FromStr;

use semver::Version;

use crate::core::SyncError;

/// Separator joining namespace, name, and version in the textual form.
pub const SEPARATOR: char = '-';

/// A structured dependency identifier.
///
/// Immutable value type: reconciliation produces new identifiers via
/// [`ModIdentifier::with_version`] rather than mutating in place.
///
/// The [`Display`](fmt::Display) and [`FromStr`] implementations form a
/// round trip: for any well-formed input `x`,
/// `x.parse::<ModIdentifier>().unwrap().to_string() == x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModIdentifier {
    /// Package namespace (the Thunderstore team name)
    pub namespace: String,
    /// Package name within the namespace
    pub name: String,
    /// Declared semantic version
    pub version: Version,
}

impl ModIdentifier {
    /// The version-independent `namespace-name` identity.
    ///
    /// This is the key used for catalog lookups and for the added/removed
    /// diff, where two identifiers with different versions must compare
    /// equal.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}{SEPARATOR}{}", self.namespace, self.name)
    }

    /// Return a copy of this identifier pointing at a different version.
    #[must_use]
    pub fn with_version(&self, version: Version) -> Self {
        Self {
            namespace: self.namespace.clone(),
            name: self.name.clone(),
            version,
        }
    }
}

impl FromStr for ModIdentifier {
    type Err = SyncError;

    /// Parse the `namespace-name-version` textual form.
    ///
    /// # Errors
    ///
    /// - [`SyncError::MalformedIdentifier`] if the text does not split into
    ///   exactly three non-empty segments. Recoverable: callers pass the
    ///   original text through unchanged.
    /// - [`SyncError::InvalidVersionFormat`] if the third segment is not a
    ///   semantic version. Fatal for the run: comparing an unparseable
    ///   version numerically is undefined.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = text.split(SEPARATOR).collect();
        let [namespace, name, version] = segments.as_slice() else {
            return Err(SyncError::MalformedIdentifier {
                text: text.to_string(),
            });
        };

        if namespace.is_empty() || name.is_empty() || version.is_empty() {
            return Err(SyncError::MalformedIdentifier {
                text: text.to_string(),
            });
        }

        let version = Version::parse(version).map_err(|_| SyncError::InvalidVersionFormat {
            version: (*version).to_string(),
        })?;

        Ok(Self {
            namespace: (*namespace).to_string(),
            name: (*name).to_string(),
            version,
        })
    }
}

impl fmt::Display for ModIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}{SEPARATOR}{}", self.namespace, self.name, self.version)
    }
}

/// Reduce an identifier string to its version-independent identity.
///
/// Well-formed identifiers reduce to `namespace-name`; anything the codec
/// rejects keeps its full text as identity, so malformed entries still diff
/// stably across runs instead of flapping between added and removed.
#[must_use]
pub fn identity_of(text: &str) -> String {
    match text.parse::<ModIdentifier>() {
        Ok(id) => id.full_name(),
        Err(_) => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed() {
        let id: ModIdentifier = "BepInEx-BepInExPack-5.4.2100".parse().unwrap();
        assert_eq!(id.namespace, "BepInEx");
        assert_eq!(id.name, "BepInExPack");
        assert_eq!(id.version, Version::new(5, 4, 2100));
        assert_eq!(id.full_name(), "BepInEx-BepInExPack");
    }

    #[test]
    fn test_round_trip() {
        for text in ["alice-modA-1.0.0", "Team-Pack-0.1.12", "x-y-10.20.30"] {
            let id: ModIdentifier = text.parse().unwrap();
            assert_eq!(id.to_string(), text);
        }
    }

    #[test]
    fn test_rejects_wrong_segment_count() {
        for text in ["not-a", "single", "too-many-segments-1.0.0", ""] {
            let err = text.parse::<ModIdentifier>().unwrap_err();
            assert!(
                matches!(err, SyncError::MalformedIdentifier { .. }),
                "expected MalformedIdentifier for {text:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_rejects_empty_segments() {
        for text in ["-name-1.0.0", "ns--1.0.0", "ns-name-"] {
            assert!(matches!(
                text.parse::<ModIdentifier>(),
                Err(SyncError::MalformedIdentifier { .. })
            ));
        }
    }

    #[test]
    fn test_unparseable_version_is_distinct_from_malformed() {
        let err = "ns-name-banana".parse::<ModIdentifier>().unwrap_err();
        assert!(matches!(err, SyncError::InvalidVersionFormat { .. }));
    }

    #[test]
    fn test_with_version() {
        let id: ModIdentifier = "alice-modA-1.0.0".parse().unwrap();
        let bumped = id.with_version(Version::new(1, 2, 0));
        assert_eq!(bumped.to_string(), "alice-modA-1.2.0");
        // Original untouched
        assert_eq!(id.to_string(), "alice-modA-1.0.0");
    }

    #[test]
    fn test_identity_of() {
        assert_eq!(identity_of("alice-modA-1.0.0"), "alice-modA");
        assert_eq!(identity_of("alice-modA-1.2.0"), "alice-modA");
        // Malformed text keeps its full form as identity
        assert_eq!(identity_of("not-a-valid-id"), "not-a-valid-id");
        assert_eq!(identity_of("junk"), "junk");
    }
}

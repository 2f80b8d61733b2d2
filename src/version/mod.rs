//! Semantic version bump policy for the pack version.
//!
//! The policy encodes one choice: structural changes to the dependency set
//! (additions or removals) outrank pure version bumps of existing entries,
//! which in turn outrank no-op runs. Precedence, highest first:
//!
//! 1. No current version → bootstrap at `1.0.0`, regardless of other flags
//! 2. Forced major → `major+1.0.0`
//! 3. Added or removed → `major.minor+1.0`
//! 4. Updated only → `major.minor.patch+1`
//! 5. Nothing changed → `None`, the caller skips persistence entirely

use semver::Version;

/// Derive the next pack version from the diff classification.
///
/// Exactly one precedence rule applies per call. Returns `None` when no
/// bump is needed; the caller must treat that as "do not persist".
#[must_use]
pub fn next_version(
    current: Option<&Version>,
    added: bool,
    removed: bool,
    updated: bool,
    force_major: bool,
) -> Option<Version> {
    let Some(current) = current else {
        return Some(Version::new(1, 0, 0));
    };

    if force_major {
        return Some(Version::new(current.major + 1, 0, 0));
    }

    if added || removed {
        return Some(Version::new(current.major, current.minor + 1, 0));
    }

    if updated {
        return Some(Version::new(current.major, current.minor, current.patch + 1));
    }

    None
}

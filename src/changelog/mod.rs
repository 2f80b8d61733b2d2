//! Changelog rendering and persistence.
//!
//! Every run that bumps the pack version gets one dated section,
//! prepended to CHANGELOG.md so the newest entry reads first. Rendering
//! is a pure function: the CLI decides whether and where the result is
//! written. Entries within each group are sorted lexicographically so two
//! runs over the same diff produce identical text.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use semver::Version;

use crate::catalog::CatalogLookup;
use crate::diff::DependencyDiff;
use crate::reconciler::UpdatedMod;
use crate::utils::fs::safe_write;

/// Render one dated changelog section for a run.
///
/// Produces a labeled group per non-empty category (Added, Updated,
/// Removed), each entry linked to its catalog page when the lookup knows
/// it. When every category is empty the section carries an explicit "no
/// changes" notice instead; the changelog is a complete audit trail and a
/// forced bump must still leave a record.
#[must_use]
pub fn render(
    new_version: &Version,
    diff: &DependencyDiff,
    updated: &[UpdatedMod],
    lookup: &CatalogLookup,
    date: NaiveDate,
) -> String {
    let mut section = format!("## {new_version} - {}\n", date.format("%Y-%m-%d"));

    if diff.is_empty() && updated.is_empty() {
        section.push_str("\nNo dependency changes.\n");
        return section;
    }

    if !diff.added.is_empty() {
        section.push_str("\n### Added\n");
        // BTreeSet iteration is already lexicographic
        for full_name in &diff.added {
            section.push_str(&format!("- {}\n", linked(full_name, lookup)));
        }
    }

    if !updated.is_empty() {
        section.push_str("\n### Updated\n");
        let mut entries: Vec<&UpdatedMod> = updated.iter().collect();
        entries.sort_by_key(|u| u.full_name());
        for entry in entries {
            section.push_str(&format!(
                "- {} ({} → {})\n",
                linked(&entry.full_name(), lookup),
                entry.old_version,
                entry.new_version
            ));
        }
    }

    if !diff.removed.is_empty() {
        section.push_str("\n### Removed\n");
        for full_name in &diff.removed {
            section.push_str(&format!("- {}\n", linked(full_name, lookup)));
        }
    }

    section
}

/// Render an identity as a markdown link when the catalog knows its URL.
fn linked(full_name: &str, lookup: &CatalogLookup) -> String {
    match lookup.get(full_name) {
        Some(entry) => format!("[{full_name}]({})", entry.url),
        None => full_name.to_string(),
    }
}

/// Prepend a rendered section to the changelog file.
///
/// Existing content is preserved below the new section (most-recent-first
/// ordering); an absent file is created. The write is atomic.
///
/// # Errors
///
/// Returns an error if the existing changelog cannot be read or the write
/// fails.
pub fn prepend(path: &Path, section: &str) -> Result<()> {
    let existing = if path.exists() {
        std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read changelog: {}", path.display()))?
    } else {
        String::new()
    };

    let content = if existing.is_empty() {
        section.to_string()
    } else {
        format!("{section}\n{existing}")
    };

    safe_write(path, &content)
        .with_context(|| format!("Failed to write changelog: {}", path.display()))
}

//! Facets hidden per resource qualifier.
//!
//! A project has no meaningful "project" breakdown because it *is* the
//! project, a developer has no author breakdown, and so on. The table is
//! built once and never mutated afterwards.

use std::collections::{BTreeSet, HashMap};

use crate::constants::facets::{AUTHORS, DIRECTORIES, MODULE_UUIDS, PROJECT_UUIDS};
use crate::models::QualifierKind;

static NO_RESTRICTION: BTreeSet<String> = BTreeSet::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestrictionTable {
    entries: HashMap<QualifierKind, BTreeSet<String>>,
}

impl RestrictionTable {
    /// A table that restricts nothing.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Add the facets hidden for `kind`, merging with any previous entry.
    pub fn with_restriction<I, S>(mut self, kind: QualifierKind, facets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .entry(kind)
            .or_default()
            .extend(facets.into_iter().map(Into::into));
        self
    }

    /// Facets that must never be shown for `kind`.
    ///
    /// A kind without an entry, or no kind at all (global search), is
    /// unrestricted.
    pub fn restricted_facets(&self, kind: Option<QualifierKind>) -> &BTreeSet<String> {
        kind.and_then(|k| self.entries.get(&k))
            .unwrap_or(&NO_RESTRICTION)
    }
}

impl Default for RestrictionTable {
    fn default() -> Self {
        Self::empty()
            .with_restriction(QualifierKind::Project, [PROJECT_UUIDS])
            .with_restriction(QualifierKind::SubProject, [PROJECT_UUIDS])
            .with_restriction(
                QualifierKind::Directory,
                [PROJECT_UUIDS, MODULE_UUIDS, DIRECTORIES],
            )
            .with_restriction(QualifierKind::Developer, [AUTHORS])
            .with_restriction(QualifierKind::DeveloperProject, [PROJECT_UUIDS, AUTHORS])
    }
}

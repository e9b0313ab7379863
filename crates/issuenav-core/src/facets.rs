//! Context-scoped facet visibility.
//!
//! Removes the facets the restriction table hides for a qualifier from the
//! available and server-computed lists. The enabled list is left alone; the
//! screen only ever shows enabled facets that are still available.

use std::collections::BTreeSet;

use tracing::debug;

use crate::models::{FacetLists, QualifierKind};
use crate::restriction::RestrictionTable;
use crate::state::{StateField, StateHandle, StateUpdate};

/// Order-preserving `left − restricted`.
pub fn difference(left: &[String], restricted: &BTreeSet<String>) -> Vec<String> {
    left.iter()
        .filter(|facet| !restricted.contains(facet.as_str()))
        .cloned()
        .collect()
}

pub struct FacetVisibilityResolver<'a> {
    table: &'a RestrictionTable,
}

impl<'a> FacetVisibilityResolver<'a> {
    pub fn new(table: &'a RestrictionTable) -> Self {
        Self { table }
    }

    pub fn resolve(&self, facets: &FacetLists, qualifier: Option<QualifierKind>) -> FacetLists {
        let restricted = self.table.restricted_facets(qualifier);
        FacetLists {
            enabled: facets.enabled.clone(),
            all: difference(&facets.all, restricted),
            server: difference(&facets.server, restricted),
        }
    }

    /// Resolve against the current state and write the result back.
    ///
    /// Always recomputed from the state, so calling it again after the
    /// qualifier changes is enough to pick up the new restrictions.
    pub fn apply(&self, state: &StateHandle, qualifier: Option<QualifierKind>) -> Vec<StateField> {
        let resolved = self.resolve(state.read().facets(), qualifier);
        let changed = state.update(StateUpdate {
            enabled_facets: Some(resolved.enabled),
            all_facets: Some(resolved.all),
            server_facets: Some(resolved.server),
            ..Default::default()
        });
        debug!(
            qualifier = qualifier.map(|q| q.code()).unwrap_or("none"),
            changed = changed.len(),
            "Resolved facet visibility"
        );
        changed
    }
}

use crate::models::FacetValues;
use crate::state::StateHandle;

/// Facet counts of the last search.
#[derive(Debug)]
pub struct FacetList {
    state: StateHandle,
    facets: Vec<FacetValues>,
}

impl FacetList {
    pub fn new(state: StateHandle) -> Self {
        Self {
            state,
            facets: Vec::new(),
        }
    }

    /// Replace the counts. Facets no longer available on this screen are
    /// dropped even if the server computed them.
    pub fn reset(&mut self, facets: Vec<FacetValues>) {
        let state = self.state.read();
        self.facets = facets
            .into_iter()
            .filter(|f| state.all_facets().contains(&f.property))
            .collect();
    }

    pub fn get(&self, property: &str) -> Option<&FacetValues> {
        self.facets.iter().find(|f| f.property == property)
    }

    pub fn len(&self) -> usize {
        self.facets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    /// Visible facets in enabled order, with counts when the last search
    /// returned any.
    pub fn visible(&self) -> Vec<(String, Option<&FacetValues>)> {
        self.state
            .read()
            .visible_facets()
            .into_iter()
            .map(|facet| (facet.to_string(), self.get(facet)))
            .collect()
    }
}

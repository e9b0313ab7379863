use crate::models::SavedFilter;
use crate::state::StateHandle;

/// Favourite saved filters of the current user.
#[derive(Debug)]
pub struct FilterList {
    state: StateHandle,
    filters: Vec<SavedFilter>,
}

impl FilterList {
    pub fn new(state: StateHandle) -> Self {
        Self {
            state,
            filters: Vec::new(),
        }
    }

    pub fn reset(&mut self, filters: Vec<SavedFilter>) {
        self.filters = filters;
    }

    pub fn get(&self, id: &str) -> Option<&SavedFilter> {
        self.filters.iter().find(|f| f.id == id)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// The filter currently applied to the screen, if it is a favourite
    pub fn active(&self) -> Option<&SavedFilter> {
        let state = self.state.read();
        let id = state.filter()?.id.clone();
        drop(state);
        self.get(&id)
    }
}

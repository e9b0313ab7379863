//! The per-screen context value.
//!
//! One `ScreenContext` exists per screen load. It is cheap to clone (all
//! parts are reference counted) and is handed explicitly to every
//! collaborator that needs the state or a collection.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::config::ScreenConfig;
use crate::models::{FilterMetadata, SearchPage};
use crate::state::{context_query_for, Paging, Query, StateHandle, StateUpdate};
use crate::store::{FacetList, FilterList, IssueList, Shared};

#[derive(Clone, Debug)]
pub struct ScreenContext {
    config: Rc<ScreenConfig>,
    state: StateHandle,
    issues: Shared<IssueList>,
    facets: Shared<FacetList>,
    filters: Shared<FilterList>,
}

impl ScreenContext {
    /// Build the three collections, empty and bound to `state`.
    pub fn new(config: ScreenConfig, state: StateHandle) -> Self {
        Self {
            config: Rc::new(config),
            issues: Rc::new(RefCell::new(IssueList::new(state.clone()))),
            facets: Rc::new(RefCell::new(FacetList::new(state.clone()))),
            filters: Rc::new(RefCell::new(FilterList::new(state.clone()))),
            state,
        }
    }

    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    pub fn state(&self) -> &StateHandle {
        &self.state
    }

    pub fn issues(&self) -> &Shared<IssueList> {
        &self.issues
    }

    pub fn facets(&self) -> &Shared<FacetList> {
        &self.facets
    }

    pub fn filters(&self) -> &Shared<FilterList> {
        &self.filters
    }

    /// `{ componentUuids: <resource id> }`, projected from the configured
    /// resource identity.
    pub fn context_query(&self) -> Query {
        context_query_for(&self.config.resource_id)
    }

    /// Store filter metadata: permissions go to the state, favourites to
    /// the filter collection.
    pub fn apply_filter_metadata(&self, metadata: FilterMetadata) {
        debug!(
            favorites = metadata.favorites.len(),
            can_manage = metadata.can_manage_filters,
            "Applying filter metadata"
        );
        self.state.update(StateUpdate {
            can_manage_filters: Some(metadata.can_manage_filters),
            can_bulk_change: Some(metadata.can_bulk_change),
            ..Default::default()
        });
        self.filters.borrow_mut().reset(metadata.favorites);
    }

    /// Store one page of search results. The first page replaces the list
    /// and resets the selection; later pages are appended.
    pub fn apply_search_page(&self, page: SearchPage, first_page: bool) {
        debug!(
            issues = page.issues.len(),
            page = page.page_index,
            total = page.total,
            "Applying search page"
        );
        {
            let mut issues = self.issues.borrow_mut();
            if first_page {
                issues.reset(page.issues);
            } else {
                issues.append(page.issues);
            }
        }
        if first_page {
            self.facets.borrow_mut().reset(page.facets);
        }
        let (selected, page_size) = {
            let state = self.state.read();
            let selected = if first_page {
                (!self.issues.borrow().is_empty()).then_some(0)
            } else {
                state.selected_index()
            };
            let page_size = match page.page_size {
                0 => state.paging().page_size,
                size => size,
            };
            (selected, page_size)
        };
        self.state.update(StateUpdate {
            paging: Some(Paging {
                page: page.page_index.max(1),
                page_size,
                total: page.total,
            }),
            selected_index: Some(selected),
            ..Default::default()
        });
    }
}

//! Screen state shared by the coordinator and its collaborators.
//!
//! `AppState` is only ever changed through [`AppState::apply`], which
//! reports the fields that actually changed. [`StateHandle`] wraps the
//! state for single-threaded sharing and forwards those change sets to
//! registered listeners.

use std::cell::{Ref, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::rc::Rc;

use serde::Serialize;

use crate::config::ScreenConfig;
use crate::constants::{CONTEXT_QUERY_KEY, DEFAULT_PAGE_SIZE, QUERY_FACET_TRANSFORM};
use crate::models::{FacetLists, QualifierKind, SavedFilter};

pub type Query = BTreeMap<String, String>;

/// Field groups reported to listeners after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum StateField {
    Query,
    Filter,
    EnabledFacets,
    AllFacets,
    ServerFacets,
    Permissions,
    Paging,
    Selection,
}

/// Paging of the issue list. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Paging {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
}

impl Paging {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size,
            total: 0,
        }
    }

    pub fn max_results_reached(&self) -> bool {
        u64::from(self.page) * u64::from(self.page_size) >= self.total
    }
}

impl Default for Paging {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    is_context: bool,
    context_resource_id: String,
    context_resource_name: String,
    context_resource_qualifier: Option<QualifierKind>,
    facets: FacetLists,
    query: Query,
    filter: Option<SavedFilter>,
    can_manage_filters: bool,
    can_bulk_change: bool,
    paging: Paging,
    selected_index: Option<usize>,
}

/// A partial update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct StateUpdate {
    pub query: Option<Query>,
    pub filter: Option<Option<SavedFilter>>,
    pub enabled_facets: Option<Vec<String>>,
    pub all_facets: Option<Vec<String>>,
    pub server_facets: Option<Vec<String>>,
    pub can_manage_filters: Option<bool>,
    pub can_bulk_change: Option<bool>,
    pub paging: Option<Paging>,
    pub selected_index: Option<Option<usize>>,
}

impl AppState {
    /// State for a screen scoped to the resource named in `config`.
    pub fn for_context(config: &ScreenConfig, facets: FacetLists, page_size: u32) -> Self {
        Self {
            is_context: true,
            context_resource_id: config.resource_id.clone(),
            context_resource_name: config.resource_name.clone(),
            context_resource_qualifier: config.qualifier(),
            facets,
            query: Query::new(),
            filter: None,
            can_manage_filters: false,
            can_bulk_change: false,
            paging: Paging::new(page_size),
            selected_index: None,
        }
    }

    pub fn is_context(&self) -> bool {
        self.is_context
    }

    pub fn context_resource_id(&self) -> &str {
        &self.context_resource_id
    }

    pub fn context_resource_name(&self) -> &str {
        &self.context_resource_name
    }

    pub fn context_resource_qualifier(&self) -> Option<QualifierKind> {
        self.context_resource_qualifier
    }

    /// Parameters merged into every issue search. Derived from the resource
    /// identity so it cannot drift from it.
    pub fn context_query(&self) -> Query {
        context_query_for(&self.context_resource_id)
    }

    pub fn facets(&self) -> &FacetLists {
        &self.facets
    }

    pub fn enabled_facets(&self) -> &[String] {
        &self.facets.enabled
    }

    pub fn all_facets(&self) -> &[String] {
        &self.facets.all
    }

    pub fn server_facets(&self) -> &[String] {
        &self.facets.server
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn filter(&self) -> Option<&SavedFilter> {
        self.filter.as_ref()
    }

    pub fn can_manage_filters(&self) -> bool {
        self.can_manage_filters
    }

    pub fn can_bulk_change(&self) -> bool {
        self.can_bulk_change
    }

    pub fn paging(&self) -> Paging {
        self.paging
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    /// Enabled facets that are still available, in enabled order.
    pub fn visible_facets(&self) -> Vec<&str> {
        self.facets
            .enabled
            .iter()
            .filter(|f| self.facets.all.contains(f))
            .map(String::as_str)
            .collect()
    }

    /// Server facets to request: enabled ones plus those implied by the
    /// current query keys, in server order.
    pub fn requested_facets(&self) -> Vec<&str> {
        let mut wanted: BTreeSet<&str> = self.facets.enabled.iter().map(String::as_str).collect();
        for key in self.query.keys() {
            let facet = QUERY_FACET_TRANSFORM
                .iter()
                .find(|(param, _)| *param == key.as_str())
                .map(|(_, facet)| *facet)
                .unwrap_or(key.as_str());
            wanted.insert(facet);
        }
        self.facets
            .server
            .iter()
            .map(String::as_str)
            .filter(|f| wanted.contains(f))
            .collect()
    }

    /// Full parameter set for an issue search. Context parameters override
    /// user query parameters of the same name.
    pub fn search_params(&self) -> Query {
        let mut params = self.query.clone();
        params.extend(self.context_query());
        let facets = self.requested_facets();
        if !facets.is_empty() {
            params.insert("facets".to_string(), facets.join(","));
        }
        params
    }

    /// Apply `update` in place and return the fields whose value changed.
    pub fn apply(&mut self, update: StateUpdate) -> Vec<StateField> {
        let mut changed = Vec::new();

        fn set<T: PartialEq>(
            slot: &mut T,
            value: Option<T>,
            field: StateField,
            changed: &mut Vec<StateField>,
        ) {
            if let Some(value) = value {
                if *slot != value {
                    *slot = value;
                    if !changed.contains(&field) {
                        changed.push(field);
                    }
                }
            }
        }

        set(&mut self.query, update.query, StateField::Query, &mut changed);
        set(&mut self.filter, update.filter, StateField::Filter, &mut changed);
        set(
            &mut self.facets.enabled,
            update.enabled_facets,
            StateField::EnabledFacets,
            &mut changed,
        );
        set(
            &mut self.facets.all,
            update.all_facets,
            StateField::AllFacets,
            &mut changed,
        );
        set(
            &mut self.facets.server,
            update.server_facets,
            StateField::ServerFacets,
            &mut changed,
        );
        set(
            &mut self.can_manage_filters,
            update.can_manage_filters,
            StateField::Permissions,
            &mut changed,
        );
        set(
            &mut self.can_bulk_change,
            update.can_bulk_change,
            StateField::Permissions,
            &mut changed,
        );
        set(&mut self.paging, update.paging, StateField::Paging, &mut changed);
        set(
            &mut self.selected_index,
            update.selected_index,
            StateField::Selection,
            &mut changed,
        );

        changed
    }
}

/// `{ componentUuids: <resource id> }`
pub fn context_query_for(resource_id: &str) -> Query {
    let mut query = Query::new();
    query.insert(CONTEXT_QUERY_KEY.to_string(), resource_id.to_string());
    query
}

type Listener = Box<dyn Fn(&AppState, &[StateField])>;

/// Shared handle to the screen state.
///
/// Listeners run synchronously after each effective update and must not
/// update the state themselves.
#[derive(Clone)]
pub struct StateHandle {
    inner: Rc<RefCell<AppState>>,
    listeners: Rc<RefCell<Vec<Listener>>>,
}

impl StateHandle {
    pub fn new(state: AppState) -> Self {
        Self {
            inner: Rc::new(RefCell::new(state)),
            listeners: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn read(&self) -> Ref<'_, AppState> {
        self.inner.borrow()
    }

    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&AppState, &[StateField]) + 'static,
    {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    pub fn update(&self, update: StateUpdate) -> Vec<StateField> {
        let changed = self.inner.borrow_mut().apply(update);
        if !changed.is_empty() {
            let state = self.inner.borrow();
            for listener in self.listeners.borrow().iter() {
                listener(&state, &changed);
            }
        }
        changed
    }

    /// Show or hide a facet. Only available facets can be enabled; the
    /// resulting list keeps the order of the available facets. Enabled
    /// facets that are not available on this screen are kept at the end.
    pub fn toggle_facet(&self, facet: &str) -> bool {
        let next = {
            let state = self.inner.borrow();
            let FacetLists { enabled, all, .. } = &state.facets;
            if !all.iter().any(|f| f == facet) {
                return false;
            }
            let currently_enabled = enabled.iter().any(|f| f == facet);
            let available = all.iter().filter(|f| {
                if f.as_str() == facet {
                    !currently_enabled
                } else {
                    enabled.contains(f)
                }
            });
            let unavailable = enabled.iter().filter(|f| !all.contains(f));
            available.chain(unavailable).cloned().collect::<Vec<_>>()
        };
        !self
            .update(StateUpdate {
                enabled_facets: Some(next),
                ..Default::default()
            })
            .is_empty()
    }

    /// Replace the user query, keeping the active filter.
    pub fn set_query(&self, query: Query) -> Vec<StateField> {
        self.update(StateUpdate {
            query: Some(query),
            selected_index: Some(None),
            ..Default::default()
        })
    }

    pub fn select(&self, index: Option<usize>) -> Vec<StateField> {
        self.update(StateUpdate {
            selected_index: Some(index),
            ..Default::default()
        })
    }
}

impl fmt::Debug for StateHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateHandle")
            .field("state", &*self.inner.borrow())
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

//! Hash-fragment routing for the issue screen.
//!
//! A fragment is a `|`-separated list of `key=value` pairs with
//! percent-encoded values, e.g. `resolved=false|severities=BLOCKER%2CMAJOR`.
//! The `id` key selects a saved filter. An empty fragment is the index
//! route.

use tracing::{debug, warn};

use issuenav_core::constants::DEFAULT_QUERY;
use issuenav_core::models::SavedFilter;
use issuenav_core::state::Query;
use issuenav_core::{Router, ScreenContext, StateUpdate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Index,
    Query(Query),
    SavedFilter { id: String, query: Query },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("Malformed route segment '{0}'")]
    Malformed(String),
    #[error("Route value '{0}' is not valid UTF-8 once decoded")]
    Decode(String),
}

pub fn parse_fragment(fragment: &str) -> Result<Route, RouteError> {
    let fragment = fragment.trim().trim_start_matches('#');
    if fragment.is_empty() {
        return Ok(Route::Index);
    }

    let mut query = Query::new();
    for segment in fragment.split('|').filter(|s| !s.is_empty()) {
        let (key, value) = segment
            .split_once('=')
            .filter(|(key, _)| !key.is_empty())
            .ok_or_else(|| RouteError::Malformed(segment.to_string()))?;
        let value = urlencoding::decode(value).map_err(|_| RouteError::Decode(value.to_string()))?;
        query.insert(key.to_string(), value.into_owned());
    }

    match query.remove("id") {
        Some(id) => Ok(Route::SavedFilter { id, query }),
        None => Ok(Route::Query(query)),
    }
}

fn default_query() -> Query {
    DEFAULT_QUERY
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Applies the initial fragment to the screen state when started.
pub struct HashRouter {
    screen: ScreenContext,
    fragment: String,
}

impl HashRouter {
    pub fn new(screen: ScreenContext, fragment: impl Into<String>) -> Self {
        Self {
            screen,
            fragment: fragment.into(),
        }
    }

    pub fn apply(&self, route: Route) {
        match route {
            Route::Index => self.show(default_query(), None),
            Route::Query(query) => self.show(query, None),
            Route::SavedFilter { id, query } => {
                let filter = self.screen.filters().borrow().get(&id).cloned();
                match filter {
                    Some(filter) => {
                        debug!("Opening saved filter {} ({})", filter.name, filter.id);
                        self.show(query, Some(filter));
                    }
                    None => {
                        warn!("Unknown saved filter {}, showing the index", id);
                        self.show(default_query(), None);
                    }
                }
            }
        }
    }

    fn show(&self, query: Query, filter: Option<SavedFilter>) {
        self.screen.state().update(StateUpdate {
            query: Some(query),
            filter: Some(filter),
            selected_index: Some(None),
            ..Default::default()
        });
    }
}

impl Router for HashRouter {
    fn start(&mut self) {
        let route = match parse_fragment(&self.fragment) {
            Ok(route) => route,
            Err(e) => {
                warn!("{}, showing the index", e);
                Route::Index
            }
        };
        debug!("Starting router with {:?}", route);
        self.apply(route);
    }
}

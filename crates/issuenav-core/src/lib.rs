//! Core of the context-scoped issue browser screen: facet restriction per
//! resource qualifier, the shared screen state and its collections, and the
//! startup sequence that makes the screen interactive.

pub mod collaborators;
pub mod config;
pub mod constants;
pub mod facets;
pub mod messages;
pub mod models;
pub mod restriction;
pub mod screen;
pub mod startup;
pub mod state;
pub mod store;
pub mod tracing_setup;

pub use collaborators::{
    BoundCollection, Collaborators, Controller, ControllerError, KeyboardScope, Layout, Region,
    RegionBinding, Router,
};
pub use config::{ConfigError, ScreenConfig, Settings, SettingsStorage};
pub use facets::FacetVisibilityResolver;
pub use messages::Messages;
pub use restriction::RestrictionTable;
pub use screen::ScreenContext;
pub use startup::{StartupCoordinator, StartupError, StartupPhase};
pub use state::{AppState, StateField, StateHandle, StateUpdate};

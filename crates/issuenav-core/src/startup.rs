//! Startup sequencing for an issue screen.
//!
//! The coordinator moves strictly forward through [`StartupPhase`]:
//!
//! 1. `Idle -> Uninitialized` once the readiness gate resolves
//! 2. `-> StateReady` after building the state and restricting its facets
//! 3. `-> CollectionsReady` after building the empty collections
//! 4. `-> ViewsMounted` after mounting list, header and facets regions
//! 5. `-> FiltersLoading` while the filter metadata request is in flight
//! 6. `-> Interactive` once that request succeeds: keyboard scope set,
//!    router constructed and started
//!
//! Keyboard scope and router do not exist before step 6, so no URL can
//! reference a filter that is not loaded yet. A failed gate or filter
//! request halts the coordinator for good: it stays in its phase and
//! ignores any later start or completion.

use std::fmt;
use std::future::Future;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::collaborators::{
    Collaborators, Controller, ControllerError, ControllerFactory, KeyboardScope, Layout,
    Region, RegionBinding, Router, RouterFactory,
};
use crate::config::ScreenConfig;
use crate::constants::{DEFAULT_PAGE_SIZE, FOOTER_MARKER, KEY_SCOPE_LIST};
use crate::facets::FacetVisibilityResolver;
use crate::models::FacetLists;
use crate::restriction::RestrictionTable;
use crate::screen::ScreenContext;
use crate::state::{context_query_for, AppState, Query, StateHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum StartupPhase {
    Idle,
    Uninitialized,
    StateReady,
    CollectionsReady,
    ViewsMounted,
    FiltersLoading,
    Interactive,
}

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Startup gate failed: {0}")]
    GateFailed(String),
    #[error("Failed to load filter metadata: {0}")]
    FilterFetchFailed(#[source] ControllerError),
    #[error("Startup halted after an earlier failure while {phase:?}")]
    Halted { phase: StartupPhase },
    #[error("Cannot {action} while {phase:?}")]
    OutOfOrder {
        action: &'static str,
        phase: StartupPhase,
    },
}

pub struct StartupCoordinator {
    config: ScreenConfig,
    restrictions: RestrictionTable,
    initial_facets: FacetLists,
    page_size: u32,
    phase: StartupPhase,
    halted: bool,
    screen: Option<ScreenContext>,
    layout: Box<dyn Layout>,
    keyboard: Box<dyn KeyboardScope>,
    controller_factory: Option<ControllerFactory>,
    router_factory: Option<RouterFactory>,
    controller: Option<Box<dyn Controller>>,
    router: Option<Box<dyn Router>>,
}

impl StartupCoordinator {
    pub fn new(config: ScreenConfig, collaborators: Collaborators) -> Self {
        Self {
            config,
            restrictions: RestrictionTable::default(),
            initial_facets: crate::config::Settings::default().initial_facets(),
            page_size: DEFAULT_PAGE_SIZE,
            phase: StartupPhase::Idle,
            halted: false,
            screen: None,
            layout: collaborators.layout,
            keyboard: collaborators.keyboard,
            controller_factory: Some(collaborators.controller),
            router_factory: Some(collaborators.router),
            controller: None,
            router: None,
        }
    }

    pub fn with_restrictions(mut self, restrictions: RestrictionTable) -> Self {
        self.restrictions = restrictions;
        self
    }

    pub fn with_initial_facets(mut self, facets: FacetLists) -> Self {
        self.initial_facets = facets;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn phase(&self) -> StartupPhase {
        self.phase
    }

    pub fn is_interactive(&self) -> bool {
        self.phase == StartupPhase::Interactive
    }

    /// Whether the gate or the filter request failed
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn screen(&self) -> Option<&ScreenContext> {
        self.screen.as_ref()
    }

    pub fn controller(&self) -> Option<&dyn Controller> {
        self.controller.as_deref()
    }

    /// `{ componentUuids: <resource id> }`, available in every phase.
    pub fn context_query(&self) -> Query {
        context_query_for(&self.config.resource_id)
    }

    /// Wait for `gate`, then run the whole startup sequence.
    ///
    /// Returns once the screen is interactive, or with the error that
    /// stopped it. Can only be called once.
    pub async fn start<G, E>(&mut self, gate: G) -> Result<(), StartupError>
    where
        G: Future<Output = Result<(), E>>,
        E: fmt::Display,
    {
        self.expect_phase(StartupPhase::Idle, "start")?;
        if self.halted {
            return Err(StartupError::Halted { phase: self.phase });
        }

        if let Err(e) = gate.await {
            error!("Startup gate failed for {}: {}", self.config.resource_id, e);
            self.halted = true;
            return Err(StartupError::GateFailed(e.to_string()));
        }
        self.advance(StartupPhase::Uninitialized);

        self.initialize()?;
        self.load_filters().await
    }

    fn initialize(&mut self) -> Result<(), StartupError> {
        self.expect_phase(StartupPhase::Uninitialized, "initialize")?;

        let state = self.build_state();
        self.advance(StartupPhase::StateReady);

        let screen = ScreenContext::new(self.config.clone(), state);
        self.advance(StartupPhase::CollectionsReady);

        self.mount_views(&screen);
        self.advance(StartupPhase::ViewsMounted);

        let factory = self
            .controller_factory
            .take()
            .ok_or(StartupError::OutOfOrder {
                action: "construct controller",
                phase: self.phase,
            })?;
        self.controller = Some(factory(&screen));
        self.screen = Some(screen);
        Ok(())
    }

    fn build_state(&self) -> StateHandle {
        let state = StateHandle::new(AppState::for_context(
            &self.config,
            self.initial_facets.clone(),
            self.page_size,
        ));
        FacetVisibilityResolver::new(&self.restrictions).apply(&state, self.config.qualifier());
        state
    }

    fn mount_views(&mut self, screen: &ScreenContext) {
        self.layout.render();
        self.layout.mark_footer(FOOTER_MARKER);
        for region in Region::MOUNT_ORDER {
            debug!("Mounting {} region", region.name());
            self.layout.show(RegionBinding::for_region(region, screen));
        }
    }

    async fn load_filters(&mut self) -> Result<(), StartupError> {
        self.expect_phase(StartupPhase::ViewsMounted, "load filters")?;
        self.advance(StartupPhase::FiltersLoading);

        let result = match self.controller.as_ref() {
            Some(controller) => controller.fetch_filters().await,
            None => {
                return Err(StartupError::OutOfOrder {
                    action: "load filters",
                    phase: self.phase,
                })
            }
        };

        match result {
            Ok(()) => {
                self.on_filters_loaded();
                Ok(())
            }
            Err(e) => {
                error!("Filter metadata request failed: {}", e);
                self.halted = true;
                Err(StartupError::FilterFetchFailed(e))
            }
        }
    }

    /// Completion of the filter metadata request. Enables the keyboard
    /// scope and starts the router the first time it is called while
    /// loading; any other call, or any call after the request failed, is a
    /// no-op. Returns whether it transitioned.
    pub fn on_filters_loaded(&mut self) -> bool {
        if self.halted {
            warn!("Ignoring filter completion after a failed startup");
            return false;
        }
        match self.phase {
            StartupPhase::FiltersLoading => {}
            StartupPhase::Interactive => {
                debug!("Ignoring repeated filter completion");
                return false;
            }
            phase => {
                warn!("Ignoring filter completion while {:?}", phase);
                return false;
            }
        }

        let (Some(screen), Some(factory)) = (self.screen.as_ref(), self.router_factory.take())
        else {
            warn!("Filter completion without a mounted screen");
            return false;
        };

        self.keyboard.set_scope(KEY_SCOPE_LIST);
        let mut router = factory(screen);
        router.start();
        self.router = Some(router);
        self.advance(StartupPhase::Interactive);
        true
    }

    fn expect_phase(&self, expected: StartupPhase, action: &'static str) -> Result<(), StartupError> {
        if self.phase != expected {
            return Err(StartupError::OutOfOrder {
                action,
                phase: self.phase,
            });
        }
        Ok(())
    }

    fn advance(&mut self, next: StartupPhase) {
        debug_assert!(next > self.phase, "startup phases only move forward");
        info!(
            resource = %self.config.resource_id,
            "Issue screen {:?} -> {:?}",
            self.phase,
            next
        );
        self.phase = next;
    }
}

impl fmt::Debug for StartupCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StartupCoordinator")
            .field("resource", &self.config.resource_id)
            .field("phase", &self.phase)
            .field("halted", &self.halted)
            .field("router_started", &self.router.is_some())
            .finish()
    }
}

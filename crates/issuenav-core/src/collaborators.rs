//! Seams between the startup coordinator and the pieces it wires together.
//!
//! Layout, controller, router and keyboard scope are supplied by the front
//! end. The coordinator only relies on the calls declared here.

use async_trait::async_trait;

use crate::screen::ScreenContext;
use crate::store::{FacetList, IssueList, Shared};

/// View regions owned by the layout, in mount order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    WorkspaceList,
    WorkspaceHeader,
    Facets,
}

impl Region {
    pub const MOUNT_ORDER: [Region; 3] = [
        Region::WorkspaceList,
        Region::WorkspaceHeader,
        Region::Facets,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::WorkspaceList => "workspace-list",
            Self::WorkspaceHeader => "workspace-header",
            Self::Facets => "facets",
        }
    }
}

/// The collection a region's view is bound to.
#[derive(Debug, Clone)]
pub enum BoundCollection {
    Issues(Shared<IssueList>),
    Facets(Shared<FacetList>),
}

/// Everything a view needs when mounted into a region.
#[derive(Debug, Clone)]
pub struct RegionBinding {
    pub region: Region,
    pub screen: ScreenContext,
    pub collection: BoundCollection,
}

impl RegionBinding {
    /// Binding for `region`: list and header read the issues, the facets
    /// region reads the facet counts.
    pub fn for_region(region: Region, screen: &ScreenContext) -> Self {
        let collection = match region {
            Region::WorkspaceList | Region::WorkspaceHeader => {
                BoundCollection::Issues(screen.issues().clone())
            }
            Region::Facets => BoundCollection::Facets(screen.facets().clone()),
        };
        Self {
            region,
            screen: screen.clone(),
            collection,
        }
    }
}

pub trait Layout {
    /// Render the empty region skeleton.
    fn render(&mut self);

    /// Add a presentation marker to the page footer.
    fn mark_footer(&mut self, marker: &str);

    /// Mount a view into a region. Mounting one region must not depend on
    /// another having rendered.
    fn show(&mut self, binding: RegionBinding);
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("Server returned {status} for {url}")]
    Status { url: String, status: u16 },
    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

/// Issues requests on behalf of the screen.
#[async_trait(?Send)]
pub trait Controller {
    /// Load filter metadata into the screen. The payload goes straight to
    /// the state and the filter collection.
    async fn fetch_filters(&self) -> Result<(), ControllerError>;

    /// Load the first page of issues, or the next one when `first_page` is
    /// false.
    async fn fetch_list(&self, first_page: bool) -> Result<(), ControllerError>;
}

/// Maps the location to screen state.
pub trait Router {
    /// Start history-driven navigation, applying the current location.
    fn start(&mut self);
}

/// Keyboard-shortcut subsystem.
pub trait KeyboardScope {
    fn set_scope(&mut self, scope: &str);
}

pub type ControllerFactory = Box<dyn FnOnce(&ScreenContext) -> Box<dyn Controller>>;
pub type RouterFactory = Box<dyn FnOnce(&ScreenContext) -> Box<dyn Router>>;

/// Collaborators handed to the startup coordinator. Controller and router
/// are factories because they only exist once the coordinator gets to
/// their step.
pub struct Collaborators {
    pub layout: Box<dyn Layout>,
    pub keyboard: Box<dyn KeyboardScope>,
    pub controller: ControllerFactory,
    pub router: RouterFactory,
}

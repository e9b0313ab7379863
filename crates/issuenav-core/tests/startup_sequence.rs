use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future;
use issuenav_core::constants::{FACET_CATALOG, FOOTER_MARKER, KEY_SCOPE_LIST};
use issuenav_core::models::{FilterMetadata, QualifierKind, SavedFilter};
use issuenav_core::{
    BoundCollection, Collaborators, Controller, ControllerError, KeyboardScope, Layout,
    RegionBinding, RestrictionTable, Router, ScreenConfig, ScreenContext, StartupCoordinator, StartupError,
    StartupPhase,
};

type Log = Rc<RefCell<Vec<String>>>;

struct RecordingLayout {
    log: Log,
}

impl Layout for RecordingLayout {
    fn render(&mut self) {
        self.log.borrow_mut().push("render".to_string());
    }

    fn mark_footer(&mut self, marker: &str) {
        self.log.borrow_mut().push(format!("footer:{}", marker));
    }

    fn show(&mut self, binding: RegionBinding) {
        let collection = match binding.collection {
            BoundCollection::Issues(_) => "issues",
            BoundCollection::Facets(_) => "facets",
        };
        self.log
            .borrow_mut()
            .push(format!("show:{}:{}", binding.region.name(), collection));
    }
}

struct RecordingKeyboard {
    log: Log,
}

impl KeyboardScope for RecordingKeyboard {
    fn set_scope(&mut self, scope: &str) {
        self.log.borrow_mut().push(format!("scope:{}", scope));
    }
}

#[derive(Clone)]
enum FetchBehaviour {
    Succeed(FilterMetadata),
    Fail,
    Never,
}

struct FakeController {
    screen: ScreenContext,
    behaviour: FetchBehaviour,
    log: Log,
}

#[async_trait(?Send)]
impl Controller for FakeController {
    async fn fetch_filters(&self) -> Result<(), ControllerError> {
        self.log.borrow_mut().push("fetch_filters".to_string());
        match self.behaviour.clone() {
            FetchBehaviour::Succeed(metadata) => {
                self.screen.apply_filter_metadata(metadata);
                Ok(())
            }
            FetchBehaviour::Fail => Err(ControllerError::Status {
                url: "/api/issue_filters/app".to_string(),
                status: 500,
            }),
            FetchBehaviour::Never => future::pending().await,
        }
    }

    async fn fetch_list(&self, _first_page: bool) -> Result<(), ControllerError> {
        Ok(())
    }
}

struct RecordingRouter {
    screen: ScreenContext,
    log: Log,
}

impl Router for RecordingRouter {
    fn start(&mut self) {
        let filters = self.screen.filters().borrow().len();
        self.log
            .borrow_mut()
            .push(format!("router:start filters={}", filters));
    }
}

fn favourites() -> FilterMetadata {
    FilterMetadata {
        can_manage_filters: true,
        can_bulk_change: true,
        favorites: vec![
            SavedFilter {
                id: "1".to_string(),
                name: "Mine".to_string(),
            },
            SavedFilter {
                id: "2".to_string(),
                name: "Blockers".to_string(),
            },
        ],
    }
}

fn coordinator(qualifier: &str, behaviour: FetchBehaviour) -> (StartupCoordinator, Log) {
    let log: Log = Rc::new(RefCell::new(Vec::new()));

    let controller_log = log.clone();
    let router_log = log.clone();
    let collaborators = Collaborators {
        layout: Box::new(RecordingLayout { log: log.clone() }),
        keyboard: Box::new(RecordingKeyboard { log: log.clone() }),
        controller: Box::new(move |screen: &ScreenContext| -> Box<dyn Controller> {
            controller_log.borrow_mut().push("controller:new".to_string());
            Box::new(FakeController {
                screen: screen.clone(),
                behaviour,
                log: controller_log,
            })
        }),
        router: Box::new(move |screen: &ScreenContext| -> Box<dyn Router> {
            router_log.borrow_mut().push("router:new".to_string());
            Box::new(RecordingRouter {
                screen: screen.clone(),
                log: router_log,
            })
        }),
    };

    let config = ScreenConfig::new("uuid-42", "src/main/java", qualifier);
    (StartupCoordinator::new(config, collaborators), log)
}

async fn ready() -> Result<(), Infallible> {
    Ok(())
}

fn entries(log: &Log, prefix: &str) -> usize {
    log.borrow().iter().filter(|e| e.starts_with(prefix)).count()
}

#[tokio::test]
async fn test_startup_reaches_interactive_in_order() {
    let (mut coordinator, log) = coordinator("DIR", FetchBehaviour::Succeed(favourites()));

    coordinator.start(ready()).await.unwrap();

    assert_eq!(coordinator.phase(), StartupPhase::Interactive);
    assert!(coordinator.is_interactive());
    assert_eq!(
        *log.borrow(),
        vec![
            "render".to_string(),
            format!("footer:{}", FOOTER_MARKER),
            "show:workspace-list:issues".to_string(),
            "show:workspace-header:issues".to_string(),
            "show:facets:facets".to_string(),
            "controller:new".to_string(),
            "fetch_filters".to_string(),
            format!("scope:{}", KEY_SCOPE_LIST),
            "router:new".to_string(),
            "router:start filters=2".to_string(),
        ]
    );

    let screen = coordinator.screen().unwrap();
    let state = screen.state().read();
    assert!(state.is_context());
    assert_eq!(state.context_resource_qualifier(), Some(QualifierKind::Directory));
    assert!(state.can_manage_filters());
    for restricted in ["projectUuids", "moduleUuids", "directories"] {
        assert!(!state.all_facets().iter().any(|f| f == restricted));
        assert!(!state.server_facets().iter().any(|f| f == restricted));
    }
    assert_eq!(state.enabled_facets(), ["facetMode", "severities", "resolutions"]);
}

#[tokio::test]
async fn test_never_resolving_fetch_never_goes_interactive() {
    let (mut coordinator, log) = coordinator("TRK", FetchBehaviour::Never);

    let result = tokio::time::timeout(Duration::from_millis(50), coordinator.start(ready())).await;

    assert!(result.is_err());
    assert_eq!(coordinator.phase(), StartupPhase::FiltersLoading);
    assert_eq!(entries(&log, "fetch_filters"), 1);
    assert_eq!(entries(&log, "scope:"), 0);
    assert_eq!(entries(&log, "router:"), 0);
    // views are already mounted while the request is pending
    assert_eq!(entries(&log, "show:"), 3);
}

#[tokio::test]
async fn test_failed_fetch_stays_loading() {
    let (mut coordinator, log) = coordinator("TRK", FetchBehaviour::Fail);

    let err = coordinator.start(ready()).await.unwrap_err();

    assert!(matches!(
        err,
        StartupError::FilterFetchFailed(ControllerError::Status { status: 500, .. })
    ));
    assert_eq!(coordinator.phase(), StartupPhase::FiltersLoading);
    assert_eq!(entries(&log, "scope:"), 0);
    assert_eq!(entries(&log, "router:"), 0);

    // no retry through the coordinator
    let err = coordinator.start(ready()).await.unwrap_err();
    assert!(matches!(
        err,
        StartupError::OutOfOrder {
            phase: StartupPhase::FiltersLoading,
            ..
        }
    ));
    assert_eq!(entries(&log, "fetch_filters"), 1);
}

#[tokio::test]
async fn test_completion_after_failed_fetch_is_ignored() {
    let (mut coordinator, log) = coordinator("TRK", FetchBehaviour::Fail);

    coordinator.start(ready()).await.unwrap_err();
    assert!(coordinator.is_halted());

    assert!(!coordinator.on_filters_loaded());
    assert!(!coordinator.on_filters_loaded());

    assert_eq!(coordinator.phase(), StartupPhase::FiltersLoading);
    assert!(!coordinator.is_interactive());
    assert_eq!(entries(&log, "scope:"), 0);
    assert_eq!(entries(&log, "router:"), 0);
}

#[tokio::test]
async fn test_repeated_completion_is_ignored() {
    let (mut coordinator, log) = coordinator("DEV", FetchBehaviour::Succeed(favourites()));

    coordinator.start(ready()).await.unwrap();
    assert!(!coordinator.on_filters_loaded());
    assert!(!coordinator.on_filters_loaded());

    assert_eq!(coordinator.phase(), StartupPhase::Interactive);
    assert_eq!(entries(&log, "scope:"), 1);
    assert_eq!(entries(&log, "router:new"), 1);
    assert_eq!(entries(&log, "router:start"), 1);
}

#[tokio::test]
async fn test_completion_before_loading_is_ignored() {
    let (mut coordinator, log) = coordinator("DEV", FetchBehaviour::Succeed(favourites()));

    assert!(!coordinator.on_filters_loaded());
    assert_eq!(coordinator.phase(), StartupPhase::Idle);
    assert!(log.borrow().is_empty());

    // the router factory is still there for the real completion
    coordinator.start(ready()).await.unwrap();
    assert_eq!(entries(&log, "router:start"), 1);
}

#[tokio::test]
async fn test_gate_failure_prevents_startup() {
    let (mut coordinator, log) = coordinator("TRK", FetchBehaviour::Succeed(favourites()));

    let err = coordinator
        .start(async { Err::<(), _>("messages unavailable") })
        .await
        .unwrap_err();

    assert!(matches!(err, StartupError::GateFailed(ref msg) if msg == "messages unavailable"));
    assert_eq!(coordinator.phase(), StartupPhase::Idle);
    assert!(coordinator.is_halted());
    assert!(coordinator.screen().is_none());

    // gate failure is final for this coordinator
    let err = coordinator.start(ready()).await.unwrap_err();
    assert!(matches!(
        err,
        StartupError::Halted {
            phase: StartupPhase::Idle
        }
    ));
    assert!(!coordinator.on_filters_loaded());
    assert_eq!(coordinator.phase(), StartupPhase::Idle);
    assert!(coordinator.screen().is_none());
    assert!(log.borrow().is_empty());
}

#[tokio::test]
async fn test_pending_gate_does_nothing() {
    let (mut coordinator, log) = coordinator("TRK", FetchBehaviour::Succeed(favourites()));

    let result = tokio::time::timeout(
        Duration::from_millis(20),
        coordinator.start(future::pending::<Result<(), Infallible>>()),
    )
    .await;

    assert!(result.is_err());
    assert_eq!(coordinator.phase(), StartupPhase::Idle);
    assert!(log.borrow().is_empty());
}

#[tokio::test]
async fn test_unknown_qualifier_keeps_every_facet() {
    let (mut coordinator, _log) = coordinator("", FetchBehaviour::Succeed(favourites()));

    coordinator.start(ready()).await.unwrap();

    let screen = coordinator.screen().unwrap();
    let state = screen.state().read();
    assert_eq!(state.context_resource_qualifier(), None);
    assert_eq!(state.all_facets(), FACET_CATALOG);
}

#[tokio::test]
async fn test_context_query_is_identity_projection() {
    let (mut coordinator, _log) = coordinator("BRC", FetchBehaviour::Succeed(favourites()));
    let before = coordinator.context_query();
    assert_eq!(
        before.get("componentUuids").map(String::as_str),
        Some("uuid-42")
    );

    coordinator.start(ready()).await.unwrap();

    let screen = coordinator.screen().unwrap();
    assert_eq!(coordinator.context_query(), before);
    assert_eq!(screen.context_query(), before);
    assert_eq!(screen.state().read().context_query(), before);
}

#[tokio::test]
async fn test_controller_available_after_start() {
    let (mut coordinator, _log) = coordinator("TRK", FetchBehaviour::Succeed(favourites()));
    assert!(coordinator.controller().is_none());

    coordinator.start(ready()).await.unwrap();

    let controller = coordinator.controller().unwrap();
    assert!(controller.fetch_list(true).await.is_ok());
}

#[tokio::test]
async fn test_custom_restrictions() {
    let (coordinator, _log) = coordinator("DEV", FetchBehaviour::Succeed(favourites()));
    let table = RestrictionTable::empty().with_restriction(QualifierKind::Developer, ["rules", "tags"]);
    let mut coordinator = coordinator.with_restrictions(table);

    coordinator.start(ready()).await.unwrap();

    let screen = coordinator.screen().unwrap();
    let state = screen.state().read();
    assert!(state.all_facets().iter().any(|f| f == "authors"));
    assert!(!state.all_facets().iter().any(|f| f == "rules"));
    assert!(!state.server_facets().iter().any(|f| f == "tags"));
}

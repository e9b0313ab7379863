pub mod config;
pub mod http;
pub mod layout;
pub mod report;
pub mod router;

pub use config::{load_settings, ScreenArgs};
pub use http::{request_messages, HttpController};
pub use layout::{ScopeRegistry, TextLayout};
pub use report::ScreenSummary;
pub use router::{parse_fragment, HashRouter, Route, RouteError};

//! Collections bound to the screen state.
//!
//! Each collection holds a clone of the [`StateHandle`](crate::state::StateHandle)
//! and reads from it; the state never reads from the collections.

pub mod facets;
pub mod filters;
pub mod issues;

use std::cell::RefCell;
use std::rc::Rc;

pub use facets::FacetList;
pub use filters::FilterList;
pub use issues::IssueList;

pub type Shared<T> = Rc<RefCell<T>>;

pub mod facet;
pub mod filter;
pub mod issue;
pub mod qualifier;

pub use facet::{FacetLists, FacetValue, FacetValues};
pub use filter::{FilterMetadata, SavedFilter};
pub use issue::{Issue, SearchPage};
pub use qualifier::QualifierKind;

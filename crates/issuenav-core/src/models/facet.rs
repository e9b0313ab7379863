use serde::{Deserialize, Serialize};

/// Count for one value of a facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetValue {
    pub val: String,
    pub count: u64,
}

/// All counts computed for a facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetValues {
    pub property: String,
    #[serde(default)]
    pub values: Vec<FacetValue>,
}

impl FacetValues {
    pub fn total(&self) -> u64 {
        self.values.iter().map(|v| v.count).sum()
    }
}

/// The three facet lists carried by the screen state.
///
/// `enabled` is what the user chose to show, `all` is what the screen can
/// show, `server` is what the backend computes counts for.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FacetLists {
    pub enabled: Vec<String>,
    pub all: Vec<String>,
    pub server: Vec<String>,
}

impl FacetLists {
    pub fn new<S: AsRef<str>>(enabled: &[S], all: &[S], server: &[S]) -> Self {
        let owned = |items: &[S]| items.iter().map(|s| s.as_ref().to_string()).collect();
        Self {
            enabled: owned(enabled),
            all: owned(all),
            server: owned(server),
        }
    }
}

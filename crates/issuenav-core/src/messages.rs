use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Localized message bundle loaded before the screen starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Messages {
    entries: HashMap<String, String>,
}

impl Messages {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Label for a facet, falling back to the facet id
    pub fn facet_label(&self, facet: &str) -> String {
        self.get(&format!("issues.facet.{}", facet))
            .unwrap_or(facet)
            .to_string()
    }
}

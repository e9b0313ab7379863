use serde::{Deserialize, Serialize};

use super::FacetValues;

/// A single issue row as returned by the issue search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub key: String,
    #[serde(default)]
    pub rule: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub component: String,
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

impl Issue {
    /// `component:line`, or just the component for file-level issues
    pub fn location(&self) -> String {
        match self.line {
            Some(line) => format!("{}:{}", self.component, line),
            None => self.component.clone(),
        }
    }
}

/// One page of search results, already decoded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    pub issues: Vec<Issue>,
    pub facets: Vec<FacetValues>,
    pub page_index: u32,
    pub page_size: u32,
    pub total: u64,
}

use std::fmt::Write;

use serde::Serialize;

use issuenav_core::models::{FacetValue, Issue, QualifierKind, SavedFilter};
use issuenav_core::state::{Paging, Query};
use issuenav_core::{Messages, ScreenContext, StartupPhase};

use super::layout::{ScopeRegistry, TextLayout};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetSummary {
    pub property: String,
    pub label: String,
    pub values: Vec<FacetValue>,
}

/// Everything the screen shows once it is interactive.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenSummary {
    pub resource_id: String,
    pub resource_name: String,
    pub qualifier: Option<QualifierKind>,
    pub phase: StartupPhase,
    pub keyboard_scope: Option<String>,
    pub footer_markers: Vec<String>,
    pub regions: Vec<String>,
    pub query: Query,
    pub filter: Option<SavedFilter>,
    pub paging: Paging,
    pub selected_index: Option<usize>,
    pub facets: Vec<FacetSummary>,
    pub issues: Vec<Issue>,
}

impl ScreenSummary {
    pub fn collect(
        screen: &ScreenContext,
        layout: &TextLayout,
        scopes: &ScopeRegistry,
        phase: StartupPhase,
        messages: &Messages,
    ) -> Self {
        let state = screen.state().read();
        let facets = screen
            .facets()
            .borrow()
            .visible()
            .into_iter()
            .map(|(property, values)| FacetSummary {
                label: messages.facet_label(&property),
                values: values.map(|v| v.values.clone()).unwrap_or_default(),
                property,
            })
            .collect();

        Self {
            resource_id: state.context_resource_id().to_string(),
            resource_name: state.context_resource_name().to_string(),
            qualifier: state.context_resource_qualifier(),
            phase,
            keyboard_scope: scopes.active(),
            footer_markers: layout.footer_markers(),
            regions: layout
                .mounted_regions()
                .iter()
                .map(|r| r.name().to_string())
                .collect(),
            query: state.query().clone(),
            filter: state.filter().cloned(),
            paging: state.paging(),
            selected_index: state.selected_index(),
            facets,
            issues: screen.issues().borrow().iter().cloned().collect(),
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let qualifier = self.qualifier.map(|q| q.label()).unwrap_or("Resource");
        let _ = writeln!(
            out,
            "{} {} - {} of {} issues",
            qualifier,
            self.resource_name,
            self.issues.len(),
            self.paging.total
        );
        if let Some(filter) = &self.filter {
            let _ = writeln!(out, "Filter: {}", filter.name);
        }
        if !self.query.is_empty() {
            let query: Vec<String> = self.query.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            let _ = writeln!(out, "Query: {}", query.join(" "));
        }

        if !self.facets.is_empty() {
            let _ = writeln!(out);
            for facet in &self.facets {
                let values: Vec<String> = facet
                    .values
                    .iter()
                    .map(|v| format!("{} ({})", v.val, v.count))
                    .collect();
                let values = if values.is_empty() {
                    "-".to_string()
                } else {
                    values.join(", ")
                };
                let _ = writeln!(out, "{}: {}", facet.label, values);
            }
        }

        if !self.issues.is_empty() {
            let _ = writeln!(out);
            for (index, issue) in self.issues.iter().enumerate() {
                let marker = if self.selected_index == Some(index) { '>' } else { ' ' };
                let _ = writeln!(
                    out,
                    "{} {:<8} {}  {}",
                    marker,
                    issue.severity,
                    issue.message,
                    issue.location()
                );
            }
        }
        out
    }
}

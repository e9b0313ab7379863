//! Application-wide constants
//!
//! Facet identifiers, default facet lists and the few marker strings the
//! screen hands to its collaborators.

/// Facet identifiers understood by the issue browser
pub mod facets {
    pub const FACET_MODE: &str = "facetMode";
    pub const ISSUES: &str = "issues";
    pub const SEVERITIES: &str = "severities";
    pub const RESOLUTIONS: &str = "resolutions";
    pub const CREATED_AT: &str = "createdAt";
    pub const RULES: &str = "rules";
    pub const TAGS: &str = "tags";
    pub const STATUSES: &str = "statuses";
    pub const PROJECT_UUIDS: &str = "projectUuids";
    pub const MODULE_UUIDS: &str = "moduleUuids";
    pub const DIRECTORIES: &str = "directories";
    pub const FILE_UUIDS: &str = "fileUuids";
    pub const ASSIGNEES: &str = "assignees";
    pub const REPORTERS: &str = "reporters";
    pub const AUTHORS: &str = "authors";
    pub const LANGUAGES: &str = "languages";
    pub const ACTION_PLANS: &str = "actionPlans";
}

use facets::*;

/// Every facet the screen is able to show, in display order.
pub const FACET_CATALOG: &[&str] = &[
    FACET_MODE,
    ISSUES,
    SEVERITIES,
    RESOLUTIONS,
    CREATED_AT,
    RULES,
    TAGS,
    STATUSES,
    PROJECT_UUIDS,
    MODULE_UUIDS,
    DIRECTORIES,
    FILE_UUIDS,
    ASSIGNEES,
    REPORTERS,
    AUTHORS,
    LANGUAGES,
    ACTION_PLANS,
];

/// Facets shown when the user has no stored preference
pub const DEFAULT_ENABLED_FACETS: &[&str] = &[FACET_MODE, SEVERITIES, RESOLUTIONS];

/// Facets the backend computes counts for
pub const DEFAULT_SERVER_FACETS: &[&str] = &[
    SEVERITIES,
    STATUSES,
    RESOLUTIONS,
    ACTION_PLANS,
    PROJECT_UUIDS,
    DIRECTORIES,
    RULES,
    MODULE_UUIDS,
    TAGS,
    ASSIGNEES,
    REPORTERS,
    AUTHORS,
    FILE_UUIDS,
    LANGUAGES,
    CREATED_AT,
];

/// Query parameters that imply a facet with a different name
pub const QUERY_FACET_TRANSFORM: &[(&str, &str)] = &[
    ("resolved", RESOLUTIONS),
    ("assigned", ASSIGNEES),
    ("planned", ACTION_PLANS),
    ("createdBefore", CREATED_AT),
    ("createdAfter", CREATED_AT),
    ("createdInLast", CREATED_AT),
];

/// Context query key carrying the scoping resource id
pub const CONTEXT_QUERY_KEY: &str = "componentUuids";

/// Query applied by the index route
pub const DEFAULT_QUERY: &[(&str, &str)] = &[("resolved", "false")];

/// Keyboard scope enabled once the screen is interactive
pub const KEY_SCOPE_LIST: &str = "list";

/// Footer marker switching the page footer to navigator layout
pub const FOOTER_MARKER: &str = "search-navigator-footer";

// Search defaults
pub const DEFAULT_PAGE_SIZE: u32 = 50;
pub const DEFAULT_SORT: &str = "FILE_LINE";

/// Environment variable enabling file logging
pub const LOG_FILE_ENV: &str = "ISSUENAV_LOG_FILE";

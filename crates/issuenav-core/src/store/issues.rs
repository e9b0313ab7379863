use crate::models::Issue;
use crate::state::StateHandle;

/// Issues of the pages loaded so far.
#[derive(Debug)]
pub struct IssueList {
    state: StateHandle,
    issues: Vec<Issue>,
}

impl IssueList {
    pub fn new(state: StateHandle) -> Self {
        Self {
            state,
            issues: Vec::new(),
        }
    }

    pub fn reset(&mut self, issues: Vec<Issue>) {
        self.issues = issues;
    }

    /// Add the next page, skipping issues already listed
    pub fn append(&mut self, issues: Vec<Issue>) {
        for issue in issues {
            if !self.issues.iter().any(|i| i.key == issue.key) {
                self.issues.push(issue);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter()
    }

    /// The issue at the state's selected index
    pub fn selected(&self) -> Option<&Issue> {
        self.state
            .read()
            .selected_index()
            .and_then(|index| self.issues.get(index))
    }
}

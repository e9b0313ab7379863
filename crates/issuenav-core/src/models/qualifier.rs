use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of the resource an issue screen is scoped to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QualifierKind {
    #[serde(rename = "TRK")]
    Project,
    #[serde(rename = "BRC")]
    SubProject,
    #[serde(rename = "DIR")]
    Directory,
    #[serde(rename = "DEV")]
    Developer,
    #[serde(rename = "DEV_PRJ")]
    DeveloperProject,
}

impl QualifierKind {
    pub const ALL: [Self; 5] = [
        Self::Project,
        Self::SubProject,
        Self::Directory,
        Self::Developer,
        Self::DeveloperProject,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Project => "TRK",
            Self::SubProject => "BRC",
            Self::Directory => "DIR",
            Self::Developer => "DEV",
            Self::DeveloperProject => "DEV_PRJ",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Project => "Project",
            Self::SubProject => "Module",
            Self::Directory => "Directory",
            Self::Developer => "Developer",
            Self::DeveloperProject => "Developer project",
        }
    }

    /// Parse a short code. Unknown or empty codes yield `None`, which the
    /// screen treats as an unrestricted (global) context.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }
}

impl fmt::Display for QualifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_parse_back() {
        for kind in QualifierKind::ALL {
            assert_eq!(QualifierKind::from_code(kind.code()), Some(kind));
        }
    }

    #[test]
    fn test_unknown_codes() {
        assert_eq!(QualifierKind::from_code(""), None);
        assert_eq!(QualifierKind::from_code("FIL"), None);
        assert_eq!(QualifierKind::from_code("dir"), None);
        assert_eq!(QualifierKind::from_code(" DEV_PRJ "), Some(QualifierKind::DeveloperProject));
    }

    #[test]
    fn test_serde_uses_short_codes() {
        let json = serde_json::to_string(&QualifierKind::DeveloperProject).unwrap();
        assert_eq!(json, "\"DEV_PRJ\"");
        let kind: QualifierKind = serde_json::from_str("\"BRC\"").unwrap();
        assert_eq!(kind, QualifierKind::SubProject);
    }
}

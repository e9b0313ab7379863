use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::{
    DEFAULT_ENABLED_FACETS, DEFAULT_PAGE_SIZE, DEFAULT_SERVER_FACETS, DEFAULT_SORT, FACET_CATALOG,
};
use crate::models::{FacetLists, QualifierKind};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize settings for {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("No resource to scope the issue screen to")]
    MissingResource,
}

/// The resource an issue screen is scoped to. Read once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenConfig {
    pub resource_id: String,
    #[serde(default)]
    pub resource_name: String,
    /// Raw qualifier code, e.g. `TRK` or `DEV_PRJ`
    #[serde(default)]
    pub resource_qualifier: String,
}

impl ScreenConfig {
    pub fn new(
        resource_id: impl Into<String>,
        resource_name: impl Into<String>,
        resource_qualifier: impl Into<String>,
    ) -> Self {
        Self {
            resource_id: resource_id.into(),
            resource_name: resource_name.into(),
            resource_qualifier: resource_qualifier.into(),
        }
    }

    /// Parsed qualifier; unknown codes mean an unrestricted context.
    pub fn qualifier(&self) -> Option<QualifierKind> {
        QualifierKind::from_code(&self.resource_qualifier)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resource_id.trim().is_empty() {
            return Err(ConfigError::MissingResource);
        }
        Ok(())
    }
}

fn default_server_url() -> String {
    "http://localhost:9000".to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

// Page sizes below one are raised to one.
fn page_size_at_least_one<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(u32::deserialize(deserializer)?.max(1))
}

fn default_sort() -> String {
    DEFAULT_SORT.to_string()
}

fn default_true() -> bool {
    true
}

/// User settings (persisted to JSON file)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_server_url")]
    pub server_url: String,
    #[serde(default = "default_page_size", deserialize_with = "page_size_at_least_one")]
    pub page_size: u32,
    #[serde(default = "default_sort")]
    pub sort: String,
    #[serde(default = "default_true")]
    pub ascending: bool,
    /// Preferred enabled facets; `None` means the built-in defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_facets: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_resource: Option<ScreenConfig>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            page_size: default_page_size(),
            sort: default_sort(),
            ascending: true,
            enabled_facets: None,
            last_resource: None,
        }
    }
}

impl Settings {
    /// Load settings from an explicit JSON file. Errors are reported.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Facet lists a new screen starts from. Stored preferences are limited
    /// to known facets; an empty result falls back to the defaults.
    pub fn initial_facets(&self) -> FacetLists {
        let enabled: Vec<String> = match &self.enabled_facets {
            Some(preferred) => preferred
                .iter()
                .filter(|f| FACET_CATALOG.contains(&f.as_str()))
                .cloned()
                .collect(),
            None => Vec::new(),
        };
        let mut facets = FacetLists::new(DEFAULT_ENABLED_FACETS, FACET_CATALOG, DEFAULT_SERVER_FACETS);
        if !enabled.is_empty() {
            facets.enabled = enabled;
        }
        facets
    }
}

/// Settings bound to the file they were loaded from.
pub struct SettingsStorage {
    path: PathBuf,
    pub settings: Settings,
}

impl SettingsStorage {
    /// `<config dir>/issuenav`, when the platform has a config dir
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("issuenav"))
    }

    /// Open `settings.json` in `dir`. A missing or unreadable file yields
    /// the defaults.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        let path = dir.as_ref().join("settings.json");
        let settings = Self::load_from_file(&path).unwrap_or_default();
        Self { path, settings }
    }

    fn load_from_file(path: &Path) -> Option<Settings> {
        let contents = fs::read_to_string(path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(settings) => Some(settings),
            Err(e) => {
                warn!("Ignoring unreadable settings {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(&self.settings).map_err(|source| {
            ConfigError::Serialize {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, json).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })
    }

    pub fn set_last_resource(&mut self, resource: ScreenConfig) -> Result<(), ConfigError> {
        self.settings.last_resource = Some(resource);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_config_qualifier() {
        assert_eq!(
            ScreenConfig::new("u", "n", "DIR").qualifier(),
            Some(QualifierKind::Directory)
        );
        assert_eq!(ScreenConfig::new("u", "n", "").qualifier(), None);
        assert_eq!(ScreenConfig::new("u", "n", "VW").qualifier(), None);
    }

    #[test]
    fn test_screen_config_validate() {
        assert!(ScreenConfig::new("u", "n", "TRK").validate().is_ok());
        assert!(matches!(
            ScreenConfig::new("  ", "n", "TRK").validate(),
            Err(ConfigError::MissingResource)
        ));
    }

    #[test]
    fn test_parse_partial_settings() {
        let json = r#"{"serverUrl": "https://sonar.example.com", "enabledFacets": ["rules"]}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.server_url, "https://sonar.example.com");
        assert_eq!(settings.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(settings.sort, DEFAULT_SORT);
        assert!(settings.ascending);
        assert_eq!(settings.enabled_facets, Some(vec!["rules".to_string()]));
    }

    #[test]
    fn test_initial_facets() {
        let defaults = Settings::default().initial_facets();
        assert_eq!(defaults.enabled, DEFAULT_ENABLED_FACETS);
        assert_eq!(defaults.all, FACET_CATALOG);
        assert_eq!(defaults.server, DEFAULT_SERVER_FACETS);

        let settings = Settings {
            enabled_facets: Some(vec!["rules".to_string(), "bogus".to_string()]),
            ..Default::default()
        };
        assert_eq!(settings.initial_facets().enabled, ["rules"]);

        let settings = Settings {
            enabled_facets: Some(vec!["bogus".to_string()]),
            ..Default::default()
        };
        assert_eq!(settings.initial_facets().enabled, DEFAULT_ENABLED_FACETS);
    }

    #[test]
    fn test_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = SettingsStorage::new(dir.path().join("nested"));
        assert_eq!(storage.settings, Settings::default());

        storage
            .set_last_resource(ScreenConfig::new("uuid-1", "Project", "TRK"))
            .unwrap();

        let reopened = SettingsStorage::new(dir.path().join("nested"));
        assert_eq!(
            reopened.settings.last_resource,
            Some(ScreenConfig::new("uuid-1", "Project", "TRK"))
        );
    }

    #[test]
    fn test_storage_ignores_garbage() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("settings.json"), "not json").unwrap();
        let storage = SettingsStorage::new(dir.path());
        assert_eq!(storage.settings, Settings::default());
    }

    #[test]
    fn test_explicit_load_reports_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        assert!(matches!(Settings::load(&path), Err(ConfigError::Read { .. })));

        fs::write(&path, "{").unwrap();
        assert!(matches!(Settings::load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_zero_page_size_is_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"pageSize": 0}"#).unwrap();
        assert_eq!(Settings::load(&path).unwrap().page_size, 1);

        fs::write(&path, r#"{"pageSize": 25}"#).unwrap();
        assert_eq!(Settings::load(&path).unwrap().page_size, 25);

        // the lenient storage path goes through the same deserializer
        fs::write(&path, r#"{"pageSize": 0}"#).unwrap();
        assert_eq!(SettingsStorage::new(dir.path()).settings.page_size, 1);
    }

    #[test]
    fn test_save_errors_are_write_errors() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("issuenav");
        fs::write(&blocker, "a file, not a directory").unwrap();

        let storage = SettingsStorage::new(&blocker);
        assert!(matches!(storage.save(), Err(ConfigError::Write { .. })));

        let source = serde_json::from_str::<Settings>("[").unwrap_err();
        let err = ConfigError::Serialize {
            path: storage.path().to_path_buf(),
            source,
        };
        assert!(err.to_string().starts_with("Failed to serialize settings for"));
    }
}

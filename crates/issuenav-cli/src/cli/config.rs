use std::path::Path;

use anyhow::Result;
use clap::Args;
use tracing::warn;

use issuenav_core::{ConfigError, ScreenConfig, Settings, SettingsStorage};

/// Command-line overrides for the stored settings
#[derive(Debug, Clone, Default, Args)]
pub struct ScreenArgs {
    /// Server base URL
    #[arg(long)]
    pub server: Option<String>,

    /// Id of the resource to scope the screen to (defaults to the last one)
    #[arg(long, short = 'r')]
    pub resource: Option<String>,

    /// Display name of the resource
    #[arg(long)]
    pub resource_name: Option<String>,

    /// Resource qualifier: TRK, BRC, DIR, DEV or DEV_PRJ
    #[arg(long, short = 'q')]
    pub qualifier: Option<String>,

    /// Issues per page
    #[arg(long)]
    pub page_size: Option<u32>,
}

impl ScreenArgs {
    /// Settings with the command-line values applied on top
    pub fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(server) = &self.server {
            settings.server_url = server.clone();
        }
        if let Some(page_size) = self.page_size {
            settings.page_size = page_size.max(1);
        }
        settings
    }

    /// The resource to scope the screen to: the one given on the command
    /// line, or the last remembered one.
    pub fn resolve(&self, settings: &Settings) -> Result<ScreenConfig, ConfigError> {
        let config = match &self.resource {
            Some(id) => ScreenConfig::new(
                id.clone(),
                self.resource_name.clone().unwrap_or_else(|| id.clone()),
                self.qualifier.clone().unwrap_or_default(),
            ),
            None => {
                let mut config = settings
                    .last_resource
                    .clone()
                    .ok_or(ConfigError::MissingResource)?;
                if let Some(name) = &self.resource_name {
                    config.resource_name = name.clone();
                }
                if let Some(qualifier) = &self.qualifier {
                    config.resource_qualifier = qualifier.clone();
                }
                config
            }
        };
        config.validate()?;

        if !config.resource_qualifier.trim().is_empty() && config.qualifier().is_none() {
            warn!(
                "Unknown qualifier '{}', no facets will be restricted",
                config.resource_qualifier
            );
        }
        Ok(config)
    }
}

/// Load settings from `path` when given (errors are fatal), otherwise from
/// the per-user settings file (errors fall back to defaults).
pub fn load_settings(path: Option<&Path>) -> Result<(Settings, Option<SettingsStorage>)> {
    if let Some(path) = path {
        return Ok((Settings::load(path)?, None));
    }
    match SettingsStorage::default_dir() {
        Some(dir) => {
            let storage = SettingsStorage::new(dir);
            Ok((storage.settings.clone(), Some(storage)))
        }
        None => Ok((Settings::default(), None)),
    }
}

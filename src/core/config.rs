//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::PathBuf;

use crate::core::content::Actor;
use crate::core::Project;

/// Base URL used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/Plone";

/// Luna configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL used to build node identifiers
    pub base_url: Option<String>,

    /// Acting user name
    pub actor: Option<String>,

    /// Roles held by the acting user
    pub roles: Option<Vec<String>>,

    /// Default output format
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load(project: Option<&Project>) -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/luna/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read(&global_path) {
                config.merge(global);
            }
        }

        // 3. Site config (.luna/config.yaml)
        if let Some(project) = project {
            if let Some(site) = Self::read(&project.config_path()) {
                config.merge(site);
            }
        }

        // 4. Environment variables
        if let Ok(base_url) = std::env::var("LUNA_BASE_URL") {
            config.base_url = Some(base_url);
        }
        if let Ok(actor) = std::env::var("LUNA_ACTOR") {
            config.actor = Some(actor);
        }
        if let Ok(roles) = std::env::var("LUNA_ROLES") {
            config.roles = Some(split_roles(&roles));
        }

        config
    }

    fn read(path: &std::path::Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!("ignoring unreadable config {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "luna")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.actor.is_some() {
            self.actor = other.actor;
        }
        if other.roles.is_some() {
            self.roles = other.roles;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> String {
        self.base_url
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string()
    }

    /// The acting user for permission checks
    pub fn actor(&self) -> Actor {
        let name = self
            .actor
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Actor::new(name, self.roles.clone().unwrap_or_default())
    }
}

/// Split a comma-separated role list
pub fn split_roles(roles: &str) -> Vec<String> {
    roles
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect()
}

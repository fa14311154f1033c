//! Shared helper functions for CLI commands
//!
//! Opening the site, its content tree and registry, and parsing the
//! loosely-typed values users pass on the command line.

use miette::{IntoDiagnostic, Result};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::path::Path;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::split_roles;
use crate::core::{Actor, Config, ContentError, ContentTree, Project, Registry};

/// An opened site with its merged configuration
pub struct Site {
    pub project: Project,
    pub config: Config,
}

impl Site {
    pub fn open(global: &GlobalOpts) -> Result<Self> {
        let project = Project::open(global.site.as_deref()).map_err(|e| miette::miette!("{}", e))?;
        let config = Config::load(Some(&project));
        tracing::debug!("opened site at {}", project.root().display());
        Ok(Self { project, config })
    }

    /// Load every page of the site
    pub fn content(&self) -> Result<ContentTree> {
        ContentTree::load(&self.project, &self.config.base_url()).map_err(content_error)
    }

    pub fn registry(&self) -> Result<Registry> {
        Registry::open(&self.project.registry_path()).into_diagnostic()
    }

    /// Configured actor, with command-line overrides applied
    pub fn actor(&self, name: Option<&str>, roles: Option<&str>) -> Actor {
        let mut actor = self.config.actor();
        if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
            actor.name = Some(name.to_string());
        }
        if let Some(roles) = roles {
            actor.roles = split_roles(roles);
        }
        actor
    }

    /// `--format`, falling back to the configured default
    pub fn format(&self, global: &GlobalOpts) -> OutputFormat {
        if global.format != OutputFormat::Auto {
            return global.format;
        }
        self.config
            .default_format
            .as_deref()
            .and_then(OutputFormat::from_config)
            .unwrap_or(OutputFormat::Auto)
    }
}

/// Turn a content error into a diagnostic with a hint
pub fn content_error(err: ContentError) -> miette::Report {
    match &err {
        ContentError::NotFound(_) => miette::miette!(
            help = "page paths mirror content/, e.g. content/about/index.yaml is /about",
            "{}",
            err
        ),
        ContentError::Forbidden(_) => miette::miette!(
            help = "set the acting user's roles with --roles, LUNA_ROLES or `roles` in .luna/config.yaml",
            "{}",
            err
        ),
        ContentError::Load(_) => miette::miette!("{}", err),
    }
}

/// Parse a JSON or YAML document given inline or as a file
pub fn read_document(inline: Option<&str>, file: Option<&Path>) -> Result<JsonValue> {
    let text = match (inline, file) {
        (Some(text), None) => text.to_string(),
        (None, Some(path)) => std::fs::read_to_string(path).into_diagnostic()?,
        (Some(_), Some(_)) => return Err(miette::miette!("Give either a value or --file, not both")),
        (None, None) => return Err(miette::miette!("Missing input: give a value or --file")),
    };
    // JSON is valid YAML, so one parser covers both
    serde_yml::from_str(&text).map_err(|e| miette::miette!("Invalid input: {}", e))
}

/// Parse `KEY=VALUE` pairs
pub fn parse_assignments(pairs: &[String]) -> Result<BTreeMap<String, JsonValue>> {
    pairs
        .iter()
        .map(|pair| {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| miette::miette!("Expected KEY=VALUE, got '{}'", pair))?;
            let key = key.trim();
            if key.is_empty() {
                return Err(miette::miette!("Empty key in '{}'", pair));
            }
            Ok((key.to_string(), JsonValue::String(value.trim().to_string())))
        })
        .collect()
}

/// Truncate a string to max_len, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

//! Site registry - a flat key-value store of JSON records
//!
//! Stored as `.luna/registry.yaml`. Keys are dotted names such as
//! `lunasites.color_schema`; values are arbitrary JSON. Callers decode
//! records into their own types and fall back to a default when a record is
//! missing or does not decode.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from reading or writing the registry file
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("cannot access registry {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("registry {path} is not valid: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("cannot encode record '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug)]
pub struct Registry {
    path: PathBuf,
    records: BTreeMap<String, JsonValue>,
}

impl Registry {
    /// Open the registry file; a missing file is an empty registry
    pub fn open(path: &Path) -> Result<Self, RegistryError> {
        let records = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_yml::from_str(&content).map_err(|e| RegistryError::Parse {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            records,
        })
    }

    /// Raw record
    pub fn raw(&self, key: &str) -> Option<&JsonValue> {
        self.records.get(key)
    }

    /// Decode a record, `None` when missing or of the wrong shape
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.records.get(key)?;
        match serde_json::from_value(raw.clone()) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(key, error = %e, "registry record does not decode");
                None
            }
        }
    }

    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    /// Store a record and write the registry file
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), RegistryError> {
        let encoded = serde_json::to_value(value).map_err(|source| RegistryError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.records.insert(key.to_string(), encoded);
        tracing::debug!(key, "registry record written");
        self.save()
    }

    /// Remove a record and write the registry file
    pub fn remove(&mut self, key: &str) -> Result<Option<JsonValue>, RegistryError> {
        let removed = self.records.remove(key);
        if removed.is_some() {
            self.save()?;
        }
        Ok(removed)
    }

    fn save(&self) -> Result<(), RegistryError> {
        let content = serde_yml::to_string(&self.records).map_err(|e| RegistryError::Parse {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&self.path, content).map_err(|source| RegistryError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

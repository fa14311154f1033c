//! Custom section template store

use chrono::Utc;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, BTreeSet};

use crate::core::content::Actor;
use crate::core::registry::Registry;
use crate::core::service::ServiceError;
use crate::entities::section::{SectionTemplate, DEFAULT_CATEGORY};

pub const SECTIONS_KEY: &str = "lunasites.custom_sections";

/// Input for a new template
#[derive(Debug, Clone, Default)]
pub struct NewSection {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub data: JsonValue,
}

#[derive(Debug, Serialize)]
pub struct SectionListing {
    pub sections: Vec<SectionTemplate>,
    pub categories: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct SectionDeleted {
    pub message: String,
    pub id: String,
}

pub struct SectionStore<'a> {
    registry: &'a mut Registry,
}

/// Stored templates as read from the registry
#[derive(Debug, Default)]
struct Stored {
    sections: BTreeMap<String, SectionTemplate>,
    /// Entries that do not decode, written back untouched
    unreadable: BTreeMap<String, JsonValue>,
    /// The record is not a map at all; writing would destroy it
    corrupt: bool,
}

#[derive(Serialize)]
#[serde(untagged)]
enum StoredEntry<'s> {
    Template(&'s SectionTemplate),
    Raw(&'s JsonValue),
}

impl<'a> SectionStore<'a> {
    pub fn new(registry: &'a mut Registry) -> Self {
        Self { registry }
    }

    fn load(&self) -> Stored {
        // Older sites stored the whole map as one JSON string
        let entries = match self.registry.raw(SECTIONS_KEY) {
            None => return Stored::default(),
            Some(JsonValue::String(encoded)) => match serde_json::from_str(encoded) {
                Ok(JsonValue::Object(map)) => map,
                _ => return Stored::corrupt(),
            },
            Some(JsonValue::Object(map)) => map.clone(),
            Some(_) => return Stored::corrupt(),
        };

        let mut stored = Stored::default();
        for (id, entry) in entries {
            match serde_json::from_value::<SectionTemplate>(entry.clone()) {
                Ok(section) => {
                    stored.sections.insert(id, section);
                }
                Err(e) => {
                    tracing::warn!(id = id.as_str(), "unreadable section template: {}", e);
                    stored.unreadable.insert(id, entry);
                }
            }
        }
        stored
    }

    /// Load for a write, refusing to overwrite a record that cannot be read
    fn load_for_write(&self) -> Result<Stored, ServiceError> {
        let stored = self.load();
        if stored.corrupt {
            return Err(ServiceError::Unreadable(format!(
                "{} is not a map of section templates",
                SECTIONS_KEY
            )));
        }
        Ok(stored)
    }

    fn save(&mut self, stored: &Stored) -> Result<(), ServiceError> {
        let mut entries: BTreeMap<&str, StoredEntry> = stored
            .unreadable
            .iter()
            .map(|(id, raw)| (id.as_str(), StoredEntry::Raw(raw)))
            .collect();
        entries.extend(
            stored
                .sections
                .iter()
                .map(|(id, section)| (id.as_str(), StoredEntry::Template(section))),
        );
        self.registry.set(SECTIONS_KEY, &entries)?;
        Ok(())
    }

    /// All readable templates, oldest first, with their sorted categories
    pub fn list(&self) -> SectionListing {
        let mut sections: Vec<SectionTemplate> = self.load().sections.into_values().collect();
        sections.sort_by(|a, b| a.created.cmp(&b.created).then_with(|| a.id.cmp(&b.id)));

        let categories: BTreeSet<String> = sections.iter().map(|s| s.category.clone()).collect();

        SectionListing {
            count: sections.len(),
            categories: categories.into_iter().collect(),
            sections,
        }
    }

    pub fn create(&mut self, input: NewSection, actor: &Actor) -> Result<SectionTemplate, ServiceError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(ServiceError::BadRequest("Name is required".to_string()));
        }
        if !has_data(&input.data) {
            return Err(ServiceError::BadRequest("Section data is required".to_string()));
        }

        let section = SectionTemplate {
            id: ulid::Ulid::new().to_string(),
            name: name.to_string(),
            description: input.description.unwrap_or_default(),
            category: input
                .category
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            data: input.data,
            created: Utc::now(),
            created_by: actor.display_name().to_string(),
        };

        let mut stored = self.load_for_write()?;
        stored.sections.insert(section.id.clone(), section.clone());
        self.save(&stored)?;
        tracing::info!(id = section.id.as_str(), "section template created");

        Ok(section)
    }

    /// Delete a template; unreadable entries can be deleted by id too
    pub fn delete(&mut self, id: &str) -> Result<SectionDeleted, ServiceError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ServiceError::BadRequest("Section ID is required".to_string()));
        }

        let mut stored = self.load_for_write()?;
        let removed = stored.sections.remove(id).is_some() | stored.unreadable.remove(id).is_some();
        if !removed {
            return Err(ServiceError::NotFound(format!("Section not found: {}", id)));
        }
        self.save(&stored)?;
        tracing::info!(id, "section template deleted");

        Ok(SectionDeleted {
            message: "Section deleted successfully".to_string(),
            id: id.to_string(),
        })
    }
}

impl Stored {
    fn corrupt() -> Self {
        tracing::warn!("{} is not a map of section templates", SECTIONS_KEY);
        Self {
            corrupt: true,
            ..Self::default()
        }
    }
}

/// Block data must be present and non-empty
fn has_data(data: &JsonValue) -> bool {
    match data {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(items) => !items.is_empty(),
        JsonValue::Object(map) => !map.is_empty(),
        JsonValue::Number(_) => true,
    }
}

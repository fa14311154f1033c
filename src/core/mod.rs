//! Core module - site layout, content tree, design inheritance and site services

pub mod color;
pub mod color_schema;
pub mod config;
pub mod content;
pub mod fields;
pub mod inherit;
pub mod node;
pub mod project;
pub mod registry;
pub mod sections;
pub mod service;
pub mod theming;

pub use color_schema::ColorSchemaService;
pub use config::Config;
pub use content::{Actor, ContentError, ContentRepository, ContentTree};
pub use fields::{FieldDescriptor, FieldKind, FieldValue};
pub use inherit::{query, ResolutionResult, Resolver, DESIGN_SCHEMA_BEHAVIOR};
pub use node::{ContentNode, DesignNode, SourceRef};
pub use project::{Project, ProjectError};
pub use registry::{Registry, RegistryError};
pub use sections::SectionStore;
pub use service::ServiceError;

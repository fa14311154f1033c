//! Errors shared by the registry-backed site services

use miette::Diagnostic;
use thiserror::Error;

use crate::core::registry::RegistryError;

#[derive(Debug, Error, Diagnostic)]
pub enum ServiceError {
    #[error("{0}")]
    #[diagnostic(code(luna::service::bad_request))]
    BadRequest(String),

    #[error("{0}")]
    #[diagnostic(code(luna::service::not_found))]
    NotFound(String),

    #[error("{0}")]
    #[diagnostic(
        code(luna::service::unreadable),
        help("fix or remove the record in .luna/registry.yaml")
    )]
    Unreadable(String),

    #[error(transparent)]
    #[diagnostic(code(luna::service::registry))]
    Registry(#[from] RegistryError),
}

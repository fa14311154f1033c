//! YAML error diagnostics for page and registry files

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// YAML syntax or shape error with source location
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(luna::yaml::syntax))]
pub struct YamlSyntaxError {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,

    #[help]
    help: Option<String>,

    message: String,
}

impl YamlSyntaxError {
    /// Build a diagnostic from a serde_yml error
    pub fn from_serde_error(err: &serde_yml::Error, source: &str, filename: &str) -> Self {
        let (line, column) = err
            .location()
            .map(|loc| (loc.line(), loc.column()))
            .unwrap_or((1, 1));

        let message = err.to_string();
        let help = generate_help(&message);
        Self::at_location(message, source, filename, line, column, help)
    }

    /// Build a diagnostic pointing at a specific line and column (1-based)
    pub fn at_location(
        message: impl Into<String>,
        source: &str,
        filename: &str,
        line: usize,
        column: usize,
        help: Option<String>,
    ) -> Self {
        let offset = line_col_to_offset(source, line, column);

        Self {
            src: NamedSource::new(filename, source.to_string()),
            span: SourceSpan::from(offset..offset.saturating_add(1)),
            help,
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failure reading a YAML file
#[derive(Debug, Error, Diagnostic)]
pub enum YamlError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] YamlSyntaxError),

    #[error("cannot read {path}: {source}")]
    #[diagnostic(code(luna::yaml::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convert a 1-based line/column to a byte offset, clamped to the source
pub(crate) fn line_col_to_offset(source: &str, line: usize, column: usize) -> usize {
    let mut line_start = 0;
    for (index, text) in source.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            let col_offset = text
                .char_indices()
                .nth(column.saturating_sub(1))
                .map(|(i, _)| i)
                .unwrap_or(text.len());
            return (line_start + col_offset).min(source.len().saturating_sub(1));
        }
        line_start += text.len();
    }
    source.len().saturating_sub(1)
}

fn generate_help(message: &str) -> Option<String> {
    let msg_lower = message.to_lowercase();

    if msg_lower.contains("tab") {
        return Some(
            "YAML requires spaces for indentation, not tabs. Replace tabs with spaces.".to_string(),
        );
    }

    if msg_lower.contains("duplicate") {
        return Some("Each key can only appear once. Remove or rename the duplicate key.".to_string());
    }

    if msg_lower.contains("mapping values are not allowed") {
        return Some("You may be missing a space after ':' or have incorrect indentation.".to_string());
    }

    if msg_lower.contains("invalid type") {
        return Some(
            "Check the value type: 'design' is a boolean, 'view_roles' a list, 'fields' a mapping."
                .to_string(),
        );
    }

    None
}

//! Page file validation with detailed error reporting

use jsonschema::{validator_for, ValidationError as JsonSchemaError, Validator as JsonValidator};
use miette::{Diagnostic, NamedSource, SourceSpan};
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::schema::{embedded_schema, PAGE_SCHEMA};

/// Validation error with source location information
#[derive(Debug, Error, Diagnostic)]
#[error("{filename}: {summary}")]
#[diagnostic(code(luna::schema::validation_error))]
pub struct ValidationError {
    filename: String,
    summary: String,

    #[source_code]
    src: NamedSource<String>,

    #[related]
    violations: Vec<SchemaViolation>,
}

/// A single schema violation
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct SchemaViolation {
    #[label("{hint}")]
    span: SourceSpan,

    message: String,
    hint: String,

    #[help]
    help: Option<String>,
}

impl ValidationError {
    fn new(filename: &str, source: &str, violations: Vec<SchemaViolation>) -> Self {
        let count = violations.len();
        let summary = if count == 1 {
            "1 error".to_string()
        } else {
            format!("{} errors", count)
        };
        Self {
            filename: filename.to_string(),
            summary,
            src: NamedSource::new(filename, source.to_string()),
            violations,
        }
    }

    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(|v| v.message.as_str())
    }
}

/// The embedded page schema could not be compiled
#[derive(Debug, Error, Diagnostic)]
#[error("page schema is invalid: {0}")]
#[diagnostic(code(luna::schema::invalid))]
pub struct SchemaLoadError(String);

/// Page validator with the compiled page schema
pub struct Validator {
    compiled: JsonValidator,
}

impl Validator {
    pub fn new() -> Result<Self, SchemaLoadError> {
        let text = embedded_schema(PAGE_SCHEMA)
            .ok_or_else(|| SchemaLoadError(format!("{} is not embedded", PAGE_SCHEMA)))?;
        let schema: JsonValue =
            serde_json::from_str(&text).map_err(|e| SchemaLoadError(e.to_string()))?;
        let compiled = validator_for(&schema).map_err(|e| SchemaLoadError(e.to_string()))?;
        Ok(Self { compiled })
    }

    /// Validate page YAML, collecting every violation
    pub fn validate(&self, content: &str, filename: &str) -> Result<(), ValidationError> {
        let yaml_value: serde_yml::Value = match serde_yml::from_str(content) {
            Ok(v) => v,
            Err(e) => {
                let violation = SchemaViolation {
                    span: find_error_span(content, e.location()),
                    message: format!("YAML parse error: {}", e),
                    hint: "invalid YAML".to_string(),
                    help: Some("Check YAML syntax - indentation, colons, quotes".to_string()),
                };
                return Err(ValidationError::new(filename, content, vec![violation]));
            }
        };

        let json_value: JsonValue = match serde_json::to_value(&yaml_value) {
            Ok(v) => v,
            Err(e) => {
                let violation = SchemaViolation {
                    span: (0, content.len()).into(),
                    message: format!("Failed to convert YAML to JSON: {}", e),
                    hint: "conversion error".to_string(),
                    help: None,
                };
                return Err(ValidationError::new(filename, content, vec![violation]));
            }
        };

        let violations: Vec<SchemaViolation> = self
            .compiled
            .iter_errors(&json_value)
            .map(|e| error_to_violation(content, &e))
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(filename, content, violations))
        }
    }
}

fn error_to_violation(content: &str, error: &JsonSchemaError) -> SchemaViolation {
    let path = error.instance_path.to_string();
    SchemaViolation {
        span: find_path_span(content, &path),
        message: format_schema_error(error),
        hint: format_error_hint(error),
        help: generate_help_message(error),
    }
}

fn format_schema_error(error: &JsonSchemaError) -> String {
    let path = if error.instance_path.as_str().is_empty() {
        "document root".to_string()
    } else {
        format!("'{}'", error.instance_path)
    };

    match &error.kind {
        jsonschema::error::ValidationErrorKind::Type { kind } => {
            format!("Wrong type at {}: expected {:?}", path, kind)
        }
        jsonschema::error::ValidationErrorKind::AdditionalProperties { unexpected } => {
            format!("Unknown field(s) at {}: {}", path, unexpected.join(", "))
        }
        _ => format!("Validation error at {}: {}", path, error),
    }
}

fn format_error_hint(error: &JsonSchemaError) -> String {
    match &error.kind {
        jsonschema::error::ValidationErrorKind::Type { .. } => "wrong type".to_string(),
        jsonschema::error::ValidationErrorKind::AdditionalProperties { .. } => {
            "unknown field".to_string()
        }
        _ => "validation error".to_string(),
    }
}

fn generate_help_message(error: &JsonSchemaError) -> Option<String> {
    let path = error.instance_path.to_string();
    match &error.kind {
        jsonschema::error::ValidationErrorKind::Type { .. } if path.starts_with("/fields/tools_header") => {
            Some("tools_header is a list of link objects, e.g. - title: Contact".to_string())
        }
        jsonschema::error::ValidationErrorKind::Type { .. } if path.starts_with("/fields/color_schema") => {
            Some("color_schema maps color keys to values, e.g. primary_color: \"#0070ae\"".to_string())
        }
        jsonschema::error::ValidationErrorKind::AdditionalProperties { unexpected } => {
            if unexpected.len() == 1 {
                Some(format!("Remove the '{}' field or check spelling", unexpected[0]))
            } else {
                Some("Remove unknown fields or check spelling".to_string())
            }
        }
        _ => None,
    }
}

/// Span for a YAML parser error location
fn find_error_span(content: &str, location: Option<serde_yml::Location>) -> SourceSpan {
    let Some(loc) = location else {
        let len = content.find('\n').unwrap_or(content.len()).max(1);
        return (0, len).into();
    };

    let offset = crate::yaml::diagnostics::line_col_to_offset(content, loc.line(), loc.column());
    let rest = &content[offset.min(content.len())..];
    let len = rest.find('\n').unwrap_or(rest.len()).max(1);
    (offset, len).into()
}

/// Span for a JSON pointer such as `/fields/tools_header/0`
fn find_path_span(content: &str, json_path: &str) -> SourceSpan {
    let parts: Vec<&str> = json_path.split('/').filter(|s| !s.is_empty()).collect();

    // Array indices have no key of their own; use the nearest named parent
    let key = parts.iter().rev().find(|p| p.parse::<usize>().is_err());

    if let Some(span) = key.and_then(|k| find_key_span(content, k)) {
        return span;
    }

    let len = content.find('\n').unwrap_or(content.len()).max(1);
    (0, len).into()
}

fn find_key_span(content: &str, key: &str) -> Option<SourceSpan> {
    let search_pattern = format!("{}:", key);

    let mut offset = 0;
    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with(&search_pattern) {
            let key_start = offset + (line.len() - trimmed.len());
            return Some((key_start, trimmed.len()).into());
        }
        offset += line.len() + 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> Validator {
        Validator::new().unwrap()
    }

    #[test]
    fn test_valid_page() {
        let yaml = r##"
title: Products
design: true
view_roles: [Editor]
fields:
  navbar_width: wide
  color_schema:
    primary_color: "#0070ae"
    toolbar_border_thickness: 2
  tools_header:
    - title: Contact
      href: /contact
  logo_image:
    filename: logo.png
    content_type: image/png
    size: 1024
  logo_text: [{type: p, children: [{text: Luna}]}]
  hide_login_button: false
"##;
        let result = validator().validate(yaml, "index.yaml");
        assert!(result.is_ok(), "valid page should pass: {:?}", result);
    }

    #[test]
    fn test_minimal_page() {
        assert!(validator().validate("title: Home\n", "index.yaml").is_ok());
    }

    #[test]
    fn test_tools_header_must_be_list_of_objects() {
        let yaml = "title: A\nfields:\n  tools_header: [contact]\n";
        let err = validator().validate(yaml, "a.yaml").unwrap_err();
        assert_eq!(err.violation_count(), 1);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "title: A\nfields:\n  navbar_colour: red\n";
        let err = validator().validate(yaml, "a.yaml").unwrap_err();
        assert!(err.messages().any(|m| m.contains("navbar_colour")));
    }

    #[test]
    fn test_nested_color_map_rejected() {
        let yaml = "title: A\nfields:\n  color_schema:\n    primary_color: {light: \"#fff\"}\n";
        assert!(validator().validate(yaml, "a.yaml").is_err());
    }

    #[test]
    fn test_yaml_syntax_error() {
        let err = validator().validate("title: [oops\n", "a.yaml").unwrap_err();
        assert!(err.messages().any(|m| m.starts_with("YAML parse error")));
    }

    #[test]
    fn test_find_key_span() {
        let content = "title: A\nfields:\n  navbar_width: 3\n";
        let span = find_key_span(content, "navbar_width").unwrap();
        assert_eq!(span.offset(), 19);
    }
}

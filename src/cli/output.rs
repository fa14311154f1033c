//! Structured output for command results

use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::OutputFormat;

/// Render `value` as JSON or YAML. `Auto` renders JSON.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => serde_yml::to_string(value).into_diagnostic(),
        OutputFormat::Json | OutputFormat::Auto => {
            serde_json::to_string_pretty(value).into_diagnostic()
        }
    }
}

/// Print `value` to stdout
pub fn print_value<T: Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    let text = render(value, format)?;
    println!("{}", text.trim_end());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_json_and_yaml() {
        let value = json!({"primary_color": "#0070ae"});
        let json = render(&value, OutputFormat::Auto).unwrap();
        assert!(json.contains("\"primary_color\": \"#0070ae\""));

        let yaml = render(&value, OutputFormat::Yaml).unwrap();
        assert!(yaml.starts_with("primary_color:"));
    }
}

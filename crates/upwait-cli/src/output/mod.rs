//! Output formatting module for upwait
//!
//! Provides text and JSON output formats for CLI output.

use anyhow::Result;
use serde::Serialize;
use serde_json::{Map, Value};
use std::io::{self, Write};

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format - machine-readable output
    Json,
    /// Plain text format - one item per line
    #[default]
    Text,
}

/// Formatter that can output data in text or JSON format
#[derive(Debug, Clone)]
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Create a new formatter with the specified output format
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    #[must_use]
    pub const fn output_format(&self) -> OutputFormat {
        self.format
    }

    /// Format data according to the configured output format
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let output = serde_json::to_string_pretty(data)?;
                Ok(output)
            }
            OutputFormat::Text => {
                let json_value = serde_json::to_value(data)?;
                Ok(render_text(&json_value))
            }
        }
    }

    /// Format and print data to stdout
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails
    pub fn print<T: Serialize>(&self, data: &T) -> Result<()> {
        let output = self.format(data)?;
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{output}")?;
        Ok(())
    }

    /// Format and print a list with a custom empty message
    ///
    /// For JSON format, wraps the array in a named object with a count field.
    /// For text, prints one entry per line, or `empty_message` if there are none.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails
    pub fn print_list<T: Serialize>(
        &self,
        data: &[T],
        empty_message: &str,
        collection_name: &str,
    ) -> Result<()> {
        let mut stdout = io::stdout().lock();
        match self.format {
            OutputFormat::Json => {
                let output = serde_json::to_string_pretty(&list_envelope(data, collection_name)?)?;
                writeln!(stdout, "{output}")?;
            }
            OutputFormat::Text => {
                if data.is_empty() {
                    writeln!(stdout, "{empty_message}")?;
                } else {
                    writeln!(stdout, "{}", self.format(&data)?)?;
                }
            }
        }
        Ok(())
    }

    /// Print a plain message. JSON output wraps it as `{"message": ...}`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails
    pub fn print_message(&self, message: &str) -> Result<()> {
        match self.format {
            OutputFormat::Json => self.print(&serde_json::json!({ "message": message })),
            OutputFormat::Text => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{message}")?;
                Ok(())
            }
        }
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(OutputFormat::default())
    }
}

fn list_envelope<T: Serialize>(data: &[T], collection_name: &str) -> Result<serde_json::Value> {
    let items_value = serde_json::to_value(data)?;
    let mut envelope = serde_json::Map::new();
    envelope.insert(collection_name.to_string(), items_value);
    envelope.insert("count".to_string(), serde_json::json!(data.len()));
    Ok(serde_json::Value::Object(envelope))
}

/// Render items as text, one line each.
fn render_text(value: &Value) -> String {
    match value {
        Value::Array(rows) => rows.iter().map(render_text).collect::<Vec<_>>().join("\n"),
        Value::Object(fields) => render_item_line(fields),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `<name>  <VERDICT>  up:N down:N  [total:N]  [updated:TS]  [(voted)]`
fn render_item_line(fields: &Map<String, Value>) -> String {
    let text = |key: &str| fields.get(key).and_then(Value::as_str);
    let count = |key: &str| fields.get(key).and_then(Value::as_u64);

    let mut parts = vec![text("name").unwrap_or_default().to_string()];
    if let Some(verdict) = text("verdict") {
        parts.push(verdict.to_string());
    }
    if let (Some(up), Some(down)) = (count("up_votes"), count("down_votes")) {
        parts.push(format!("up:{up} down:{down}"));
    }
    if let Some(total) = count("update_count") {
        parts.push(format!("total:{total}"));
    }
    if let Some(updated) = text("last_updated") {
        parts.push(format!("updated:{updated}"));
    }
    if fields.get("already_voted").and_then(Value::as_bool) == Some(true) {
        parts.push("(voted)".to_string());
    }
    parts.join("  ")
}

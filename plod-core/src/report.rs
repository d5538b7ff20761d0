// Rendering of accessor results for the terminal

use crate::method::MethodOutput;
use plod_client::QueryResults;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Records keyed by variable name
    Json,
    /// List of lists, one inner list per row
    Rows,
    Text,
    Html,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 4] = ["json", "rows", "text", "html"];

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "rows" => Some(OutputFormat::Rows),
            "text" => Some(OutputFormat::Text),
            "html" => Some(OutputFormat::Html),
            _ => None,
        }
    }
}

pub fn render(output: &MethodOutput, format: OutputFormat) -> String {
    match (output, format) {
        (MethodOutput::Text(text), OutputFormat::Json | OutputFormat::Rows) => match text {
            Some(s) => Value::String(s.clone()).to_string(),
            None => Value::Null.to_string(),
        },
        (MethodOutput::Text(text), _) => text.clone().unwrap_or_default(),

        (MethodOutput::Table(table), OutputFormat::Json) => pretty(&table.to_records()),
        (MethodOutput::Table(table), OutputFormat::Rows) => pretty(&table.to_rows()),
        (MethodOutput::Table(table), OutputFormat::Text) => text_table(table),
        (MethodOutput::Table(table), OutputFormat::Html) => html_table(table),

        (MethodOutput::Json(value), OutputFormat::Json | OutputFormat::Rows) => match value {
            Some(v) => pretty(v),
            None => Value::Null.to_string(),
        },
        (MethodOutput::Json(value), _) => value.as_ref().map(Value::to_string).unwrap_or_default(),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Tab separated, header first. Unbound cells are empty.
pub fn text_table(table: &QueryResults) -> String {
    let mut out = String::new();
    out.push_str(&table.vars.join("\t"));
    out.push('\n');

    for row in &table.rows {
        let cells: Vec<&str> = row.iter().map(|c| c.as_deref().unwrap_or("")).collect();
        out.push_str(&cells.join("\t"));
        out.push('\n');
    }

    out
}

pub fn html_table(table: &QueryResults) -> String {
    let mut html = String::from("<table border=\"1\" class=\"dataframe\">\n  <thead>\n    <tr>\n");
    for var in &table.vars {
        html.push_str(&format!("      <th>{}</th>\n", escape_html(var)));
    }
    html.push_str("    </tr>\n  </thead>\n  <tbody>\n");

    for row in &table.rows {
        html.push_str("    <tr>\n");
        for cell in row {
            html.push_str(&format!(
                "      <td>{}</td>\n",
                escape_html(cell.as_deref().unwrap_or(""))
            ));
        }
        html.push_str("    </tr>\n");
    }

    html.push_str("  </tbody>\n</table>\n");
    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use serde_json::{json, Value};
use sommelier_advisor::{PreparedPrompt, Recommendation, Selection};
use sommelier_domain::{InventoryRow, PriceBucket, RecommendationRequest};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format inventory rows.
    pub fn format_rows(&self, rows: &[InventoryRow]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&rows_json(rows))?),
            OutputFormat::Table => Ok(self.format_rows_table(rows)),
            OutputFormat::Quiet => Ok(rows
                .iter()
                .map(|row| row.name.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a candidate selection with its bucket.
    pub fn format_selection(&self, selection: &Selection, bucket: PriceBucket) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "bucket": bucket.as_str(),
                "is_fallback": selection.is_fallback,
                "rows": rows_json(&selection.rows),
            }))?),
            OutputFormat::Quiet => self.format_rows(&selection.rows),
            OutputFormat::Table => {
                let mut out = String::new();
                if selection.is_fallback {
                    out.push_str(&self.warning(sommelier_advisor::FALLBACK_NOTICE));
                    out.push('\n');
                }
                out.push_str(&self.info(&format!(
                    "{} candidate(s) for {}",
                    selection.len(),
                    bucket.label()
                )));
                out.push('\n');
                out.push_str(&self.format_rows_table(&selection.rows));
                Ok(out)
            }
        }
    }

    /// Format a model answer. The text itself is never altered.
    pub fn format_recommendation(&self, recommendation: &Recommendation) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "text": recommendation.text,
                "is_fallback": recommendation.is_fallback,
                "notice": recommendation.notice(),
                "candidates": recommendation.candidates,
                "bucket": recommendation.bucket.as_str(),
                "model": recommendation.model,
            }))?),
            OutputFormat::Quiet => Ok(recommendation.text.clone()),
            OutputFormat::Table => {
                let mut out = String::new();
                if let Some(notice) = recommendation.notice() {
                    out.push_str(&self.warning(notice));
                    out.push_str("\n\n");
                }
                out.push_str(&recommendation.text);
                Ok(out)
            }
        }
    }

    /// Format a composed prompt (dry runs and the REPL `prompt` action).
    pub fn format_prompt(&self, prepared: &PreparedPrompt) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "bucket": prepared.request.bucket.as_str(),
                "is_fallback": prepared.selection.is_fallback,
                "candidates": prepared.selection.len(),
                "prompt": prepared.prompt,
            }))?),
            OutputFormat::Quiet => Ok(prepared.prompt.clone()),
            OutputFormat::Table => {
                let mut out = String::new();
                out.push_str(&self.info(&format!(
                    "Prompt with {} candidate(s), {} chars",
                    prepared.selection.len(),
                    prepared.prompt.chars().count()
                )));
                if prepared.selection.is_fallback {
                    out.push('\n');
                    out.push_str(&self.warning(sommelier_advisor::FALLBACK_NOTICE));
                }
                out.push_str("\n\n");
                out.push_str(&prepared.prompt);
                Ok(out)
            }
        }
    }

    /// Format the current form values.
    pub fn format_request(&self, request: &RecommendationRequest) -> String {
        let query = request.query_text().unwrap_or("-");
        format!(
            "  {} {}\n  {} {}\n  {} {}",
            self.colorize("price: ", "cyan"),
            request.bucket.label(),
            self.colorize("taste: ", "cyan"),
            request.taste.describe(),
            self.colorize("ask:   ", "cyan"),
            query
        )
    }

    fn format_rows_table(&self, rows: &[InventoryRow]) -> String {
        if rows.is_empty() {
            return self.colorize("No wines found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Name", "Category", "Price", "Details"]);

        for row in rows {
            let details = row
                .attributes
                .iter()
                .map(|(column, value)| format!("{}: {}", column, value))
                .collect::<Vec<_>>()
                .join(", ");
            builder.push_record([
                row.name.clone(),
                row.category.clone().unwrap_or_else(|| "-".to_string()),
                row.price_label().unwrap_or_else(|| "-".to_string()),
                details,
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn rows_json(rows: &[InventoryRow]) -> Vec<Value> {
    rows.iter()
        .map(|row| {
            let attributes: serde_json::Map<String, Value> = row
                .attributes
                .iter()
                .map(|(column, value)| (column.clone(), Value::String(value.clone())))
                .collect();
            json!({
                "name": row.name,
                "category": row.category,
                "price": row.price,
                "attributes": attributes,
            })
        })
        .collect()
}

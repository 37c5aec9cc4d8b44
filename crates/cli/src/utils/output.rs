//! Table, JSON and YAML rendering of listings

use crate::error::{CliError, CliResult};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Result<Self, CliError> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            _ => Err(CliError::Message(format!(
                "Invalid format: {s}. Use table, json, or yaml"
            ))),
        }
    }
}

/// Fixed-column text table sized to its widest cell
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row<S: ToString>(&mut self, cells: impl IntoIterator<Item = S>) -> &mut Self {
        self.rows
            .push(cells.into_iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(i) {
                    *width = (*width).max(cell.chars().count());
                }
            }
        }

        let line = |cells: &[String]| -> String {
            let padded: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(i, width)| {
                    let cell = cells.get(i).map(String::as_str).unwrap_or("");
                    format!("{cell:<width$}")
                })
                .collect();
            format!("  {}", padded.join("  ").trim_end())
        };

        let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        let mut out = Vec::with_capacity(self.rows.len() + 2);
        out.push(line(&self.headers));
        out.push(format!("  {}", "-".repeat(total)));
        for row in &self.rows {
            out.push(line(row));
        }
        out.join("\n")
    }
}

/// Serialize to pretty JSON
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CliError::Message(format!("Failed to serialize: {e}")))
}

pub fn to_yaml<T: Serialize + ?Sized>(value: &T) -> CliResult<String> {
    serde_yaml::to_string(value).map_err(|e| CliError::Message(format!("Failed to serialize: {e}")))
}

/// Print a listing in the requested format; `table` builds the table view.
pub fn print_listing<T: Serialize + ?Sized>(
    format: OutputFormat,
    value: &T,
    table: impl FnOnce() -> Table,
) -> CliResult<()> {
    match format {
        OutputFormat::Table => {
            let table = table();
            if table.is_empty() {
                println!("  (none)");
            } else {
                println!("{}", table.render());
            }
        }
        OutputFormat::Json => println!("{}", to_json(value)?),
        OutputFormat::Yaml => print!("{}", to_yaml(value)?),
    }
    Ok(())
}

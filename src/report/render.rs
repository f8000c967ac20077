//! Text renderings of a [`QueryResult`].

use serde::{Deserialize, Serialize};

use super::result::{QueryResult, ValueKind};

/// Output format for rendered results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned plain-text table.
    #[default]
    Table,
    /// `{"columns": [...], "rows": [...]}`
    Json,
    /// RFC 4180 CSV with a header row.
    Csv,
}

impl OutputFormat {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "csv" => Some(OutputFormat::Csv),
            _ => None,
        }
    }
}

/// Render a result in the given format. Output ends with a newline.
pub fn render(result: &QueryResult, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Table => Ok(render_table(result)),
        OutputFormat::Json => serde_json::to_string_pretty(result).map(|mut s| {
            s.push('\n');
            s
        }),
        OutputFormat::Csv => Ok(render_csv(result)),
    }
}

/// Aligned table. Numeric columns are right-aligned.
pub fn render_table(result: &QueryResult) -> String {
    let cells: Vec<Vec<String>> = result
        .rows
        .iter()
        .map(|row| row.iter().map(|v| v.to_string()).collect())
        .collect();

    let widths: Vec<usize> = result
        .columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            cells
                .iter()
                .filter_map(|row| row.get(i))
                .map(|s| s.chars().count())
                .chain(std::iter::once(c.name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let numeric: Vec<bool> = result
        .columns
        .iter()
        .map(|c| matches!(c.kind, ValueKind::Integer | ValueKind::Real))
        .collect();

    let mut out = String::new();
    let header: Vec<&str> = result.columns.iter().map(|c| c.name.as_str()).collect();
    push_line(&mut out, &header, &widths, &vec![false; widths.len()]);

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let rule: Vec<&str> = rule.iter().map(String::as_str).collect();
    push_line(&mut out, &rule, &widths, &numeric);

    for row in &cells {
        let row: Vec<&str> = row.iter().map(String::as_str).collect();
        push_line(&mut out, &row, &widths, &numeric);
    }

    out.push_str(&format!(
        "({} row{})\n",
        result.len(),
        if result.len() == 1 { "" } else { "s" }
    ));
    out
}

fn push_line(out: &mut String, cells: &[&str], widths: &[usize], right: &[bool]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .zip(right)
        .map(|((cell, &width), &right)| {
            if right {
                format!("{:>width$}", cell, width = width)
            } else {
                format!("{:<width$}", cell, width = width)
            }
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

/// CSV with a header row. Fields are quoted only when needed.
pub fn render_csv(result: &QueryResult) -> String {
    let mut out = String::new();
    let header: Vec<String> = result.columns.iter().map(|c| csv_field(&c.name)).collect();
    out.push_str(&header.join(","));
    out.push('\n');
    for row in &result.rows {
        let fields: Vec<String> = row.iter().map(|v| csv_field(&v.to_string())).collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

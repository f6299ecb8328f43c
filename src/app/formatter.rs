use crate::app::models::{DiffRow, DiffSummary};
use anyhow::Result;
use std::path::Path;

pub struct OutputGenerator;

impl OutputGenerator {
    /// Borderless table: one row per differing path, `+`/`-` per inventory.
    pub fn diff_table(rows: &[DiffRow], left_label: &str, right_label: &str) -> String {
        let header = ["file_path", left_label, right_label];
        let body: Vec<[&str; 3]> = rows
            .iter()
            .map(|row| [row.path.as_str(), marker(row.present_in_left), marker(row.present_in_right)])
            .collect();

        let mut widths = header.map(|h| h.chars().count());
        for cells in &body {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut output = String::new();
        push_row(&mut output, &header, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        output.push_str(&rule.join("-+-"));
        output.push('\n');
        for cells in &body {
            push_row(&mut output, cells, &widths);
        }

        output.trim_end().to_string()
    }

    /// `- path` for left-only entries, `+ path` for right-only entries.
    pub fn diff_plain(rows: &[DiffRow]) -> String {
        rows.iter()
            .map(|row| {
                let sign = if row.only_in_left() { '-' } else { '+' };
                format!("{} {}", sign, row.path)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn diff_json(rows: &[DiffRow]) -> Result<String> {
        Ok(serde_json::to_string_pretty(rows)?)
    }

    pub fn diff_summary(summary: &DiffSummary) -> String {
        if summary.is_empty() {
            return "No differences found".to_string();
        }
        format!(
            "{} only in left, {} only in right",
            summary.only_left, summary.only_right
        )
    }

    pub fn create_summary(output: &Path, count: usize) -> String {
        format!(
            "Inventory written to {}\nTotal files found: {}",
            output.display(),
            count
        )
    }
}

fn marker(present: bool) -> &'static str {
    if present {
        "+"
    } else {
        "-"
    }
}

fn push_row(output: &mut String, cells: &[&str; 3], widths: &[usize; 3]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    output.push_str(padded.join(" | ").trim_end());
    output.push('\n');
}

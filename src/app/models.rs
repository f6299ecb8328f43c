use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Settings for a single scan, built once per invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanConfig {
    pub sort_output: bool,
    pub relative_paths: bool,
    pub include_hidden: bool,
    pub exclude_patterns: Vec<String>,
    pub include_patterns: Vec<String>,
}

/// Lines read from one inventory. Ordered byte-wise, never holds an empty line.
pub type LineSet = BTreeSet<String>;

/// Result of a scan.
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Absolute root the paths were qualified against.
    pub root: PathBuf,
    pub files: Vec<String>,
}

/// One path that only one of the two inventories contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffRow {
    pub path: String,
    pub present_in_left: bool,
    pub present_in_right: bool,
}

impl DiffRow {
    pub fn only_in_left(&self) -> bool {
        self.present_in_left && !self.present_in_right
    }

    pub fn only_in_right(&self) -> bool {
        self.present_in_right && !self.present_in_left
    }
}

/// Counts per side, used for the closing line of a diff report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffSummary {
    pub only_left: usize,
    pub only_right: usize,
}

impl DiffSummary {
    pub fn from_rows(rows: &[DiffRow]) -> Self {
        rows.iter().fold(Self::default(), |mut acc, row| {
            if row.only_in_left() {
                acc.only_left += 1;
            } else if row.only_in_right() {
                acc.only_right += 1;
            }
            acc
        })
    }

    pub fn is_empty(&self) -> bool {
        self.only_left == 0 && self.only_right == 0
    }
}

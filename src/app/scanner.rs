use crate::app::diagnostics::{Diagnostics, PROGRESS_INTERVAL};
use crate::app::error::{InventoryError, ScanWarning};
use crate::app::models::{ScanConfig, ScanReport};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use ignore::{DirEntry, WalkBuilder};
use pathdiff::diff_paths;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Walks one directory tree and produces its file inventory.
pub struct Scanner {
    root: PathBuf,
    config: ScanConfig,
    include_set: GlobSet,
    exclude_set: GlobSet,
    cancel: Option<Arc<AtomicBool>>,
}

impl Scanner {
    /// Compiles the config's patterns. Fails on the first invalid glob.
    pub fn new(root: impl Into<PathBuf>, config: &ScanConfig) -> Result<Self, InventoryError> {
        Ok(Self {
            root: root.into(),
            config: config.clone(),
            include_set: build_globset(&config.include_patterns)?,
            exclude_set: build_globset(&config.exclude_patterns)?,
            cancel: None,
        })
    }

    /// Stop the walk (with `Interrupted`) once `flag` is set.
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Single depth-first pass over the tree.
    ///
    /// Entries that cannot be read are reported to `diagnostics` and skipped;
    /// only a missing or non-directory root is fatal.
    pub fn scan(&self, diagnostics: &dyn Diagnostics) -> Result<ScanReport, InventoryError> {
        let root = self.resolve_root()?;

        // Every ignore-file and hidden filter is off: filtering is ours alone.
        // Sorting by name keeps unsorted output stable for a given tree.
        let walker = WalkBuilder::new(&root)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        let mut files = self.collect(&root, walker, diagnostics)?;

        if self.config.sort_output {
            files.sort_unstable();
        }

        log::debug!("Scanned {}: {} files kept", root.display(), files.len());

        Ok(ScanReport { root, files })
    }

    /// Keeps the entries that pass the filters, warning about the ones that
    /// could not be read.
    fn collect(
        &self,
        root: &Path,
        entries: impl IntoIterator<Item = Result<DirEntry, ignore::Error>>,
        diagnostics: &dyn Diagnostics,
    ) -> Result<Vec<String>, InventoryError> {
        let mut files = Vec::new();
        let mut found: u64 = 0;

        for result in entries {
            if self.is_cancelled() {
                return Err(InventoryError::Interrupted);
            }

            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    diagnostics.warning(&ScanWarning::from_walk_error(&err));
                    continue;
                }
            };

            if let Some(path) = self.process_entry(root, &entry, diagnostics) {
                files.push(path);
                found += 1;
                if found % PROGRESS_INTERVAL == 0 {
                    diagnostics.progress(found);
                }
            }
        }

        Ok(files)
    }

    fn resolve_root(&self) -> Result<PathBuf, InventoryError> {
        let metadata =
            std::fs::metadata(&self.root).map_err(|e| InventoryError::io(&self.root, e))?;
        if !metadata.is_dir() {
            return Err(InventoryError::NotADirectory {
                path: self.root.clone(),
            });
        }
        std::path::absolute(&self.root).map_err(|e| InventoryError::io(&self.root, e))
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Returns the inventory line for `entry`, or `None` when it is filtered out.
    fn process_entry(
        &self,
        root: &Path,
        entry: &DirEntry,
        diagnostics: &dyn Diagnostics,
    ) -> Option<String> {
        // Directories (the root included) are traversed, never listed.
        // Symlinks are not followed, so a link to a directory counts as a file.
        match entry.file_type() {
            Some(ft) if !ft.is_dir() => {}
            _ => return None,
        }

        if !self.keep_name(Path::new(entry.file_name())) {
            return None;
        }

        let path = entry.path();
        let qualified = if self.config.relative_paths {
            diff_paths(path, root)?
        } else {
            path.to_path_buf()
        };

        // A lossy conversion could merge distinct names into one line.
        match qualified.to_str() {
            Some(line) => Some(line.to_string()),
            None => {
                diagnostics.warning(&ScanWarning::non_utf8(path));
                None
            }
        }
    }

    /// Hidden, include and exclude checks, in that order, on the base name only.
    fn keep_name(&self, name: &Path) -> bool {
        if !self.config.include_hidden && name.to_string_lossy().starts_with('.') {
            return false;
        }

        if !self.include_set.is_empty() && !self.include_set.is_match(name) {
            return false;
        }

        // Exclude wins even when an include pattern matched.
        !self.exclude_set.is_match(name)
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet, InventoryError> {
    let invalid = |pattern: &str, source| InventoryError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    };

    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = GlobBuilder::new(pat)
            .literal_separator(true)
            .build()
            .map_err(|e| invalid(pat, e))?;
        builder.add(glob);
    }
    builder.build().map_err(|e| invalid(&patterns.join(","), e))
}

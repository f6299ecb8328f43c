use crate::app::cli::CreateArgs;
use crate::app::models::ScanConfig;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PresetConfig {
    include: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
    #[serde(default)]
    hidden: bool,
    #[serde(default)]
    sort: bool,
    #[serde(default)]
    relative: bool,
}

pub fn presets_path(home: Option<PathBuf>) -> Option<PathBuf> {
    home.map(|home| {
        home.join(".config")
            .join("file_inventory")
            .join("presets.toml")
    })
}

pub fn load_presets_file() -> Result<HashMap<String, PresetConfig>> {
    load_presets_in(dirs::home_dir())
}

/// Presets are optional, so no home directory simply means none.
pub fn load_presets_in(home: Option<PathBuf>) -> Result<HashMap<String, PresetConfig>> {
    match presets_path(home) {
        Some(path) => load_presets_from(&path),
        None => {
            log::debug!("No home directory, skipping presets");
            Ok(HashMap::new())
        }
    }
}

/// Missing file means no presets. A file that exists but cannot be parsed is an error.
pub fn load_presets_from(config_path: &Path) -> Result<HashMap<String, PresetConfig>> {
    if !config_path.exists() {
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config at {:?}", config_path))?;

    let parsed: PresetsFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {:?}", config_path))?;

    Ok(parsed.presets)
}

fn merge_vecs(preset_vec: Option<Vec<String>>, cli_vec: Option<Vec<String>>) -> Vec<String> {
    let mut combined = preset_vec.unwrap_or_default();
    if let Some(mut cli_items) = cli_vec {
        combined.append(&mut cli_items);
    }
    // Deduplicate while keeping order
    let mut seen = std::collections::HashSet::new();
    combined.retain(|item| seen.insert(item.clone()));
    combined
}

/// Builds the scan settings: `--preset` name, else the scanned directory's
/// name, else no preset. CLI flags add to whatever the preset set.
pub fn resolve_scan_config(
    args: CreateArgs,
    presets: &HashMap<String, PresetConfig>,
) -> Result<ScanConfig> {
    let preset = match args.preset.as_deref() {
        Some(name) => match presets.get(name) {
            Some(preset) => preset.clone(),
            None => bail!("Unknown preset {:?}", name),
        },
        None => dir_name(&args.dir)
            .and_then(|name| presets.get(&name))
            .cloned()
            .unwrap_or_default(),
    };

    Ok(ScanConfig {
        sort_output: args.sort || preset.sort,
        relative_paths: args.relative || preset.relative,
        include_hidden: args.hidden || preset.hidden,
        exclude_patterns: merge_vecs(preset.exclude, args.exclude),
        include_patterns: merge_vecs(preset.include, args.include),
    })
}

fn dir_name(dir: &Path) -> Option<String> {
    let dir = std::path::absolute(dir).ok()?;
    dir.file_name().map(|n| n.to_string_lossy().into_owned())
}

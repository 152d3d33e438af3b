//! Built-in presets and preset lookup by identifier.

use crate::core::preset::ArdPreset;
use crate::io::preset_reader::PresetReader;
use crate::types::{PresetError, PresetResult};
use std::path::{Path, PathBuf};

/// Environment variable listing extra preset directories (platform path-list syntax)
pub const PRESET_PATH_ENV: &str = "ARD_PRESET_PATH";

/// Presets shipped with the crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinPreset {
    /// GTC gamma0 at 20 m with layover/shadow mask
    OstPlus,
    /// Terrain-flattened (RTC) gamma0 at 20 m
    OstFlat,
    /// Sigma0 in dB at 10 m, matching the Earth Engine S1 collection
    EarthEngine,
}

impl BuiltinPreset {
    pub fn all() -> &'static [BuiltinPreset] {
        &[
            BuiltinPreset::OstPlus,
            BuiltinPreset::OstFlat,
            BuiltinPreset::EarthEngine,
        ]
    }

    pub fn identifier(&self) -> &'static str {
        match self {
            BuiltinPreset::OstPlus => "ost_plus",
            BuiltinPreset::OstFlat => "ost_flat",
            BuiltinPreset::EarthEngine => "earth_engine",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            BuiltinPreset::OstPlus => "grd.ost_plus.json",
            BuiltinPreset::OstFlat => "grd.ost_flat.json",
            BuiltinPreset::EarthEngine => "grd.earth_engine.json",
        }
    }

    /// Raw JSON text of the preset
    pub fn document(&self) -> &'static str {
        match self {
            BuiltinPreset::OstPlus => include_str!("../../presets/grd.ost_plus.json"),
            BuiltinPreset::OstFlat => include_str!("../../presets/grd.ost_flat.json"),
            BuiltinPreset::EarthEngine => include_str!("../../presets/grd.earth_engine.json"),
        }
    }

    /// Match `ost_plus`, `grd.ost_plus` or `grd.ost_plus.json` (case-insensitive)
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        let identifier = identifier.trim();
        let stem = strip_suffix_ignore_case(identifier, ".json");
        let stem = strip_prefix_ignore_case(stem, "grd.");

        Self::all()
            .iter()
            .copied()
            .find(|preset| preset.identifier().eq_ignore_ascii_case(stem))
    }

    pub fn load(&self) -> PresetResult<ArdPreset> {
        log::debug!("Loading built-in preset {}", self.file_name());
        PresetReader::from_str(self.document())
    }
}

fn strip_suffix_ignore_case<'a>(text: &'a str, suffix: &str) -> &'a str {
    let split = text.len().saturating_sub(suffix.len());
    match (text.get(..split), text.get(split..)) {
        (Some(head), Some(tail)) if tail.eq_ignore_ascii_case(suffix) => head,
        _ => text,
    }
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> &'a str {
    match (text.get(..prefix.len()), text.get(prefix.len()..)) {
        (Some(head), Some(tail)) if head.eq_ignore_ascii_case(prefix) => tail,
        _ => text,
    }
}

/// Where a preset identifier resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresetSource {
    Builtin(BuiltinPreset),
    File(PathBuf),
}

/// Preset lookup over the built-ins and a list of search directories
#[derive(Debug, Clone, Default)]
pub struct PresetCatalog {
    search_dirs: Vec<PathBuf>,
}

impl PresetCatalog {
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    /// Catalog that only knows the built-in presets
    pub fn builtin_only() -> Self {
        Self::default()
    }

    /// Search `$ARD_PRESET_PATH` first, then the user preset directory
    pub fn from_env() -> Self {
        let mut search_dirs: Vec<PathBuf> = std::env::var_os(PRESET_PATH_ENV)
            .map(|paths| std::env::split_paths(&paths).collect())
            .unwrap_or_default();
        search_dirs.extend(Self::default_dir());

        log::debug!("Preset search directories: {:?}", search_dirs);
        Self { search_dirs }
    }

    /// Per-user preset directory, e.g. `~/.config/ard-presets` on Linux
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ard-presets"))
    }

    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    /// Resolve an identifier: an existing file path wins, then the built-ins,
    /// then `<id>`, `<id>.json` and `grd.<id>.json` in each search directory.
    pub fn resolve(&self, identifier: &str) -> PresetResult<PresetSource> {
        let as_path = Path::new(identifier);
        if as_path.is_file() {
            return Ok(PresetSource::File(as_path.to_path_buf()));
        }

        if let Some(builtin) = BuiltinPreset::from_identifier(identifier) {
            return Ok(PresetSource::Builtin(builtin));
        }

        let candidates = [
            identifier.to_string(),
            format!("{}.json", identifier),
            format!("grd.{}.json", identifier),
        ];
        for dir in &self.search_dirs {
            for candidate in &candidates {
                let path = dir.join(candidate);
                if path.is_file() {
                    log::debug!("Resolved preset '{}' to {}", identifier, path.display());
                    return Ok(PresetSource::File(path));
                }
            }
        }

        Err(PresetError::UnknownPreset(identifier.to_string()))
    }

    pub fn load(&self, identifier: &str) -> PresetResult<ArdPreset> {
        match self.resolve(identifier)? {
            PresetSource::Builtin(builtin) => {
                log::info!("Loading built-in ARD preset: {}", builtin.identifier());
                builtin.load()
            }
            PresetSource::File(path) => PresetReader::read_file(path),
        }
    }

    /// Built-in identifiers followed by the `.json` files found in the search directories
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = BuiltinPreset::all()
            .iter()
            .map(|preset| preset.identifier().to_string())
            .collect();

        for dir in &self.search_dirs {
            let entries = match std::fs::read_dir(dir) {
                Ok(entries) => entries,
                Err(e) => {
                    log::debug!("Skipping preset directory {}: {}", dir.display(), e);
                    continue;
                }
            };

            let mut found: Vec<String> = entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| path.is_file())
                .filter(|path| path.extension().map_or(false, |ext| ext.eq_ignore_ascii_case("json")))
                .filter_map(|path| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
                .filter(|stem| !names.contains(stem))
                .collect();
            found.sort();
            names.extend(found);
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_identifiers() {
        assert_eq!(BuiltinPreset::from_identifier("ost_plus"), Some(BuiltinPreset::OstPlus));
        assert_eq!(BuiltinPreset::from_identifier("grd.ost_flat"), Some(BuiltinPreset::OstFlat));
        assert_eq!(
            BuiltinPreset::from_identifier("GRD.Earth_Engine.JSON"),
            Some(BuiltinPreset::EarthEngine)
        );
        assert_eq!(BuiltinPreset::from_identifier("slc.ost_plus"), None);
        assert_eq!(BuiltinPreset::from_identifier(""), None);
    }

    #[test]
    fn test_every_builtin_loads() {
        for preset in BuiltinPreset::all() {
            let loaded = preset.load();
            assert!(loaded.is_ok(), "{} failed: {:?}", preset.file_name(), loaded.err());
        }
    }

    #[test]
    fn test_builtin_only_catalog() {
        let catalog = PresetCatalog::builtin_only();
        assert!(catalog.search_dirs().is_empty());
        assert_eq!(catalog.list(), vec!["ost_plus", "ost_flat", "earth_engine"]);
        assert_eq!(
            catalog.resolve("ost_flat").unwrap(),
            PresetSource::Builtin(BuiltinPreset::OstFlat)
        );
        assert!(matches!(
            catalog.resolve("no_such_preset"),
            Err(PresetError::UnknownPreset(_))
        ));
    }

    #[test]
    fn test_suffix_helpers() {
        assert_eq!(strip_suffix_ignore_case("a.JSON", ".json"), "a");
        assert_eq!(strip_suffix_ignore_case("js", ".json"), "js");
        assert_eq!(strip_prefix_ignore_case("GRD.x", "grd."), "x");
        assert_eq!(strip_prefix_ignore_case("gr", "grd."), "gr");
    }
}

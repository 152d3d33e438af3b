use crate::core::preset::ArdPreset;
use crate::io::fields::Section;
use crate::io::registry::PresetCatalog;
use crate::types::{PresetError, PresetResult};
use serde_json::Value;
use std::path::Path;

/// Reader for ARD processing preset documents
pub struct PresetReader;

impl PresetReader {
    /// Load a preset by built-in identifier (e.g. `"ost_plus"`), by name in a
    /// preset search directory, or by file path
    pub fn load(identifier: &str) -> PresetResult<ArdPreset> {
        PresetCatalog::from_env().load(identifier)
    }

    /// Read and validate a preset file
    pub fn read_file<P: AsRef<Path>>(path: P) -> PresetResult<ArdPreset> {
        let path = path.as_ref();
        log::info!("Reading ARD preset from: {}", path.display());

        let text = std::fs::read_to_string(path).map_err(|source| PresetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&text)
    }

    /// Parse and validate a preset from JSON text
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> PresetResult<ArdPreset> {
        let document: Value = serde_json::from_str(text)?;
        Self::from_value(&document)
    }

    /// Validate an already-parsed JSON document
    pub fn from_value(document: &Value) -> PresetResult<ArdPreset> {
        let root = Section::root(document)?;
        let preset = ArdPreset::from_section(&root)?;

        let single = preset.single_ard();
        log::debug!(
            "Preset '{}': {} at {} m, polarisations {}",
            single.processing_type,
            single.product_type,
            single.resolution,
            single.polarisation_arg()
        );
        Ok(preset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_missing_root_key() {
        let err = PresetReader::from_value(&json!({ "processing": {} })).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert_eq!(err.field_path().unwrap().to_string(), "processing parameters");
    }

    #[test]
    fn test_root_must_be_object() {
        let err = PresetReader::from_value(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
    }

    #[test]
    fn test_malformed_json() {
        let err = PresetReader::from_str("{ \"processing parameters\": ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_missing_file() {
        let err = PresetReader::read_file("/nonexistent/preset.json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("/nonexistent/preset.json"));
    }
}

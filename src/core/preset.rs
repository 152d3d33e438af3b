use crate::core::single_ard::SingleArdParams;
use crate::core::time_scan::TimeScanParams;
use crate::core::time_series::TimeSeriesParams;
use crate::io::fields::Section;
use crate::io::preset_reader::PresetReader;
use crate::types::PresetResult;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Root key of every preset document
pub const ROOT_KEY: &str = "processing parameters";

/// The three processing sections of a preset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessingParameters {
    #[serde(rename = "single ARD")]
    pub single_ard: SingleArdParams,
    #[serde(rename = "time-series ARD")]
    pub time_series_ard: TimeSeriesParams,
    #[serde(rename = "time-scan ARD")]
    pub time_scan_ard: TimeScanParams,
}

impl ProcessingParameters {
    pub(crate) const KEYS: &'static [&'static str] =
        &["single ARD", "time-series ARD", "time-scan ARD"];

    pub(crate) fn from_section(section: &Section) -> PresetResult<Self> {
        section.warn_unknown_keys(Self::KEYS);

        Ok(Self {
            single_ard: SingleArdParams::from_section(&section.section("single ARD")?)?,
            time_series_ard: TimeSeriesParams::from_section(&section.section("time-series ARD")?)?,
            time_scan_ard: TimeScanParams::from_section(&section.section("time-scan ARD")?)?,
        })
    }
}

/// A complete, validated ARD processing preset.
///
/// Presets are immutable once loaded: the processing engine reads them, it
/// never writes them back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArdPreset {
    #[serde(rename = "processing parameters")]
    pub processing_parameters: ProcessingParameters,
}

impl ArdPreset {
    pub(crate) fn from_section(root: &Section) -> PresetResult<Self> {
        root.warn_unknown_keys(&[ROOT_KEY]);

        Ok(Self {
            processing_parameters: ProcessingParameters::from_section(&root.section(ROOT_KEY)?)?,
        })
    }

    pub fn single_ard(&self) -> &SingleArdParams {
        &self.processing_parameters.single_ard
    }

    pub fn time_series(&self) -> &TimeSeriesParams {
        &self.processing_parameters.time_series_ard
    }

    pub fn time_scan(&self) -> &TimeScanParams {
        &self.processing_parameters.time_scan_ard
    }

    /// Document form, with the original space-separated key names
    pub fn to_value(&self) -> PresetResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_string(&self) -> PresetResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> PresetResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check a preset built or edited in code against the same rules the loader applies
    pub fn validate(&self) -> PresetResult<()> {
        PresetReader::from_value(&self.to_value()?).map(|_| ())
    }
}

impl<'de> Deserialize<'de> for ArdPreset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let document = Value::deserialize(deserializer)?;
        PresetReader::from_value(&document).map_err(serde::de::Error::custom)
    }
}

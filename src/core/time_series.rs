use crate::core::speckle_filter::SpeckleFilterConfig;
use crate::io::fields::Section;
use crate::types::{OutputDataType, PresetResult};
use serde::Serialize;

/// Multi-date stacking parameters (`"time-series ARD"`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesParams {
    #[serde(rename = "to db")]
    pub to_db: bool,
    /// Apply the multi-temporal speckle filter across the stack
    #[serde(rename = "remove mt speckle")]
    pub remove_mt_speckle: bool,
    #[serde(rename = "mt speckle filter")]
    pub mt_speckle_filter: SpeckleFilterConfig,
    pub deseasonalize: bool,
    #[serde(rename = "dtype output")]
    pub dtype_output: OutputDataType,
    #[serde(rename = "apply ls mask")]
    pub apply_ls_mask: bool,
}

impl TimeSeriesParams {
    pub(crate) const KEYS: &'static [&'static str] = &[
        "to db",
        "remove mt speckle",
        "mt speckle filter",
        "deseasonalize",
        "dtype output",
        "apply ls mask",
    ];

    pub(crate) fn from_section(section: &Section) -> PresetResult<Self> {
        log::debug!("Reading time-series parameters at {}", section.path());
        section.warn_unknown_keys(Self::KEYS);

        Ok(Self {
            to_db: section.bool("to db")?,
            remove_mt_speckle: section.bool("remove mt speckle")?,
            mt_speckle_filter: SpeckleFilterConfig::from_section(
                &section.section("mt speckle filter")?,
            )?,
            deseasonalize: section.bool("deseasonalize")?,
            dtype_output: section.known("dtype output")?,
            apply_ls_mask: section.optional_bool("apply ls mask")?.unwrap_or(false),
        })
    }

    /// Integer output needs the values rescaled from the float backscatter range
    pub fn requires_rescaling(&self) -> bool {
        self.dtype_output != OutputDataType::Float32
    }
}

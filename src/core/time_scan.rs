use crate::io::fields::Section;
use crate::types::{PresetResult, TimeScanMetric};
use serde::Serialize;

/// Temporal aggregation parameters (`"time-scan ARD"`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeScanParams {
    /// Statistics to compute per pixel, in output band order
    pub metrics: Vec<TimeScanMetric>,
    #[serde(rename = "remove outliers")]
    pub remove_outliers: bool,
    #[serde(rename = "apply ls mask")]
    pub apply_ls_mask: bool,
}

impl TimeScanParams {
    pub(crate) const KEYS: &'static [&'static str] = &["metrics", "remove outliers", "apply ls mask"];

    pub(crate) fn from_section(section: &Section) -> PresetResult<Self> {
        log::debug!("Reading time-scan parameters at {}", section.path());
        section.warn_unknown_keys(Self::KEYS);

        Ok(Self {
            metrics: section.known_list("metrics")?,
            remove_outliers: section.bool("remove outliers")?,
            apply_ls_mask: section.optional_bool("apply ls mask")?.unwrap_or(false),
        })
    }

    /// One output band per metric
    pub fn band_count(&self) -> usize {
        self.metrics.len()
    }

    pub fn includes(&self, metric: TimeScanMetric) -> bool {
        self.metrics.contains(&metric)
    }
}

use crate::io::fields::Section;
use crate::types::{known_values, FieldPath, PresetError, PresetResult};
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;

known_values! {
    /// Available speckle filter types
    pub enum SpeckleFilterType {
        /// Boxcar filter (simple averaging)
        Boxcar => "Boxcar",
        /// Median filter (rank filter)
        Median => "Median",
        /// Frost filter (exponential weighting)
        Frost => "Frost",
        /// Gamma MAP filter (Maximum A Posteriori)
        GammaMap => "Gamma Map",
        /// Lee filter (adaptive)
        Lee => "Lee",
        /// Refined Lee filter
        RefinedLee => "Refined Lee",
        /// Lee Sigma filter (edge-preserving)
        LeeSigma => "Lee Sigma",
        /// Intensity-driven adaptive-neighbourhood filter
        Idan => "IDAN",
    }
}

impl SpeckleFilterType {
    /// Filters whose behaviour depends on the ENL / number-of-looks settings
    pub fn is_adaptive(&self) -> bool {
        !matches!(self, SpeckleFilterType::Boxcar | SpeckleFilterType::Median)
    }
}

/// Moving-window dimensions written as `"WxH"`, e.g. `"7x7"`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl WindowSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Square window of the given edge length
    pub fn square(size: u32) -> Self {
        Self::new(size, size)
    }

    /// Parse the human-readable `"WxH"` form
    pub fn parse(path: &FieldPath, text: &str) -> PresetResult<Self> {
        let invalid = || PresetError::InvalidValue {
            path: path.clone(),
            reason: format!("'{}' is not a window size of the form WxH", text),
        };

        let (width, height) = split_dimensions(text).ok_or_else(invalid)?;

        if width == 0 || height == 0 {
            return Err(PresetError::InvalidValue {
                path: path.clone(),
                reason: format!("window size '{}' has a zero dimension", text),
            });
        }
        Ok(Self { width, height })
    }
}

/// Width and height from `"WxH"` text; `None` if either side is not a `u32`
fn split_dimensions(text: &str) -> Option<(u32, u32)> {
    if let Ok(re) = Regex::new(r"^\s*(\d+)\s*[xX]\s*(\d+)\s*$") {
        if let Some(cap) = re.captures(text) {
            return Some((cap[1].parse().ok()?, cap[2].parse().ok()?));
        }
    }
    None
}

impl fmt::Display for WindowSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl Serialize for WindowSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Speckle filtering parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeckleFilterConfig {
    /// Filter algorithm
    pub filter: SpeckleFilterType,
    /// Equivalent number of looks
    #[serde(rename = "ENL")]
    pub enl: f64,
    /// Estimate the ENL from the image instead of using `enl`
    #[serde(rename = "estimate ENL")]
    pub estimate_enl: bool,
    /// Sigma threshold (Lee Sigma filter)
    pub sigma: f64,
    /// Kernel width for Boxcar/Median/Frost/Gamma Map
    #[serde(rename = "filter x size")]
    pub filter_x_size: u32,
    /// Kernel height for Boxcar/Median/Frost/Gamma Map
    #[serde(rename = "filter y size")]
    pub filter_y_size: u32,
    #[serde(rename = "window size")]
    pub window_size: WindowSize,
    /// Edge length of the Lee Sigma target window
    #[serde(rename = "target window size")]
    pub target_window_size: u32,
    #[serde(rename = "num of looks")]
    pub num_looks: u32,
    /// Damping factor (Frost filter)
    #[serde(rename = "damping")]
    pub damping_factor: f64,
    /// Adaptive neighbourhood size (IDAN filter)
    #[serde(rename = "pan size")]
    pub pan_size: u32,
}

impl Default for SpeckleFilterConfig {
    fn default() -> Self {
        Self {
            filter: SpeckleFilterType::RefinedLee,
            enl: 1.0,
            estimate_enl: true,
            sigma: 0.9,
            filter_x_size: 3,
            filter_y_size: 3,
            window_size: WindowSize::square(7), // 7x7 window
            target_window_size: 3,
            num_looks: 1, // Single look
            damping_factor: 2.0,
            pan_size: 50,
        }
    }
}

impl SpeckleFilterConfig {
    pub(crate) const KEYS: &'static [&'static str] = &[
        "filter",
        "ENL",
        "estimate ENL",
        "sigma",
        "filter x size",
        "filter y size",
        "window size",
        "target window size",
        "num of looks",
        "damping",
        "pan size",
    ];

    pub(crate) fn from_section(section: &Section) -> PresetResult<Self> {
        log::debug!("Reading speckle filter parameters at {}", section.path());
        section.warn_unknown_keys(Self::KEYS);

        let window_text = section.string("window size")?;
        let window_size = WindowSize::parse(&section.path_of("window size"), window_text)?;

        Ok(Self {
            filter: section.known("filter")?,
            enl: section.number_at_least("ENL", 1.0, ">= 1")?,
            estimate_enl: section.bool("estimate ENL")?,
            sigma: section.number_in_range("sigma", 0.0, 1.0, "in [0, 1]")?,
            filter_x_size: section.count("filter x size")?,
            filter_y_size: section.count("filter y size")?,
            window_size,
            target_window_size: section.count("target window size")?,
            num_looks: section.count("num of looks")?,
            damping_factor: section.number_at_least("damping", 0.0, ">= 0")?,
            pan_size: section.count("pan size")?,
        })
    }

    /// Operator parameters for the engine's `Speckle-Filter` step
    pub fn gpt_parameters(&self) -> Vec<String> {
        vec![
            format!("-Pfilter='{}'", self.filter),
            format!("-Penl={}", self.enl),
            format!("-PestimateENL={}", self.estimate_enl),
            format!("-PsigmaStr={}", self.sigma),
            format!("-PfilterSizeX={}", self.filter_x_size),
            format!("-PfilterSizeY={}", self.filter_y_size),
            format!("-PwindowSize={}", self.window_size),
            format!(
                "-PtargetWindowSizeStr={}",
                WindowSize::square(self.target_window_size)
            ),
            format!("-PnumLooksStr={}", self.num_looks),
            format!("-PdampingFactor={}", self.damping_factor),
            format!("-PanSize={}", self.pan_size),
        ]
    }
}

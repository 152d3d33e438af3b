//! ARD presets: typed loading and validation of Sentinel-1 Analysis Ready Data
//! processing presets.
//!
//! A preset is a JSON document with a single `"processing parameters"` object
//! holding the `"single ARD"`, `"time-series ARD"` and `"time-scan ARD"`
//! sections consumed by the ARD processing engine. Presets are loaded, checked
//! against the schema in full, and handed over as plain immutable data.

pub mod types;
pub mod io;
pub mod core;

#[cfg(feature = "python")]
mod python;

// Re-export main types and functions for easier access
pub use crate::types::{
    ErrorKind, FieldPath, KnownValue, OutputDataType, Polarization, PresetError, PresetResult,
    ProductType, ResamplingMethod, TimeScanMetric,
};

pub use crate::core::{
    ArdPreset, DemConfig, DemFile, ProcessingParameters, SingleArdParams, SpeckleFilterConfig,
    SpeckleFilterType, TimeScanParams, TimeSeriesParams, WindowSize,
};

pub use crate::io::{BuiltinPreset, PresetCatalog, PresetReader, PresetSource};

/// Load a preset by identifier or path; see [`PresetCatalog::resolve`]
pub fn load_preset(identifier: &str) -> PresetResult<ArdPreset> {
    PresetReader::load(identifier)
}

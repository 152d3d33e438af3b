//! Typed ARD processing parameter model

pub mod dem;
pub mod preset;
pub mod single_ard;
pub mod speckle_filter;
pub mod time_scan;
pub mod time_series;

// Re-export main types
pub use dem::{DemConfig, DemFile};
pub use preset::{ArdPreset, ProcessingParameters, ROOT_KEY};
pub use single_ard::SingleArdParams;
pub use speckle_filter::{SpeckleFilterConfig, SpeckleFilterType, WindowSize};
pub use time_scan::TimeScanParams;
pub use time_series::TimeSeriesParams;

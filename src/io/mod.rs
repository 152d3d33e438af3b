//! I/O modules for reading and resolving preset documents

pub mod fields;
pub mod preset_reader;
pub mod registry;

pub use preset_reader::PresetReader;
pub use registry::{BuiltinPreset, PresetCatalog, PresetSource, PRESET_PATH_ENV};

use std::fmt;
use std::path::PathBuf;

/// A value drawn from a fixed, named set of spellings.
///
/// Preset documents carry enumerations as plain strings. Matching is ASCII
/// case-insensitive after trimming; writing always uses the canonical name.
pub trait KnownValue: Copy + Sized + 'static {
    /// Every recognized value, in canonical order
    const ALL: &'static [Self];

    /// Canonical spelling as written in preset documents
    fn name(&self) -> &'static str;

    /// Look up a value by its spelling
    fn parse_name(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|value| value.name().eq_ignore_ascii_case(text))
    }

    /// Canonical spellings of every recognized value
    fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|value| value.name()).collect()
    }
}

macro_rules! known_values {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::types::KnownValue for $name {
            const ALL: &'static [Self] = &[ $( $name::$variant ),+ ];

            fn name(&self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::types::KnownValue::name(self))
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str($crate::types::KnownValue::name(self))
            }
        }
    };
}

pub(crate) use known_values;

known_values! {
    /// Polarization modes for Sentinel-1
    pub enum Polarization {
        VV => "VV",
        VH => "VH",
        HH => "HH",
        HV => "HV",
    }
}

impl Polarization {
    /// True for the co-polarized channels (VV, HH)
    pub fn is_co_polarized(&self) -> bool {
        matches!(self, Polarization::VV | Polarization::HH)
    }
}

known_values! {
    /// Radiometric product type produced by the single-scene chain
    pub enum ProductType {
        /// Radiometrically terrain corrected gamma0 (beta0 + terrain flattening)
        Rtc => "RTC",
        /// Ellipsoid-based gamma0
        GtcGamma => "GTCgamma",
        /// Ellipsoid-based sigma0
        GtcSigma => "GTCsigma",
    }
}

impl ProductType {
    /// Backscatter coefficient the product is calibrated to
    pub fn calibration_target(&self) -> &'static str {
        match self {
            ProductType::Rtc => "Beta0",
            ProductType::GtcGamma => "Gamma0",
            ProductType::GtcSigma => "Sigma0",
        }
    }

    /// Only RTC products go through terrain flattening after calibration.
    pub fn requires_terrain_flattening(&self) -> bool {
        matches!(self, ProductType::Rtc)
    }
}

known_values! {
    /// Resampling method for DEM lookup and image geocoding
    pub enum ResamplingMethod {
        NearestNeighbour => "NEAREST_NEIGHBOUR",
        BilinearInterpolation => "BILINEAR_INTERPOLATION",
        CubicConvolution => "CUBIC_CONVOLUTION",
        BicubicInterpolation => "BICUBIC_INTERPOLATION",
        Bisinc5PointInterpolation => "BISINC_5_POINT_INTERPOLATION",
        Bisinc11PointInterpolation => "BISINC_11_POINT_INTERPOLATION",
        Bisinc21PointInterpolation => "BISINC_21_POINT_INTERPOLATION",
        DelaunayInterpolation => "DELAUNAY_INTERPOLATION",
    }
}

known_values! {
    /// Numeric precision of time-series output rasters
    pub enum OutputDataType {
        Float32 => "float32",
        UInt16 => "uint16",
        UInt8 => "uint8",
    }
}

impl OutputDataType {
    pub fn bits(&self) -> u32 {
        match self {
            OutputDataType::Float32 => 32,
            OutputDataType::UInt16 => 16,
            OutputDataType::UInt8 => 8,
        }
    }
}

known_values! {
    /// Per-pixel statistic computed across a time stack
    pub enum TimeScanMetric {
        Average => "avg",
        Maximum => "max",
        Minimum => "min",
        StandardDeviation => "std",
        CoefficientOfVariation => "cov",
        Median => "median",
        Percentile5 => "p5",
        Percentile95 => "p95",
        Skewness => "skew",
        Kurtosis => "kurt",
    }
}

/// Location of a field inside a preset document
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of a child key below this one
    pub fn join(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(key.to_string());
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Last key of the path, if any
    pub fn leaf(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "<document root>");
        }
        write!(f, "{}", self.0.join(" / "))
    }
}

/// Broad class of a preset failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The file could not be read
    Io,
    /// The document is not valid JSON
    Syntax,
    /// A required section or key is missing
    Structural,
    /// A value has the wrong primitive type
    Type,
    /// A value is outside its enumeration or numeric range
    Domain,
    /// A preset identifier could not be resolved
    Lookup,
}

/// Error types for preset loading and validation
#[derive(Debug, thiserror::Error)]
pub enum PresetError {
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing required field: {0}")]
    MissingField(FieldPath),

    #[error("Type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: FieldPath,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Value out of range at {path}: {value} (must be {constraint})")]
    OutOfRange {
        path: FieldPath,
        value: f64,
        constraint: &'static str,
    },

    #[error("Unrecognized value at {path}: '{value}' (expected one of: {})", .allowed.join(", "))]
    UnknownValue {
        path: FieldPath,
        value: String,
        allowed: Vec<&'static str>,
    },

    #[error("Invalid value at {path}: {reason}")]
    InvalidValue { path: FieldPath, reason: String },

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),
}

impl PresetError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PresetError::Io { .. } => ErrorKind::Io,
            PresetError::Json(_) => ErrorKind::Syntax,
            PresetError::MissingField(_) => ErrorKind::Structural,
            PresetError::TypeMismatch { .. } => ErrorKind::Type,
            PresetError::OutOfRange { .. }
            | PresetError::UnknownValue { .. }
            | PresetError::InvalidValue { .. } => ErrorKind::Domain,
            PresetError::UnknownPreset(_) => ErrorKind::Lookup,
        }
    }

    /// Field the error refers to, for validation failures
    pub fn field_path(&self) -> Option<&FieldPath> {
        match self {
            PresetError::MissingField(path)
            | PresetError::TypeMismatch { path, .. }
            | PresetError::OutOfRange { path, .. }
            | PresetError::UnknownValue { path, .. }
            | PresetError::InvalidValue { path, .. } => Some(path),
            PresetError::Io { .. } | PresetError::Json(_) | PresetError::UnknownPreset(_) => None,
        }
    }
}

/// Result type for preset operations
pub type PresetResult<T> = Result<T, PresetError>;

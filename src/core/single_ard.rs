//! Parameters for turning one scene (or burst) into a georeferenced backscatter product.

use crate::core::dem::DemConfig;
use crate::core::speckle_filter::SpeckleFilterConfig;
use crate::io::fields::{ensure_distinct, json_type_name, parse_known, Section};
use crate::types::{KnownValue, Polarization, PresetError, PresetResult, ProductType};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Single-scene ARD parameters (`"single ARD"`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingleArdParams {
    /// Free-form processing type tag, e.g. "OST Plus"
    #[serde(rename = "type")]
    pub processing_type: String,
    /// Output pixel spacing in meters
    pub resolution: f64,
    #[serde(rename = "remove border noise")]
    pub remove_border_noise: bool,
    #[serde(rename = "product type")]
    pub product_type: ProductType,
    #[serde(rename = "polarisation", serialize_with = "serialize_polarisations")]
    pub polarisations: Vec<Polarization>,
    #[serde(rename = "to db")]
    pub to_db: bool,
    #[serde(rename = "remove speckle")]
    pub remove_speckle: bool,
    #[serde(rename = "speckle filter")]
    pub speckle_filter: SpeckleFilterConfig,
    /// Create a layover/shadow mask alongside the backscatter
    #[serde(rename = "create ls mask")]
    pub create_ls_mask: bool,
    #[serde(rename = "apply ls mask")]
    pub apply_ls_mask: bool,
    pub dem: DemConfig,
    pub coherence: bool,
    #[serde(
        rename = "coherence bands",
        serialize_with = "serialize_optional_polarisations",
        skip_serializing_if = "Option::is_none"
    )]
    pub coherence_bands: Option<Vec<Polarization>>,
    /// H-A-Alpha dual-pol decomposition
    #[serde(rename = "H-A-Alpha")]
    pub h_a_alpha: bool,
    #[serde(rename = "remove pol speckle")]
    pub remove_pol_speckle: bool,
}

impl SingleArdParams {
    pub(crate) const KEYS: &'static [&'static str] = &[
        "type",
        "resolution",
        "remove border noise",
        "product type",
        "polarisation",
        "to db",
        "remove speckle",
        "speckle filter",
        "create ls mask",
        "apply ls mask",
        "dem",
        "coherence",
        "coherence bands",
        "H-A-Alpha",
        "remove pol speckle",
    ];

    pub(crate) fn from_section(section: &Section) -> PresetResult<Self> {
        log::debug!("Reading single ARD parameters at {}", section.path());
        section.warn_unknown_keys(Self::KEYS);

        let coherence_bands = match section.optional_value("coherence bands") {
            Some(_) => Some(polarisations(section, "coherence bands")?),
            None => None,
        };

        Ok(Self {
            processing_type: section.string("type")?.to_string(),
            resolution: section.positive_number("resolution")?,
            remove_border_noise: section.optional_bool("remove border noise")?.unwrap_or(true),
            product_type: section.known("product type")?,
            polarisations: polarisations(section, "polarisation")?,
            to_db: section.bool("to db")?,
            remove_speckle: section.bool("remove speckle")?,
            speckle_filter: SpeckleFilterConfig::from_section(&section.section("speckle filter")?)?,
            create_ls_mask: section.bool("create ls mask")?,
            apply_ls_mask: section.bool("apply ls mask")?,
            dem: DemConfig::from_section(&section.section("dem")?)?,
            coherence: section.optional_bool("coherence")?.unwrap_or(false),
            coherence_bands,
            h_a_alpha: section.optional_bool("H-A-Alpha")?.unwrap_or(false),
            remove_pol_speckle: section.optional_bool("remove pol speckle")?.unwrap_or(false),
        })
    }

    /// Channel list in the comma-separated form the import step takes, e.g. `"VV,VH"`
    pub fn polarisation_arg(&self) -> String {
        join_polarisations(&self.polarisations, ",")
    }

    /// Channels for coherence estimation; defaults to the backscatter channels
    pub fn coherence_bands_arg(&self) -> String {
        let bands = self.coherence_bands.as_deref().unwrap_or(&self.polarisations);
        join_polarisations(bands, ",")
    }

    pub fn is_dual_pol(&self) -> bool {
        self.polarisations.len() == 2
    }
}

/// Parse a channel list written either as `"VV, VH"` or `["VV", "VH"]`
fn polarisations(section: &Section, key: &str) -> PresetResult<Vec<Polarization>> {
    let path = section.path_of(key);
    let parsed = match section.value(key)? {
        Value::String(text) => text
            .split(',')
            .map(|channel| parse_known::<Polarization>(path.clone(), channel))
            .collect::<PresetResult<Vec<_>>>()?,
        Value::Array(_) => return section.known_list(key),
        other => {
            return Err(PresetError::TypeMismatch {
                path,
                expected: "comma-separated string",
                found: json_type_name(other),
            })
        }
    };
    ensure_distinct(&path, &parsed)?;
    Ok(parsed)
}

fn join_polarisations(channels: &[Polarization], separator: &str) -> String {
    channels
        .iter()
        .map(|channel| channel.name())
        .collect::<Vec<_>>()
        .join(separator)
}

fn serialize_polarisations<S: Serializer>(
    channels: &[Polarization],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&join_polarisations(channels, ", "))
}

fn serialize_optional_polarisations<S: Serializer>(
    channels: &Option<Vec<Polarization>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match channels {
        Some(channels) => serialize_polarisations(channels, serializer),
        None => serializer.serialize_none(),
    }
}

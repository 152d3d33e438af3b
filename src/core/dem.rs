use crate::io::fields::Section;
use crate::types::{PresetResult, ResamplingMethod};
use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

/// External DEM override as written in the preset.
///
/// Presets in the wild use both `null` and `""` for "use the named DEM
/// source"; the encoding is kept so documents are written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DemFile {
    /// `"dem file": null`
    #[default]
    Null,
    /// `"dem file": ""`
    Empty,
    /// Path to a local DEM raster
    Path(PathBuf),
}

impl DemFile {
    fn from_setting(setting: Option<&str>) -> Self {
        match setting {
            None => DemFile::Null,
            Some(text) if text.trim().is_empty() => DemFile::Empty,
            Some(text) => DemFile::Path(PathBuf::from(text)),
        }
    }

    /// Local DEM to use instead of the named source, if any
    pub fn override_path(&self) -> Option<&Path> {
        match self {
            DemFile::Path(path) => Some(path.as_path()),
            DemFile::Null | DemFile::Empty => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, DemFile::Null)
    }
}

impl Serialize for DemFile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DemFile::Null => serializer.serialize_none(),
            DemFile::Empty => serializer.serialize_str(""),
            DemFile::Path(path) => serializer.collect_str(&path.display()),
        }
    }
}

/// Digital elevation model settings for terrain flattening and geocoding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemConfig {
    /// Named DEM source, e.g. "SRTM 1Sec HGT"
    #[serde(rename = "dem name")]
    pub dem_name: String,
    #[serde(rename = "dem file")]
    pub dem_file: DemFile,
    #[serde(rename = "dem nodata")]
    pub dem_nodata: f64,
    #[serde(rename = "dem resampling")]
    pub dem_resampling: ResamplingMethod,
    /// Resampling of the image onto the DEM grid
    #[serde(rename = "image resampling")]
    pub image_resampling: ResamplingMethod,
}

impl Default for DemConfig {
    fn default() -> Self {
        Self {
            dem_name: "SRTM 1Sec HGT".to_string(),
            dem_file: DemFile::Empty,
            dem_nodata: 0.0,
            dem_resampling: ResamplingMethod::BilinearInterpolation,
            image_resampling: ResamplingMethod::BicubicInterpolation,
        }
    }
}

impl DemConfig {
    pub(crate) const KEYS: &'static [&'static str] = &[
        "dem name",
        "dem file",
        "dem nodata",
        "dem resampling",
        "image resampling",
    ];

    pub(crate) fn from_section(section: &Section) -> PresetResult<Self> {
        log::debug!("Reading DEM parameters at {}", section.path());
        section.warn_unknown_keys(Self::KEYS);

        let dem_file = if section.contains("dem file") {
            DemFile::from_setting(section.nullable_string("dem file")?)
        } else {
            DemFile::Null
        };

        Ok(Self {
            dem_name: section.string("dem name")?.to_string(),
            dem_file,
            dem_nodata: section.number("dem nodata")?,
            dem_resampling: section.known("dem resampling")?,
            image_resampling: section.known("image resampling")?,
        })
    }

    /// Operator parameters for the engine's terrain-correction step
    pub fn gpt_parameters(&self) -> Vec<String> {
        let external = self
            .dem_file
            .override_path()
            .map(|path| path.display().to_string())
            .unwrap_or_default();

        vec![
            format!("-PdemName='{}'", self.dem_name),
            format!("-PexternalDEMFile='{}'", external),
            format!("-PexternalDEMNoDataValue='{}'", self.dem_nodata),
            format!("-PdemResamplingMethod='{}'", self.dem_resampling),
            format!("-PimgResamplingMethod='{}'", self.image_resampling),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_null_and_empty_dem_file_mean_no_override() {
        let null_doc = json!({
            "dem name": "SRTM 1Sec HGT",
            "dem file": null,
            "dem nodata": 0,
            "dem resampling": "BILINEAR_INTERPOLATION",
            "image resampling": "BICUBIC_INTERPOLATION"
        });
        let mut empty_doc = null_doc.clone();
        empty_doc["dem file"] = json!("");

        let from_null = DemConfig::from_section(&Section::root(&null_doc).unwrap()).unwrap();
        let from_empty = DemConfig::from_section(&Section::root(&empty_doc).unwrap()).unwrap();

        assert_eq!(from_null.dem_file, DemFile::Null);
        assert_eq!(from_empty.dem_file, DemFile::Empty);
        assert_eq!(from_null.dem_file.override_path(), None);
        assert_eq!(from_empty.dem_file.override_path(), None);
        assert_eq!(from_empty, DemConfig::default());
    }

    #[test]
    fn test_external_dem_path() {
        let doc = json!({
            "dem name": "External DEM",
            "dem file": "/data/dem/copernicus_30m.tif",
            "dem nodata": -32768,
            "dem resampling": "BICUBIC_INTERPOLATION",
            "image resampling": "BILINEAR_INTERPOLATION"
        });
        let dem = DemConfig::from_section(&Section::root(&doc).unwrap()).unwrap();

        assert_eq!(
            dem.dem_file.override_path(),
            Some(Path::new("/data/dem/copernicus_30m.tif"))
        );
        assert_eq!(dem.dem_nodata, -32768.0);

        let params = dem.gpt_parameters();
        assert_eq!(params[1], "-PexternalDEMFile='/data/dem/copernicus_30m.tif'");
        assert_eq!(params[2], "-PexternalDEMNoDataValue='-32768'");
    }

    #[test]
    fn test_unknown_resampling_method() {
        let doc = json!({
            "dem name": "SRTM 1Sec HGT",
            "dem file": "",
            "dem nodata": 0,
            "dem resampling": "NEAREST_XYZ",
            "image resampling": "BICUBIC_INTERPOLATION"
        });
        let err = DemConfig::from_section(&Section::root(&doc).unwrap()).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Domain);
        assert_eq!(err.field_path().unwrap().leaf(), Some("dem resampling"));
    }

    #[test]
    fn test_default_gpt_parameters() {
        let params = DemConfig::default().gpt_parameters();
        assert_eq!(
            params,
            vec![
                "-PdemName='SRTM 1Sec HGT'".to_string(),
                "-PexternalDEMFile=''".to_string(),
                "-PexternalDEMNoDataValue='0'".to_string(),
                "-PdemResamplingMethod='BILINEAR_INTERPOLATION'".to_string(),
                "-PimgResamplingMethod='BICUBIC_INTERPOLATION'".to_string(),
            ]
        );
    }
}

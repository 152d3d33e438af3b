//! Python bindings, enabled with the `python` feature

use crate::io::{PresetCatalog, PresetReader};
use crate::types::{KnownValue, PresetError};
use crate::ArdPreset;
use pyo3::exceptions::{PyKeyError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

fn to_py_err(err: PresetError) -> PyErr {
    match err {
        PresetError::UnknownPreset(_) => PyKeyError::new_err(err.to_string()),
        PresetError::Io { .. } => PyRuntimeError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

/// Python module definition
#[pymodule]
fn _core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<PyPreset>()?;
    m.add_function(wrap_pyfunction!(load_preset, m)?)?;
    m.add_function(wrap_pyfunction!(list_presets, m)?)?;
    Ok(())
}

/// Load a preset by built-in identifier, search-directory name or file path
#[pyfunction]
fn load_preset(identifier: String) -> PyResult<PyPreset> {
    let inner = PresetReader::load(&identifier).map_err(to_py_err)?;
    Ok(PyPreset { inner })
}

#[pyfunction]
fn list_presets() -> Vec<String> {
    PresetCatalog::from_env().list()
}

/// Python wrapper for ArdPreset
#[pyclass(name = "Preset")]
struct PyPreset {
    inner: ArdPreset,
}

#[pymethods]
impl PyPreset {
    #[staticmethod]
    fn from_json(text: String) -> PyResult<Self> {
        let inner = PresetReader::from_str(&text).map_err(to_py_err)?;
        Ok(PyPreset { inner })
    }

    #[getter]
    fn processing_type(&self) -> String {
        self.inner.single_ard().processing_type.clone()
    }

    #[getter]
    fn product_type(&self) -> String {
        self.inner.single_ard().product_type.name().to_string()
    }

    #[getter]
    fn resolution(&self) -> f64 {
        self.inner.single_ard().resolution
    }

    #[getter]
    fn polarisations(&self) -> Vec<String> {
        self.inner
            .single_ard()
            .polarisations
            .iter()
            .map(|p| format!("{}", p))
            .collect()
    }

    #[getter]
    fn to_db(&self) -> bool {
        self.inner.single_ard().to_db
    }

    #[getter]
    fn dem_file(&self) -> Option<String> {
        self.inner
            .single_ard()
            .dem
            .dem_file
            .override_path()
            .map(|path| path.display().to_string())
    }

    #[getter]
    fn metrics(&self) -> Vec<String> {
        self.inner
            .time_scan()
            .metrics
            .iter()
            .map(|metric| metric.name().to_string())
            .collect()
    }

    fn to_json(&self) -> PyResult<String> {
        self.inner.to_json_pretty().map_err(to_py_err)
    }

    fn __repr__(&self) -> String {
        let single = self.inner.single_ard();
        format!(
            "Preset(type='{}', product_type='{}', resolution={}, polarisations='{}')",
            single.processing_type,
            single.product_type,
            single.resolution,
            single.polarisation_arg()
        )
    }
}

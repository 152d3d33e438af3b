//! Path-tracking access to the JSON object tree of a preset document.
//!
//! Every accessor reports failures against the full field path, so a broken
//! preset can be fixed without guessing which nested `"dem"` or
//! `"speckle filter"` object the loader was looking at.

use crate::types::{FieldPath, KnownValue, PresetError, PresetResult};
use serde_json::{Map, Value};

/// Short name of a JSON value's type, for type-mismatch messages
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A JSON object together with its location in the document
#[derive(Debug, Clone)]
pub struct Section<'a> {
    path: FieldPath,
    fields: &'a Map<String, Value>,
}

impl<'a> Section<'a> {
    /// Treat the whole document as the root section
    pub fn root(document: &'a Value) -> PresetResult<Self> {
        Self::from_value(FieldPath::root(), document)
    }

    fn from_value(path: FieldPath, value: &'a Value) -> PresetResult<Self> {
        match value {
            Value::Object(fields) => Ok(Self { path, fields }),
            other => Err(PresetError::TypeMismatch {
                path,
                expected: "object",
                found: json_type_name(other),
            }),
        }
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Path of a key inside this section
    pub fn path_of(&self, key: &str) -> FieldPath {
        self.path.join(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Raw value of a required key
    pub fn value(&self, key: &str) -> PresetResult<&'a Value> {
        self.fields
            .get(key)
            .ok_or_else(|| PresetError::MissingField(self.path_of(key)))
    }

    /// Raw value of an optional key; an explicit `null` counts as absent
    pub fn optional_value(&self, key: &str) -> Option<&'a Value> {
        match self.fields.get(key) {
            Some(Value::Null) | None => None,
            Some(value) => Some(value),
        }
    }

    /// Required nested object
    pub fn section(&self, key: &str) -> PresetResult<Section<'a>> {
        let value = self.value(key)?;
        Self::from_value(self.path_of(key), value)
    }

    /// Boolean field that also accepts the strings `"true"` and `"false"`
    pub fn bool(&self, key: &str) -> PresetResult<bool> {
        let value = self.value(key)?;
        Self::tolerant_bool(self.path_of(key), value)
    }

    /// Boolean field that may be left out; an explicit `null` is a type error
    pub fn optional_bool(&self, key: &str) -> PresetResult<Option<bool>> {
        self.fields
            .get(key)
            .map(|value| Self::tolerant_bool(self.path_of(key), value))
            .transpose()
    }

    fn tolerant_bool(path: FieldPath, value: &Value) -> PresetResult<bool> {
        match value {
            Value::Bool(flag) => Ok(*flag),
            Value::String(text) if text.trim().eq_ignore_ascii_case("true") => Ok(true),
            Value::String(text) if text.trim().eq_ignore_ascii_case("false") => Ok(false),
            Value::String(text) => Err(PresetError::InvalidValue {
                path,
                reason: format!("'{}' is not a boolean (expected true or false)", text),
            }),
            other => Err(PresetError::TypeMismatch {
                path,
                expected: "boolean",
                found: json_type_name(other),
            }),
        }
    }

    pub fn string(&self, key: &str) -> PresetResult<&'a str> {
        match self.value(key)? {
            Value::String(text) => Ok(text.as_str()),
            other => Err(PresetError::TypeMismatch {
                path: self.path_of(key),
                expected: "string",
                found: json_type_name(other),
            }),
        }
    }

    /// String field that may also be `null`; `Ok(None)` for null
    pub fn nullable_string(&self, key: &str) -> PresetResult<Option<&'a str>> {
        match self.value(key)? {
            Value::Null => Ok(None),
            Value::String(text) => Ok(Some(text.as_str())),
            other => Err(PresetError::TypeMismatch {
                path: self.path_of(key),
                expected: "string or null",
                found: json_type_name(other),
            }),
        }
    }

    pub fn number(&self, key: &str) -> PresetResult<f64> {
        let value = self.value(key)?;
        value.as_f64().ok_or_else(|| PresetError::TypeMismatch {
            path: self.path_of(key),
            expected: "number",
            found: json_type_name(value),
        })
    }

    /// Number constrained to `value >= min`
    pub fn number_at_least(&self, key: &str, min: f64, constraint: &'static str) -> PresetResult<f64> {
        let value = self.number(key)?;
        if value < min || !value.is_finite() {
            return Err(self.out_of_range(key, value, constraint));
        }
        Ok(value)
    }

    /// Number constrained to `value > 0`
    pub fn positive_number(&self, key: &str) -> PresetResult<f64> {
        let value = self.number(key)?;
        if value <= 0.0 || !value.is_finite() {
            return Err(self.out_of_range(key, value, "> 0"));
        }
        Ok(value)
    }

    /// Number constrained to the closed interval `[min, max]`
    pub fn number_in_range(
        &self,
        key: &str,
        min: f64,
        max: f64,
        constraint: &'static str,
    ) -> PresetResult<f64> {
        let value = self.number(key)?;
        if !(min..=max).contains(&value) {
            return Err(self.out_of_range(key, value, constraint));
        }
        Ok(value)
    }

    /// Whole number `>= 1`; integral floats such as `3.0` are accepted
    pub fn count(&self, key: &str) -> PresetResult<u32> {
        let value = self.number(key)?;
        if value.fract() != 0.0 {
            return Err(PresetError::InvalidValue {
                path: self.path_of(key),
                reason: format!("{} is not a whole number", value),
            });
        }
        if value < 1.0 || value > u32::MAX as f64 {
            return Err(self.out_of_range(key, value, ">= 1"));
        }
        Ok(value as u32)
    }

    /// String field restricted to a known set of spellings
    pub fn known<T: KnownValue>(&self, key: &str) -> PresetResult<T> {
        let text = self.string(key)?;
        parse_known(self.path_of(key), text)
    }

    /// Array of known values; must be non-empty and free of duplicates
    pub fn known_list<T: KnownValue + PartialEq>(&self, key: &str) -> PresetResult<Vec<T>> {
        let path = self.path_of(key);
        let items = match self.value(key)? {
            Value::Array(items) => items,
            other => {
                return Err(PresetError::TypeMismatch {
                    path,
                    expected: "array",
                    found: json_type_name(other),
                })
            }
        };

        let mut parsed = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let item_path = path.join(&index.to_string());
            let text = item.as_str().ok_or_else(|| PresetError::TypeMismatch {
                path: item_path.clone(),
                expected: "string",
                found: json_type_name(item),
            })?;
            parsed.push(parse_known(item_path, text)?);
        }
        ensure_distinct(&path, &parsed)?;
        Ok(parsed)
    }

    /// Keys present in the document that the loader does not know about
    pub fn unknown_keys(&self, known: &[&str]) -> Vec<&'a str> {
        self.fields
            .keys()
            .map(String::as_str)
            .filter(|key| !known.contains(key))
            .collect()
    }

    /// Log keys that will not survive loading
    pub fn warn_unknown_keys(&self, known: &[&str]) {
        for key in self.unknown_keys(known) {
            log::warn!("Ignoring unknown preset field: {}", self.path_of(key));
        }
    }

    fn out_of_range(&self, key: &str, value: f64, constraint: &'static str) -> PresetError {
        PresetError::OutOfRange {
            path: self.path_of(key),
            value,
            constraint,
        }
    }
}

/// Match one spelling against a known value set
pub(crate) fn parse_known<T: KnownValue>(path: FieldPath, text: &str) -> PresetResult<T> {
    T::parse_name(text).ok_or_else(|| PresetError::UnknownValue {
        path,
        value: text.to_string(),
        allowed: T::names(),
    })
}

/// Reject empty lists and repeated entries
pub(crate) fn ensure_distinct<T: KnownValue + PartialEq>(path: &FieldPath, values: &[T]) -> PresetResult<()> {
    if values.is_empty() {
        return Err(PresetError::InvalidValue {
            path: path.clone(),
            reason: "list must not be empty".to_string(),
        });
    }
    for (index, value) in values.iter().enumerate() {
        if values[..index].contains(value) {
            return Err(PresetError::InvalidValue {
                path: path.clone(),
                reason: format!("'{}' is listed more than once", value.name()),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ErrorKind, ResamplingMethod, TimeScanMetric};
    use serde_json::json;

    #[test]
    fn test_tolerant_bool() {
        let doc = json!({ "a": true, "b": "true", "c": "False", "d": "maybe", "e": 1 });
        let section = Section::root(&doc).unwrap();

        assert!(section.bool("a").unwrap());
        assert!(section.bool("b").unwrap());
        assert!(!section.bool("c").unwrap());
        assert_eq!(section.bool("d").unwrap_err().kind(), ErrorKind::Domain);
        assert_eq!(section.bool("e").unwrap_err().kind(), ErrorKind::Type);
        assert_eq!(section.bool("missing").unwrap_err().kind(), ErrorKind::Structural);
        assert_eq!(section.optional_bool("missing").unwrap(), None);
        assert_eq!(section.optional_bool("b").unwrap(), Some(true));
    }

    #[test]
    fn test_null_bool_is_a_type_error() {
        let doc = json!({ "required": null, "optional": null });
        let section = Section::root(&doc).unwrap();

        let err = section.bool("required").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);

        let err = section.optional_bool("optional").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert_eq!(err.field_path().unwrap().leaf(), Some("optional"));
        assert!(err.to_string().contains("found null"));
    }

    #[test]
    fn test_nested_path_reporting() {
        let doc = json!({ "outer": { "inner": { "value": "ten" } } });
        let root = Section::root(&doc).unwrap();
        let inner = root.section("outer").unwrap().section("inner").unwrap();

        let err = inner.number("value").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert_eq!(err.field_path().unwrap().to_string(), "outer / inner / value");
    }

    #[test]
    fn test_numeric_constraints() {
        let doc = json!({ "zero": 0, "half": 0.5, "three": 3, "frac": 2.5, "neg": -1 });
        let section = Section::root(&doc).unwrap();

        assert_eq!(section.positive_number("zero").unwrap_err().kind(), ErrorKind::Domain);
        assert_eq!(section.number_in_range("half", 0.0, 1.0, "in [0, 1]").unwrap(), 0.5);
        assert!(section.number_in_range("three", 0.0, 1.0, "in [0, 1]").is_err());
        assert_eq!(section.count("three").unwrap(), 3);
        assert_eq!(section.count("frac").unwrap_err().kind(), ErrorKind::Domain);
        assert_eq!(section.count("neg").unwrap_err().kind(), ErrorKind::Domain);
        assert!(section.number_at_least("neg", 0.0, ">= 0").is_err());
    }

    #[test]
    fn test_known_values() {
        let doc = json!({
            "method": "bilinear_interpolation",
            "bad": "NEAREST_XYZ",
            "metrics": ["avg", "max"],
            "dupes": ["avg", "avg"],
            "empty": []
        });
        let section = Section::root(&doc).unwrap();

        let method: ResamplingMethod = section.known("method").unwrap();
        assert_eq!(method, ResamplingMethod::BilinearInterpolation);

        let err = section.known::<ResamplingMethod>("bad").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Domain);
        assert!(err.to_string().contains("NEAREST_XYZ"));

        let metrics: Vec<TimeScanMetric> = section.known_list("metrics").unwrap();
        assert_eq!(metrics, vec![TimeScanMetric::Average, TimeScanMetric::Maximum]);
        assert!(section.known_list::<TimeScanMetric>("dupes").is_err());
        assert!(section.known_list::<TimeScanMetric>("empty").is_err());
    }

    #[test]
    fn test_nullable_string_and_unknown_keys() {
        let doc = json!({ "file": null, "name": "", "extra": 1 });
        let section = Section::root(&doc).unwrap();

        assert_eq!(section.nullable_string("file").unwrap(), None);
        assert_eq!(section.nullable_string("name").unwrap(), Some(""));
        assert_eq!(section.unknown_keys(&["file", "name"]), vec!["extra"]);
    }
}

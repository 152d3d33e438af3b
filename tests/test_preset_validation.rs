use ard_presets::io::BuiltinPreset;
use ard_presets::types::{ErrorKind, PresetError};
use ard_presets::PresetReader;
use serde_json::{json, Value};

fn ost_plus() -> Value {
    serde_json::from_str(BuiltinPreset::OstPlus.document()).expect("built-in preset is valid JSON")
}

fn single_ard(doc: &mut Value) -> &mut Value {
    &mut doc["processing parameters"]["single ARD"]
}

#[test]
fn test_unknown_resampling_method_is_domain_error() {
    let mut doc = ost_plus();
    single_ard(&mut doc)["dem"]["dem resampling"] = json!("NEAREST_XYZ");

    let err = PresetReader::from_value(&doc).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Domain);
    assert_eq!(
        err.field_path().unwrap().to_string(),
        "processing parameters / single ARD / dem / dem resampling"
    );
    match err {
        PresetError::UnknownValue { value, allowed, .. } => {
            assert_eq!(value, "NEAREST_XYZ");
            assert!(allowed.contains(&"BILINEAR_INTERPOLATION"));
        }
        other => panic!("Expected UnknownValue, got {:?}", other),
    }
}

#[test]
fn test_missing_time_scan_section_is_structural_error() {
    let mut doc = ost_plus();
    doc["processing parameters"]
        .as_object_mut()
        .unwrap()
        .remove("time-scan ARD");

    let err = PresetReader::from_value(&doc).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Structural);
    assert_eq!(
        err.field_path().unwrap().to_string(),
        "processing parameters / time-scan ARD"
    );
}

#[test]
fn test_every_required_section_is_checked() {
    for section in ["single ARD", "time-series ARD", "time-scan ARD"] {
        let mut doc = ost_plus();
        doc["processing parameters"].as_object_mut().unwrap().remove(section);

        let err = PresetReader::from_value(&doc).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural, "section {}", section);
        assert_eq!(err.field_path().unwrap().leaf(), Some(section));
    }
}

#[test]
fn test_type_mismatch() {
    let mut doc = ost_plus();
    single_ard(&mut doc)["resolution"] = json!("20");

    let err = PresetReader::from_value(&doc).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
    assert!(err.to_string().contains("expected number, found string"));
}

#[test]
fn test_null_toggles_are_type_errors() {
    for key in ["to db", "coherence", "remove border noise"] {
        let mut doc = ost_plus();
        single_ard(&mut doc)[key] = Value::Null;

        let err = PresetReader::from_value(&doc).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type, "key {}", key);
        assert_eq!(err.field_path().unwrap().leaf(), Some(key));
    }
}

#[test]
fn test_numeric_ranges() {
    let cases = [
        ("resolution", json!(-10)),
        ("speckle filter/sigma", json!(1.2)),
        ("speckle filter/ENL", json!(0)),
        ("speckle filter/num of looks", json!(0)),
    ];

    for (field, bad) in cases {
        let mut doc = ost_plus();
        let pointer = format!("/processing parameters/single ARD/{}", field);
        *doc.pointer_mut(&pointer).expect("field exists") = bad;

        let err = PresetReader::from_value(&doc).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Domain, "field {}", field);
        assert_eq!(err.field_path().unwrap().leaf(), field.rsplit('/').next());
    }
}

#[test]
fn test_unknown_enumerations() {
    let mut doc = ost_plus();
    single_ard(&mut doc)["product type"] = json!("GTCbeta");
    let err = PresetReader::from_value(&doc).unwrap_err();
    assert_eq!(err.field_path().unwrap().leaf(), Some("product type"));

    let mut doc = ost_plus();
    single_ard(&mut doc)["speckle filter"]["filter"] = json!("Enhanced Lee");
    let err = PresetReader::from_value(&doc).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Domain);
    assert_eq!(err.field_path().unwrap().leaf(), Some("filter"));

    let mut doc = ost_plus();
    single_ard(&mut doc)["polarisation"] = json!("VV, XY");
    let err = PresetReader::from_value(&doc).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Domain);
    assert!(err.to_string().contains("XY"));
}

#[test]
fn test_empty_metric_list() {
    let mut doc = ost_plus();
    doc["processing parameters"]["time-scan ARD"]["metrics"] = json!([]);

    let err = PresetReader::from_value(&doc).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Domain);
    assert_eq!(
        err.field_path().unwrap().to_string(),
        "processing parameters / time-scan ARD / metrics"
    );
}

#[test]
fn test_unknown_keys_are_ignored() {
    let mut doc = ost_plus();
    single_ard(&mut doc)["subset"] = json!("POLYGON((0 0, 1 0, 1 1, 0 0))");

    let preset = PresetReader::from_value(&doc).expect("unknown keys should be tolerated");
    assert_eq!(preset, BuiltinPreset::OstPlus.load().unwrap());
}

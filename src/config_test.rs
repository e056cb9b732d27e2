use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    move |key| vars.get(key).cloned()
}

// =============================================================
// JSON
// =============================================================

#[test]
fn empty_json_object_yields_defaults() {
    let cfg = NavigationConfig::from_json("{}").unwrap();
    assert_eq!(cfg, NavigationConfig::default());
    assert_eq!(cfg.metaphor, NavigationMetaphor::Turntable);
    assert!((cfg.pan_threshold - PAN_COSINE_THRESHOLD).abs() < f64::EPSILON);
    assert!(cfg.normalize_offsets);
    assert!(!cfg.always_rotate_on_move);
}

#[test]
fn json_overrides_fields() {
    let cfg = NavigationConfig::from_json(r#"{"metaphor":"trackball","always_rotate_on_move":true,"pan_threshold":0.5}"#)
        .unwrap();
    assert_eq!(cfg.metaphor, NavigationMetaphor::Trackball);
    assert!(cfg.always_rotate_on_move);
    assert!((cfg.pan_threshold - 0.5).abs() < f64::EPSILON);
    assert!(cfg.normalize_offsets);
}

#[test]
fn json_unknown_metaphor_is_rejected() {
    let err = NavigationConfig::from_json(r#"{"metaphor":"flight"}"#).unwrap_err();
    assert!(matches!(err, NavigationError::Json(_)));
}

#[test]
fn json_malformed_is_rejected() {
    assert!(matches!(NavigationConfig::from_json("{"), Err(NavigationError::Json(_))));
}

#[test]
fn json_threshold_out_of_range_is_rejected() {
    let err = NavigationConfig::from_json(r#"{"pan_threshold":1.5}"#).unwrap_err();
    assert!(matches!(err, NavigationError::InvalidConfig { key: "pan_threshold", .. }));
}

#[test]
fn config_serializes_metaphor_lowercase() {
    let json = serde_json::to_value(NavigationConfig::default()).unwrap();
    assert_eq!(json["metaphor"], "turntable");
}

// =============================================================
// Environment
// =============================================================

#[test]
fn empty_lookup_yields_defaults() {
    let cfg = NavigationConfig::from_lookup(|_| None).unwrap();
    assert_eq!(cfg, NavigationConfig::default());
}

#[test]
fn lookup_parses_overrides() {
    let cfg = NavigationConfig::from_lookup(lookup_from(&[
        ("NAV_METAPHOR", "Trackball"),
        ("NAV_ALWAYS_ROTATE_ON_MOVE", "yes"),
        ("NAV_PAN_THRESHOLD", " 0.75 "),
        ("NAV_NORMALIZE_OFFSETS", "0"),
    ]))
    .unwrap();

    assert_eq!(cfg.metaphor, NavigationMetaphor::Trackball);
    assert!(cfg.always_rotate_on_move);
    assert!((cfg.pan_threshold - 0.75).abs() < f64::EPSILON);
    assert!(!cfg.normalize_offsets);
}

#[test]
fn lookup_unknown_metaphor_is_rejected() {
    let err = NavigationConfig::from_lookup(lookup_from(&[("NAV_METAPHOR", "firstperson")])).unwrap_err();
    assert!(matches!(err, NavigationError::InvalidMetaphor(ref m) if m == "firstperson"));
}

#[test]
fn lookup_unparsable_bool_names_the_key() {
    let err = NavigationConfig::from_lookup(lookup_from(&[("NAV_NORMALIZE_OFFSETS", "maybe")])).unwrap_err();
    assert_eq!(err.to_string(), "invalid value for NAV_NORMALIZE_OFFSETS: maybe");
}

#[test]
fn lookup_unparsable_threshold_is_rejected() {
    let err = NavigationConfig::from_lookup(lookup_from(&[("NAV_PAN_THRESHOLD", "steep")])).unwrap_err();
    assert!(matches!(err, NavigationError::InvalidConfig { key: "NAV_PAN_THRESHOLD", .. }));
}

#[test]
fn lookup_nan_threshold_is_rejected() {
    let err = NavigationConfig::from_lookup(lookup_from(&[("NAV_PAN_THRESHOLD", "NaN")])).unwrap_err();
    assert!(matches!(err, NavigationError::InvalidConfig { key: "pan_threshold", .. }));
}

#[test]
fn from_env_reads_process_environment() {
    // Only test in this crate that touches the process environment.
    unsafe { std::env::set_var("NAV_METAPHOR", "trackball") };
    let cfg = NavigationConfig::from_env();
    unsafe { std::env::remove_var("NAV_METAPHOR") };

    assert_eq!(cfg.unwrap().metaphor, NavigationMetaphor::Trackball);
}

// =============================================================
// Metaphor
// =============================================================

#[test]
fn metaphor_round_trips_through_display() {
    for metaphor in [NavigationMetaphor::Turntable, NavigationMetaphor::Trackball] {
        assert_eq!(metaphor.to_string().parse::<NavigationMetaphor>().unwrap(), metaphor);
    }
}

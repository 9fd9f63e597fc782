#![allow(clippy::float_cmp)]

use super::*;

// --- Defaults ---

#[test]
fn default_config_matches_widget_defaults() {
    let c = LoaderConfig::default();
    assert_eq!(c.dot_count, 6);
    assert_eq!(c.dot_radius, 15.0);
    assert_eq!(c.dot_color, Color::BLACK);
    assert_eq!(c.cycle_duration_ms, 700.0);
    assert!(c.validate().is_ok());
}

#[test]
fn layout_copies_count_and_radius() {
    let l = LoaderConfig::default().layout();
    assert_eq!(l, DotLayout { dot_count: 6, dot_radius: 15.0 });
}

#[test]
fn rest_positions_are_three_radii_apart() {
    let l = DotLayout { dot_count: 6, dot_radius: 15.0 };
    assert_eq!(l.rest_x(0), 30.0);
    assert_eq!(l.rest_x(1), 75.0);
    assert_eq!(l.rest_x(5), 255.0);
}

#[test]
fn one_full_fraction_is_reciprocal_of_count() {
    let l = DotLayout { dot_count: 4, dot_radius: 1.0 };
    assert_eq!(l.one_full_fraction(), 0.25);
}

// --- JSON ---

#[test]
fn from_json_empty_object_uses_defaults() {
    let c = LoaderConfig::from_json("{}").unwrap();
    assert_eq!(c, LoaderConfig::default());
}

#[test]
fn from_json_overrides_fields() {
    let c = LoaderConfig::from_json(
        r##"{"dot_count": 4, "dot_radius": 8.5, "dot_color": "#ff8000", "cycle_duration_ms": 1200}"##,
    )
    .unwrap();
    assert_eq!(c.dot_count, 4);
    assert_eq!(c.dot_radius, 8.5);
    assert_eq!(c.dot_color, Color::rgb(255, 128, 0));
    assert_eq!(c.cycle_duration_ms, 1200.0);
}

#[test]
fn from_json_rejects_zero_dots() {
    let err = LoaderConfig::from_json(r#"{"dot_count": 0}"#).unwrap_err();
    assert!(matches!(err, LoaderError::InvalidConfig(_)));
}

#[test]
fn from_json_rejects_non_positive_radius() {
    assert!(LoaderConfig::from_json(r#"{"dot_radius": 0}"#).is_err());
    assert!(LoaderConfig::from_json(r#"{"dot_radius": -3}"#).is_err());
}

#[test]
fn from_json_rejects_non_positive_duration() {
    assert!(LoaderConfig::from_json(r#"{"cycle_duration_ms": 0}"#).is_err());
}

#[test]
fn from_json_rejects_bad_color() {
    let err = LoaderConfig::from_json(r#"{"dot_color": "black"}"#).unwrap_err();
    assert!(matches!(err, LoaderError::ConfigParse(_)));
}

#[test]
fn from_json_rejects_malformed_json() {
    assert!(matches!(LoaderConfig::from_json("{"), Err(LoaderError::ConfigParse(_))));
}

#[test]
fn config_serializes_color_as_hex() {
    let json = serde_json::to_value(LoaderConfig::default()).unwrap();
    assert_eq!(json["dot_color"], "#000000");
}

// --- Color ---

#[test]
fn color_from_hex_rgb() {
    assert_eq!(Color::from_hex("#1a2b3c").unwrap(), Color::rgb(0x1a, 0x2b, 0x3c));
}

#[test]
fn color_from_hex_rgba() {
    assert_eq!(Color::from_hex("#1a2b3c80").unwrap(), Color::rgba(0x1a, 0x2b, 0x3c, 0x80));
}

#[test]
fn color_from_hex_is_case_insensitive() {
    assert_eq!(Color::from_hex("#FFffFF").unwrap(), Color::rgb(255, 255, 255));
}

#[test]
fn color_from_hex_rejects_bad_input() {
    for bad in ["", "#", "000000", "#12345", "#gggggg", "#1234567", "#ééé"] {
        assert!(Color::from_hex(bad).is_err(), "{bad:?} should fail");
    }
}

#[test]
fn color_from_hex_rejects_signed_channels() {
    for bad in ["#+f+f+f", "#-f0000", "#ff+fff8"] {
        assert!(Color::from_hex(bad).is_err(), "{bad:?} should fail");
    }
}

#[test]
fn color_display_round_trips() {
    for c in [Color::BLACK, Color::rgb(1, 2, 3), Color::rgba(10, 20, 30, 40)] {
        assert_eq!(Color::from_hex(&c.to_string()).unwrap(), c);
    }
}

#[test]
fn color_css_form() {
    assert_eq!(Color::BLACK.to_css(), "rgba(0, 0, 0, 1)");
    assert_eq!(Color::rgba(255, 0, 0, 0).to_css(), "rgba(255, 0, 0, 0)");
}

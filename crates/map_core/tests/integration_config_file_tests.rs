use std::fs;

use map_core::config::{WidgetsConfig, CONFIG_FILE_NAME};
use map_core::error::ConfigError;
use map_core::geo::Location;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = WidgetsConfig::load(&dir.path().join(CONFIG_FILE_NAME)).expect("load");
    assert_eq!(config, WidgetsConfig::default());
}

#[test]
fn file_overrides_are_merged_with_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(
        &path,
        r#"{
            "ride_map": { "seed": 99, "movement": { "move_probability": 0.5 } },
            "notifications": { "toasts_enabled": false },
            "user_location": { "lat": 6.5244, "lng": 3.3792 }
        }"#,
    )
    .expect("write config");

    let config = WidgetsConfig::load(&path).expect("load");

    assert_eq!(config.ride_map.seed, Some(99));
    assert_eq!(config.ride_map.movement.move_probability, 0.5);
    assert_eq!(config.ride_map.movement.interval_ms, 3_000);
    assert!(!config.notifications.toasts_enabled);
    assert_eq!(config.user_location, Some(Location::new(6.5244, 3.3792)));
    assert_eq!(config.promo_map.zoom, 6);
}

#[test]
fn malformed_json_is_a_parse_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "{ ride_map: ").expect("write config");

    let err = WidgetsConfig::load(&path).expect_err("should fail");
    assert!(matches!(err, ConfigError::Parse(_)), "{err:?}");
}

#[test]
fn out_of_range_values_are_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, r#"{ "ride_map": { "movement": { "move_probability": 1.5 } } }"#)
        .expect("write config");

    let err = WidgetsConfig::load(&path).expect_err("should fail");
    assert!(matches!(err, ConfigError::Invalid(_)), "{err:?}");
}

#[test]
fn unrenderable_zoom_levels_are_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(CONFIG_FILE_NAME);
    for raw in [
        r#"{ "ride_map": { "located_zoom": 40 } }"#,
        r#"{ "ride_map": { "tiles": { "url_template": "t/{z}/{x}/{y}.png", "attribution": "", "max_zoom": 64 } } }"#,
        r#"{ "promo_map": { "tiles": { "url_template": "t/{z}/{x}/{y}.png", "attribution": "", "min_zoom": 11, "max_zoom": 10 } } }"#,
    ] {
        fs::write(&path, raw).expect("write config");
        let err = WidgetsConfig::load(&path).expect_err(raw);
        assert!(matches!(err, ConfigError::Invalid(_)), "{raw}: {err:?}");
    }
}

#[test]
fn directory_in_place_of_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = WidgetsConfig::load(dir.path()).expect_err("should fail");
    assert!(matches!(err, ConfigError::Io { .. }), "{err:?}");
}

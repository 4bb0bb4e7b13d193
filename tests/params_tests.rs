#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use std::path::PathBuf;

use zombiesim::simulation::error::ConfigError;
use zombiesim::simulation::params::Params;

fn temp_config(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("zombiesim_{}_{}.json", name, std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn defaults_are_valid() {
    let params = Params::default();
    assert!(params.validate().is_ok());
    assert_eq!(params.hungry_level(), 2.0);
}

#[test]
fn round_trips_through_json() {
    let params = Params {
        initial_humans: 42,
        zombie_vision: 80.0,
        ..Params::default()
    };
    let json = serde_json::to_string_pretty(&params).unwrap();
    let back: Params = serde_json::from_str(&json).unwrap();
    assert_eq!(back, params);
}

#[test]
fn partial_file_falls_back_to_defaults() {
    let path = temp_config("partial", r#"{ "initial_zombies": 9, "max_food": 2 }"#);
    let params = Params::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(params.initial_zombies, 9);
    assert_eq!(params.max_food, 2);
    assert_eq!(params.human_vision, Params::default().human_vision);
}

#[test]
fn zero_perception_period_is_rejected() {
    let path = temp_config("zero_period", r#"{ "zombie_perception_period": 0 }"#);
    let result = Params::load(&path);
    std::fs::remove_file(&path).ok();

    assert!(matches!(
        result,
        Err(ConfigError::Invalid {
            field: "zombie_perception_period",
            ..
        })
    ));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let path = temp_config("malformed", "{ not json");
    let result = Params::load(&path);
    std::fs::remove_file(&path).ok();

    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn missing_file_is_an_io_error() {
    let result = Params::load(&std::env::temp_dir().join("zombiesim_does_not_exist.json"));
    assert!(matches!(result, Err(ConfigError::Io { .. })));
}

#[test]
fn populations_scale_with_screen_width() {
    let params = Params::default();
    let half = params.scaled_for_width(params.reference_width / 2.0);
    assert_eq!(half.initial_humans, 125);
    assert_eq!(half.initial_zombies, 2);
    assert_eq!(half.max_food, 2);

    let tiny = params.scaled_for_width(10.0);
    assert_eq!(tiny.max_food, 1);
    assert_eq!(tiny.human_vision, params.human_vision);
}

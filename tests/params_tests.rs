#![allow(missing_docs)]

use birdbrain::simulation::mutation::Noise;
use birdbrain::simulation::params::{ConfigError, Params};
use birdbrain::simulation::scheduler::{ScheduleMode, SpeedMode};
use std::fs;

#[test]
fn test_defaults_are_valid() {
    let params = Params::default();
    assert!(params.validate().is_ok());
    assert_eq!(params.input_size(), 4);
    assert_eq!(params.active_tick_rate(), 120.0);
}

#[test]
fn test_accelerated_preset() {
    let params = Params {
        speed_mode: SpeedMode::Accelerated,
        ..Params::default()
    };
    assert_eq!(params.active_tick_rate(), params.accelerated_tick_rate);
}

#[test]
fn test_partial_json_falls_back_to_defaults() {
    let params = Params::from_json_str(
        r#"{
            "population": 40,
            "gap_size": 100.0,
            "sense_obstacle_distance": true,
            "mutation": { "probability": 0.2, "noise": { "Uniform": { "max_offset": 0.5 } } },
            "schedule": { "Batch": { "ticks_per_fire": 500 } }
        }"#,
    )
    .unwrap();

    assert_eq!(params.population, 40);
    assert_eq!(params.gap_size, 100.0);
    assert_eq!(params.input_size(), 5);
    assert_eq!(params.mutation.noise, Noise::Uniform { max_offset: 0.5 });
    assert_eq!(params.schedule, ScheduleMode::Batch { ticks_per_fire: 500 });
    assert_eq!(params.canvas_height, Params::default().canvas_height);
}

#[test]
fn test_gap_must_fit_canvas() {
    let err = Params::from_json_str(r#"{ "gap_size": 220.0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_constraint_violations() {
    let cases = [
        Params { population: 0, ..Params::default() },
        Params { hidden_size: 0, ..Params::default() },
        Params { obstacle_interval: 0, ..Params::default() },
        Params { tick_rate: 0.0, ..Params::default() },
        Params { schedule: ScheduleMode::Batch { ticks_per_fire: 0 }, ..Params::default() },
        Params {
            mutation: birdbrain::simulation::mutation::MutationPolicy {
                probability: 1.5,
                noise: Noise::Gaussian { scale: 0.3 },
            },
            ..Params::default()
        },
    ];
    for params in cases {
        assert!(
            matches!(params.validate(), Err(ConfigError::Invalid(_))),
            "{params:?} should be rejected"
        );
    }
}

#[test]
fn test_malformed_json() {
    let err = Params::from_json_str("{ population: ").unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn test_load_from_file() {
    let path = std::env::temp_dir().join("birdbrain_params_test.json");
    let params = Params {
        population: 12,
        seed: Some(8),
        ..Params::default()
    };
    fs::write(&path, serde_json::to_string_pretty(&params).unwrap()).unwrap();

    let loaded = Params::load_from_file(&path).unwrap();
    assert_eq!(loaded, params);

    fs::remove_file(&path).ok();
}

#[test]
fn test_missing_file() {
    let err = Params::load_from_file("/nonexistent/birdbrain.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

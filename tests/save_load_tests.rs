#![allow(missing_docs)]

use std::fs;
use std::path::PathBuf;

use narjillos::simulation::experiment::{Experiment, ExperimentError};
use narjillos::simulation::params::Params;

fn create_test_params() -> Params {
    Params {
        world_size: 2_000.0,
        initial_food: 30,
        initial_narjillos: 10,
        report_interval: 0,
        snapshot_interval: 0,
        ..Params::default()
    }
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("narjillos_{}_{}.json", name, std::process::id()))
}

#[test]
fn test_save_and_load() {
    let mut experiment = Experiment::new(1234, create_test_params()).unwrap();
    for _ in 0..20 {
        experiment.tick();
    }

    let save_path = temp_path("save_and_load");
    experiment.save_to_file(&save_path).expect("Failed to save experiment");
    let loaded = Experiment::load_from_file(&save_path).expect("Failed to load experiment");

    assert_eq!(loaded.id(), experiment.id());
    assert_eq!(loaded.seed(), 1234);
    assert_eq!(loaded.started_at(), experiment.started_at());
    assert_eq!(loaded.ecosystem().snapshot(), experiment.ecosystem().snapshot());
    assert_eq!(
        loaded.ecosystem().gene_pool().history_size(),
        experiment.ecosystem().gene_pool().history_size()
    );

    fs::remove_file(save_path).ok();
}

#[test]
fn test_loaded_experiment_continues_identically() {
    let mut experiment = Experiment::new(99, create_test_params()).unwrap();
    for _ in 0..10 {
        experiment.tick();
    }

    let save_path = temp_path("continues");
    experiment.save_to_file(&save_path).expect("Failed to save experiment");
    let mut loaded = Experiment::load_from_file(&save_path).expect("Failed to load experiment");

    for _ in 0..100 {
        experiment.tick();
        loaded.tick();
    }
    assert_eq!(loaded.ecosystem().snapshot(), experiment.ecosystem().snapshot());

    fs::remove_file(save_path).ok();
}

#[test]
fn test_save_creates_valid_json() {
    let experiment = Experiment::new(5, create_test_params()).unwrap();
    let save_path = temp_path("valid_json");
    experiment.save_to_file(&save_path).expect("Failed to save");

    let json_content = fs::read_to_string(&save_path).expect("Failed to read save file");
    let parsed: serde_json::Value = serde_json::from_str(&json_content).expect("Invalid JSON");

    assert!(parsed.get("id").is_some());
    assert!(parsed.get("started_at").is_some());
    let ecosystem = parsed.get("ecosystem").expect("Missing ecosystem");
    assert!(ecosystem.get("creatures").is_some());
    assert!(ecosystem.get("food").is_some());
    assert!(ecosystem.get("gene_pool").is_some());
    assert!(ecosystem.get("rng").is_some());

    fs::remove_file(save_path).ok();
}

#[test]
fn test_load_nonexistent_file() {
    let result = Experiment::load_from_file(temp_path("nonexistent"));
    assert!(matches!(result, Err(ExperimentError::Io(_))));
}

#[test]
fn test_load_invalid_json() {
    let invalid_path = temp_path("invalid");
    fs::write(&invalid_path, "{ this is not valid json }").expect("Failed to write test file");

    let result = Experiment::load_from_file(&invalid_path);
    assert!(matches!(result, Err(ExperimentError::Json(_))));

    fs::remove_file(invalid_path).ok();
}

#[test]
fn test_params_from_partial_json_file() {
    let path = temp_path("params");
    fs::write(&path, r#"{ "world_size": 5000.0, "initial_food": 3 }"#).unwrap();

    let params = Params::from_json_file(&path).unwrap();
    assert_eq!(params.initial_food, 3);
    assert_eq!(params.initial_narjillos, Params::default().initial_narjillos);

    fs::write(&path, r#"{ "egg_min_incubation": 700 }"#).unwrap();
    assert!(Params::from_json_file(&path).is_err());

    fs::remove_file(path).ok();
}

#[test]
fn test_invalid_params_are_rejected() {
    let params = Params {
        world_size: -1.0,
        ..create_test_params()
    };
    assert!(matches!(
        Experiment::new(1, params),
        Err(ExperimentError::Params(_))
    ));
}

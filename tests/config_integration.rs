//! Integration tests for configuration and scene loading
//!
//! Tests that verify config loading from files and environment variables,
//! and that the shipped scene files load into a running world.

use planar::config::AppConfig;
use planar::scene::Scene;
use planar::systems::SimulationSystem;
use planar_physics::{Interactions, PhysicsWorld};
use serial_test::serial;

#[test]
#[serial]
fn test_default_file_matches_builtin_defaults() {
    std::env::remove_var("PLANAR_VIEWPORT__WIDTH");

    let loaded = AppConfig::load().unwrap();
    let builtin = AppConfig::default();

    assert_eq!(loaded.viewport.width, builtin.viewport.width);
    assert_eq!(loaded.simulation.steps, builtin.simulation.steps);
    assert_eq!(loaded.physics.interactions, Interactions::ALL);
    assert_eq!(loaded.fields.gravity, builtin.fields.gravity);
    assert_eq!(loaded.scene.path, builtin.scene.path);
}

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("PLANAR_VIEWPORT__WIDTH", "1920");
    let config = AppConfig::load();
    std::env::remove_var("PLANAR_VIEWPORT__WIDTH");

    assert_eq!(config.unwrap().viewport.width, 1920);
}

#[test]
#[serial]
fn test_env_override_nested_field() {
    std::env::set_var("PLANAR_FIELDS__ELECTRIC__MAGNITUDE", "2.5");
    std::env::set_var("PLANAR_PHYSICS__INTERACTIONS", "COLLISIONS | BOUNDARY");
    let config = AppConfig::load();
    std::env::remove_var("PLANAR_FIELDS__ELECTRIC__MAGNITUDE");
    std::env::remove_var("PLANAR_PHYSICS__INTERACTIONS");

    let config = config.unwrap();
    assert_eq!(config.fields.electric.magnitude, 2.5);
    assert!(config.fields.electric.positive);
    assert_eq!(
        config.physics.interactions,
        Interactions::COLLISIONS | Interactions::BOUNDARY
    );
}

#[test]
#[serial]
fn test_invalid_env_value_is_rejected() {
    std::env::set_var("PLANAR_SIMULATION__TIMESTEP", "-1.0");
    let config = AppConfig::load();
    std::env::remove_var("PLANAR_SIMULATION__TIMESTEP");

    assert!(config.is_err());
}

#[test]
#[serial]
fn test_missing_config_dir_uses_defaults() {
    let config = AppConfig::load_from("/nonexistent/config/dir").unwrap();
    assert_eq!(config.viewport.height, 800);
}

#[test]
fn test_shipped_scenes_load_and_run() {
    let config = AppConfig::default();

    for path in ["scenes/default.ron", "scenes/charges.ron"] {
        let scene = Scene::load(path).unwrap_or_else(|e| panic!("{}: {}", path, e));

        let mut world = PhysicsWorld::with_config(config.physics.to_physics_config());
        let keys = scene.instantiate(&mut world);
        assert_eq!(keys.len(), scene.bodies.len());

        let simulation = SimulationSystem::from_config(&config);
        for _ in 0..120 {
            simulation.step_once(&mut world);
        }
        assert!(world.shapes().iter().all(|s| s.position().is_finite()));
    }
}

#[test]
fn test_default_scene_file_matches_builtin() {
    let loaded = Scene::load("scenes/default.ron").unwrap();
    let builtin = Scene::default_scene();

    assert_eq!(loaded.bodies.len(), builtin.bodies.len());
    for (file, code) in loaded.bodies.iter().zip(&builtin.bodies) {
        assert_eq!(file.position, code.position);
        assert_eq!(file.mass, code.mass);
        assert_eq!(file.shape, code.shape);
    }
}

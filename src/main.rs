//! Planar - 2D particle physics sandbox
//!
//! Headless runner: loads configuration and a scene, steps the physics world
//! at a fixed timestep and logs body positions.

use planar::config::AppConfig;
use planar::scene::Scene;
use planar::systems::SimulationSystem;
use planar_physics::PhysicsWorld;

fn main() {
    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    // RUST_LOG wins over the configured level
    env_logger::Builder::new()
        .parse_filters(&config.debug.log_level)
        .parse_default_env()
        .init();

    log::info!(
        "Viewport {}x{} (aspect {:.3}), timestep {:.4}s",
        config.viewport.width,
        config.viewport.height,
        config.viewport.aspect(),
        config.simulation.timestep
    );

    let scene = match Scene::load(&config.scene.path) {
        Ok(scene) => {
            log::info!("Loaded scene '{}' from {}", scene.name, config.scene.path.display());
            scene
        }
        Err(e) => {
            log::warn!(
                "Failed to load scene {}: {}. Using default scene.",
                config.scene.path.display(),
                e
            );
            Scene::default_scene()
        }
    };

    let mut world = PhysicsWorld::with_config(config.physics.to_physics_config());
    let keys = scene.instantiate(&mut world);
    let simulation = SimulationSystem::from_config(&config);

    let interval = config.simulation.report_interval;
    let mut contacts = 0;
    let mut impulses = 0;
    for step in 1..=config.simulation.steps {
        let report = simulation.step_once(&mut world);
        contacts += report.contacts;
        impulses += report.impulses;

        if interval > 0 && step % interval == 0 {
            log::info!("Step {} (t = {:.3}s)", step, step as f32 * simulation.timestep());
            for (index, key) in keys.iter().enumerate() {
                if let Some(shape) = world.get_body(*key) {
                    let body = shape.body();
                    log::info!(
                        "  body {}: position ({:.4}, {:.4}) velocity ({:.4}, {:.4})",
                        index,
                        body.position().x,
                        body.position().y,
                        body.velocity().x,
                        body.velocity().y
                    );
                }
            }
        }
    }

    log::info!(
        "Finished {} steps: {} contacts, {} impulses, kinetic energy {:.4}",
        config.simulation.steps,
        contacts,
        impulses,
        world.kinetic_energy()
    );
}

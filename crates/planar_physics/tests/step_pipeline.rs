//! Integration tests for the physics step pipeline
//!
//! These tests drive `PhysicsWorld::step` over one or many frames and check
//! properties that only show up when forces, integration, containment and
//! collisions run together.

use planar_math::Vec2;
use planar_physics::{
    check_collision, Body, ElectricField, GravitationalField, Interactions, PhysicsConfig,
    PhysicsWorld, Shape,
};

fn circle(position: Vec2, velocity: Vec2) -> Shape {
    Shape::circle(Body::new(position, true).with_velocity(velocity), 0.1)
}

fn no_gravity() -> GravitationalField {
    GravitationalField::zero()
}

fn no_electric() -> ElectricField {
    ElectricField::default()
}

fn distance(world: &PhysicsWorld) -> f32 {
    let shapes = world.shapes();
    shapes[0].position().distance(shapes[1].position())
}

// ==================== Boundary ====================

#[test]
fn test_circle_bounces_off_right_wall() {
    let mut world = PhysicsWorld::new();
    let key = world.add_body(circle(Vec2::new(0.95, 0.0), Vec2::new(1.0, 0.0)));

    let report = world.step(0.1, 1.0, &no_gravity(), &no_electric());

    let body = world.get_body(key).expect("Body should exist").body();
    assert!(body.position().x <= 0.9 + 1e-4);
    assert!(body.velocity().x < 0.0);
    assert!((body.velocity().x + 0.8).abs() < 1e-4);
    assert_eq!(report.boundary_hits, 1);
}

#[test]
fn test_falling_bodies_stay_inside_viewport() {
    let mut world = PhysicsWorld::new();
    world.add_body(circle(Vec2::new(-0.5, 0.5), Vec2::new(3.0, 0.0)));
    world.add_body(Shape::polygon(
        Body::new(Vec2::new(0.5, 0.5), true).with_velocity(Vec2::new(-2.0, 4.0)),
        5,
        0.15,
    ));

    let aspect = 1.5;
    for _ in 0..600 {
        world.step(1.0 / 60.0, aspect, &GravitationalField::default(), &no_electric());

        for shape in world.shapes() {
            let bb = shape.bounding_box();
            assert!(bb.left() >= -aspect - 1e-3 && bb.right() <= aspect + 1e-3);
            assert!(bb.bottom() >= -1.0 - 1e-3 && bb.top() <= 1.0 + 1e-3);
        }
    }
}

// ==================== Forces ====================

#[test]
fn test_like_charges_separate() {
    let mut world = PhysicsWorld::new();
    world.add_body(Shape::circle(Body::new(Vec2::new(-0.5, 0.0), true).with_charge(1.0), 0.1));
    world.add_body(Shape::circle(Body::new(Vec2::new(0.5, 0.0), true).with_charge(1.0), 0.1));

    let before = distance(&world);
    world.step(0.01, 1.0, &no_gravity(), &no_electric());

    assert!(distance(&world) > before);
}

#[test]
fn test_opposite_charges_close() {
    let mut world = PhysicsWorld::new();
    world.add_body(Shape::circle(Body::new(Vec2::new(-0.5, 0.0), true).with_charge(1.0), 0.1));
    world.add_body(Shape::circle(Body::new(Vec2::new(0.5, 0.0), true).with_charge(-1.0), 0.1));

    let before = distance(&world);
    world.step(0.01, 1.0, &no_gravity(), &no_electric());

    assert!(distance(&world) < before);
}

#[test]
fn test_electric_field_pushes_charged_circle() {
    let mut world = PhysicsWorld::new();
    let positive = world.add_body(Shape::circle(Body::new(Vec2::new(-0.5, 0.0), true).with_charge(1.0), 0.1));
    let negative = world.add_body(Shape::circle(Body::new(Vec2::new(0.5, 0.0), true).with_charge(-1.0), 0.1));

    let config = PhysicsConfig::default().with_interactions(Interactions::ELECTRIC_FIELD);
    world.config = config;

    let field = ElectricField::new(2.0, 90.0, true);
    world.step(0.1, 1.0, &no_gravity(), &field);

    let up = world.get_body(positive).expect("Body should exist").body().velocity().y;
    let down = world.get_body(negative).expect("Body should exist").body().velocity().y;
    assert!((up - 0.2).abs() < 1e-4);
    assert!((down + 0.2).abs() < 1e-4);
}

#[test]
fn test_acceleration_cleared_after_step() {
    let mut world = PhysicsWorld::new();
    world.add_body(Shape::circle(Body::new(Vec2::new(-0.3, 0.2), true).with_charge(2.0), 0.1));
    world.add_body(Shape::polygon(Body::new(Vec2::new(0.3, -0.2), false).with_charge(-1.0), 6, 0.1));

    world.step(0.02, 1.0, &GravitationalField::default(), &ElectricField::new(3.0, 45.0, true));

    for shape in world.shapes() {
        assert_eq!(shape.body().acceleration(), Vec2::ZERO);
    }
}

// ==================== Collisions ====================

#[test]
fn test_immovable_anchor_never_moves() {
    let mut world = PhysicsWorld::new();
    let anchor = world.add_body(Shape::polygon(Body::new(Vec2::new(0.0, -0.5), false).with_mass(5.0), 4, 0.3));
    world.add_body(circle(Vec2::new(0.0, 0.3), Vec2::new(0.0, -1.0)));

    for _ in 0..300 {
        world.step(1.0 / 60.0, 1.0, &GravitationalField::default(), &no_electric());
    }

    let anchor = world.get_body(anchor).expect("Body should exist").body();
    assert_eq!(anchor.position(), Vec2::new(0.0, -0.5));
    assert_eq!(anchor.velocity(), Vec2::ZERO);
}

#[test]
fn test_head_on_collision_conserves_momentum() {
    let config = PhysicsConfig::default().with_interactions(Interactions::COLLISIONS);
    let mut world = PhysicsWorld::with_config(config);
    world.add_body(Shape::circle(
        Body::new(Vec2::new(-0.3, 0.0), true).with_velocity(Vec2::new(1.0, 0.0)).with_mass(2.0),
        0.1,
    ));
    world.add_body(Shape::circle(
        Body::new(Vec2::new(0.3, 0.0), true).with_velocity(Vec2::new(-1.0, 0.0)),
        0.1,
    ));

    let initial = world.momentum();
    let mut impulses = 0;
    for _ in 0..60 {
        impulses += world.step(1.0 / 60.0, 1.0, &no_gravity(), &no_electric()).impulses;
    }

    assert!(impulses >= 1);
    assert!((world.momentum() - initial).length() < 1e-4);
    // They bounced apart
    let shapes = world.shapes();
    assert!(shapes[0].body().velocity().x < shapes[1].body().velocity().x);
}

#[test]
fn test_kinetic_energy_never_increases() {
    let config = PhysicsConfig::default()
        .with_interactions(Interactions::COLLISIONS | Interactions::BOUNDARY);
    let mut world = PhysicsWorld::with_config(config);
    world.add_body(circle(Vec2::new(-0.5, 0.0), Vec2::new(1.5, 0.3)));
    world.add_body(circle(Vec2::new(0.5, 0.05), Vec2::new(-1.2, 0.0)));
    world.add_body(Shape::polygon(
        Body::new(Vec2::new(0.0, 0.5), true).with_velocity(Vec2::new(0.2, -1.0)),
        3,
        0.15,
    ));

    let mut previous = world.kinetic_energy();
    for _ in 0..400 {
        world.step(1.0 / 60.0, 1.0, &no_gravity(), &no_electric());
        let energy = world.kinetic_energy();
        assert!(energy <= previous + 1e-4, "energy grew from {} to {}", previous, energy);
        previous = energy;
    }
}

#[test]
fn test_nearly_coincident_squares_collide_in_any_order() {
    let a = Shape::polygon(Body::new(Vec2::ZERO, true), 4, 1.0);
    let b = Shape::polygon(Body::new(Vec2::new(0.01, 0.0), true), 4, 1.0);
    let c = Shape::circle(Body::new(Vec2::new(0.5, 0.0), true), 0.2);

    assert!(check_collision(&a, &b));
    assert!(check_collision(&b, &a));
    assert_eq!(check_collision(&a, &c), check_collision(&c, &a));
}

#[test]
fn test_removed_body_leaves_remaining_simulation_intact() {
    let mut world = PhysicsWorld::new();
    let a = world.add_body(circle(Vec2::new(-0.5, 0.0), Vec2::ZERO));
    let b = world.add_body(circle(Vec2::new(0.0, 0.0), Vec2::ZERO));
    let c = world.add_body(circle(Vec2::new(0.5, 0.0), Vec2::ZERO));

    world.remove_body(b);
    world.step(0.01, 1.0, &GravitationalField::default(), &no_electric());

    assert!(world.get_body(b).is_none());
    assert!(world.get_body(a).is_some_and(|s| s.body().velocity().y < 0.0));
    assert!(world.get_body(c).is_some_and(|s| s.body().velocity().y < 0.0));
}

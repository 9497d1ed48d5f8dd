//! Headless gameplay scenario tests.
//!
//! These drive the real collision / regeneration systems in a
//! [`MinimalPlugins`] app — no window, no rendering — by spawning the camera,
//! rings, and hazard blocks directly.
//!
//! Covered scenarios (from the design's testable properties):
//! - A vulnerable collision costs 1 hp, opens the 180-frame invincibility
//!   window, clears every hazard tunnel-wide, and re-arms the regen timer.
//! - Invincibility blocks further loss for exactly 180 subsequent frames.
//! - The broad phase ignores rings far from the camera; the narrow phase
//!   respects the 0.8 collision radius and the ring's pulse scale.
//! - Reaching 0 hp enters `GameOver`; restarting resets health and the ring
//!   pool without hazards.
//! - A due regen tick awards exactly +1 hp and re-arms itself.

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use cubetunnel::config::TunnelConfig;
use cubetunnel::health::{
    collision_system, regen_system, reset_run, Health, HitFlash, RegenPing, RegenTimer,
    SessionClock,
};
use cubetunnel::input::Shake;
use cubetunnel::menu::GameState;
use cubetunnel::ring::{setup_ring_assets, HazardBlock, Ring};
use cubetunnel::tunnel::reset_tunnel;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Headless app with the gameplay resources, the collision + regen systems,
/// and a camera at the origin, already in `Playing`.
fn gameplay_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_state(GameState::Playing);
    app.insert_resource(TunnelConfig::default());
    app.init_resource::<Health>();
    app.init_resource::<RegenTimer>();
    app.init_resource::<SessionClock>();
    app.init_resource::<HitFlash>();
    app.init_resource::<RegenPing>();
    app.init_resource::<Shake>();
    app.add_systems(
        Update,
        (collision_system, regen_system)
            .chain()
            .run_if(in_state(GameState::Playing)),
    );
    app.world_mut()
        .spawn((Camera3d::default(), Transform::from_xyz(0.0, 0.0, 0.0)));
    app
}

/// Spawn a ring with the given transform and one hazard block child at a
/// ring-local position.  Returns the hazard entity.
fn spawn_hazard(app: &mut App, ring_transform: Transform, hazard_local: Vec3) -> Entity {
    let world = app.world_mut();
    let ring = world
        .spawn((
            Ring {
                index: 0,
                base_z: ring_transform.translation.z,
                home_slot: 0,
            },
            ring_transform,
        ))
        .id();
    let hazard = world
        .spawn((HazardBlock, Transform::from_translation(hazard_local)))
        .id();
    world.entity_mut(ring).add_child(hazard);
    hazard
}

fn hp(app: &App) -> u32 {
    app.world().resource::<Health>().hp
}

fn count_hazards(app: &mut App) -> usize {
    let world = app.world_mut();
    let mut query = world.query_filtered::<Entity, With<HazardBlock>>();
    query.iter(world).count()
}

// ── Collision scenarios ───────────────────────────────────────────────────────

#[test]
fn hit_costs_one_hp_and_opens_the_invincibility_window() {
    let mut app = gameplay_app();
    spawn_hazard(&mut app, Transform::from_xyz(0.0, 0.0, 0.0), Vec3::ZERO);

    app.update();

    let health = app.world().resource::<Health>().clone();
    assert_eq!(health.hp, 4, "one hit must cost exactly 1 hp");
    assert_eq!(health.inv_frames, 180);
    assert!(app.world().resource::<Shake>().magnitude > 0.0);
    assert!(app.world().resource::<HitFlash>().timer > 0.0);
    assert!(
        app.world()
            .resource::<SessionClock>()
            .last_hit_at
            .is_finite(),
        "hit must stamp the grace clock"
    );
}

#[test]
fn a_hit_despawns_every_hazard_tunnel_wide() {
    let mut app = gameplay_app();
    // One hazard in contact, two more elsewhere in the tunnel.
    spawn_hazard(&mut app, Transform::from_xyz(0.0, 0.0, 0.0), Vec3::ZERO);
    spawn_hazard(
        &mut app,
        Transform::from_xyz(0.0, 0.0, -20.0),
        Vec3::new(5.0, 0.0, 0.0),
    );
    spawn_hazard(
        &mut app,
        Transform::from_xyz(0.0, 0.0, -40.0),
        Vec3::new(-5.0, 0.0, 0.0),
    );
    assert_eq!(count_hazards(&mut app), 3);

    app.update();

    assert_eq!(hp(&app), 4);
    assert_eq!(
        count_hazards(&mut app),
        0,
        "all hazards must be cleared on any hit, not just the one struck"
    );
}

#[test]
fn invincibility_blocks_damage_for_exactly_180_frames() {
    let mut app = gameplay_app();
    spawn_hazard(&mut app, Transform::from_xyz(0.0, 0.0, 0.0), Vec3::ZERO);
    app.update(); // first hit; hazards cleared
    assert_eq!(hp(&app), 4);

    // Park a fresh hazard in collision range for the whole window.
    spawn_hazard(&mut app, Transform::from_xyz(0.0, 0.0, 0.0), Vec3::ZERO);
    for frame in 0..180 {
        app.update();
        assert_eq!(hp(&app), 4, "frame {frame} of the window must be blocked");
    }

    // Window exhausted: the very next frame is vulnerable again.
    app.update();
    assert_eq!(hp(&app), 3);
}

#[test]
fn broad_phase_ignores_rings_far_from_the_camera() {
    let mut app = gameplay_app();
    // Hazard local position is dead-centre, but its ring is 5 units down the
    // tunnel — outside the 2-unit broad-phase window.
    spawn_hazard(&mut app, Transform::from_xyz(0.0, 0.0, -5.0), Vec3::ZERO);

    for _ in 0..10 {
        app.update();
    }
    assert_eq!(hp(&app), 5);
}

#[test]
fn narrow_phase_respects_the_collision_radius() {
    let mut app = gameplay_app();
    // In the broad-phase window but 2 units off-axis: no hit.
    spawn_hazard(
        &mut app,
        Transform::from_xyz(0.0, 0.0, 0.0),
        Vec3::new(2.0, 0.0, 0.0),
    );
    for _ in 0..10 {
        app.update();
    }
    assert_eq!(hp(&app), 5);

    // Within 0.8: hit.
    spawn_hazard(
        &mut app,
        Transform::from_xyz(0.0, 0.0, 0.0),
        Vec3::new(0.5, 0.0, 0.0),
    );
    app.update();
    assert_eq!(hp(&app), 4);
}

#[test]
fn collision_uses_the_pulsed_ring_scale() {
    let mut app = gameplay_app();
    // Local x = 1.2 would miss at scale 1.0, but the pulse has shrunk the
    // ring to 0.5 — world x = 0.6, inside the 0.8 radius.
    let ring_transform =
        Transform::from_xyz(0.0, 0.0, 0.0).with_scale(Vec3::splat(0.5));
    spawn_hazard(&mut app, ring_transform, Vec3::new(1.2, 0.0, 0.0));

    app.update();
    assert_eq!(hp(&app), 4);
}

// ── Death and restart ─────────────────────────────────────────────────────────

#[test]
fn reaching_zero_hp_enters_game_over() {
    let mut app = gameplay_app();
    app.world_mut().resource_mut::<Health>().hp = 1;
    spawn_hazard(&mut app, Transform::from_xyz(0.0, 0.0, 0.0), Vec3::ZERO);

    app.update(); // hit: hp 1 → 0, GameOver requested
    app.update(); // StateTransition applies it

    assert_eq!(hp(&app), 0);
    let state = app.world().resource::<State<GameState>>();
    assert_eq!(*state.get(), GameState::GameOver);
}

#[test]
fn restart_resets_health_and_regenerates_rings_without_hazards() {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.init_state::<GameState>();
    app.insert_resource(TunnelConfig::default());
    app.insert_resource(Assets::<Mesh>::default());
    app.insert_resource(Assets::<StandardMaterial>::default());
    app.init_resource::<Health>();
    app.init_resource::<RegenTimer>();
    app.init_resource::<SessionClock>();
    app.init_resource::<HitFlash>();
    app.init_resource::<RegenPing>();
    app.init_resource::<Shake>();
    app.add_systems(Startup, setup_ring_assets);
    app.add_systems(
        OnEnter(GameState::Playing),
        (reset_run, reset_tunnel).chain(),
    );
    app.update(); // Startup + settle into StartMenu

    // Start the game: the full ring pool spawns, hazard-free.
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Playing);
    app.update();

    let config = TunnelConfig::default();
    let ring_count = {
        let world = app.world_mut();
        let mut query = world.query::<&Ring>();
        query.iter(world).count()
    };
    assert_eq!(ring_count, config.total_rings);
    assert_eq!(count_hazards(&mut app), 0);
    assert_eq!(hp(&app), config.max_health);

    // Simulate a played session: damage taken, rings recycled far ahead.
    app.world_mut().resource_mut::<Health>().hp = 1;
    {
        let world = app.world_mut();
        let mut query = world.query::<&mut Ring>();
        for mut ring in query.iter_mut(world) {
            ring.index += 600;
        }
    }

    // Die and play again.
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::GameOver);
    app.update();
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Playing);
    app.update();

    // Same pool (no growth), every ring back at its home slot, full health.
    let rings: Vec<(u64, usize)> = {
        let world = app.world_mut();
        let mut query = world.query::<&Ring>();
        query.iter(world).map(|r| (r.index, r.home_slot)).collect()
    };
    assert_eq!(rings.len(), config.total_rings);
    for (index, home_slot) in rings {
        assert_eq!(index, home_slot as u64, "restart must rewind ring indices");
    }
    assert_eq!(count_hazards(&mut app), 0);
    assert_eq!(hp(&app), config.max_health);
}

// ── Regeneration ──────────────────────────────────────────────────────────────

#[test]
fn a_due_regen_tick_awards_exactly_one_hp() {
    let mut app = gameplay_app();
    app.world_mut().resource_mut::<Health>().hp = 3;
    // Backdate the timer so a full interval has elapsed.
    app.world_mut().resource_mut::<RegenTimer>().last_reset = -100.0;

    app.update();

    assert_eq!(hp(&app), 4, "one due tick awards exactly +1 hp");
    let ping = app.world().resource::<RegenPing>();
    assert_eq!(ping.slot, Some(3), "the refilled heart gets the ping");

    // The timer re-armed: the next frame must not award another point.
    app.update();
    assert_eq!(hp(&app), 4);
}

#[test]
fn regen_never_exceeds_max_health() {
    let mut app = gameplay_app();
    app.world_mut().resource_mut::<RegenTimer>().last_reset = -100.0;

    for _ in 0..5 {
        app.update();
    }
    assert_eq!(hp(&app), 5, "full health must not regenerate further");
}

//! Tunnel advance, pulse, and ring recycling.
//!
//! The ring pool is an arena: [`reset_tunnel`] spawns `total_rings` ring
//! entities the first time gameplay starts and afterwards only resets them in
//! place.  Every `Update` frame while playing,
//! [`pulse_advance_recycle_system`] advances each ring's base position by a
//! fixed per-frame step, applies the shared sinusoidal pulse to its transform,
//! and recycles rings that have passed behind the camera by jumping them to
//! the back of the tunnel with a fresh population.
//!
//! Movement is deliberately frame-coupled (`speed` per frame, not per
//! second): the fixed step is load-bearing for difficulty tuning and matches
//! the reference behaviour.

use crate::config::TunnelConfig;
use crate::health::SessionClock;
use crate::ring::{populate_ring, ring_layout, Ring, RingAssets};
use bevy::prelude::*;
use rand::thread_rng;

/// Shared pulse clock; advances a fixed step per frame so the whole tunnel
/// breathes in sync.
#[derive(Resource, Default, Debug)]
pub struct PulseClock {
    pub t: f32,
}

// ── Pure pulse / recycle math ─────────────────────────────────────────────────

/// Z-offset added to every ring's base position this frame.
pub fn pulse_offset(t: f32, amplitude: f32) -> f32 {
    t.sin() * amplitude
}

/// Uniform scale applied to every ring this frame.
///
/// The sign is inverted relative to the offset so the tunnel shrinks as it
/// surges toward the camera.
pub fn pulse_scale(t: f32, mid: f32, amplitude: f32) -> f32 {
    mid - t.sin() * amplitude
}

/// Jump a ring to the back of the tunnel.
///
/// The base position drops by the full tunnel depth and the logical index
/// advances by the pool size, so indices are strictly increasing for the
/// lifetime of a session and colour banding stays continuous.
pub fn recycle(ring: &mut Ring, total_rings: usize, ring_spacing: f32) {
    ring.base_z -= total_rings as f32 * ring_spacing;
    ring.index += total_rings as u64;
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// `OnEnter(Playing)`: create the ring pool, or reset it in place on restart.
///
/// Each ring returns to its home slot (`base_z = −slot × ring_spacing`,
/// `index = slot`) and is repopulated **without** hazards; the spawn grace
/// window keeps hazards out of the first recycled rings as well.
pub fn reset_tunnel(
    mut commands: Commands,
    mut rings: Query<(Entity, &mut Ring, &mut Transform)>,
    assets: Res<RingAssets>,
    config: Res<TunnelConfig>,
) {
    let mut rng = thread_rng();

    if rings.is_empty() {
        for slot in 0..config.total_rings {
            let base_z = -(slot as f32) * config.ring_spacing;
            let entity = commands
                .spawn((
                    Ring {
                        index: slot as u64,
                        base_z,
                        home_slot: slot,
                    },
                    Transform::from_xyz(0.0, 0.0, base_z),
                    Visibility::default(),
                ))
                .id();
            let layout = ring_layout(slot as u64, false, &config, &mut rng);
            populate_ring(&mut commands, entity, &layout, &assets, &config);
        }
        info!("spawned tunnel pool of {} rings", config.total_rings);
        return;
    }

    for (entity, mut ring, mut transform) in rings.iter_mut() {
        ring.index = ring.home_slot as u64;
        ring.base_z = -(ring.home_slot as f32) * config.ring_spacing;
        transform.translation = Vec3::new(0.0, 0.0, ring.base_z);
        transform.scale = Vec3::ONE;
        commands.entity(entity).despawn_related::<Children>();
        let layout = ring_layout(ring.index, false, &config, &mut rng);
        populate_ring(&mut commands, entity, &layout, &assets, &config);
    }
    info!("tunnel reset for a new run");
}

/// Per-frame tunnel update: advance, pulse, recycle.
///
/// A ring recycles at most once per frame — the base position only ever
/// crosses the recycle threshold by one `speed` step.  Hazard spawning on
/// recycle is gated by the grace windows in [`SessionClock`].
pub fn pulse_advance_recycle_system(
    mut commands: Commands,
    mut clock: ResMut<PulseClock>,
    time: Res<Time>,
    session: Res<SessionClock>,
    assets: Res<RingAssets>,
    config: Res<TunnelConfig>,
    camera: Query<&Transform, (With<Camera3d>, Without<Ring>)>,
    mut rings: Query<(Entity, &mut Ring, &mut Transform)>,
) {
    let Ok(camera_tf) = camera.single() else {
        return;
    };
    let camera_z = camera_tf.translation.z;

    clock.t += config.pulse_step;
    let offset = pulse_offset(clock.t, config.pulse_position_amplitude);
    let scale = pulse_scale(clock.t, config.pulse_scale_mid, config.pulse_scale_amplitude);

    let allow_hazards = session.can_spawn_hazards(time.elapsed_secs_f64(), &config);
    let mut rng = thread_rng();

    for (entity, mut ring, mut transform) in rings.iter_mut() {
        ring.base_z += config.speed;

        if ring.base_z > camera_z + config.recycle_ahead {
            recycle(&mut ring, config.total_rings, config.ring_spacing);
            commands.entity(entity).despawn_related::<Children>();
            let layout = ring_layout(ring.index, allow_hazards, &config, &mut rng);
            populate_ring(&mut commands, entity, &layout, &assets, &config);
        }

        transform.translation.z = ring.base_z + offset;
        transform.scale = Vec3::splat(scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulse_oscillates_within_its_band() {
        let mut t = 0.0f32;
        for _ in 0..2_000 {
            t += 0.05;
            let offset = pulse_offset(t, 3.0);
            let scale = pulse_scale(t, 0.9, 0.1);
            assert!(offset.abs() <= 3.0 + f32::EPSILON);
            assert!((0.8..=1.0).contains(&scale));
        }
    }

    #[test]
    fn pulse_offset_and_scale_move_in_opposition() {
        // When the tunnel surges forward (positive offset) it shrinks.
        let t = std::f32::consts::FRAC_PI_2; // sin(t) = 1
        assert!((pulse_offset(t, 3.0) - 3.0).abs() < 1e-5);
        assert!((pulse_scale(t, 0.9, 0.1) - 0.8).abs() < 1e-5);
    }

    #[test]
    fn recycle_jumps_to_the_back_and_advances_the_index() {
        let mut ring = Ring {
            index: 17,
            base_z: 5.2,
            home_slot: 17,
        };
        recycle(&mut ring, 60, 1.0);
        assert_eq!(ring.index, 77);
        assert!((ring.base_z - (5.2 - 60.0)).abs() < 1e-5);
        assert_eq!(ring.home_slot, 17, "home slot never changes");
    }

    #[test]
    fn ring_index_is_strictly_increasing_across_recycles() {
        let mut ring = Ring {
            index: 3,
            base_z: 0.0,
            home_slot: 3,
        };
        let mut previous = ring.index;
        for _ in 0..1_000 {
            recycle(&mut ring, 60, 1.0);
            assert!(ring.index > previous, "index must never wrap or reset");
            previous = ring.index;
        }
    }
}

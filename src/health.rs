//! Health, collision, and regeneration.
//!
//! State machine: Alive (hp > 0) → GameOver (hp == 0) → Alive again on an
//! explicit restart.  While alive there is an orthogonal invincibility
//! sub-state: a fixed frame-counted window opened by every successful hit,
//! during which no further damage can be taken.
//!
//! The regeneration and spawn-grace timers are wall-clock
//! (`Time::elapsed_secs_f64`); the invincibility window is frame-counted.
//! Both drift if the frame rate varies — an accepted limitation.

use crate::config::TunnelConfig;
use crate::constants::{MAX_HEALTH, REGEN_INTERVAL_SECS};
use crate::input::Shake;
use crate::menu::GameState;
use crate::ring::{HazardBlock, Ring};
use bevy::prelude::*;

// ── Resources ─────────────────────────────────────────────────────────────────

/// Current hit points and the remaining invincibility window.
///
/// `hp` decreases only through a vulnerable collision and increases only
/// through the regeneration timer; it always stays within `[0, max_hp]`.
#[derive(Resource, Debug, Clone)]
pub struct Health {
    pub hp: u32,
    pub max_hp: u32,
    /// Frames of invincibility remaining; decremented once per frame.
    pub inv_frames: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self {
            hp: MAX_HEALTH,
            max_hp: MAX_HEALTH,
            inv_frames: 0,
        }
    }
}

impl Health {
    /// Returns `true` while the invincibility window is active.
    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.inv_frames > 0
    }

    /// Open a full invincibility window (used immediately after taking damage).
    #[inline]
    pub fn grant_invincibility(&mut self, frames: u32) {
        self.inv_frames = frames;
    }
}

/// Wall-clock regeneration timer; re-armed on every hit and on every tick.
#[derive(Resource, Debug, Clone, Default)]
pub struct RegenTimer {
    /// Timestamp (seconds since app start) of the last reset.
    pub last_reset: f64,
}

/// Fraction of the regen interval elapsed, clamped to `[0, 1]` for the UI.
pub fn regen_progress(now: f64, last_reset: f64, interval: f64) -> f64 {
    ((now - last_reset) / interval).clamp(0.0, 1.0)
}

/// Timestamps of game start and the most recent hit, used to gate hazard
/// spawning behind a short grace window after each.
#[derive(Resource, Debug, Clone)]
pub struct SessionClock {
    pub started_at: f64,
    pub last_hit_at: f64,
}

impl Default for SessionClock {
    fn default() -> Self {
        Self {
            started_at: 0.0,
            // No hit yet: the post-hit grace window must not apply.
            last_hit_at: f64::NEG_INFINITY,
        }
    }
}

impl SessionClock {
    /// Hazards may spawn once both grace windows have passed.
    pub fn can_spawn_hazards(&self, now: f64, config: &TunnelConfig) -> bool {
        now - self.started_at > config.spawn_grace_secs
            && now - self.last_hit_at > config.spawn_grace_secs
    }

    /// Stamp a hit, restarting the post-hit grace window.
    pub fn note_hit(&mut self, now: f64) {
        self.last_hit_at = now;
    }
}

/// Countdown for the full-screen red flash shown after a hit.
#[derive(Resource, Debug, Default)]
pub struct HitFlash {
    /// Seconds of flash remaining.
    pub timer: f32,
}

/// Transient highlight on the heart a regen tick just refilled.
#[derive(Resource, Debug, Default)]
pub struct RegenPing {
    /// Heart slot to highlight (0-based), if any.
    pub slot: Option<u32>,
    /// Seconds of highlight remaining.
    pub timer: f32,
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// `OnEnter(Playing)`: reset health, timers, and feedback state for a fresh
/// run (both first start and restart after game over).
pub fn reset_run(
    time: Res<Time>,
    config: Res<TunnelConfig>,
    mut health: ResMut<Health>,
    mut regen: ResMut<RegenTimer>,
    mut session: ResMut<SessionClock>,
    mut flash: ResMut<HitFlash>,
    mut ping: ResMut<RegenPing>,
    mut shake: ResMut<Shake>,
) {
    let now = time.elapsed_secs_f64();
    health.hp = config.max_health;
    health.max_hp = config.max_health;
    health.inv_frames = 0;
    regen.last_reset = now;
    session.started_at = now;
    session.last_hit_at = f64::NEG_INFINITY;
    flash.timer = 0.0;
    ping.slot = None;
    ping.timer = 0.0;
    shake.magnitude = 0.0;
    info!("run started with {} hp", health.hp);
}

/// Per-frame hazard collision check.
///
/// While invincible, the frame counter ticks down and all checks are skipped.
/// Otherwise: coarse broad-phase keeps only rings whose pulsed z-position is
/// within `collision_z_range` of the camera, then each hazard block in range
/// is transformed to world space (ring translation + scale) and compared by
/// straight-line distance against `collision_radius`.
///
/// A hit costs 1 hp, opens the invincibility window, re-arms the regen timer,
/// stamps the grace clock, triggers the screen flash and camera shake, and —
/// as a deliberate fairness measure — despawns **every** live hazard
/// tunnel-wide, not just the one that was struck.  Reaching 0 hp transitions
/// to `GameState::GameOver`.
#[allow(clippy::too_many_arguments)]
pub fn collision_system(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<TunnelConfig>,
    mut health: ResMut<Health>,
    mut regen: ResMut<RegenTimer>,
    mut session: ResMut<SessionClock>,
    mut shake: ResMut<Shake>,
    mut flash: ResMut<HitFlash>,
    mut next_state: ResMut<NextState<GameState>>,
    camera: Query<&Transform, With<Camera3d>>,
    rings: Query<&Transform, With<Ring>>,
    hazards: Query<(Entity, &ChildOf, &Transform), With<HazardBlock>>,
) {
    if health.inv_frames > 0 {
        health.inv_frames -= 1;
        return;
    }

    let Ok(camera_tf) = camera.single() else {
        return;
    };
    let camera_pos = camera_tf.translation;

    let mut hit = false;
    for (_, child_of, local) in hazards.iter() {
        let Ok(ring_tf) = rings.get(child_of.parent()) else {
            continue;
        };
        if (ring_tf.translation.z - camera_pos.z).abs() >= config.collision_z_range {
            continue;
        }
        let world = ring_tf.translation + ring_tf.scale * local.translation;
        if world.distance(camera_pos) < config.collision_radius {
            hit = true;
            break;
        }
    }

    if !hit {
        return;
    }

    let now = time.elapsed_secs_f64();
    health.hp = health.hp.saturating_sub(1);
    health.grant_invincibility(config.invincibility_frames);
    regen.last_reset = now;
    session.note_hit(now);
    shake.magnitude = config.hit_shake_magnitude;
    flash.timer = config.hit_flash_secs;

    // Fairness: clear every live hazard in the tunnel, not just the one hit.
    for (entity, _, _) in hazards.iter() {
        commands.entity(entity).despawn();
    }

    info!("hit! {} hp remaining", health.hp);
    if health.hp == 0 {
        info!("out of hit points — game over");
        next_state.set(GameState::GameOver);
    }
}

/// Passive regeneration: while below max hp, a fixed wall-clock interval
/// awards +1 hp and re-arms itself.  While at full hp the timer is held
/// re-armed so the UI shows a full bar and the next loss starts a fresh
/// interval.
pub fn regen_system(
    time: Res<Time>,
    config: Res<TunnelConfig>,
    mut health: ResMut<Health>,
    mut regen: ResMut<RegenTimer>,
    mut ping: ResMut<RegenPing>,
) {
    let now = time.elapsed_secs_f64();
    if health.hp >= health.max_hp {
        regen.last_reset = now;
        return;
    }
    if now - regen.last_reset >= config.regen_interval_secs {
        health.hp += 1;
        regen.last_reset = now;
        ping.slot = Some(health.hp - 1);
        ping.timer = config.regen_ping_secs;
        info!("regenerated to {} hp", health.hp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_never_underflows() {
        let mut health = Health {
            hp: 0,
            ..Health::default()
        };
        health.hp = health.hp.saturating_sub(1);
        assert_eq!(health.hp, 0);
    }

    #[test]
    fn invincibility_window_tracks_frames() {
        let mut health = Health::default();
        assert!(!health.is_invincible());
        health.grant_invincibility(180);
        assert!(health.is_invincible());
        for _ in 0..180 {
            health.inv_frames -= 1;
        }
        assert!(!health.is_invincible());
    }

    #[test]
    fn spawn_grace_blocks_after_start_and_after_hits() {
        let config = TunnelConfig::default();
        let mut clock = SessionClock::default();
        clock.started_at = 100.0;

        // Within 1 s of game start: blocked.
        assert!(!clock.can_spawn_hazards(100.5, &config));
        // Past the start grace with no hit ever: allowed.
        assert!(clock.can_spawn_hazards(101.5, &config));

        clock.note_hit(200.0);
        assert!(!clock.can_spawn_hazards(200.9, &config));
        assert!(clock.can_spawn_hazards(201.1, &config));
    }

    #[test]
    fn regen_progress_is_clamped() {
        assert_eq!(regen_progress(0.0, 0.0, REGEN_INTERVAL_SECS), 0.0);
        let half = regen_progress(7.5, 0.0, REGEN_INTERVAL_SECS);
        assert!((half - 0.5).abs() < 1e-9);
        assert_eq!(regen_progress(60.0, 0.0, REGEN_INTERVAL_SECS), 1.0);
    }
}

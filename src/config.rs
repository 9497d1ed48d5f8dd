//! Runtime gameplay configuration loaded from `assets/tunnel.toml`.
//!
//! [`TunnelConfig`] is a Bevy [`Resource`] that mirrors the tuneable constants
//! in [`crate::constants`].  At startup, [`load_tunnel_config`] reads
//! `assets/tunnel.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a
//! minimal TOML can override just the constants you care about.
//!
//! ## Usage in systems
//!
//! Add `config: Res<TunnelConfig>` to any system parameter list and read
//! values with `config.speed`, `config.hazard_spawn_chance`, etc.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `TunnelConfig::default()`.

use crate::constants::*;
use crate::error::{validate_hazard_spawn_chance, validate_max_camera_radius, validate_max_health};
use bevy::prelude::*;
use serde::Deserialize;

/// Runtime-tunable tunnel geometry and gameplay configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.  Override any subset by setting the value in
/// `assets/tunnel.toml`.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TunnelConfig {
    // ── Tunnel Geometry ──────────────────────────────────────────────────────
    pub cubes_per_ring: usize,
    pub ring_radius: f32,
    pub ring_spacing: f32,
    pub total_rings: usize,
    pub cube_size: f32,
    pub offset_amount: f32,

    // ── Colour Banding ───────────────────────────────────────────────────────
    pub neon_ring_interval: u64,
    pub color_band_width: u64,

    // ── Hazards ──────────────────────────────────────────────────────────────
    pub hazard_spawn_chance: f64,
    pub hazard_sub_blocks: usize,
    pub hazard_duplicates: usize,
    pub hazard_stretch_length: f32,
    pub hazard_jitter_scale: f32,

    // ── Movement ─────────────────────────────────────────────────────────────
    pub speed: f32,
    pub camera_move_speed: f32,
    pub max_camera_radius: f32,
    pub recycle_ahead: f32,

    // ── Pulse ────────────────────────────────────────────────────────────────
    pub pulse_step: f32,
    pub pulse_position_amplitude: f32,
    pub pulse_scale_mid: f32,
    pub pulse_scale_amplitude: f32,

    // ── Health ───────────────────────────────────────────────────────────────
    pub max_health: u32,
    pub invincibility_frames: u32,
    pub regen_interval_secs: f64,
    pub spawn_grace_secs: f64,

    // ── Collision ────────────────────────────────────────────────────────────
    pub collision_radius: f32,
    pub collision_z_range: f32,

    // ── Hit Feedback ─────────────────────────────────────────────────────────
    pub hit_shake_magnitude: f32,
    pub shake_decay: f32,
    pub shake_jitter_scale: f32,
    pub hit_flash_secs: f32,
    pub regen_ping_secs: f32,

    // ── Lights ───────────────────────────────────────────────────────────────
    pub neon_light_range: f32,
    pub neon_light_range_hazard: f32,
    pub neon_light_intensity: f32,

    // ── Input ────────────────────────────────────────────────────────────────
    pub stick_deadzone: f32,
}

impl Default for TunnelConfig {
    fn default() -> Self {
        Self {
            // Tunnel Geometry
            cubes_per_ring: CUBES_PER_RING,
            ring_radius: RING_RADIUS,
            ring_spacing: RING_SPACING,
            total_rings: TOTAL_RINGS,
            cube_size: CUBE_SIZE,
            offset_amount: OFFSET_AMOUNT,
            // Colour Banding
            neon_ring_interval: NEON_RING_INTERVAL,
            color_band_width: COLOR_BAND_WIDTH,
            // Hazards
            hazard_spawn_chance: HAZARD_SPAWN_CHANCE,
            hazard_sub_blocks: HAZARD_SUB_BLOCKS,
            hazard_duplicates: HAZARD_DUPLICATES,
            hazard_stretch_length: HAZARD_STRETCH_LENGTH,
            hazard_jitter_scale: HAZARD_JITTER_SCALE,
            // Movement
            speed: SPEED,
            camera_move_speed: CAMERA_MOVE_SPEED,
            max_camera_radius: MAX_CAMERA_RADIUS,
            recycle_ahead: RECYCLE_AHEAD,
            // Pulse
            pulse_step: PULSE_STEP,
            pulse_position_amplitude: PULSE_POSITION_AMPLITUDE,
            pulse_scale_mid: PULSE_SCALE_MID,
            pulse_scale_amplitude: PULSE_SCALE_AMPLITUDE,
            // Health
            max_health: MAX_HEALTH,
            invincibility_frames: INVINCIBILITY_FRAMES,
            regen_interval_secs: REGEN_INTERVAL_SECS,
            spawn_grace_secs: SPAWN_GRACE_SECS,
            // Collision
            collision_radius: COLLISION_RADIUS,
            collision_z_range: COLLISION_Z_RANGE,
            // Hit Feedback
            hit_shake_magnitude: HIT_SHAKE_MAGNITUDE,
            shake_decay: SHAKE_DECAY,
            shake_jitter_scale: SHAKE_JITTER_SCALE,
            hit_flash_secs: HIT_FLASH_SECS,
            regen_ping_secs: REGEN_PING_SECS,
            // Lights
            neon_light_range: NEON_LIGHT_RANGE,
            neon_light_range_hazard: NEON_LIGHT_RANGE_HAZARD,
            neon_light_intensity: NEON_LIGHT_INTENSITY,
            // Input
            stick_deadzone: STICK_DEADZONE,
        }
    }
}

impl TunnelConfig {
    /// Run the config validation helpers and log a warning for every value
    /// outside its safe range.  Invalid values are kept as-is: the checks are
    /// advisory, matching the no-hard-failure error policy of the game.
    pub fn warn_on_unsafe_values(&self) {
        for result in [
            validate_hazard_spawn_chance(self.hazard_spawn_chance),
            validate_max_camera_radius(self.max_camera_radius, self.ring_radius),
            validate_max_health(self.max_health),
        ] {
            if let Err(e) = result {
                warn!("tunnel config: {e}");
            }
        }
    }
}

/// Startup system: attempt to load `assets/tunnel.toml` and overwrite the
/// `TunnelConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  TOML parse errors are logged
/// but do not abort the game.  A missing file is silently ignored (defaults
/// are already in place from `insert_resource`).
pub fn load_tunnel_config(mut config: ResMut<TunnelConfig>) {
    let path = "assets/tunnel.toml";
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<TunnelConfig>(&contents) {
            Ok(loaded) => {
                *config = loaded;
                info!("loaded tunnel config from {path}");
            }
            Err(e) => {
                warn!("failed to parse {path}: {e}; using defaults");
            }
        },
        Err(_) => {
            // File not present — defaults are already in place; not an error.
            info!("no {path} found; using compiled defaults");
        }
    }
    config.warn_on_unsafe_values();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_constants() {
        let config = TunnelConfig::default();
        assert_eq!(config.cubes_per_ring, CUBES_PER_RING);
        assert_eq!(config.total_rings, TOTAL_RINGS);
        assert_eq!(config.max_health, MAX_HEALTH);
        assert_eq!(config.invincibility_frames, INVINCIBILITY_FRAMES);
        assert!((config.speed - SPEED).abs() < f32::EPSILON);
        assert!((config.hazard_spawn_chance - HAZARD_SPAWN_CHANCE).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_toml_overrides_only_named_keys() {
        let config: TunnelConfig = toml::from_str("speed = 0.5\nmax_health = 3\n").unwrap();
        assert!((config.speed - 0.5).abs() < f32::EPSILON);
        assert_eq!(config.max_health, 3);
        // Everything else keeps its compiled default.
        assert_eq!(config.total_rings, TOTAL_RINGS);
        assert!((config.ring_radius - RING_RADIUS).abs() < f32::EPSILON);
    }

    #[test]
    fn default_config_passes_validation() {
        let config = TunnelConfig::default();
        assert!(validate_hazard_spawn_chance(config.hazard_spawn_chance).is_ok());
        assert!(validate_max_camera_radius(config.max_camera_radius, config.ring_radius).is_ok());
        assert!(validate_max_health(config.max_health).is_ok());
    }
}

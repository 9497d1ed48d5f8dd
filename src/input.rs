//! Input aggregation and camera movement.
//!
//! ## Pipeline (runs in order every `Update` frame while playing)
//!
//! 1. [`intent_clear_system`] — resets [`MoveIntent`] to zero.
//! 2. [`keyboard_to_intent_system`] — W/A/S/D → ±y/±x.
//! 3. [`stick_to_intent_system`] — gamepad left stick → [`StickVector`].
//! 4. [`apply_movement_system`] — moves the camera in the plane perpendicular
//!    to the travel axis, clamps it radially, and applies the decaying hit
//!    shake.
//!
//! The input abstraction layer ([`MoveIntent`] / [`StickVector`]) makes the
//! movement logic testable: tests populate the resources directly and run only
//! the apply step.

use crate::config::TunnelConfig;
use crate::constants::SHAKE_EPSILON;
use bevy::input::gamepad::{GamepadAxis, GamepadConnection, GamepadConnectionEvent};
use bevy::prelude::*;
use rand::Rng;

// ── Resources ─────────────────────────────────────────────────────────────────

/// Aggregated keyboard steering intent for the current frame; cleared each
/// frame before the input systems write to it.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct MoveIntent(pub Vec2);

/// Unit-range vector from the analogue stick, the stand-in for the reference
/// design's on-screen virtual joystick.  Applied additively with
/// [`MoveIntent`].
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct StickVector(pub Vec2);

/// Tracks the most recently connected gamepad so that accidental HID devices
/// (e.g. RGB LED controllers exposed as joysticks on Linux) don't hijack
/// input.  Always prefers the *last* connected gamepad; cleared when that
/// gamepad disconnects.
#[derive(Resource, Default)]
pub struct PreferredGamepad(pub Option<Entity>);

/// Decaying camera-shake magnitude; set on every hit, decays multiplicatively
/// each frame and adds random jitter to the camera until negligible.
#[derive(Resource, Default, Debug)]
pub struct Shake {
    pub magnitude: f32,
}

// ── Pure helpers ──────────────────────────────────────────────────────────────

/// Radially clamp a position in the cross-section plane.
///
/// Positions beyond `max_radius` are projected back onto the limit circle at
/// the same angle; positions inside pass through unchanged.
pub fn clamp_to_radius(p: Vec2, max_radius: f32) -> Vec2 {
    if p.length() > max_radius {
        let angle = p.y.atan2(p.x);
        Vec2::new(angle.cos(), angle.sin()) * max_radius
    } else {
        p
    }
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Reset [`MoveIntent`] at the start of every frame.  Must run before any
/// system that writes to it.
pub fn intent_clear_system(mut intent: ResMut<MoveIntent>) {
    *intent = MoveIntent::default();
}

/// Translate W/A/S/D into steering intent: W/S → ±y, A/D → ∓/±x.
pub fn keyboard_to_intent_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut intent: ResMut<MoveIntent>,
) {
    if keys.pressed(KeyCode::KeyW) {
        intent.0.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        intent.0.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        intent.0.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        intent.0.x += 1.0;
    }
}

/// Track gamepad connect / disconnect events and update [`PreferredGamepad`].
pub fn gamepad_connection_system(
    mut events: MessageReader<GamepadConnectionEvent>,
    mut preferred: ResMut<PreferredGamepad>,
) {
    for event in events.read() {
        match &event.connection {
            GamepadConnection::Connected { .. } => {
                preferred.0 = Some(event.gamepad);
                info!("gamepad {:?} connected (now preferred)", event.gamepad);
            }
            GamepadConnection::Disconnected => {
                info!("gamepad {:?} disconnected", event.gamepad);
                if preferred.0 == Some(event.gamepad) {
                    preferred.0 = None;
                }
            }
        }
    }
}

/// Read the preferred gamepad's left stick into [`StickVector`].
///
/// Deflections below the deadzone read as zero; the vector is clamped to unit
/// length.  Does nothing when no gamepad is connected.
pub fn stick_to_intent_system(
    preferred: Res<PreferredGamepad>,
    gamepads: Query<&Gamepad>,
    config: Res<TunnelConfig>,
    mut stick: ResMut<StickVector>,
) {
    stick.0 = Vec2::ZERO;

    let Some(gamepad_entity) = preferred.0 else {
        return;
    };
    let Ok(gamepad) = gamepads.get(gamepad_entity) else {
        return;
    };

    let v = Vec2::new(
        gamepad.get(GamepadAxis::LeftStickX).unwrap_or(0.0),
        gamepad.get(GamepadAxis::LeftStickY).unwrap_or(0.0),
    );
    if v.length() < config.stick_deadzone {
        return;
    }
    stick.0 = v.clamp_length_max(1.0);
}

/// Apply the combined steering input to the camera, clamp it inside the
/// tunnel, then add the decaying hit shake.
///
/// Keyboard intent and stick vector are additive, both scaled by the constant
/// per-frame move speed.  The shake jitter is applied *after* the radial
/// clamp, matching the reference order: a fresh hit can briefly nudge the
/// camera past the limit circle.
pub fn apply_movement_system(
    intent: Res<MoveIntent>,
    stick: Res<StickVector>,
    config: Res<TunnelConfig>,
    mut shake: ResMut<Shake>,
    mut camera: Query<&mut Transform, With<Camera3d>>,
) {
    let Ok(mut transform) = camera.single_mut() else {
        return;
    };

    let delta = (intent.0 + stick.0) * config.camera_move_speed;
    transform.translation.x += delta.x;
    transform.translation.y += delta.y;

    let clamped = clamp_to_radius(transform.translation.truncate(), config.max_camera_radius);
    transform.translation.x = clamped.x;
    transform.translation.y = clamped.y;

    if shake.magnitude > SHAKE_EPSILON {
        let mut rng = rand::thread_rng();
        let amplitude = shake.magnitude * config.shake_jitter_scale;
        transform.translation.x += rng.gen_range(-0.5f32..0.5) * amplitude;
        transform.translation.y += rng.gen_range(-0.5f32..0.5) * amplitude;
        shake.magnitude *= config.shake_decay;
    } else {
        shake.magnitude = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_inside_the_limit_pass_through() {
        let p = Vec2::new(1.2, -2.0);
        assert_eq!(clamp_to_radius(p, 3.5), p);
        assert_eq!(clamp_to_radius(Vec2::ZERO, 3.5), Vec2::ZERO);
    }

    #[test]
    fn outside_positions_project_onto_the_limit_circle() {
        let p = Vec2::new(4.0, 3.0); // length 5
        let clamped = clamp_to_radius(p, 3.5);
        assert!((clamped.length() - 3.5).abs() < 1e-5);
        // Same angle: the clamped point is a positive scalar multiple of p.
        let angle_before = p.y.atan2(p.x);
        let angle_after = clamped.y.atan2(clamped.x);
        assert!((angle_before - angle_after).abs() < 1e-5);
    }

    #[test]
    fn clamped_radius_never_exceeds_the_limit() {
        // Sweep a spiral of candidate positions, including far outside.
        for i in 0..500 {
            let angle = i as f32 * 0.37;
            let radius = i as f32 * 0.05;
            let p = Vec2::new(angle.cos(), angle.sin()) * radius;
            let clamped = clamp_to_radius(p, 3.5);
            assert!(clamped.length() <= 3.5 + 1e-4);
        }
    }
}

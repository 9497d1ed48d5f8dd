//! Game-specific error types.
//!
//! The game itself has no recoverable failure paths — no I/O beyond the
//! optional config file, no parsing at runtime, no external calls.  The only
//! "failure" the design models is gameplay failure (health reaching zero),
//! which is a normal state transition.  What remains is configuration
//! validation: values outside their safe ranges are reported through
//! [`GameError`] and logged as warnings at load time.

use std::fmt;

/// Top-level error enum for the tunnel runner.
#[derive(Debug)]
pub enum GameError {
    /// A configuration value is outside its safe operating range.
    UnsafeConstant {
        /// Name of the constant (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f64,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "constant '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
        }
    }
}

impl std::error::Error for GameError {}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `hazard_spawn_chance` is a valid probability.
pub fn validate_hazard_spawn_chance(value: f64) -> GameResult<()> {
    if !(0.0..=1.0).contains(&value) {
        Err(GameError::UnsafeConstant {
            name: "hazard_spawn_chance",
            value,
            safe_range: "[0.0, 1.0]",
        })
    } else {
        Ok(())
    }
}

/// Returns an error unless the camera's clamp radius leaves clearance to the
/// tunnel wall.  A radius at or beyond `ring_radius` lets the camera fly
/// through the cubes.
pub fn validate_max_camera_radius(value: f32, ring_radius: f32) -> GameResult<()> {
    if value <= 0.0 || value >= ring_radius {
        Err(GameError::UnsafeConstant {
            name: "max_camera_radius",
            value: value as f64,
            safe_range: "(0.0, ring_radius)",
        })
    } else {
        Ok(())
    }
}

/// Returns an error unless `max_health` is at least 1.
pub fn validate_max_health(value: u32) -> GameResult<()> {
    if value == 0 {
        Err(GameError::UnsafeConstant {
            name: "max_health",
            value: value as f64,
            safe_range: "[1, ∞)",
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_chance_rejects_out_of_range() {
        assert!(validate_hazard_spawn_chance(1.0 / 450.0).is_ok());
        assert!(validate_hazard_spawn_chance(0.0).is_ok());
        assert!(validate_hazard_spawn_chance(1.5).is_err());
        assert!(validate_hazard_spawn_chance(-0.1).is_err());
    }

    #[test]
    fn camera_radius_must_clear_the_wall() {
        assert!(validate_max_camera_radius(3.5, 5.0).is_ok());
        assert!(validate_max_camera_radius(5.0, 5.0).is_err());
        assert!(validate_max_camera_radius(0.0, 5.0).is_err());
    }

    #[test]
    fn error_display_names_the_constant() {
        let err = validate_max_health(0).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("max_health"));
        assert!(msg.contains("outside safe range"));
    }
}

//! Centralised tunnel geometry and gameplay constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//!
//! Most constants are mirrored by [`crate::config::TunnelConfig`] so they can
//! be overridden at runtime from `assets/tunnel.toml` without a recompile.
//! Keep this file as the **authoritative default** source.

// ── Tunnel Geometry ───────────────────────────────────────────────────────────

/// Number of angular slots (cubes) per ring.
///
/// Slots are evenly spaced around the ring circle.  Slot 0 sits on the +X
/// axis; slot `CUBES_PER_RING / 2` sits diametrically opposite.
pub const CUBES_PER_RING: usize = 32;

/// Radius of the circle the cubes are placed on (world units).
///
/// Must stay comfortably larger than [`MAX_CAMERA_RADIUS`] or the camera can
/// be steered into the tunnel wall.
pub const RING_RADIUS: f32 = 5.0;

/// Distance along the travel axis between consecutive rings (world units).
pub const RING_SPACING: f32 = 1.0;

/// Number of ring entities in the fixed pool.
///
/// Rings are created once and recycled in place forever; this value therefore
/// also sets the visible tunnel depth (`TOTAL_RINGS × RING_SPACING`).
pub const TOTAL_RINGS: usize = 60;

/// Edge length of every cube (world units).  One shared mesh is reused for
/// all cubes in the tunnel.
pub const CUBE_SIZE: f32 = 1.0;

/// Full width of the uniform positional jitter applied to each cube
/// (per axis: `[-OFFSET_AMOUNT/2, OFFSET_AMOUNT/2]`).
pub const OFFSET_AMOUNT: f32 = 0.15;

// ── Colour Banding ────────────────────────────────────────────────────────────

/// Every Nth logical ring index is a "neon" ring with two emissive accent
/// cubes and attached point lights.
pub const NEON_RING_INTERVAL: u64 = 10;

/// Width (in slots + ring indices) of one diagonal colour band.
///
/// Colour selection is `((slot + ring_index) / COLOR_BAND_WIDTH) mod palette`.
/// Because `ring_index` keeps increasing across recycles instead of wrapping,
/// the diagonal banding appears continuous for the whole session.
pub const COLOR_BAND_WIDTH: u64 = 5;

/// The five-colour cube palette (sRGB u8 triples).
pub const PALETTE: [(u8, u8, u8); 5] = [
    (0xeb, 0xa1, 0x34),
    (0x7d, 0xeb, 0x34),
    (0x34, 0x8f, 0xeb),
    (0x7a, 0x34, 0xeb),
    (0xeb, 0x34, 0x6e),
];

// ── Hazards ───────────────────────────────────────────────────────────────────

/// Per-slot probability of rolling a stretched hazard bar when spawning is
/// currently allowed.  Each slot rolls independently, at most once per
/// (re)population.
pub const HAZARD_SPAWN_CHANCE: f64 = 1.0 / 450.0;

/// Number of sub-positions along the stretched bar.
pub const HAZARD_SUB_BLOCKS: usize = 25;

/// Cubes placed at each sub-position (with extra jitter), thickening the bar.
pub const HAZARD_DUPLICATES: usize = 5;

/// Total length of the hazard bar along its stretch axis (world units).
pub const HAZARD_STRETCH_LENGTH: f32 = 30.0;

/// Jitter multiplier for hazard sub-cubes relative to [`OFFSET_AMOUNT`].
pub const HAZARD_JITTER_SCALE: f32 = 3.0;

// ── Movement ──────────────────────────────────────────────────────────────────

/// Tunnel advance per frame (world units).
///
/// Deliberately frame-coupled rather than delta-time scaled: the fixed step is
/// part of the difficulty tuning and matches the reference behaviour.
pub const SPEED: f32 = 0.3;

/// Camera lateral movement per frame at full input deflection (world units).
pub const CAMERA_MOVE_SPEED: f32 = 0.06;

/// Maximum camera distance from the tunnel axis after clamping.
///
/// Kept well inside [`RING_RADIUS`] so the camera never reaches the wall.
pub const MAX_CAMERA_RADIUS: f32 = 3.5;

/// A ring recycles once its base position passes this far beyond the camera.
pub const RECYCLE_AHEAD: f32 = 5.0;

// ── Pulse ─────────────────────────────────────────────────────────────────────

/// Pulse clock increment per frame (radians).
pub const PULSE_STEP: f32 = 0.05;

/// Amplitude of the shared sinusoidal z-offset applied to every ring.
pub const PULSE_POSITION_AMPLITUDE: f32 = 3.0;

/// Midpoint of the pulse scale oscillation.
pub const PULSE_SCALE_MID: f32 = 0.9;

/// Amplitude of the pulse scale oscillation: the whole tunnel breathes between
/// `PULSE_SCALE_MID − PULSE_SCALE_AMPLITUDE` and `… + PULSE_SCALE_AMPLITUDE`.
/// The sign is chosen so the tunnel shrinks as it surges forward.
pub const PULSE_SCALE_AMPLITUDE: f32 = 0.1;

// ── Health ────────────────────────────────────────────────────────────────────

/// Maximum (and starting) hit points.
pub const MAX_HEALTH: u32 = 5;

/// Invincibility window granted on a successful hit, in frames
/// (3 seconds at 60 fps).
pub const INVINCIBILITY_FRAMES: u32 = 180;

/// Wall-clock interval between passive +1 HP regeneration ticks (seconds).
/// Reset on any hit.
pub const REGEN_INTERVAL_SECS: f64 = 15.0;

/// Grace window after game start and after each hit during which recycled
/// rings spawn no hazards (seconds).  Prevents unfair instant re-hits.
pub const SPAWN_GRACE_SECS: f64 = 1.0;

// ── Collision ─────────────────────────────────────────────────────────────────

/// Straight-line distance below which a hazard cube damages the camera.
pub const COLLISION_RADIUS: f32 = 0.8;

/// Coarse broad-phase: only rings whose pulsed z-position is within this
/// distance of the camera are narrow-phase checked.
pub const COLLISION_Z_RANGE: f32 = 2.0;

// ── Hit Feedback ──────────────────────────────────────────────────────────────

/// Camera shake magnitude set on a hit.
pub const HIT_SHAKE_MAGNITUDE: f32 = 10.0;

/// Per-frame multiplicative decay of the shake magnitude.
pub const SHAKE_DECAY: f32 = 0.9;

/// Converts shake magnitude into positional jitter amplitude.
pub const SHAKE_JITTER_SCALE: f32 = 0.05;

/// Shake magnitudes below this are treated as zero.
pub const SHAKE_EPSILON: f32 = 0.01;

/// Duration of the full-screen red hit flash (seconds).
pub const HIT_FLASH_SECS: f32 = 0.1;

/// Duration of the highlight on a freshly regenerated heart (seconds).
pub const REGEN_PING_SECS: f32 = 1.0;

// ── Lights ────────────────────────────────────────────────────────────────────

/// Point-light range attached to a neon cube.
pub const NEON_LIGHT_RANGE: f32 = 8.0;

/// Point-light range used when a neon slot rolled a hazard bar instead of a
/// cube (the light sits alone at the slot base, so it reaches further).
pub const NEON_LIGHT_RANGE_HAZARD: f32 = 15.0;

/// Point-light intensity for neon accents, in Bevy's physical light units.
pub const NEON_LIGHT_INTENSITY: f32 = 50_000.0;

// ── Input ─────────────────────────────────────────────────────────────────────

/// Gamepad left-stick deflections below this magnitude are ignored.
pub const STICK_DEADZONE: f32 = 0.1;

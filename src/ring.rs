//! Ring construction — cube placement, colour banding, and hazard bars.
//!
//! [`ring_layout`] is a pure function from `(ring_index, allow_hazards, rng)`
//! to a [`RingLayout`] of block and light placements, so the placement rules
//! are testable with a seeded RNG and no ECS world.  [`populate_ring`] turns a
//! layout into child entities of a ring.  Advancing and recycling the ring
//! pool lives in [`crate::tunnel`].

use crate::config::TunnelConfig;
use crate::constants::PALETTE;
use bevy::prelude::*;
use rand::Rng;

// ── Components ────────────────────────────────────────────────────────────────

/// One cross-sectional slice of the tunnel.  Parent of all cube / hazard /
/// light entities placed by [`populate_ring`].
///
/// Rings form a fixed pool: created once when gameplay first starts, then
/// recycled in place forever.  `index` increases monotonically across
/// recycles and never wraps, which keeps the diagonal colour banding
/// continuous for the whole session.
#[derive(Component, Debug)]
pub struct Ring {
    /// Logical ring index; strictly increasing, never reset mid-session.
    pub index: u64,
    /// Position along the travel axis before the pulse offset is applied.
    pub base_z: f32,
    /// This ring's slot in the pool; fixes its home position on restart.
    pub home_slot: usize,
}

/// Marker for one sub-cube of a stretched hazard bar.  Contact with any
/// hazard block damages the player; all hazard blocks tunnel-wide are
/// despawned together on a hit.
#[derive(Component)]
pub struct HazardBlock;

// ── Shared geometry / materials ───────────────────────────────────────────────

/// Shared mesh and material handles reused by every cube in the tunnel.
///
/// One mesh and one material per palette slot; no per-instance duplication.
#[derive(Resource)]
pub struct RingAssets {
    pub cube: Handle<Mesh>,
    pub palette: Vec<Handle<StandardMaterial>>,
    pub neon: Handle<StandardMaterial>,
}

/// Startup system: build the shared cube mesh and the palette / neon
/// materials and store them in [`RingAssets`].
pub fn setup_ring_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<TunnelConfig>,
) {
    let cube = meshes.add(Cuboid::new(
        config.cube_size,
        config.cube_size,
        config.cube_size,
    ));
    let palette = PALETTE
        .iter()
        .map(|&(r, g, b)| {
            materials.add(StandardMaterial {
                base_color: Color::srgb_u8(r, g, b),
                ..default()
            })
        })
        .collect();
    let neon = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        emissive: LinearRgba::rgb(2.0, 2.0, 2.0),
        ..default()
    });
    commands.insert_resource(RingAssets {
        cube,
        palette,
        neon,
    });
}

// ── Pure placement ────────────────────────────────────────────────────────────

/// Material choice for a placed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStyle {
    /// Palette material by index.
    Palette(usize),
    /// Emissive white accent material.
    Neon,
}

/// One cube to place, in ring-local coordinates.
#[derive(Debug, Clone)]
pub struct BlockSpec {
    pub position: Vec3,
    pub style: BlockStyle,
    pub is_hazard: bool,
}

/// One point light to place, in ring-local coordinates.
#[derive(Debug, Clone)]
pub struct LightSpec {
    pub position: Vec3,
    pub range: f32,
}

/// Full placement plan for one ring population.
#[derive(Debug, Default)]
pub struct RingLayout {
    pub blocks: Vec<BlockSpec>,
    pub lights: Vec<LightSpec>,
}

/// Palette index for a non-neon cube.
///
/// `((slot + ring_index) / band_width) mod palette_len` — the colour depends
/// only on the sum `slot + ring_index`, which produces diagonal bands that
/// stay continuous across recycles because `ring_index` keeps incrementing.
pub fn color_slot(slot: usize, ring_index: u64, band_width: u64, palette_len: usize) -> usize {
    (((slot as u64 + ring_index) / band_width) % palette_len as u64) as usize
}

fn jitter<R: Rng>(rng: &mut R, amount: f32) -> f32 {
    rng.gen_range(-0.5f32..0.5) * amount
}

/// Compute the placement plan for one ring.
///
/// Places `cubes_per_ring` angularly even slots on a circle of `ring_radius`,
/// each perturbed by independent uniform jitter on all three axes.  Every
/// `neon_ring_interval`-th ring index is a neon ring: slots 0 and half-way
/// around get the emissive style plus an attached point light.
///
/// When `allow_hazards` is set, each slot independently rolls a stretched
/// hazard bar with probability `hazard_spawn_chance`.  On success the slot's
/// cube is *replaced* by `hazard_sub_blocks × hazard_duplicates` sub-cubes
/// stretched along whichever world axis (x or y) the slot's base position is
/// most aligned with.  A neon slot that rolled a hazard still receives its
/// point light, at the slot's unjittered base position.
///
/// Pure placement: nothing is validated against overlap.
pub fn ring_layout<R: Rng>(
    ring_index: u64,
    allow_hazards: bool,
    config: &TunnelConfig,
    rng: &mut R,
) -> RingLayout {
    let neon_ring = ring_index % config.neon_ring_interval == 0;
    let mut layout = RingLayout::default();

    for slot in 0..config.cubes_per_ring {
        let angle = slot as f32 / config.cubes_per_ring as f32 * std::f32::consts::TAU;
        let x = angle.cos() * config.ring_radius;
        let y = angle.sin() * config.ring_radius;
        let offset = Vec3::new(
            jitter(rng, config.offset_amount),
            jitter(rng, config.offset_amount),
            jitter(rng, config.offset_amount),
        );
        let is_neon = neon_ring && (slot == 0 || slot == config.cubes_per_ring / 2);
        let style = if is_neon {
            BlockStyle::Neon
        } else {
            BlockStyle::Palette(color_slot(
                slot,
                ring_index,
                config.color_band_width,
                PALETTE.len(),
            ))
        };

        if allow_hazards && rng.gen_bool(config.hazard_spawn_chance) {
            // Stretch along whichever axis the slot's base position is most
            // aligned with, so bars near the sides run horizontally and bars
            // near the top/bottom run vertically.
            let horizontal = x.abs() > y.abs();
            let sub_jitter = config.offset_amount * config.hazard_jitter_scale;
            for j in 0..config.hazard_sub_blocks {
                let t = j as f32 / (config.hazard_sub_blocks - 1) as f32 - 0.5;
                let stretch = t * config.hazard_stretch_length;
                for _ in 0..config.hazard_duplicates {
                    let sj = Vec3::new(
                        jitter(rng, sub_jitter),
                        jitter(rng, sub_jitter),
                        jitter(rng, sub_jitter),
                    );
                    let position = if horizontal {
                        Vec3::new(x + stretch + sj.x, y + sj.y, offset.z + sj.z)
                    } else {
                        Vec3::new(x + sj.x, y + stretch + sj.y, offset.z + sj.z)
                    };
                    layout.blocks.push(BlockSpec {
                        position,
                        style,
                        is_hazard: true,
                    });
                }
            }
            if is_neon {
                layout.lights.push(LightSpec {
                    position: Vec3::new(x, y, offset.z),
                    range: config.neon_light_range_hazard,
                });
            }
        } else {
            let position = Vec3::new(x + offset.x, y + offset.y, offset.z);
            layout.blocks.push(BlockSpec {
                position,
                style,
                is_hazard: false,
            });
            if is_neon {
                layout.lights.push(LightSpec {
                    position,
                    range: config.neon_light_range,
                });
            }
        }
    }

    layout
}

// ── Spawning ──────────────────────────────────────────────────────────────────

/// Spawn a layout's blocks and lights as children of `ring_entity`.
pub fn populate_ring(
    commands: &mut Commands,
    ring_entity: Entity,
    layout: &RingLayout,
    assets: &RingAssets,
    config: &TunnelConfig,
) {
    commands.entity(ring_entity).with_children(|parent| {
        for block in &layout.blocks {
            let material = match block.style {
                BlockStyle::Palette(i) => assets.palette[i].clone(),
                BlockStyle::Neon => assets.neon.clone(),
            };
            let mut child = parent.spawn((
                Mesh3d(assets.cube.clone()),
                MeshMaterial3d(material),
                Transform::from_translation(block.position),
            ));
            if block.is_hazard {
                child.insert(HazardBlock);
            }
        }
        for light in &layout.lights {
            parent.spawn((
                PointLight {
                    color: Color::WHITE,
                    intensity: config.neon_light_intensity,
                    range: light.range,
                    ..default()
                },
                Transform::from_translation(light.position),
            ));
        }
    });
}

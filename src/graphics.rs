//! Camera and lighting setup.

use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;

/// Spawn the first-person camera at the tunnel origin, looking down the
/// travel axis, with black distance fog hiding the far end of the tunnel.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 0.0, 0.0),
        DistanceFog {
            color: Color::BLACK,
            falloff: FogFalloff::Linear {
                start: 10.0,
                end: 40.0,
            },
            ..default()
        },
    ));
}

/// Key light plus a dim ambient so the palette cubes read even between the
/// neon rings' point lights.
pub fn setup_lights(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: 10_000.0,
            ..default()
        },
        Transform::from_xyz(5.0, 5.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.25, 0.25, 0.25),
        brightness: 120.0,
        ..default()
    });
}

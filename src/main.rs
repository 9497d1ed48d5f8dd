use bevy::prelude::*;
use bevy::window::WindowResolution;

use cubetunnel::config::{self, TunnelConfig};
use cubetunnel::health::{Health, HitFlash, RegenPing, RegenTimer, SessionClock};
use cubetunnel::input::{MoveIntent, PreferredGamepad, Shake, StickVector};
use cubetunnel::menu::{GameState, MenuPlugin};
use cubetunnel::tunnel::PulseClock;
use cubetunnel::{graphics, health, hud, input, ring, tunnel};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Cubetunnel".into(),
                resolution: WindowResolution::new(1200, 680),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        // Insert TunnelConfig with compiled defaults; load_tunnel_config will
        // overwrite it from assets/tunnel.toml (if present) in the Startup
        // schedule.
        .insert_resource(TunnelConfig::default())
        .add_plugins(MenuPlugin)
        .init_resource::<Health>()
        .init_resource::<RegenTimer>()
        .init_resource::<SessionClock>()
        .init_resource::<HitFlash>()
        .init_resource::<RegenPing>()
        .init_resource::<MoveIntent>()
        .init_resource::<StickVector>()
        .init_resource::<PreferredGamepad>()
        .init_resource::<Shake>()
        .init_resource::<PulseClock>()
        .add_systems(
            Startup,
            (
                // Load config first so every other startup system sees the
                // final values.
                config::load_tunnel_config,
                graphics::setup_camera.after(config::load_tunnel_config),
                graphics::setup_lights,
                ring::setup_ring_assets.after(config::load_tunnel_config),
                hud::setup_hud.after(config::load_tunnel_config),
            ),
        )
        .add_systems(
            OnEnter(GameState::Playing),
            (health::reset_run, tunnel::reset_tunnel).chain(),
        )
        // The per-frame gameplay loop, in strict order: aggregate input, move
        // the camera, advance/recycle the tunnel, then run collision and
        // regeneration against the freshly pulsed ring transforms.
        .add_systems(
            Update,
            (
                input::intent_clear_system,
                input::keyboard_to_intent_system,
                input::stick_to_intent_system,
                input::apply_movement_system,
                tunnel::pulse_advance_recycle_system,
                health::collision_system,
                health::regen_system,
            )
                .chain()
                .run_if(in_state(GameState::Playing)),
        )
        .add_systems(Update, input::gamepad_connection_system)
        // HUD refresh runs in every state: the frozen world (and its last
        // health readout) stays visible behind the overlays.
        .add_systems(
            Update,
            (
                hud::hearts_display_system,
                hud::regen_bar_system,
                hud::hit_flash_system,
            ),
        )
        .run();
}

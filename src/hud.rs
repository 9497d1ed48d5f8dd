//! In-game HUD: heart indicators, regen progress bar, hit flash.
//!
//! All HUD nodes are spawned once at startup and updated in place every
//! frame; visibility is never toggled (the overlays in [`crate::menu`] simply
//! draw above them).
//!
//! | System                    | Schedule | Purpose                               |
//! |---------------------------|----------|---------------------------------------|
//! | `setup_hud`               | Startup  | Spawn hearts row, regen bar, flash    |
//! | `hearts_display_system`   | Update   | Recolour hearts from current hp       |
//! | `regen_bar_system`        | Update   | Set fill width from regen progress    |
//! | `hit_flash_system`        | Update   | Fade the full-screen red flash        |

use crate::config::TunnelConfig;
use crate::health::{regen_progress, Health, HitFlash, RegenPing, RegenTimer};
use bevy::prelude::*;

// ── Component markers ─────────────────────────────────────────────────────────

/// One heart slot in the HUD row; the payload is the 0-based slot index.
#[derive(Component)]
pub struct HeartIndicator(pub u32);

/// The inner fill node of the regen progress bar.
#[derive(Component)]
pub struct RegenBarFill;

/// The full-screen hit-flash overlay node.
#[derive(Component)]
pub struct HitFlashOverlay;

// ── Colour helpers ────────────────────────────────────────────────────────────

fn heart_filled() -> Color {
    Color::srgb(0.95, 0.20, 0.30)
}
fn heart_empty() -> Color {
    Color::srgb(0.18, 0.18, 0.24)
}
fn heart_ping() -> Color {
    Color::srgb(1.0, 0.85, 0.90)
}
fn bar_bg() -> Color {
    Color::srgb(0.10, 0.10, 0.14)
}
fn bar_fill() -> Color {
    Color::srgb(0.30, 0.80, 0.45)
}

// ── Startup ───────────────────────────────────────────────────────────────────

/// Spawn the hearts row, the regen bar beneath it, and the (initially
/// transparent) full-screen hit-flash overlay.
pub fn setup_hud(mut commands: Commands, config: Res<TunnelConfig>) {
    // Hearts + regen bar, anchored top-left.
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(16.0),
                top: Val::Px(16.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(6.0),
                ..default()
            },
            ZIndex(100),
        ))
        .with_children(|root| {
            root.spawn(Node {
                flex_direction: FlexDirection::Row,
                column_gap: Val::Px(6.0),
                ..default()
            })
            .with_children(|row| {
                for slot in 0..config.max_health {
                    row.spawn((
                        Node {
                            width: Val::Px(20.0),
                            height: Val::Px(20.0),
                            ..default()
                        },
                        BackgroundColor(heart_filled()),
                        HeartIndicator(slot),
                    ));
                }
            });

            root.spawn((
                Node {
                    width: Val::Px(124.0),
                    height: Val::Px(6.0),
                    ..default()
                },
                BackgroundColor(bar_bg()),
            ))
            .with_children(|bar| {
                bar.spawn((
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Percent(100.0),
                        ..default()
                    },
                    BackgroundColor(bar_fill()),
                    RegenBarFill,
                ));
            });
        });

    // Full-screen flash; alpha 0 until a hit.
    commands.spawn((
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            left: Val::Px(0.0),
            top: Val::Px(0.0),
            ..default()
        },
        BackgroundColor(Color::srgba(1.0, 0.1, 0.1, 0.0)),
        ZIndex(200),
        HitFlashOverlay,
    ));
}

// ── Update ────────────────────────────────────────────────────────────────────

/// Recolour the heart slots from current hp, highlighting a freshly
/// regenerated heart while its ping timer runs.
pub fn hearts_display_system(
    health: Res<Health>,
    time: Res<Time>,
    mut ping: ResMut<RegenPing>,
    mut hearts: Query<(&HeartIndicator, &mut BackgroundColor)>,
) {
    if ping.timer > 0.0 {
        ping.timer -= time.delta_secs();
        if ping.timer <= 0.0 {
            ping.slot = None;
        }
    }

    for (heart, mut bg) in hearts.iter_mut() {
        let color = if ping.slot == Some(heart.0) && ping.timer > 0.0 {
            heart_ping()
        } else if heart.0 < health.hp {
            heart_filled()
        } else {
            heart_empty()
        };
        *bg = BackgroundColor(color);
    }
}

/// Set the regen bar fill width to the current progress percentage.
/// A full health bar reads as 100%.
pub fn regen_bar_system(
    health: Res<Health>,
    regen: Res<RegenTimer>,
    time: Res<Time>,
    config: Res<TunnelConfig>,
    mut fill: Query<&mut Node, With<RegenBarFill>>,
) {
    let progress = if health.hp >= health.max_hp {
        1.0
    } else {
        regen_progress(
            time.elapsed_secs_f64(),
            regen.last_reset,
            config.regen_interval_secs,
        )
    };
    for mut node in fill.iter_mut() {
        node.width = Val::Percent(progress as f32 * 100.0);
    }
}

/// Show the red flash at full strength while its timer runs, then drop it.
pub fn hit_flash_system(
    time: Res<Time>,
    mut flash: ResMut<HitFlash>,
    mut overlay: Query<&mut BackgroundColor, With<HitFlashOverlay>>,
) {
    let alpha = if flash.timer > 0.0 {
        flash.timer -= time.delta_secs();
        0.35
    } else {
        0.0
    };
    for mut bg in overlay.iter_mut() {
        *bg = BackgroundColor(Color::srgba(1.0, 0.1, 0.1, alpha));
    }
}

//! Headless unit tests for the [`GameState`] state machine.
//!
//! These tests use [`MinimalPlugins`] — no window, no rendering — so they run
//! fast and deterministically in CI.
//!
//! Covered scenarios:
//! 1. Default initial state is `StartMenu`.
//! 2. A `NextState` request transitions `StartMenu` → `Playing`.
//! 3. `Playing` persists across frames with no new transition request.
//! 4. The death path `Playing` → `GameOver` and the restart path
//!    `GameOver` → `Playing` both work through `NextState`.

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use cubetunnel::menu::GameState;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Build a minimal headless app with just the state registered via
/// `init_state`.  `MinimalPlugins` provides the required scheduling
/// infrastructure; `StatesPlugin` adds the `StateTransition` schedule.
fn app_with_default_state() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.init_state::<GameState>();
    app
}

fn set_state(app: &mut App, state: GameState) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(state);
    app.update(); // StateTransition fires before the next Update
}

fn current_state(app: &App) -> GameState {
    app.world().resource::<State<GameState>>().get().clone()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

/// The default variant of `GameState` is `StartMenu`.
#[test]
fn default_state_is_start_menu() {
    let mut app = app_with_default_state();
    app.update(); // run one frame so StateTransition fires
    assert_eq!(
        current_state(&app),
        GameState::StartMenu,
        "initial state must be StartMenu"
    );
}

/// Requesting `Playing` via `NextState` transitions the state on the next
/// `StateTransition` pass.
#[test]
fn transition_start_menu_to_playing() {
    let mut app = app_with_default_state();
    app.update();
    set_state(&mut app, GameState::Playing);
    assert_eq!(
        current_state(&app),
        GameState::Playing,
        "state must be Playing after explicit transition"
    );
}

/// `Playing` persists across additional frames — no accidental reversion.
#[test]
fn playing_state_persists_across_frames() {
    let mut app = app_with_default_state();
    app.update();
    set_state(&mut app, GameState::Playing);

    for _ in 0..5 {
        app.update();
    }

    assert_eq!(
        current_state(&app),
        GameState::Playing,
        "Playing must remain stable without a new transition"
    );
}

/// The death and restart path: Playing → GameOver → Playing.
#[test]
fn game_over_and_restart_round_trip() {
    let mut app = app_with_default_state();
    app.update();
    set_state(&mut app, GameState::Playing);
    set_state(&mut app, GameState::GameOver);
    assert_eq!(current_state(&app), GameState::GameOver);

    // "Play again" is just another transition request back to Playing.
    set_state(&mut app, GameState::Playing);
    assert_eq!(
        current_state(&app),
        GameState::Playing,
        "restart must return to Playing"
    );
}

/// `insert_state` can force the initial state to `Playing` directly.
#[test]
fn insert_state_starts_in_playing() {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_state(GameState::Playing);
    app.update();

    assert_eq!(
        current_state(&app),
        GameState::Playing,
        "insert_state(Playing) must start directly in Playing"
    );
}

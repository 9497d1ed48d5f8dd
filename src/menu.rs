//! Start and game-over overlays — `GameState` definition and `MenuPlugin`.
//!
//! ## States
//!
//! | State       | Description                                        |
//! |-------------|----------------------------------------------------|
//! | `StartMenu` | Initial state; title splash shown, tunnel frozen   |
//! | `Playing`   | Gameplay running; all tunnel/health systems active |
//! | `GameOver`  | Hit points exhausted; overlay shown, world frozen  |
//!
//! ## Systems (registered by `MenuPlugin`)
//!
//! | System                    | Schedule               | Purpose                     |
//! |---------------------------|------------------------|-----------------------------|
//! | `setup_start_menu`        | `OnEnter(StartMenu)`   | Spawn full-screen title UI  |
//! | `cleanup_start_menu`      | `OnExit(StartMenu)`    | Despawn title UI entities   |
//! | `start_menu_button_system`| `Update / in StartMenu`| Handle Start / Quit         |
//! | `setup_game_over`         | `OnEnter(GameOver)`    | Spawn game-over overlay     |
//! | `cleanup_game_over`       | `OnExit(GameOver)`     | Despawn overlay entities    |
//! | `game_over_button_system` | `Update / in GameOver` | Handle Play Again / Quit    |

use bevy::prelude::*;

// ── Game state ────────────────────────────────────────────────────────────────

/// Top-level application state machine.
///
/// Every gameplay system runs under `.run_if(in_state(GameState::Playing))`,
/// so the tunnel and health state are fully frozen while either overlay is
/// displayed — the frozen world keeps rendering behind it.
#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// Title splash screen; shown on startup.
    #[default]
    StartMenu,
    /// Active gameplay.
    Playing,
    /// Hit points reached zero; game-over overlay shown.
    GameOver,
}

// ── Component markers ─────────────────────────────────────────────────────────

/// Root node of the start-menu UI; entire tree is despawned on
/// `OnExit(StartMenu)`.
#[derive(Component)]
pub struct StartMenuRoot;

/// Tags the "Start" button.
#[derive(Component)]
pub struct MenuStartButton;

/// Tags a "Quit" button (shared by both overlays).
#[derive(Component)]
pub struct MenuQuitButton;

/// Root node of the game-over overlay; despawned on `OnExit(GameOver)`.
#[derive(Component)]
pub struct GameOverRoot;

/// Tags the "Play Again" button in the game-over overlay.
#[derive(Component)]
pub struct PlayAgainButton;

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers `GameState`, the overlay setup/teardown, and the button handlers.
///
/// Must be added to the app **before** any plugin or system that calls
/// `.run_if(in_state(GameState::Playing))`, so the state is always registered
/// first.
pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .add_systems(OnEnter(GameState::StartMenu), setup_start_menu)
            .add_systems(OnExit(GameState::StartMenu), cleanup_start_menu)
            .add_systems(
                Update,
                start_menu_button_system.run_if(in_state(GameState::StartMenu)),
            )
            .add_systems(OnEnter(GameState::GameOver), setup_game_over)
            .add_systems(OnExit(GameState::GameOver), cleanup_game_over)
            .add_systems(
                Update,
                game_over_button_system.run_if(in_state(GameState::GameOver)),
            );
    }
}

// ── Colour helpers ────────────────────────────────────────────────────────────

fn start_bg() -> Color {
    Color::srgb(0.08, 0.30, 0.36)
}
fn start_border() -> Color {
    Color::srgb(0.18, 0.60, 0.72)
}
fn start_text() -> Color {
    Color::srgb(0.75, 0.95, 1.0)
}
fn quit_bg() -> Color {
    Color::srgb(0.28, 0.06, 0.06)
}
fn quit_border() -> Color {
    Color::srgb(0.60, 0.12, 0.12)
}
fn quit_text() -> Color {
    Color::srgb(1.0, 0.65, 0.65)
}
fn title_color() -> Color {
    Color::srgb(0.92, 0.63, 0.20)
}
fn subtitle_color() -> Color {
    Color::srgb(0.55, 0.55, 0.65)
}
fn hint_color() -> Color {
    Color::srgb(0.32, 0.32, 0.40)
}

/// Spawn a fixed-height invisible spacer node.
fn spacer(parent: &mut ChildSpawnerCommands<'_>, px: f32) {
    parent.spawn(Node {
        height: Val::Px(px),
        ..default()
    });
}

/// Spawn a standard overlay button with a text label.
fn overlay_button(
    parent: &mut ChildSpawnerCommands<'_>,
    label: &str,
    bg: Color,
    border: Color,
    text: Color,
    marker: impl Component,
) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(220.0),
                height: Val::Px(50.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(bg),
            BorderColor::all(border),
            marker,
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new(label),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(text),
            ));
        });
}

// ── OnEnter(StartMenu): spawn UI ──────────────────────────────────────────────

/// Spawn the full-screen title overlay: title, subtitle, Start / Quit
/// buttons, and a controls hint.
pub fn setup_start_menu(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.85)),
            ZIndex(300),
            StartMenuRoot,
        ))
        .with_children(|root| {
            root.spawn((
                Text::new("CUBETUNNEL"),
                TextFont {
                    font_size: 56.0,
                    ..default()
                },
                TextColor(title_color()),
            ));

            spacer(root, 10.0);

            root.spawn((
                Text::new("An endless flight through a pulsing cube tunnel"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(subtitle_color()),
            ));

            spacer(root, 52.0);

            overlay_button(
                root,
                "START",
                start_bg(),
                start_border(),
                start_text(),
                MenuStartButton,
            );

            spacer(root, 14.0);

            overlay_button(
                root,
                "QUIT",
                quit_bg(),
                quit_border(),
                quit_text(),
                MenuQuitButton,
            );

            spacer(root, 52.0);

            root.spawn((
                Text::new("WASD or left stick to steer · dodge the stretched bars"),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(hint_color()),
            ));
        });
}

/// Recursively despawn all start-menu entities.
pub fn cleanup_start_menu(mut commands: Commands, query: Query<Entity, With<StartMenuRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

// ── Update (StartMenu only): button interaction ───────────────────────────────

/// Handle Start and Quit presses on the title screen.
///
/// - **Start** (button or Enter) → transitions to [`GameState::Playing`],
///   which triggers `OnEnter(Playing)` to reset the run and the tunnel.
/// - **Quit** → sends [`bevy::app::AppExit`] to gracefully shut down.
#[allow(clippy::type_complexity)]
pub fn start_menu_button_system(
    start_query: Query<(&Interaction, &Children), (Changed<Interaction>, With<MenuStartButton>)>,
    quit_query: Query<(&Interaction, &Children), (Changed<Interaction>, With<MenuQuitButton>)>,
    mut btn_text: Query<&mut TextColor>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: MessageWriter<bevy::app::AppExit>,
    keys: Res<ButtonInput<KeyCode>>,
) {
    let wants_start = keys.just_pressed(KeyCode::Enter)
        || start_query.iter().any(|(i, _)| *i == Interaction::Pressed);

    if wants_start {
        info!("starting game");
        next_state.set(GameState::Playing);
        return;
    }

    for (interaction, children) in start_query.iter() {
        hover_tint(interaction, children, &mut btn_text, start_text());
    }

    for (interaction, children) in quit_query.iter() {
        if *interaction == Interaction::Pressed {
            exit.write(bevy::app::AppExit::Success);
        }
        hover_tint(interaction, children, &mut btn_text, quit_text());
    }
}

// ── OnEnter(GameOver): spawn overlay ──────────────────────────────────────────

/// Spawn the game-over overlay centred over the frozen tunnel.
pub fn setup_game_over(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.82)),
            ZIndex(300),
            GameOverRoot,
        ))
        .with_children(|overlay| {
            overlay
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        padding: UiRect::all(Val::Px(40.0)),
                        row_gap: Val::Px(16.0),
                        border: UiRect::all(Val::Px(2.0)),
                        min_width: Val::Px(320.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.06, 0.02, 0.02)),
                    BorderColor::all(Color::srgb(0.55, 0.10, 0.10)),
                ))
                .with_children(|card| {
                    card.spawn((
                        Text::new("GAME OVER"),
                        TextFont {
                            font_size: 46.0,
                            ..default()
                        },
                        TextColor(Color::srgb(1.0, 0.22, 0.22)),
                    ));

                    spacer(card, 4.0);

                    card.spawn((
                        Text::new("The tunnel claims another pilot"),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(subtitle_color()),
                    ));

                    spacer(card, 8.0);

                    overlay_button(
                        card,
                        "PLAY AGAIN",
                        start_bg(),
                        start_border(),
                        start_text(),
                        PlayAgainButton,
                    );

                    overlay_button(
                        card,
                        "QUIT",
                        quit_bg(),
                        quit_border(),
                        quit_text(),
                        MenuQuitButton,
                    );

                    spacer(card, 4.0);

                    card.spawn((
                        Text::new("Press Enter to play again"),
                        TextFont {
                            font_size: 12.0,
                            ..default()
                        },
                        TextColor(hint_color()),
                    ));
                });
        });
}

/// Recursively despawn all game-over overlay entities.
pub fn cleanup_game_over(mut commands: Commands, query: Query<Entity, With<GameOverRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// Handle Play Again / Quit actions in the game-over overlay.
#[allow(clippy::type_complexity)]
pub fn game_over_button_system(
    play_query: Query<(&Interaction, &Children), (Changed<Interaction>, With<PlayAgainButton>)>,
    quit_query: Query<(&Interaction, &Children), (Changed<Interaction>, With<MenuQuitButton>)>,
    mut btn_text: Query<&mut TextColor>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: MessageWriter<bevy::app::AppExit>,
    keys: Res<ButtonInput<KeyCode>>,
) {
    let wants_play_again = keys.just_pressed(KeyCode::Enter)
        || play_query.iter().any(|(i, _)| *i == Interaction::Pressed);

    if wants_play_again {
        info!("restarting game");
        next_state.set(GameState::Playing);
        return;
    }

    for (interaction, children) in play_query.iter() {
        hover_tint(interaction, children, &mut btn_text, start_text());
    }

    for (interaction, children) in quit_query.iter() {
        if *interaction == Interaction::Pressed {
            exit.write(bevy::app::AppExit::Success);
        }
        hover_tint(interaction, children, &mut btn_text, quit_text());
    }
}

// ── Shared interaction helper ─────────────────────────────────────────────────

/// Tint button text white on hover; restore the resting colour otherwise.
fn hover_tint(
    interaction: &Interaction,
    children: &Children,
    btn_text: &mut Query<&mut TextColor>,
    resting: Color,
) {
    let color = match interaction {
        Interaction::Hovered => Color::WHITE,
        Interaction::None => resting,
        Interaction::Pressed => return,
    };
    for child in children.iter() {
        if let Ok(mut text_color) = btn_text.get_mut(child) {
            *text_color = TextColor(color);
        }
    }
}

//! UI systems: planet toggles and the status overlay

use bevy::prelude::*;

use crate::planet::{MorphMode, Planet};
use crate::quakes::{PlaybackClock, QuakeCatalog};
use crate::ui::state::UIState;

/// Marker component for the main 3D camera
#[derive(Component)]
pub struct MainCamera;

/// Marker component for the status overlay text
#[derive(Component)]
pub struct StatusText;

/// Toggle map/globe mode, the wireframe hint and the overlay from the keyboard
pub fn handle_planet_keys(
    input: Res<ButtonInput<KeyCode>>,
    mut state: ResMut<UIState>,
    mut planet: ResMut<Planet>,
) {
    if input.just_pressed(state.toggle_mode_key) {
        let mode = planet.toggle_mode();
        info!("Morphing toward {:?}", mode);
    }

    if input.just_pressed(state.toggle_wireframe_key) {
        let enabled = !planet.debug_wireframe();
        planet.set_debug_wireframe(enabled);
        info!("Wireframe {}", if enabled { "ON" } else { "OFF" });
    }

    if input.just_pressed(state.toggle_status_key) {
        state.show_status = !state.show_status;
    }
}

pub fn spawn_status_text(mut commands: Commands) {
    commands.spawn((
        Text::new(""),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
        StatusText,
    ));
}

pub fn update_status_text(
    state: Res<UIState>,
    planet: Res<Planet>,
    clock: Res<PlaybackClock>,
    catalog: Res<QuakeCatalog>,
    mut query: Query<(&mut Text, &mut Visibility), With<StatusText>>,
) {
    for (mut text, mut visibility) in query.iter_mut() {
        *visibility = if state.show_status {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        if !state.show_status {
            continue;
        }

        let date = clock
            .current_date(&catalog)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| String::from("no data"));
        let mode = match planet.mode() {
            MorphMode::Flat => "map",
            MorphMode::Globe => "globe",
        };
        text.0 = format!(
            "{date}  |  {mode} ({:.0}%)  |  {} quakes\n[Space] map/globe  [W] wireframe  [H] hide",
            planet.blend() * 100.0,
            planet.marker_count()
        );
    }
}

//! User interface module
//!
//! Keyboard bindings for the planet toggles and a small status overlay.

use bevy::prelude::*;

pub mod state;
pub mod systems;

pub use state::UIState;
pub use systems::{MainCamera, handle_planet_keys, update_status_text};

/// Plugin for user interface management
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UIState>()
            .add_systems(Startup, systems::spawn_status_text)
            .add_systems(Update, (handle_planet_keys, update_status_text).chain());
    }
}

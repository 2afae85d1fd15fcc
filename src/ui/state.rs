//! UI state management

use bevy::prelude::*;

/// Key bindings and overlay visibility
#[derive(Resource)]
pub struct UIState {
    pub show_status: bool,
    pub toggle_mode_key: KeyCode,
    pub toggle_wireframe_key: KeyCode,
    pub toggle_status_key: KeyCode,
}

impl Default for UIState {
    fn default() -> Self {
        Self {
            show_status: true,
            toggle_mode_key: KeyCode::Space,
            toggle_wireframe_key: KeyCode::KeyW,
            toggle_status_key: KeyCode::KeyH,
        }
    }
}

//! Visualization module
//!
//! Mirrors the planet state into Bevy entities: the blended surface mesh, its
//! orientation and wireframe overlay, and one child entity per earthquake marker.

use bevy::prelude::*;

pub mod config;
pub mod earth;
pub mod markers;

pub use config::PlanetConfig;
pub use earth::{EarthMeshHandle, EarthPlugin, EarthSurface};
pub use markers::MarkersPlugin;

/// Plugin for visualization systems
pub struct VisualizationPlugin;

impl Plugin for VisualizationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlanetConfig>()
            .add_plugins((EarthPlugin, MarkersPlugin));
    }
}

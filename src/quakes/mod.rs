//! Earthquake data module
//!
//! Loads the historical catalog and replays it against a scaled clock, spawning one
//! planet marker per record as playback reaches its date.

use bevy::prelude::*;
use std::path::Path;

pub mod catalog;
pub mod playback;

pub use catalog::{QuakeCatalog, QuakeRecord};
pub use playback::PlaybackClock;

use crate::planet::Planet;
use crate::visualization::PlanetConfig;
use crate::visualization::markers::RetiredMarkers;

/// Plugin for catalog loading and playback
pub struct QuakesPlugin;

impl Plugin for QuakesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_catalog)
            .add_systems(Update, advance_playback);
    }
}

fn load_catalog(mut commands: Commands, config: Res<PlanetConfig>) {
    let path = Path::new(&config.catalog_path);
    let catalog = match QuakeCatalog::load(path) {
        Ok(catalog) => {
            match (catalog.first_date(), catalog.last_date()) {
                (Some(first), Some(last)) => info!(
                    "Loaded {} earthquakes from {} to {}",
                    catalog.len(),
                    first.format("%Y-%m-%d"),
                    last.format("%Y-%m-%d")
                ),
                _ => warn!("Earthquake catalog {} is empty", path.display()),
            }
            catalog
        }
        Err(err) => {
            warn!("Running without earthquakes: {:#}", err);
            QuakeCatalog::default()
        }
    };

    commands.insert_resource(catalog);
    commands.insert_resource(PlaybackClock::new(config.playback_time_scale));
}

/// Advance playback and hand newly reached records to the planet.
pub fn advance_playback(
    time: Res<Time>,
    config: Res<PlanetConfig>,
    catalog: Res<QuakeCatalog>,
    mut clock: ResMut<PlaybackClock>,
    mut planet: ResMut<Planet>,
    mut retired: ResMut<RetiredMarkers>,
) {
    clock.advance(time.delta_secs_f64());

    if clock.is_finished(&catalog, config.marker_lifetime_secs) {
        let cleared = planet.clear_markers();
        clock.restart();
        info!("Playback restarted, cleared {} markers", cleared.len());
        retired.extend(cleared);
    }

    let now = clock.elapsed_secs;
    let released = clock.release(&catalog);
    for record in released {
        planet.spawn_marker(record, catalog.normalized_magnitude(record), now);
    }
    if !released.is_empty() {
        debug!(
            "Spawned {} markers, {} active",
            released.len(),
            planet.marker_count()
        );
    }
}

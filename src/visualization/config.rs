//! Visualization configuration

use bevy::prelude::*;

/// Planet, marker and playback settings
#[derive(Resource, Clone, Debug)]
pub struct PlanetConfig {
    /// Grid subdivisions per side of the surface mesh
    pub mesh_resolution: u32,
    /// Blend units per second
    pub morph_speed: f32,
    pub axial_tilt_deg: f32,
    /// How long a marker stays up, in playback seconds
    pub marker_lifetime_secs: f64,
    /// Marker sphere radius at scale 1
    pub marker_radius: f32,
    pub texture_path: String,
    pub catalog_path: String,
    /// Playback seconds per real second
    pub playback_time_scale: f64,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            // 20 is enough for a smooth sphere, 150 leaves room for height mapping
            mesh_resolution: 150,
            morph_speed: 0.5,
            axial_tilt_deg: 23.4,
            // One 12 x 28 day year
            marker_lifetime_secs: 12.0 * 28.0 * 24.0 * 60.0 * 60.0,
            marker_radius: 0.005,
            texture_path: String::from("earth-2k.png"),
            catalog_path: String::from("assets/earthquakes.json"),
            // 30 days per second
            playback_time_scale: 30.0 * 24.0 * 60.0 * 60.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_marker_lifetime_is_one_short_year() {
        let config = PlanetConfig::default();
        assert_eq!(config.marker_lifetime_secs, 12.0 * 28.0 * 24.0 * 60.0 * 60.0);
        assert_eq!(config.axial_tilt_deg, 23.4);
    }
}

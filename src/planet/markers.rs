//! Earthquake markers and their per-frame lifecycle.

use bevy::prelude::*;

use crate::core::coordinates::GeoPoint;

/// Outcome of stepping a marker one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerStep {
    Alive,
    Expired,
}

/// A transient earthquake marker with a position on both the map and the globe.
#[derive(Clone, Debug)]
pub struct QuakeMarker {
    pub flat_position: Vec3,
    pub globe_position: Vec3,
    /// Raw magnitude, used as the marker's size cue
    pub magnitude: f32,
    pub normalized_magnitude: f32,
    /// Playback seconds
    pub spawn_time: f64,
    pub duration_secs: f64,
    pub position: Vec3,
    pub scale: f32,
}

impl QuakeMarker {
    pub fn new(
        point: GeoPoint,
        magnitude: f32,
        normalized_magnitude: f32,
        spawn_time: f64,
        duration_secs: f64,
    ) -> Self {
        let flat_position = point.to_plane();
        Self {
            flat_position,
            globe_position: point.to_sphere(),
            magnitude,
            normalized_magnitude: normalized_magnitude.clamp(0.0, 1.0),
            spawn_time,
            duration_secs,
            position: flat_position,
            scale: magnitude,
        }
    }

    /// Fraction of the marker's lifetime that has elapsed, never negative.
    pub fn playback_life(&self, current_time: f64) -> f64 {
        ((current_time - self.spawn_time) / self.duration_secs).max(0.0)
    }

    /// Yellow for the weakest quake, red for the strongest.
    pub fn color(&self) -> Color {
        Color::srgb(1.0, 1.0 - self.normalized_magnitude, 0.0)
    }

    pub fn position_at(&self, blend: f32) -> Vec3 {
        self.flat_position.lerp(self.globe_position, blend.clamp(0.0, 1.0))
    }

    /// Track the shared blend factor and report whether the marker outlived its duration.
    pub fn step(&mut self, current_time: f64, blend: f32) -> MarkerStep {
        self.position = self.position_at(blend);
        if self.playback_life(current_time) >= 1.0 {
            return MarkerStep::Expired;
        }
        self.scale = self.magnitude;
        MarkerStep::Alive
    }
}

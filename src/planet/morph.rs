//! Map/globe morph state.

use bevy::prelude::*;
use std::f32::consts::{PI, TAU};

/// Which shape the surface is heading toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MorphMode {
    #[default]
    Flat,
    Globe,
}

impl MorphMode {
    pub fn toggled(self) -> Self {
        match self {
            MorphMode::Flat => MorphMode::Globe,
            MorphMode::Globe => MorphMode::Flat,
        }
    }
}

/// Blend factor and orientation shared by the surface and every marker.
///
/// `blend` is 0 for the flat map and 1 for the globe and always stays in `[0, 1]`.
/// The tilt and the spin angle are both scaled by the same factor, so the map is never
/// rotated, the globe is never left half-turned at rest, and the orientation moves
/// continuously however long the globe has been spinning.
#[derive(Clone, Debug)]
pub struct MorphController {
    mode: MorphMode,
    blend: f32,
    speed: f32,
    axial_tilt: Quat,
    /// Radians about the spin axis, kept in `(-PI, PI]` while the globe is fully formed
    spin_angle: f32,
    rotation: Quat,
}

impl MorphController {
    pub fn new(speed: f32, axial_tilt_deg: f32) -> Self {
        Self {
            mode: MorphMode::Flat,
            blend: 0.0,
            speed,
            // Tilt leans the spin axis about the forward axis
            axial_tilt: Quat::from_rotation_z(-axial_tilt_deg.to_radians()),
            spin_angle: 0.0,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn mode(&self) -> MorphMode {
        self.mode
    }

    pub fn blend(&self) -> f32 {
        self.blend
    }

    #[cfg(test)]
    pub fn axial_tilt(&self) -> Quat {
        self.axial_tilt
    }

    /// Orientation to apply to the surface this frame.
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn toggle_mode(&mut self) -> MorphMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    #[cfg(test)]
    pub fn set_mode(&mut self, mode: MorphMode) {
        self.mode = mode;
    }

    /// Advance one frame.
    ///
    /// The orientation is blended with the factor from before this frame's step, then
    /// the factor moves by `speed * delta_secs` toward the current mode's bound.
    pub fn advance(&mut self, delta_secs: f32) {
        let step = self.speed * delta_secs.max(0.0);
        self.blend = self.blend.clamp(0.0, 1.0);

        if self.mode == MorphMode::Globe {
            self.spin_angle += step;
        }
        self.rotation = Quat::IDENTITY.slerp(self.axial_tilt, self.blend)
            * Quat::from_rotation_y(self.spin_angle * self.blend);

        self.blend = match self.mode {
            MorphMode::Globe => self.blend + step,
            MorphMode::Flat => self.blend - step,
        }
        .clamp(0.0, 1.0);

        // Whole turns are invisible at full blend and the angle is irrelevant at zero
        if self.blend >= 1.0 {
            self.spin_angle = (self.spin_angle + PI).rem_euclid(TAU) - PI;
        } else if self.blend <= 0.0 {
            self.spin_angle = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;
    const DT: f32 = 1.0 / 60.0;
    // acos near 1 loses precision, so orientation checks are coarser
    const ANGLE_EPSILON: f32 = 1e-3;

    #[test]
    fn test_starts_flat() {
        let morph = MorphController::new(0.5, 23.4);
        assert_eq!(morph.mode(), MorphMode::Flat);
        assert_eq!(morph.blend(), 0.0);
        assert_eq!(morph.rotation(), Quat::IDENTITY);
    }

    #[test]
    fn test_globe_blend_increases_then_holds() {
        let mut morph = MorphController::new(0.5, 23.4);
        morph.toggle_mode();
        let mut previous = morph.blend();
        let mut frames = 0;
        while morph.blend() < 1.0 {
            morph.advance(DT);
            assert!(morph.blend() > previous, "blend stalled at {previous}");
            previous = morph.blend();
            frames += 1;
            assert!(frames < 1000);
        }
        for _ in 0..30 {
            morph.advance(DT);
            assert_eq!(morph.blend(), 1.0);
        }
    }

    #[test]
    fn test_flat_blend_decreases_then_holds() {
        let mut morph = MorphController::new(0.5, 23.4);
        morph.set_mode(MorphMode::Globe);
        morph.advance(10.0);
        assert_eq!(morph.blend(), 1.0);

        morph.set_mode(MorphMode::Flat);
        let mut previous = morph.blend();
        while morph.blend() > 0.0 {
            morph.advance(DT);
            assert!(morph.blend() < previous);
            previous = morph.blend();
        }
        morph.advance(DT);
        assert_eq!(morph.blend(), 0.0);
    }

    #[test]
    fn test_large_delta_is_clamped() {
        let mut morph = MorphController::new(0.5, 23.4);
        morph.set_mode(MorphMode::Globe);
        morph.advance(1000.0);
        assert_eq!(morph.blend(), 1.0);
        morph.set_mode(MorphMode::Flat);
        morph.advance(1000.0);
        assert_eq!(morph.blend(), 0.0);
    }

    #[test]
    fn test_reversal_has_no_jump() {
        let mut morph = MorphController::new(0.5, 23.4);
        morph.set_mode(MorphMode::Globe);
        for _ in 0..30 {
            morph.advance(DT);
        }
        let before = morph.blend();
        assert!(before > 0.0 && before < 1.0);

        assert_eq!(morph.toggle_mode(), MorphMode::Flat);
        assert_eq!(morph.blend(), before);

        morph.advance(DT);
        let after = morph.blend();
        assert!(after < before);
        assert!((before - after - 0.5 * DT).abs() < EPSILON);
    }

    #[test]
    fn test_flat_mode_rotation_is_identity() {
        let mut morph = MorphController::new(0.5, 23.4);
        for _ in 0..10 {
            morph.advance(DT);
        }
        assert!(morph.rotation().angle_between(Quat::IDENTITY) < ANGLE_EPSILON);
    }

    #[test]
    fn test_globe_rotation_includes_tilt_and_spin() {
        let mut morph = MorphController::new(0.5, 23.4);
        morph.set_mode(MorphMode::Globe);
        morph.advance(10.0);
        // Blend reached 1 this frame; the next frame uses it fully
        morph.advance(DT);
        let spin = Quat::from_rotation_y(0.5 * 10.0) * Quat::from_rotation_y(0.5 * DT);
        let expected = morph.axial_tilt() * spin;
        assert!(morph.rotation().angle_between(expected) < ANGLE_EPSILON);
    }

    #[test]
    fn test_return_to_flat_unwinds_rotation() {
        let mut morph = MorphController::new(0.5, 23.4);
        morph.set_mode(MorphMode::Globe);
        for _ in 0..240 {
            morph.advance(DT);
        }
        morph.set_mode(MorphMode::Flat);
        for _ in 0..240 {
            morph.advance(DT);
        }
        assert_eq!(morph.blend(), 0.0);
        assert!(morph.rotation().angle_between(Quat::IDENTITY) < ANGLE_EPSILON);
    }

    fn largest_orientation_step(morph: &mut MorphController, frames: usize) -> f32 {
        let mut previous = morph.rotation();
        let mut largest = 0.0_f32;
        for _ in 0..frames {
            morph.advance(DT);
            largest = largest.max(morph.rotation().angle_between(previous));
            previous = morph.rotation();
        }
        largest
    }

    #[test]
    fn test_orientation_is_continuous_across_morph_cycles() {
        let mut morph = MorphController::new(0.5, 23.4);
        // Per frame: the spin step, plus the blend step applied to the tilt and a
        // wrapped spin angle of at most PI
        let bound = 0.5 * DT * (1.0 + PI + 23.4_f32.to_radians()) + ANGLE_EPSILON;

        // Long enough on the globe for the spin to pass PI, then back and forth
        for (mode, frames) in [
            (MorphMode::Globe, 330),
            (MorphMode::Flat, 180),
            (MorphMode::Globe, 600),
            (MorphMode::Flat, 60),
            (MorphMode::Globe, 90),
            (MorphMode::Flat, 180),
        ] {
            morph.set_mode(mode);
            let largest = largest_orientation_step(&mut morph, frames);
            assert!(
                largest < bound,
                "orientation moved {largest} rad in one frame in {mode:?} mode"
            );
        }
        assert_eq!(morph.blend(), 0.0);
        assert!(morph.rotation().angle_between(Quat::IDENTITY) < ANGLE_EPSILON);
    }

    #[test]
    fn test_spin_wraps_only_when_fully_globe() {
        let mut morph = MorphController::new(0.5, 23.4);
        morph.set_mode(MorphMode::Globe);
        for _ in 0..900 {
            morph.advance(DT);
        }
        assert_eq!(morph.blend(), 1.0);
        assert!(morph.spin_angle.abs() <= PI);
        let expected = morph.axial_tilt() * Quat::from_rotation_y(morph.spin_angle);
        morph.set_mode(MorphMode::Flat);
        // First flat frame still uses the full blend
        morph.advance(DT);
        assert!(morph.rotation().angle_between(expected) < ANGLE_EPSILON);
    }

    #[test]
    fn test_axial_tilt_leans_north_pole() {
        let morph = MorphController::new(0.5, 23.4);
        let pole = morph.axial_tilt() * Vec3::Y;
        assert!((pole.angle_between(Vec3::Y) - 23.4_f32.to_radians()).abs() < EPSILON);
        assert!(pole.x > 0.0);
    }
}

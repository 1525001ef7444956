//! Camera presets and orbit limits
//!
//! The orbit-controls collaborator owns the actual camera; this module only
//! carries the positions, limits, and field of view it should be driven
//! with.

use glam::Vec3;

/// Fixed viewpoints the UI can jump to, positioned relative to the orbit
/// target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraPreset {
    Front,
    Rear,
    Left,
    Right,
    Top,
    Cinematic,
}

impl CameraPreset {
    pub fn position(self) -> Vec3 {
        match self {
            CameraPreset::Front => Vec3::new(0.0, 1.0, 6.0),
            CameraPreset::Rear => Vec3::new(0.0, 1.0, -6.0),
            CameraPreset::Left => Vec3::new(6.0, 1.0, 0.0),
            CameraPreset::Right => Vec3::new(-6.0, 1.0, 0.0),
            CameraPreset::Top => Vec3::new(0.0, 8.0, 0.0),
            CameraPreset::Cinematic => Vec3::new(4.0, 3.0, 5.0),
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "front" => Some(CameraPreset::Front),
            "rear" => Some(CameraPreset::Rear),
            "left" => Some(CameraPreset::Left),
            "right" => Some(CameraPreset::Right),
            "top" => Some(CameraPreset::Top),
            "cinematic" => Some(CameraPreset::Cinematic),
            _ => None,
        }
    }
}

/// Constraints handed to the orbit controls
#[derive(Debug, Clone, Copy)]
pub struct OrbitLimits {
    pub min_distance: f32,
    pub max_distance: f32,
    /// Slightly past horizontal to allow a peek under the car
    pub max_polar_angle: f32,
    pub damping_factor: f32,
}

impl Default for OrbitLimits {
    fn default() -> Self {
        OrbitLimits {
            min_distance: 2.0,
            max_distance: 20.0,
            max_polar_angle: std::f32::consts::FRAC_PI_2 + 0.1,
            damping_factor: 0.05,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CameraRig {
    pub position: Vec3,
    pub target: Vec3,
    pub fov: f32,
    pub limits: OrbitLimits,
}

impl Default for CameraRig {
    fn default() -> Self {
        CameraRig {
            position: Vec3::new(5.0, 2.0, 6.0),
            target: Vec3::new(0.0, 0.5, 0.0),
            fov: 45.0,
            limits: OrbitLimits::default(),
        }
    }
}

impl CameraRig {
    pub fn apply_preset(&mut self, preset: CameraPreset) {
        self.position = preset.position();
    }

    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov;
    }

    /// Back to the default framing
    pub fn reset(&mut self) {
        *self = CameraRig {
            limits: self.limits,
            ..CameraRig::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_positions() {
        assert_eq!(CameraPreset::Front.position(), Vec3::new(0.0, 1.0, 6.0));
        assert_eq!(CameraPreset::Top.position(), Vec3::new(0.0, 8.0, 0.0));
    }

    #[test]
    fn test_preset_parse() {
        assert_eq!(CameraPreset::parse("cinematic"), Some(CameraPreset::Cinematic));
        assert_eq!(CameraPreset::parse("selfie"), None);
    }

    #[test]
    fn test_apply_preset_moves_camera_only() {
        let mut rig = CameraRig::default();
        rig.apply_preset(CameraPreset::Rear);
        assert_eq!(rig.position, Vec3::new(0.0, 1.0, -6.0));
        assert_eq!(rig.target, Vec3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn test_reset_restores_default_framing() {
        let mut rig = CameraRig::default();
        rig.apply_preset(CameraPreset::Top);
        rig.set_fov(70.0);
        rig.reset();

        assert_eq!(rig.position, Vec3::new(5.0, 2.0, 6.0));
        assert!((rig.fov - 45.0).abs() < 0.0001);
    }

    #[test]
    fn test_orbit_limits_allow_slight_under_view() {
        let limits = OrbitLimits::default();
        assert!(limits.max_polar_angle > std::f32::consts::FRAC_PI_2);
        assert!(limits.min_distance < limits.max_distance);
    }
}

//! Light sources
//!
//! A `Light` is plain data: a color, an intensity, an object transform and a
//! variant-specific payload. Mutation goes through `LightRig` so observers (the
//! helper among them) hear about every change.

use std::f32::consts::PI;

use crate::foundation::math::{utils, Mat4, Quat, Transform, Vec3};
use crate::render::color::Color;

/// Variant-specific light parameters
#[derive(Debug, Clone, PartialEq)]
pub enum LightKind {
    /// Uniform light from every direction; position and rotation are ignored
    Ambient,

    /// Parallel rays travelling from `position` toward `target`
    Directional {
        /// World-space point the light aims at
        target: Vec3,
    },

    /// Omnidirectional light at `position`
    Point {
        /// Cutoff range; 0 means unbounded
        distance: f32,
        /// Falloff exponent; 2 is physically correct
        decay: f32,
    },

    /// Rectangular emitter in the light's local XY plane, emitting along local -Z
    RectArea {
        /// Extent along local X
        width: f32,
        /// Extent along local Y
        height: f32,
    },
}

/// Light source
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    /// Light color
    pub color: Color,
    /// Light intensity
    pub intensity: f32,
    /// Object position in world space
    pub position: Vec3,
    /// Object rotation as XYZ Euler angles in radians
    pub rotation: Vec3,
    /// Variant payload
    pub kind: LightKind,
}

impl Light {
    fn with_kind(kind: LightKind, color: Color, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            kind,
        }
    }

    /// Create an ambient light
    pub fn ambient(color: Color, intensity: f32) -> Self {
        Self::with_kind(LightKind::Ambient, color, intensity)
    }

    /// Create a directional light aimed at the origin
    pub fn directional(color: Color, intensity: f32) -> Self {
        Self::with_kind(LightKind::Directional { target: Vec3::zeros() }, color, intensity)
    }

    /// Create a point light with unbounded range and physical falloff
    pub fn point(color: Color, intensity: f32) -> Self {
        Self::with_kind(LightKind::Point { distance: 0.0, decay: 2.0 }, color, intensity)
    }

    /// Create a rectangular area light
    pub fn rect_area(color: Color, intensity: f32, width: f32, height: f32) -> Self {
        Self::with_kind(LightKind::RectArea { width, height }, color, intensity)
    }

    /// Set the position (builder form)
    #[must_use]
    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Short variant name
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            LightKind::Ambient => "ambient",
            LightKind::Directional { .. } => "directional",
            LightKind::Point { .. } => "point",
            LightKind::RectArea { .. } => "rect_area",
        }
    }

    /// Rotation as a quaternion
    pub fn orientation(&self) -> Quat {
        utils::euler_xyz(self.rotation)
    }

    /// Object-to-world transform (unit scale)
    pub fn transform(&self) -> Transform {
        Transform::from_position_rotation(self.position, self.orientation())
    }

    /// Object-to-world matrix
    pub fn world_matrix(&self) -> Mat4 {
        self.transform().to_matrix()
    }

    /// Directional target, if this is a directional light
    pub fn target(&self) -> Option<Vec3> {
        match self.kind {
            LightKind::Directional { target } => Some(target),
            _ => None,
        }
    }

    /// Mutable directional target
    pub fn target_mut(&mut self) -> Option<&mut Vec3> {
        match &mut self.kind {
            LightKind::Directional { target } => Some(target),
            _ => None,
        }
    }

    /// Luminous power in lumens for a point light (`intensity * 4π`)
    pub fn power(&self) -> Option<f32> {
        matches!(self.kind, LightKind::Point { .. }).then(|| self.intensity * 4.0 * PI)
    }

    /// Set luminous power; ignored for non-point lights
    pub fn set_power(&mut self, power: f32) {
        if matches!(self.kind, LightKind::Point { .. }) {
            self.intensity = power / (4.0 * PI);
        }
    }

    /// Falloff exponent for a point light
    pub fn decay(&self) -> Option<f32> {
        match self.kind {
            LightKind::Point { decay, .. } => Some(decay),
            _ => None,
        }
    }

    /// Set falloff exponent; ignored for non-point lights
    pub fn set_decay(&mut self, value: f32) {
        if let LightKind::Point { decay, .. } = &mut self.kind {
            *decay = value;
        }
    }

    /// Area light extent as (width, height)
    pub fn extent(&self) -> Option<(f32, f32)> {
        match self.kind {
            LightKind::RectArea { width, height } => Some((width, height)),
            _ => None,
        }
    }

    /// Set area light width; ignored for other variants
    pub fn set_width(&mut self, value: f32) {
        if let LightKind::RectArea { width, .. } = &mut self.kind {
            *width = value;
        }
    }

    /// Set area light height; ignored for other variants
    pub fn set_height(&mut self, value: f32) {
        if let LightKind::RectArea { height, .. } = &mut self.kind {
            *height = value;
        }
    }

    /// Direction light travels in, for lights that have one
    ///
    /// Directional: from position toward target. Area: local -Z rotated into world.
    pub fn direction(&self) -> Option<Vec3> {
        match self.kind {
            LightKind::Directional { target } => (target - self.position).try_normalize(1e-6),
            LightKind::RectArea { .. } => Some(self.orientation() * Vec3::new(0.0, 0.0, -1.0)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_power_is_intensity_over_full_sphere() {
        let mut light = Light::point(Color::WHITE, 1.0);
        assert_relative_eq!(light.power().unwrap(), 4.0 * PI);

        light.set_power(800.0);
        assert_relative_eq!(light.intensity, 800.0 / (4.0 * PI));
        assert_relative_eq!(light.power().unwrap(), 800.0, epsilon = 1e-3);
    }

    #[test]
    fn test_variant_setters_ignore_other_kinds() {
        let mut light = Light::ambient(Color::WHITE, 1.0);
        light.set_power(100.0);
        light.set_width(3.0);
        light.set_decay(1.0);

        assert_eq!(light, Light::ambient(Color::WHITE, 1.0));
        assert!(light.power().is_none());
        assert!(light.target().is_none());
    }

    #[test]
    fn test_directional_direction_points_at_target() {
        let mut light = Light::directional(Color::WHITE, 1.0).at(Vec3::new(0.0, 10.0, 0.0));
        *light.target_mut().unwrap() = Vec3::new(0.0, 0.0, 0.0);

        assert_relative_eq!(light.direction().unwrap(), Vec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn test_directional_direction_undefined_when_target_coincides() {
        let mut light = Light::directional(Color::WHITE, 1.0).at(Vec3::new(1.0, 1.0, 1.0));
        *light.target_mut().unwrap() = Vec3::new(1.0, 1.0, 1.0);
        assert!(light.direction().is_none());
    }

    #[test]
    fn test_rect_area_faces_down_after_minus_ninety_about_x() {
        let mut light = Light::rect_area(Color::WHITE, 5.0, 12.0, 4.0);
        light.rotation.x = utils::deg_to_rad(-90.0);

        assert_relative_eq!(light.direction().unwrap(), Vec3::new(0.0, -1.0, 0.0), epsilon = 1e-5);
    }
}

//! Light helpers
//!
//! Lights are invisible; helpers are line-geometry stand-ins that show where a light
//! sits, where it points and how large it is. A helper caches world-space geometry
//! computed from its light and goes stale when the light moves until `update` runs
//! again. `LightRig` calls `update` through the observer path on every spatial change.

use crate::events::{LightChange, LightObserver};
use crate::foundation::math::Vec3;
use crate::scene::light::{Light, LightKind};

/// Line segment in world space
pub type Segment = [Vec3; 2];

const DIRECTIONAL_PLANE_SIZE: f32 = 1.0;
const POINT_HELPER_SIZE: f32 = 1.0;

/// Square at the light plus a line to its target
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalHelper {
    /// Light position
    pub origin: Vec3,
    /// Target position
    pub target: Vec3,
    /// Unit vector from origin toward target; zero when they coincide
    pub direction: Vec3,
    /// Distance from origin to target
    pub length: f32,
    /// Corners of the square facing the target, counter-clockwise
    pub plane: [Vec3; 4],
}

/// Octahedron around the light position
#[derive(Debug, Clone, PartialEq)]
pub struct PointHelper {
    /// Light position
    pub center: Vec3,
    /// Distance from center to each octahedron vertex
    pub size: f32,
}

/// Outline of the emitting rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct RectAreaHelper {
    /// Light position
    pub center: Vec3,
    /// Light rotation, XYZ Euler radians
    pub rotation: Vec3,
    /// Width and height
    pub extent: (f32, f32),
    /// World-space corners, counter-clockwise seen from the emitting side's back
    pub corners: [Vec3; 4],
    /// Emission direction (local -Z in world space)
    pub normal: Vec3,
}

/// Helper geometry for one light
#[derive(Debug, Clone, PartialEq)]
pub enum LightHelper {
    /// Helper for a directional light
    Directional(DirectionalHelper),
    /// Helper for a point light
    Point(PointHelper),
    /// Helper for a rectangular area light
    RectArea(RectAreaHelper),
}

impl LightHelper {
    /// Create the helper matching `light`'s variant, or `None` for ambient lights
    ///
    /// The returned helper has not been synchronised yet; call `update`.
    pub fn for_light(light: &Light) -> Option<Self> {
        match light.kind {
            LightKind::Ambient => None,
            LightKind::Directional { .. } => Some(Self::Directional(DirectionalHelper {
                origin: Vec3::zeros(),
                target: Vec3::zeros(),
                direction: Vec3::zeros(),
                length: 0.0,
                plane: [Vec3::zeros(); 4],
            })),
            LightKind::Point { .. } => Some(Self::Point(PointHelper {
                center: Vec3::zeros(),
                size: POINT_HELPER_SIZE,
            })),
            LightKind::RectArea { .. } => Some(Self::RectArea(RectAreaHelper {
                center: Vec3::zeros(),
                rotation: Vec3::zeros(),
                extent: (0.0, 0.0),
                corners: [Vec3::zeros(); 4],
                normal: Vec3::new(0.0, 0.0, -1.0),
            })),
        }
    }

    /// Light properties this helper visualizes
    pub fn watches(&self) -> LightChange {
        match self {
            Self::Directional(_) => LightChange::POSITION | LightChange::TARGET,
            Self::Point(_) => LightChange::POSITION,
            Self::RectArea(_) => LightChange::POSITION | LightChange::ROTATION | LightChange::EXTENT,
        }
    }

    /// Recompute world-space geometry from the light's current state
    ///
    /// Idempotent. A helper paired with a light of a different variant is left as is.
    pub fn update(&mut self, light: &Light) {
        match (self, &light.kind) {
            (Self::Directional(helper), LightKind::Directional { target }) => {
                helper.update(light.position, *target);
            }
            (Self::Point(helper), LightKind::Point { .. }) => {
                helper.center = light.position;
            }
            (Self::RectArea(helper), LightKind::RectArea { width, height }) => {
                helper.update(light, *width, *height);
            }
            (helper, _) => {
                log::warn!("{} helper does not match {} light", helper.kind_name(), light.kind_name());
            }
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Self::Directional(_) => "directional",
            Self::Point(_) => "point",
            Self::RectArea(_) => "rect_area",
        }
    }

    /// Position the helper is drawn at
    pub fn position(&self) -> Vec3 {
        match self {
            Self::Directional(helper) => helper.origin,
            Self::Point(helper) => helper.center,
            Self::RectArea(helper) => helper.center,
        }
    }

    /// Line segments to draw
    pub fn segments(&self) -> Vec<Segment> {
        match self {
            Self::Directional(helper) => {
                let mut lines = outline(&helper.plane);
                lines.push([helper.origin, helper.target]);
                lines
            }
            Self::Point(helper) => helper.segments(),
            Self::RectArea(helper) => outline(&helper.corners),
        }
    }

    /// Directional helper, if this is one
    pub fn as_directional(&self) -> Option<&DirectionalHelper> {
        match self {
            Self::Directional(helper) => Some(helper),
            _ => None,
        }
    }

    /// Point helper, if this is one
    pub fn as_point(&self) -> Option<&PointHelper> {
        match self {
            Self::Point(helper) => Some(helper),
            _ => None,
        }
    }

    /// Area light helper, if this is one
    pub fn as_rect_area(&self) -> Option<&RectAreaHelper> {
        match self {
            Self::RectArea(helper) => Some(helper),
            _ => None,
        }
    }
}

impl LightObserver for LightHelper {
    fn interests(&self) -> LightChange {
        self.watches()
    }

    fn light_changed(&mut self, light: &Light, _change: LightChange) {
        self.update(light);
    }
}

impl DirectionalHelper {
    fn update(&mut self, origin: Vec3, target: Vec3) {
        let offset = target - origin;
        self.origin = origin;
        self.target = target;
        self.length = offset.norm();
        self.direction = offset.try_normalize(1e-6).unwrap_or_else(Vec3::zeros);

        let (right, up) = facing_basis(self.direction);
        let half = DIRECTIONAL_PLANE_SIZE * 0.5;
        self.plane = [
            origin - right * half - up * half,
            origin + right * half - up * half,
            origin + right * half + up * half,
            origin - right * half + up * half,
        ];
    }
}

impl PointHelper {
    fn segments(&self) -> Vec<Segment> {
        let c = self.center;
        let s = self.size;
        let ring = [
            c + Vec3::new(s, 0.0, 0.0),
            c + Vec3::new(0.0, 0.0, s),
            c + Vec3::new(-s, 0.0, 0.0),
            c + Vec3::new(0.0, 0.0, -s),
        ];
        let top = c + Vec3::new(0.0, s, 0.0);
        let bottom = c - Vec3::new(0.0, s, 0.0);

        let mut lines = outline(&ring);
        for vertex in ring {
            lines.push([vertex, top]);
            lines.push([vertex, bottom]);
        }
        lines
    }
}

impl RectAreaHelper {
    fn update(&mut self, light: &Light, width: f32, height: f32) {
        let transform = light.transform();
        let (hw, hh) = (width * 0.5, height * 0.5);

        self.center = light.position;
        self.rotation = light.rotation;
        self.extent = (width, height);
        self.corners = [
            transform.transform_point(Vec3::new(-hw, -hh, 0.0)),
            transform.transform_point(Vec3::new(hw, -hh, 0.0)),
            transform.transform_point(Vec3::new(hw, hh, 0.0)),
            transform.transform_point(Vec3::new(-hw, hh, 0.0)),
        ];
        self.normal = transform.rotation * Vec3::new(0.0, 0.0, -1.0);
    }
}

/// Right and up vectors of a square facing along `forward`
fn facing_basis(forward: Vec3) -> (Vec3, Vec3) {
    if forward.norm_squared() < 1e-12 {
        return (Vec3::x(), Vec3::y());
    }
    let reference = if forward.y.abs() > 0.999 { Vec3::z() } else { Vec3::y() };
    let right = forward.cross(&reference).normalize();
    let up = right.cross(&forward);
    (right, up)
}

fn outline(corners: &[Vec3; 4]) -> Vec<Segment> {
    (0..4).map(|i| [corners[i], corners[(i + 1) % 4]]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::utils;
    use crate::render::color::Color;
    use approx::assert_relative_eq;

    fn directional() -> Light {
        let mut light = Light::directional(Color::WHITE, 1.0).at(Vec3::new(0.0, 10.0, 0.0));
        *light.target_mut().unwrap() = Vec3::new(-5.0, 0.0, 0.0);
        light
    }

    #[test]
    fn test_ambient_has_no_helper() {
        assert!(LightHelper::for_light(&Light::ambient(Color::WHITE, 1.0)).is_none());
    }

    #[test]
    fn test_helper_stale_until_updated() {
        let light = directional();
        let mut helper = LightHelper::for_light(&light).unwrap();
        assert_relative_eq!(helper.position(), Vec3::zeros());

        helper.update(&light);
        assert_relative_eq!(helper.position(), light.position);
    }

    #[test]
    fn test_directional_plane_faces_target() {
        let light = directional();
        let mut helper = LightHelper::for_light(&light).unwrap();
        helper.update(&light);

        let directional = helper.as_directional().unwrap();
        assert_relative_eq!(directional.length, 125.0_f32.sqrt(), epsilon = 1e-4);

        let edge_a = directional.plane[1] - directional.plane[0];
        let edge_b = directional.plane[3] - directional.plane[0];
        assert_relative_eq!(edge_a.dot(&directional.direction), 0.0, epsilon = 1e-5);
        assert_relative_eq!(edge_b.dot(&directional.direction), 0.0, epsilon = 1e-5);
        assert_relative_eq!(edge_a.norm(), 1.0, epsilon = 1e-5);

        // 4 plane edges + the target line
        assert_eq!(helper.segments().len(), 5);
    }

    #[test]
    fn test_directional_straight_down_uses_fallback_basis() {
        let mut light = directional();
        *light.target_mut().unwrap() = Vec3::new(0.0, 0.0, 0.0);
        let mut helper = LightHelper::for_light(&light).unwrap();
        helper.update(&light);

        let plane = helper.as_directional().unwrap().plane;
        assert!(plane.iter().all(|corner| corner.iter().all(|c| c.is_finite())));
        assert_relative_eq!((plane[1] - plane[0]).norm(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_point_helper_octahedron() {
        let light = Light::point(Color::WHITE, 1.0).at(Vec3::new(0.0, 10.0, 0.0));
        let mut helper = LightHelper::for_light(&light).unwrap();
        helper.update(&light);

        let segments = helper.segments();
        assert_eq!(segments.len(), 12);
        for [a, b] in segments {
            assert_relative_eq!((a - b).norm(), 2.0_f32.sqrt(), epsilon = 1e-5);
        }
    }

    #[test]
    fn test_rect_area_corners_follow_rotation() {
        let mut light = Light::rect_area(Color::WHITE, 5.0, 12.0, 4.0).at(Vec3::new(0.0, 10.0, 0.0));
        light.rotation.x = utils::deg_to_rad(-90.0);
        let mut helper = LightHelper::for_light(&light).unwrap();
        helper.update(&light);

        let rect = helper.as_rect_area().unwrap();
        for corner in rect.corners {
            assert_relative_eq!(corner.y, 10.0, epsilon = 1e-4);
        }
        assert_relative_eq!((rect.corners[1] - rect.corners[0]).norm(), 12.0, epsilon = 1e-4);
        assert_relative_eq!((rect.corners[3] - rect.corners[0]).norm(), 4.0, epsilon = 1e-4);
        assert_relative_eq!(rect.normal, Vec3::new(0.0, -1.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_mismatched_helper_left_untouched() {
        let point = Light::point(Color::WHITE, 1.0).at(Vec3::new(1.0, 2.0, 3.0));
        let mut helper = LightHelper::for_light(&point).unwrap();
        let before = helper.clone();

        helper.update(&directional());
        assert_eq!(helper, before);
    }

    #[test]
    fn test_helper_watches_spatial_only() {
        for light in [directional(), Light::point(Color::WHITE, 1.0), Light::rect_area(Color::WHITE, 1.0, 1.0, 1.0)] {
            let helper = LightHelper::for_light(&light).unwrap();
            assert!(LightChange::SPATIAL.contains(helper.watches()));
            assert!(!helper.watches().intersects(LightChange::COLOR | LightChange::INTENSITY));
        }
    }
}

//! Orbit view controller
//!
//! Keeps the camera on a sphere around a target point. Pointer drags rotate (left
//! button) or pan (right button); scrolling dollies toward or away from the target.
//! Like the camera's projection, changes only reach the camera on `update`.

use crate::foundation::math::Vec3;
use crate::render::camera::Camera;

const MIN_POLAR: f32 = 1e-3;

/// Orbit controller state in spherical coordinates around `target`
#[derive(Debug, Clone)]
pub struct OrbitControls {
    /// Point the camera orbits and looks at
    pub target: Vec3,
    /// Distance from target
    radius: f32,
    /// Angle from +Y, in (0, π)
    polar: f32,
    /// Angle around +Y measured from +Z toward +X
    azimuth: f32,
    /// Radians of rotation per pixel of drag
    pub rotate_speed: f32,
    /// Dolly factor per scroll step
    pub zoom_speed: f32,
    /// Closest allowed distance
    pub min_distance: f32,
    /// Furthest allowed distance
    pub max_distance: f32,
}

impl OrbitControls {
    /// Create a controller for `camera`, orbiting the origin
    pub fn new(camera: &Camera) -> Self {
        let mut controls = Self {
            target: Vec3::zeros(),
            radius: 1.0,
            polar: std::f32::consts::FRAC_PI_2,
            azimuth: 0.0,
            rotate_speed: 0.005,
            zoom_speed: 0.95,
            min_distance: 0.5,
            max_distance: 90.0,
        };
        controls.sync_from_camera(camera);
        controls
    }

    /// Re-derive spherical coordinates from the camera's position relative to `target`
    pub fn sync_from_camera(&mut self, camera: &Camera) {
        let offset = camera.position - self.target;
        self.radius = offset.norm().max(self.min_distance);
        self.polar = (offset.y / self.radius).clamp(-1.0, 1.0).acos();
        self.azimuth = offset.x.atan2(offset.z);
    }

    /// Move the orbit center, keeping the camera where it is
    pub fn set_target(&mut self, target: Vec3, camera: &Camera) {
        self.target = target;
        self.sync_from_camera(camera);
    }

    /// Rotate by a pointer drag of `(dx, dy)` pixels
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.azimuth -= dx * self.rotate_speed;
        self.polar = (self.polar - dy * self.rotate_speed)
            .clamp(MIN_POLAR, std::f32::consts::PI - MIN_POLAR);
    }

    /// Pan target and camera together by a drag of `(dx, dy)` pixels
    pub fn pan(&mut self, dx: f32, dy: f32, camera: &Camera) {
        let forward = (self.target - camera.position).try_normalize(1e-6).unwrap_or_else(|| -Vec3::z());
        let right = forward.cross(&camera.up).try_normalize(1e-6).unwrap_or_else(Vec3::x);
        let up = right.cross(&forward);
        // Scale so a drag moves the scene roughly with the pointer at the target's depth
        let scale = self.radius * (camera.fov * 0.5).tan() / 360.0;
        self.target += (-right * dx + up * dy) * scale;
    }

    /// Dolly by scroll steps; positive steps move closer
    pub fn dolly(&mut self, steps: f32) {
        self.radius = (self.radius * self.zoom_speed.powf(steps)).clamp(self.min_distance, self.max_distance);
    }

    /// Current distance from target
    pub fn distance(&self) -> f32 {
        self.radius
    }

    /// Write the orbit position into the camera and aim it at `target`
    pub fn update(&self, camera: &mut Camera) {
        let offset = Vec3::new(
            self.radius * self.polar.sin() * self.azimuth.sin(),
            self.radius * self.polar.cos(),
            self.radius * self.polar.sin() * self.azimuth.cos(),
        );
        camera.position = self.target + offset;
        camera.look_at(self.target);
    }
}

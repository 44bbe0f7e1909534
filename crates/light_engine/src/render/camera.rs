//! # Perspective Camera
//!
//! Camera state for the demo scenes. The projection matrix is cached and only
//! recomputed when `update_projection_matrix` is called, so changing `aspect` has no
//! visible effect until the render loop refreshes the projection after a resize.

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};

/// 3D perspective camera
///
/// Uses a right-handed Y-up coordinate system. The view matrix is derived on demand
/// from `position`, `target` and `up`; the projection matrix is cached.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,

    /// Point the camera is looking at in world space
    pub target: Vec3,

    /// Up vector for camera orientation (typically [0, 1, 0])
    pub up: Vec3,

    /// Vertical field of view in radians
    pub fov: f32,

    /// Aspect ratio (width / height)
    pub aspect: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,

    projection: Mat4,
}

impl Camera {
    /// Create a perspective camera looking at the origin
    ///
    /// # Arguments
    /// * `position` - Camera position in world space
    /// * `fov_degrees` - Vertical field of view in degrees
    /// * `aspect` - Aspect ratio (width / height) of the viewport
    /// * `near` - Distance to near clipping plane (must be > 0)
    /// * `far` - Distance to far clipping plane (must be > near)
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            position,
            target: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
            projection: Mat4::identity(),
        };
        camera.update_projection_matrix();
        camera
    }

    /// Point the camera at `target`, keeping the current up vector
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
        log::trace!("Camera look_at target: {:?}", target);
    }

    /// Update the aspect ratio; takes effect after `update_projection_matrix`
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > 0.01 {
            log::info!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// Recompute the cached projection matrix from fov, aspect and clip planes
    pub fn update_projection_matrix(&mut self) {
        self.projection = Mat4::perspective(self.fov, self.aspect, self.near, self.far);
    }

    /// Cached projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// World-to-view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.target, self.up)
    }

    /// Combined projection * view matrix
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_projection_cached_until_updated() {
        let mut camera = Camera::perspective(Vec3::new(0.0, 10.0, 20.0), 45.0, 2.0, 0.1, 100.0);
        let before = camera.projection_matrix();

        camera.set_aspect_ratio(1.0);
        assert_relative_eq!(camera.projection_matrix(), before);

        camera.update_projection_matrix();
        assert!((camera.projection_matrix()[(0, 0)] - before[(0, 0)]).abs() > 1e-3);
        assert_relative_eq!(
            camera.projection_matrix()[(0, 0)],
            camera.projection_matrix()[(1, 1)],
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_view_matrix_moves_target_onto_negative_z() {
        let mut camera = Camera::perspective(Vec3::new(0.0, 10.0, 20.0), 45.0, 2.0, 0.1, 100.0);
        camera.look_at(Vec3::new(0.0, 5.0, 0.0));

        let target_in_view = camera.view_matrix().transform_point(&camera.target.into());
        assert_relative_eq!(target_in_view.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(target_in_view.y, 0.0, epsilon = 1e-4);
        assert!(target_in_view.z < 0.0);
    }
}

//! Per-frame render loop
//!
//! Each frame keeps the backing store in step with the displayed size, fixes the
//! camera aspect ratio after a resize and redraws the scene. The loop has no terminal
//! state; the host stops calling `frame` when its window closes.

use crate::foundation::time::FrameTimer;
use crate::render::camera::Camera;
use crate::render::draw_list::{RenderError, SceneRenderer};
use crate::render::surface::DisplaySurface;
use crate::scene::graph::Scene;

const FPS_REPORT_INTERVAL: f32 = 5.0;

/// Loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// No frame drawn yet
    Idle,
    /// At least one frame has been scheduled
    Rendering,
}

/// Outcome of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// The backing store was resized this frame
    pub resized: bool,
    /// A draw was issued (false only while the target has zero area)
    pub drawn: bool,
    /// Average frame rate, reported every few seconds
    pub fps: Option<f32>,
}

/// Resize the backing store to the displayed size if they differ
///
/// Returns whether a resize happened. Calling it again without a display change
/// returns false.
pub fn resize_to_display_size<S: DisplaySurface + ?Sized>(surface: &mut S) -> bool {
    let display = surface.display_size();
    if surface.backing_size() == display {
        return false;
    }
    surface.set_backing_size(display.0, display.1);
    true
}

/// Drives frames for one surface
#[derive(Debug)]
pub struct RenderLoop {
    state: LoopState,
    timer: FrameTimer,
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderLoop {
    /// Create an idle loop
    pub fn new() -> Self {
        Self {
            state: LoopState::Idle,
            timer: FrameTimer::new(),
        }
    }

    /// Current state
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Frame timing
    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    /// Run one frame
    pub fn frame<S, R>(
        &mut self,
        surface: &mut S,
        renderer: &mut R,
        scene: &Scene,
        camera: &mut Camera,
    ) -> Result<FrameReport, RenderError>
    where
        S: DisplaySurface + ?Sized,
        R: SceneRenderer + ?Sized,
    {
        if self.state == LoopState::Idle {
            log::info!("Render loop started");
            self.state = LoopState::Rendering;
        }
        self.timer.tick();

        let resized = resize_to_display_size(surface);
        let (width, height) = surface.backing_size();
        if resized {
            renderer.resize(width, height);
            // Minimized or collapsed windows report a zero dimension
            if width > 0 && height > 0 {
                #[allow(clippy::cast_precision_loss)]
                let aspect = width as f32 / height as f32;
                camera.set_aspect_ratio(aspect);
                camera.update_projection_matrix();
            }
        }

        let drawn = width > 0 && height > 0;
        if drawn {
            renderer.render(scene, camera)?;
        } else {
            log::trace!("Skipping draw into {}x{} target", width, height);
        }

        let fps = self.timer.take_fps_report(FPS_REPORT_INTERVAL);
        if let Some(fps) = fps {
            log::debug!("{:.1} fps", fps);
        }

        Ok(FrameReport { resized, drawn, fps })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::render::color::Color;
    use crate::render::draw_list::DrawListRenderer;
    use approx::assert_relative_eq;

    struct MockSurface {
        display: (u32, u32),
        backing: (u32, u32),
        resizes: u32,
    }

    impl MockSurface {
        fn new(width: u32, height: u32) -> Self {
            Self {
                display: (width, height),
                backing: (0, 0),
                resizes: 0,
            }
        }
    }

    impl DisplaySurface for MockSurface {
        fn display_size(&self) -> (u32, u32) {
            self.display
        }

        fn backing_size(&self) -> (u32, u32) {
            self.backing
        }

        fn set_backing_size(&mut self, width: u32, height: u32) {
            self.backing = (width, height);
            self.resizes += 1;
        }
    }

    fn camera() -> Camera {
        Camera::perspective(Vec3::new(0.0, 10.0, 20.0), 45.0, 2.0, 0.1, 100.0)
    }

    #[test]
    fn test_resize_is_idempotent() {
        let mut surface = MockSurface::new(640, 480);
        assert!(resize_to_display_size(&mut surface));
        assert!(!resize_to_display_size(&mut surface));
        assert_eq!(surface.backing, (640, 480));
        assert_eq!(surface.resizes, 1);

        surface.display = (800, 400);
        assert!(resize_to_display_size(&mut surface));
        assert!(!resize_to_display_size(&mut surface));
        assert_eq!(surface.resizes, 2);
    }

    #[test]
    fn test_frame_resizes_camera_then_redraws() {
        let mut surface = MockSurface::new(800, 400);
        let mut renderer = DrawListRenderer::new();
        let scene = Scene::new(Color::BLACK);
        let mut camera = camera();
        let mut render_loop = RenderLoop::new();
        assert_eq!(render_loop.state(), LoopState::Idle);

        let first = render_loop.frame(&mut surface, &mut renderer, &scene, &mut camera).unwrap();
        assert!(first.resized);
        assert!(first.drawn);
        assert_eq!(render_loop.state(), LoopState::Rendering);
        assert_eq!(renderer.extent(), (800, 400));
        assert_relative_eq!(camera.aspect, 2.0);

        let second = render_loop.frame(&mut surface, &mut renderer, &scene, &mut camera).unwrap();
        assert!(!second.resized);
        assert!(second.drawn);
        assert_eq!(renderer.frame_count(), 2);
    }

    #[test]
    fn test_minimized_window_keeps_aspect() {
        let mut surface = MockSurface::new(1000, 500);
        let mut renderer = DrawListRenderer::new();
        let scene = Scene::new(Color::BLACK);
        let mut camera = camera();
        let mut render_loop = RenderLoop::new();
        render_loop.frame(&mut surface, &mut renderer, &scene, &mut camera).unwrap();

        surface.display = (1000, 0);
        let report = render_loop.frame(&mut surface, &mut renderer, &scene, &mut camera).unwrap();
        assert!(report.resized);
        assert!(!report.drawn);
        assert_relative_eq!(camera.aspect, 2.0);
        assert!(camera.projection_matrix().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_zero_width_window_keeps_aspect() {
        let mut surface = MockSurface::new(0, 500);
        let mut renderer = DrawListRenderer::new();
        let scene = Scene::new(Color::BLACK);
        let mut camera = camera();
        let mut render_loop = RenderLoop::new();

        let report = render_loop.frame(&mut surface, &mut renderer, &scene, &mut camera).unwrap();
        assert!(report.resized);
        assert!(!report.drawn);
        assert_eq!(renderer.extent(), (0, 500));
        assert_relative_eq!(camera.aspect, 2.0);
        assert!(camera.projection_matrix().iter().all(|v| v.is_finite()));
    }
}

//! Renderer abstraction and the draw-list renderer
//!
//! `SceneRenderer` is the seam between the demo loop and whatever puts pixels on
//! screen. `DrawListRenderer` flattens a scene into plain per-frame data (matrices,
//! materials, helper lines and a light uniform) which a GPU backend can upload
//! without touching scene types.

use thiserror::Error;

use crate::foundation::math::{Mat4, Vec3};
use crate::render::camera::Camera;
use crate::render::color::Color;
use crate::render::material::Material;
use crate::scene::graph::Scene;
use crate::scene::helper::Segment;
use crate::scene::light::{Light, LightKind};

/// Rendering errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Drawing into a zero-sized backing store
    #[error("Cannot render into a {width}x{height} target")]
    EmptyTarget {
        /// Backing width
        width: u32,
        /// Backing height
        height: u32,
    },
}

/// Draws a scene from a camera into a resizable target
pub trait SceneRenderer {
    /// Resize the render target
    fn resize(&mut self, width: u32, height: u32);

    /// Draw one frame
    fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<(), RenderError>;
}

/// One mesh draw
#[derive(Debug, Clone)]
pub struct DrawItem {
    /// Node name, for debugging
    pub name: String,
    /// Object-to-world matrix
    pub model: Mat4,
    /// Model-view-projection matrix
    pub mvp: Mat4,
    /// Surface material
    pub material: Material,
    /// Vertices to upload
    pub vertex_count: usize,
    /// Size of the interleaved vertex buffer in bytes
    pub vertex_bytes: usize,
    /// Indices to draw
    pub index_count: usize,
}

/// Light parameters in the form a shader consumes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightUniform {
    /// 0 ambient, 1 directional, 2 point, 3 rect-area
    pub kind: u32,
    /// Linear color multiplied by intensity
    pub radiance: [f32; 3],
    /// World-space position
    pub position: [f32; 3],
    /// Travel direction, zero when the light has none
    pub direction: [f32; 3],
    /// Area extent (width, height), zero otherwise
    pub extent: [f32; 2],
    /// Distance falloff exponent, zero when unused
    pub decay: f32,
}

impl LightUniform {
    /// Flatten a light
    pub fn from_light(light: &Light) -> Self {
        let kind = match light.kind {
            LightKind::Ambient => 0,
            LightKind::Directional { .. } => 1,
            LightKind::Point { .. } => 2,
            LightKind::RectArea { .. } => 3,
        };
        let [r, g, b] = light.color.to_array();
        let direction = light.direction().unwrap_or_else(Vec3::zeros);
        let (width, height) = light.extent().unwrap_or((0.0, 0.0));

        Self {
            kind,
            radiance: [r * light.intensity, g * light.intensity, b * light.intensity],
            position: light.position.into(),
            direction: direction.into(),
            extent: [width, height],
            decay: light.decay().unwrap_or(0.0),
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone)]
pub struct DrawList {
    /// Clear color
    pub clear_color: Option<Color>,
    /// Camera view-projection
    pub view_projection: Mat4,
    /// Mesh draws
    pub items: Vec<DrawItem>,
    /// Helper wireframe, world space
    pub helper_lines: Vec<Segment>,
    /// The scene's light
    pub light: Option<LightUniform>,
}

impl Default for DrawList {
    fn default() -> Self {
        Self {
            clear_color: None,
            view_projection: Mat4::identity(),
            items: Vec::new(),
            helper_lines: Vec::new(),
            light: None,
        }
    }
}

/// Renderer that records a `DrawList` per frame
#[derive(Debug, Default)]
pub struct DrawListRenderer {
    extent: (u32, u32),
    frames: u64,
    last: DrawList,
}

impl DrawListRenderer {
    /// Create a renderer with an empty target
    pub fn new() -> Self {
        Self::default()
    }

    /// Current target size
    pub fn extent(&self) -> (u32, u32) {
        self.extent
    }

    /// Frames rendered so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// The most recent frame
    pub fn last_frame(&self) -> &DrawList {
        &self.last
    }
}

impl SceneRenderer for DrawListRenderer {
    fn resize(&mut self, width: u32, height: u32) {
        log::info!("Render target resized to {}x{}", width, height);
        self.extent = (width, height);
    }

    fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<(), RenderError> {
        let (width, height) = self.extent;
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyTarget { width, height });
        }

        let view_projection = camera.view_projection_matrix();
        let items = scene
            .meshes()
            .map(|(_, node)| {
                let model = node.transform.to_matrix();
                DrawItem {
                    name: node.name.clone(),
                    model,
                    mvp: view_projection * model,
                    material: node.material.clone(),
                    vertex_count: node.mesh.vertices.len(),
                    vertex_bytes: node.mesh.vertex_bytes().len(),
                    index_count: node.mesh.indices.len(),
                }
            })
            .collect();

        let (helper_lines, light) = match scene.light_rig() {
            Some(rig) => {
                let rig = rig.borrow();
                let lines = rig.helper().map(|helper| helper.segments()).unwrap_or_default();
                (lines, Some(LightUniform::from_light(rig.light())))
            }
            None => (Vec::new(), None),
        };

        self.last = DrawList {
            clear_color: Some(scene.background),
            view_projection,
            items,
            helper_lines,
            light,
        };
        self.frames += 1;
        log::trace!("Frame {}: {} draws", self.frames, self.last.items.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Transform;
    use crate::render::material::ShadingModel;
    use crate::render::mesh::Mesh;
    use crate::scene::graph::MeshNode;
    use crate::scene::rig::LightRig;
    use approx::assert_relative_eq;

    fn scene() -> Scene {
        let mut scene = Scene::new(Color::BLACK);
        scene.add_mesh(MeshNode {
            name: "cube".to_string(),
            mesh: Mesh::cube(4.0),
            material: Material::new(ShadingModel::Phong, Color::from_hex(0x88aacc)),
            transform: Transform::from_position(Vec3::new(5.0, 2.0, 0.0)),
        });
        scene.set_light_rig(LightRig::new(Light::point(Color::WHITE, 2.0)).into_shared());
        scene
    }

    fn camera() -> Camera {
        Camera::perspective(Vec3::new(0.0, 10.0, 20.0), 45.0, 2.0, 0.1, 100.0)
    }

    #[test]
    fn test_render_requires_target() {
        let mut renderer = DrawListRenderer::new();
        let result = renderer.render(&scene(), &camera());
        assert_eq!(result, Err(RenderError::EmptyTarget { width: 0, height: 0 }));
        assert_eq!(renderer.frame_count(), 0);
    }

    #[test]
    fn test_render_records_items_and_light() {
        let mut renderer = DrawListRenderer::new();
        renderer.resize(800, 400);
        renderer.render(&scene(), &camera()).unwrap();

        let frame = renderer.last_frame();
        assert_eq!(frame.items.len(), 1);
        assert_eq!(frame.items[0].vertex_count, 24);
        assert_eq!(frame.items[0].vertex_bytes, 24 * std::mem::size_of::<crate::render::mesh::Vertex>());
        assert_eq!(frame.items[0].index_count, 36);
        assert_relative_eq!(frame.items[0].model[(0, 3)], 5.0);
        assert!(!frame.helper_lines.is_empty());

        let light = frame.light.unwrap();
        assert_eq!(light.kind, 2);
        assert_relative_eq!(light.radiance[0], 2.0);
        assert_relative_eq!(light.decay, 2.0);
    }

    #[test]
    fn test_ambient_light_uniform_has_no_direction() {
        let uniform = LightUniform::from_light(&Light::ambient(Color::WHITE, 1.0));
        assert_eq!(uniform.kind, 0);
        assert_eq!(uniform.direction, [0.0; 3]);
        assert_eq!(uniform.extent, [0.0; 2]);
    }
}

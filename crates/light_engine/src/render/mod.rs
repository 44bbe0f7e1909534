//! # Rendering
//!
//! Backend-agnostic rendering layer for the light demos.
//!
//! - **Resources**: colors, meshes, textures and materials
//! - **Camera**: perspective camera with a cached projection matrix
//! - **Surface**: display surfaces with separate display and backing sizes
//! - **Draw list**: the `SceneRenderer` seam and the renderer that records frames
//! - **Render loop**: per-frame resize handling and redraw

pub mod camera;
pub mod color;
pub mod draw_list;
pub mod material;
pub mod mesh;
pub mod render_loop;
pub mod surface;
pub mod texture;

pub use camera::Camera;
pub use color::{Color, ColorParseError};
pub use draw_list::{DrawItem, DrawList, DrawListRenderer, LightUniform, RenderError, SceneRenderer};
pub use material::{Material, ShadingModel, Side};
pub use mesh::{Mesh, Vertex};
pub use render_loop::{resize_to_display_size, FrameReport, LoopState, RenderLoop};
pub use surface::{DisplaySurface, GlfwSurface, WindowError};
pub use texture::{FilterMode, ImageData, Texture, TextureError, TextureLoader, WrapMode};

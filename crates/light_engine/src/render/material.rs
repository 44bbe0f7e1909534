//! Surface materials for the static scene meshes

use std::rc::Rc;

use super::color::Color;
use super::texture::Texture;

/// Shading model a material is evaluated with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadingModel {
    /// Blinn-Phong; cheap, ignores rectangular area lights
    Phong,
    /// Metallic-roughness PBR; required for rectangular area lights
    Standard,
}

/// Which faces are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Front faces only
    Front,
    /// Both faces (used for the ground plane)
    Double,
}

/// Material resource
#[derive(Debug, Clone)]
pub struct Material {
    /// Shading model
    pub shading: ShadingModel,
    /// Base color, multiplied with the color map if present
    pub color: Color,
    /// Optional color map, shared between materials
    pub map: Option<Rc<Texture>>,
    /// Face culling
    pub side: Side,
}

impl Material {
    /// Solid-colored, front-faced material
    pub fn new(shading: ShadingModel, color: Color) -> Self {
        Self {
            shading,
            color,
            map: None,
            side: Side::Front,
        }
    }

    /// Attach a color map
    #[must_use]
    pub fn with_map(mut self, map: Rc<Texture>) -> Self {
        self.map = Some(map);
        self
    }

    /// Set face culling
    #[must_use]
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    /// Whether a loaded color map is bound
    pub fn is_textured(&self) -> bool {
        self.map.as_ref().is_some_and(|map| map.is_loaded())
    }
}

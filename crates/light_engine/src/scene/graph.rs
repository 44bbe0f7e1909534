//! Scene container
//!
//! Holds the static meshes and the single light rig of a demo scene. Meshes live in a
//! slot map so handles stay valid across removals.

use slotmap::{new_key_type, SlotMap};

use crate::foundation::math::Transform;
use crate::render::color::Color;
use crate::render::material::Material;
use crate::render::mesh::Mesh;
use crate::scene::rig::SharedRig;

new_key_type! {
    /// Handle to a mesh node in a `Scene`
    pub struct NodeId;
}

/// A mesh placed in the scene
#[derive(Debug, Clone)]
pub struct MeshNode {
    /// Debug name
    pub name: String,
    /// Geometry
    pub mesh: Mesh,
    /// Surface material
    pub material: Material,
    /// Object-to-world transform
    pub transform: Transform,
}

/// The drawable world: background, meshes and one light rig
pub struct Scene {
    /// Clear color
    pub background: Color,
    nodes: SlotMap<NodeId, MeshNode>,
    rig: Option<SharedRig>,
}

impl Scene {
    /// Create an empty scene with the given background
    pub fn new(background: Color) -> Self {
        Self {
            background,
            nodes: SlotMap::with_key(),
            rig: None,
        }
    }

    /// Add a mesh node
    pub fn add_mesh(&mut self, node: MeshNode) -> NodeId {
        log::debug!("Adding mesh '{}' ({} triangles)", node.name, node.mesh.triangle_count());
        self.nodes.insert(node)
    }

    /// Remove a mesh node
    pub fn remove_mesh(&mut self, id: NodeId) -> Option<MeshNode> {
        self.nodes.remove(id)
    }

    /// Look up a mesh node
    pub fn mesh(&self, id: NodeId) -> Option<&MeshNode> {
        self.nodes.get(id)
    }

    /// Iterate over mesh nodes
    pub fn meshes(&self) -> impl Iterator<Item = (NodeId, &MeshNode)> {
        self.nodes.iter()
    }

    /// Number of mesh nodes
    pub fn mesh_count(&self) -> usize {
        self.nodes.len()
    }

    /// Attach the light rig, replacing any previous one
    pub fn set_light_rig(&mut self, rig: SharedRig) {
        self.rig = Some(rig);
    }

    /// The light rig, if one is attached
    pub fn light_rig(&self) -> Option<&SharedRig> {
        self.rig.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::material::ShadingModel;

    #[test]
    fn test_add_remove_mesh() {
        let mut scene = Scene::new(Color::BLACK);
        let cube = scene.add_mesh(MeshNode {
            name: "cube".to_string(),
            mesh: Mesh::cube(4.0),
            material: Material::new(ShadingModel::Phong, Color::WHITE),
            transform: Transform::default(),
        });
        assert_eq!(scene.mesh_count(), 1);
        assert_eq!(scene.mesh(cube).map(|node| node.name.as_str()), Some("cube"));

        assert!(scene.remove_mesh(cube).is_some());
        assert!(scene.mesh(cube).is_none());
        assert!(scene.light_rig().is_none());
    }
}

//! Scene module
//!
//! - `light`: light sources and their variant parameters
//! - `helper`: line-geometry visualizations of lights
//! - `rig`: a light bundled with its helper and change observers
//! - `graph`: the scene container (meshes + light rig)
//! - `orbit`: orbit view controller driving the camera

pub mod light;
pub mod helper;
pub mod rig;
pub mod graph;
pub mod orbit;

pub use light::{Light, LightKind};
pub use helper::LightHelper;
pub use rig::{LightRig, SharedRig};
pub use graph::{MeshNode, NodeId, Scene};
pub use orbit::OrbitControls;

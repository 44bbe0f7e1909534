//! Shared scene setup: ground plane, cube, sphere, camera and orbit controls

use std::rc::Rc;

use crate::config::{CameraConfig, SceneConfig};
use crate::foundation::math::{utils, Transform, Vec2, Vec3};
use crate::render::camera::Camera;
use crate::render::color::Color;
use crate::render::material::{Material, ShadingModel, Side};
use crate::render::mesh::Mesh;
use crate::render::texture::{FilterMode, Texture, TextureLoader, WrapMode};
use crate::scene::graph::{MeshNode, Scene};
use crate::scene::orbit::OrbitControls;

const CUBE_SIZE: f32 = 4.0;
const CUBE_COLOR: u32 = 0x88AACC;
const SPHERE_RADIUS: f32 = 3.0;
const SPHERE_WIDTH_SEGMENTS: u32 = 32;
const SPHERE_HEIGHT_SEGMENTS: u32 = 16;
const SPHERE_COLOR: u32 = 0xCCAA88;

/// Camera looking at the orbit target, with its controller
pub fn build_camera(config: &CameraConfig) -> (Camera, OrbitControls) {
    let mut camera = Camera::perspective(
        Vec3::from(config.position),
        config.fov_degrees,
        config.initial_aspect,
        config.near,
        config.far,
    );
    let target = Vec3::from(config.orbit_target);
    camera.look_at(target);

    let mut orbit = OrbitControls::new(&camera);
    orbit.set_target(target, &camera);
    orbit.update(&mut camera);
    (camera, orbit)
}

/// Ground texture: repeated checker, nearest-neighbour magnified
pub fn ground_texture(config: &SceneConfig) -> Texture {
    let mut texture = TextureLoader::load(&config.texture_path);
    texture.wrap_s = WrapMode::Repeat;
    texture.wrap_t = WrapMode::Repeat;
    texture.mag_filter = FilterMode::Nearest;
    let repeats = config.plane_size / 2.0;
    texture.repeat = Vec2::new(repeats, repeats);
    texture
}

/// Scene with the ground plane, a cube and a sphere shaded with `shading`
pub fn build_scene(config: &SceneConfig, shading: ShadingModel) -> Scene {
    let background = Color::parse(&config.background).unwrap_or_else(|e| {
        log::warn!("Bad background '{}' ({}), using black", config.background, e);
        Color::BLACK
    });
    let mut scene = Scene::new(background);

    let ground = Material::new(shading, Color::WHITE)
        .with_map(Rc::new(ground_texture(config)))
        .with_side(Side::Double);
    scene.add_mesh(MeshNode {
        name: "ground".to_string(),
        mesh: Mesh::plane(config.plane_size, config.plane_size),
        material: ground,
        transform: Transform::from_position_rotation(
            Vec3::zeros(),
            utils::euler_xyz(Vec3::new(utils::deg_to_rad(-90.0), 0.0, 0.0)),
        ),
    });

    scene.add_mesh(MeshNode {
        name: "cube".to_string(),
        mesh: Mesh::cube(CUBE_SIZE),
        material: Material::new(shading, Color::from_hex(CUBE_COLOR)),
        transform: Transform::from_position(Vec3::new(CUBE_SIZE + 1.0, CUBE_SIZE / 2.0, 0.0)),
    });

    scene.add_mesh(MeshNode {
        name: "sphere".to_string(),
        mesh: Mesh::sphere(SPHERE_RADIUS, SPHERE_WIDTH_SEGMENTS, SPHERE_HEIGHT_SEGMENTS),
        material: Material::new(shading, Color::from_hex(SPHERE_COLOR)),
        transform: Transform::from_position(Vec3::new(-SPHERE_RADIUS - 1.0, SPHERE_RADIUS + 2.0, 0.0)),
    });

    scene
}

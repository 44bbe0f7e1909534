//! Per-variant demo setup
//!
//! The four demos differ only in which light they build, which shading model the
//! scene meshes use and which controls the panel offers. Everything else is shared
//! by `LightDemo`.

use crate::foundation::math::{utils, Vec3};
use crate::render::color::Color;
use crate::render::material::ShadingModel;
use crate::scene::light::Light;
use crate::scene::rig::SharedRig;
use crate::ui::binding::{ColorAdapter, LightColor, LightScalar, ScalarProperty, VectorProperty};
use crate::ui::panel::{make_axis_group, AxisSource, ControlPanel, PanelError};

const LIGHT_COLOR: u32 = 0xFFFFFF;
const LIGHT_HEIGHT: f32 = 10.0;
const INTENSITY_STEP: f32 = 0.01;

const DIRECTIONAL_TARGET: [f32; 3] = [-5.0, 0.0, 0.0];

const POINT_POWER: f32 = 800.0;
const DECAY_RANGE: (f32, f32) = (0.0, 4.0);
const POWER_RANGE: (f32, f32) = (0.0, 2000.0);

const AREA_INTENSITY: f32 = 5.0;
const AREA_WIDTH: f32 = 12.0;
const AREA_HEIGHT: f32 = 4.0;
const AREA_TILT_DEGREES: f32 = -90.0;
const AREA_EXTENT_RANGE: (f32, f32) = (0.0, 20.0);

/// Which light a demo shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightDescriptor {
    /// Uniform ambient light
    Ambient,
    /// Directional light aimed at a target
    Directional,
    /// Physically-correct point light
    Point,
    /// Rectangular area light
    RectArea,
}

impl LightDescriptor {
    /// Every variant
    pub const ALL: [Self; 4] = [Self::Ambient, Self::Directional, Self::Point, Self::RectArea];

    /// Human-readable name
    pub fn title(self) -> &'static str {
        match self {
            Self::Ambient => "Ambient Light",
            Self::Directional => "Directional Light",
            Self::Point => "Point Light",
            Self::RectArea => "Rect Area Light",
        }
    }

    /// Shading model for the scene meshes
    ///
    /// Area lights only affect physically based materials.
    pub fn shading_model(self) -> ShadingModel {
        match self {
            Self::RectArea => ShadingModel::Standard,
            _ => ShadingModel::Phong,
        }
    }

    /// Build the light in its initial configuration
    pub fn build_light(self) -> Light {
        let color = Color::from_hex(LIGHT_COLOR);
        let above = Vec3::new(0.0, LIGHT_HEIGHT, 0.0);
        match self {
            Self::Ambient => Light::ambient(color, 1.0),
            Self::Directional => {
                let mut light = Light::directional(color, 1.0).at(above);
                if let Some(target) = light.target_mut() {
                    *target = Vec3::from(DIRECTIONAL_TARGET);
                }
                light
            }
            Self::Point => {
                let mut light = Light::point(color, 1.0).at(above);
                light.set_power(POINT_POWER);
                light
            }
            Self::RectArea => {
                let mut light = Light::rect_area(color, AREA_INTENSITY, AREA_WIDTH, AREA_HEIGHT).at(above);
                light.rotation.x = utils::deg_to_rad(AREA_TILT_DEGREES);
                light
            }
        }
    }

    /// Register this variant's controls over `rig`
    pub fn register_controls(self, panel: &mut ControlPanel, rig: &SharedRig) -> Result<(), PanelError> {
        let root = panel.root_mut();
        root.add_color("color", ColorAdapter::new(LightColor::new(rig.clone())));

        match self {
            Self::Ambient => {
                root.add_number("intensity", LightScalar::new(rig.clone(), ScalarProperty::Intensity)?, 0.0, 2.0)
                    .step(INTENSITY_STEP);
            }
            Self::Directional => {
                root.add_number("intensity", LightScalar::new(rig.clone(), ScalarProperty::Intensity)?, 0.0, 2.0)
                    .step(INTENSITY_STEP);
                make_axis_group(root, "position", rig, AxisSource::Vector(VectorProperty::Position), None)?;
                make_axis_group(root, "target", rig, AxisSource::Vector(VectorProperty::Target), None)?;
            }
            Self::Point => {
                let (min, max) = DECAY_RANGE;
                root.add_number("decay", LightScalar::new(rig.clone(), ScalarProperty::Decay)?, min, max)
                    .step(INTENSITY_STEP);
                let (min, max) = POWER_RANGE;
                root.add_number("power", LightScalar::new(rig.clone(), ScalarProperty::Power)?, min, max);
                make_axis_group(root, "position", rig, AxisSource::Vector(VectorProperty::Position), None)?;
            }
            Self::RectArea => {
                root.add_number("intensity", LightScalar::new(rig.clone(), ScalarProperty::Intensity)?, 0.0, 10.0)
                    .step(INTENSITY_STEP);
                let (min, max) = AREA_EXTENT_RANGE;
                root.add_number("width", LightScalar::new(rig.clone(), ScalarProperty::Width)?, min, max);
                root.add_number("height", LightScalar::new(rig.clone(), ScalarProperty::Height)?, min, max);
                make_axis_group(root, "rotation", rig, AxisSource::Rotation, None)?;
                make_axis_group(root, "position", rig, AxisSource::Vector(VectorProperty::Position), None)?;
            }
        }

        log::info!("{} panel: {} controls", self.title(), panel.control_paths().len());
        Ok(())
    }
}

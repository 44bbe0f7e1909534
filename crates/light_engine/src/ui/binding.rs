//! Typed property bindings
//!
//! A binding is a `read`/`write` pair over one property of a light, chosen when the
//! control is built. Writes go through `LightRig::modify` with the matching
//! `LightChange` tag, which is what keeps helpers in sync.
//!
//! Adapters wrap another binding and change the representation the panel sees:
//! `AngleAdapter` shows radians as degrees, `ColorAdapter` shows a color as a
//! `#rrggbb` string.

use thiserror::Error;

use crate::events::LightChange;
use crate::foundation::math::{utils, Vec3};
use crate::render::color::{Color, ColorParseError};
use crate::scene::light::Light;
use crate::scene::rig::SharedRig;

/// Binding errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BindingError {
    /// The written color string did not parse
    #[error(transparent)]
    Color(#[from] ColorParseError),

    /// The bound light variant does not have this property
    #[error("{kind} light has no {property}")]
    Unsupported {
        /// Light variant name
        kind: &'static str,
        /// Property name
        property: &'static str,
    },
}

/// Read/write access to one typed value
pub trait Binding {
    /// Value type exchanged with the control
    type Value;

    /// Current value
    fn read(&self) -> Self::Value;

    /// Replace the value
    fn write(&self, value: Self::Value) -> Result<(), BindingError>;
}

/// Vector component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// X component
    X,
    /// Y component
    Y,
    /// Z component
    Z,
}

impl Axis {
    /// All three axes in order
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Lowercase axis label
    pub fn label(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// Scalar light properties
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarProperty {
    /// Intensity (all variants)
    Intensity,
    /// Luminous power in lumens (point lights)
    Power,
    /// Falloff exponent (point lights)
    Decay,
    /// Width (area lights)
    Width,
    /// Height (area lights)
    Height,
}

impl ScalarProperty {
    /// Property name as shown on the panel
    pub fn label(self) -> &'static str {
        match self {
            Self::Intensity => "intensity",
            Self::Power => "power",
            Self::Decay => "decay",
            Self::Width => "width",
            Self::Height => "height",
        }
    }

    fn get(self, light: &Light) -> Option<f32> {
        match self {
            Self::Intensity => Some(light.intensity),
            Self::Power => light.power(),
            Self::Decay => light.decay(),
            Self::Width => light.extent().map(|(width, _)| width),
            Self::Height => light.extent().map(|(_, height)| height),
        }
    }

    fn set(self, light: &mut Light, value: f32) {
        match self {
            Self::Intensity => light.intensity = value,
            Self::Power => light.set_power(value),
            Self::Decay => light.set_decay(value),
            Self::Width => light.set_width(value),
            Self::Height => light.set_height(value),
        }
    }

    fn change(self) -> LightChange {
        match self {
            Self::Intensity | Self::Power | Self::Decay => LightChange::INTENSITY,
            Self::Width | Self::Height => LightChange::EXTENT,
        }
    }
}

/// Scalar property of a light
pub struct LightScalar {
    rig: SharedRig,
    property: ScalarProperty,
}

impl LightScalar {
    /// Bind `property`; fails if the rig's light variant lacks it
    pub fn new(rig: SharedRig, property: ScalarProperty) -> Result<Self, BindingError> {
        {
            let rig_ref = rig.borrow();
            let light = rig_ref.light();
            if property.get(light).is_none() {
                return Err(BindingError::Unsupported {
                    kind: light.kind_name(),
                    property: property.label(),
                });
            }
        }
        Ok(Self { rig, property })
    }
}

impl Binding for LightScalar {
    type Value = f32;

    fn read(&self) -> f32 {
        self.property.get(self.rig.borrow().light()).unwrap_or_default()
    }

    fn write(&self, value: f32) -> Result<(), BindingError> {
        let property = self.property;
        self.rig
            .borrow_mut()
            .modify(property.change(), |light| property.set(light, value));
        Ok(())
    }
}

/// Which vector of a light an axis binding points into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorProperty {
    /// Object position
    Position,
    /// Directional target position
    Target,
}

impl VectorProperty {
    /// Property name as shown on the panel
    pub fn label(self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Target => "target",
        }
    }

    fn get(self, light: &Light) -> Option<Vec3> {
        match self {
            Self::Position => Some(light.position),
            Self::Target => light.target(),
        }
    }

    fn get_mut(self, light: &mut Light) -> Option<&mut Vec3> {
        match self {
            Self::Position => Some(&mut light.position),
            Self::Target => light.target_mut(),
        }
    }

    fn change(self) -> LightChange {
        match self {
            Self::Position => LightChange::POSITION,
            Self::Target => LightChange::TARGET,
        }
    }
}

/// One component of a light position or target
pub struct VectorAxis {
    rig: SharedRig,
    vector: VectorProperty,
    axis: Axis,
}

impl VectorAxis {
    /// Bind `axis` of `vector`; fails if the light has no such vector
    pub fn new(rig: SharedRig, vector: VectorProperty, axis: Axis) -> Result<Self, BindingError> {
        {
            let rig_ref = rig.borrow();
            let light = rig_ref.light();
            if vector.get(light).is_none() {
                return Err(BindingError::Unsupported {
                    kind: light.kind_name(),
                    property: vector.label(),
                });
            }
        }
        Ok(Self { rig, vector, axis })
    }
}

impl Binding for VectorAxis {
    type Value = f32;

    fn read(&self) -> f32 {
        self.vector
            .get(self.rig.borrow().light())
            .map(|v| v[self.axis.index()])
            .unwrap_or_default()
    }

    fn write(&self, value: f32) -> Result<(), BindingError> {
        let (vector, axis) = (self.vector, self.axis);
        self.rig.borrow_mut().modify(vector.change(), |light| {
            if let Some(v) = vector.get_mut(light) {
                v[axis.index()] = value;
            }
        });
        Ok(())
    }
}

/// One Euler angle of a light's rotation, in radians
pub struct RotationAxis {
    rig: SharedRig,
    axis: Axis,
}

impl RotationAxis {
    /// Bind rotation about `axis`
    pub fn new(rig: SharedRig, axis: Axis) -> Self {
        Self { rig, axis }
    }
}

impl Binding for RotationAxis {
    type Value = f32;

    fn read(&self) -> f32 {
        self.rig.borrow().light().rotation[self.axis.index()]
    }

    fn write(&self, radians: f32) -> Result<(), BindingError> {
        let axis = self.axis;
        self.rig
            .borrow_mut()
            .modify(LightChange::ROTATION, |light| light.rotation[axis.index()] = radians);
        Ok(())
    }
}

/// Light color
pub struct LightColor {
    rig: SharedRig,
}

impl LightColor {
    /// Bind the light's color
    pub fn new(rig: SharedRig) -> Self {
        Self { rig }
    }
}

impl Binding for LightColor {
    type Value = Color;

    fn read(&self) -> Color {
        self.rig.borrow().light().color
    }

    fn write(&self, color: Color) -> Result<(), BindingError> {
        self.rig
            .borrow_mut()
            .modify(LightChange::COLOR, |light| light.color = color);
        Ok(())
    }
}

/// Presents a radian binding in degrees
pub struct AngleAdapter<B> {
    inner: B,
}

impl<B: Binding<Value = f32>> AngleAdapter<B> {
    /// Wrap a radian-valued binding
    pub fn new(inner: B) -> Self {
        Self { inner }
    }
}

impl<B: Binding<Value = f32>> Binding for AngleAdapter<B> {
    type Value = f32;

    fn read(&self) -> f32 {
        utils::rad_to_deg(self.inner.read())
    }

    fn write(&self, degrees: f32) -> Result<(), BindingError> {
        self.inner.write(utils::deg_to_rad(degrees))
    }
}

/// Presents a color binding as a `#rrggbb` string
pub struct ColorAdapter<B> {
    inner: B,
}

impl<B: Binding<Value = Color>> ColorAdapter<B> {
    /// Wrap a color-valued binding
    pub fn new(inner: B) -> Self {
        Self { inner }
    }
}

impl<B: Binding<Value = Color>> Binding for ColorAdapter<B> {
    type Value = String;

    fn read(&self) -> String {
        format!("#{}", self.inner.read().to_hex_string())
    }

    fn write(&self, value: String) -> Result<(), BindingError> {
        let color = Color::parse(&value)?;
        self.inner.write(color)
    }
}

//! Control panel
//!
//! A tree of folders holding numeric and color controls. Each control owns a typed
//! binding chosen at registration. Edits are addressed by slash-separated paths such
//! as `"target/y"`.
//!
//! Numeric edits are snapped to the control's step (when it has one) and then clamped
//! into `[min, max]`. A control's change callback runs after its binding accepts the
//! write; registration and rejected writes never run it.

use std::rc::Rc;

use thiserror::Error;

use crate::scene::rig::SharedRig;
use crate::ui::binding::{
    AngleAdapter, Axis, Binding, BindingError, RotationAxis, VectorAxis, VectorProperty,
};

/// Callback run after a successful edit
pub type ChangeCallback = Rc<dyn Fn()>;

/// Bounds for position and target axis controls
pub const POSITION_RANGE: (f32, f32) = (-10.0, 10.0);

/// Bounds for rotation axis controls, in degrees
pub const ROTATION_RANGE: (f32, f32) = (-180.0, 180.0);

/// Panel errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PanelError {
    /// No control at this path
    #[error("No control at '{0}'")]
    UnknownControl(String),

    /// No folder at this path
    #[error("No folder at '{0}'")]
    UnknownFolder(String),

    /// The control holds a different kind of value
    #[error("Control '{path}' is not a {expected} control")]
    TypeMismatch {
        /// Control path
        path: String,
        /// Kind the caller assumed
        expected: &'static str,
    },

    /// Numeric edit was NaN or infinite
    #[error("Control '{path}' cannot take non-finite value {value}")]
    NonFinite {
        /// Control path
        path: String,
        /// Rejected value
        value: f32,
    },

    /// The binding rejected the value
    #[error(transparent)]
    Binding(#[from] BindingError),
}

/// Value of a control as the panel shows it
#[derive(Debug, Clone, PartialEq)]
pub enum ControlValue {
    /// Numeric value
    Number(f32),
    /// `#rrggbb` color
    Color(String),
}

/// Control variants
pub enum ControlKind {
    /// Bounded number
    Number {
        /// Bound property
        binding: Box<dyn Binding<Value = f32>>,
        /// Lower bound
        min: f32,
        /// Upper bound
        max: f32,
        /// Snap increment
        step: Option<f32>,
    },
    /// Color string
    Color {
        /// Bound property
        binding: Box<dyn Binding<Value = String>>,
    },
}

/// A named control
pub struct Control {
    name: String,
    kind: ControlKind,
    on_change: Option<ChangeCallback>,
}

impl Control {
    /// Control name within its folder
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Control variant
    pub fn kind(&self) -> &ControlKind {
        &self.kind
    }

    /// Declare a snap increment; ignored on color controls
    pub fn step(&mut self, value: f32) -> &mut Self {
        if let ControlKind::Number { step, .. } = &mut self.kind {
            *step = Some(value);
        }
        self
    }

    /// Run `callback` after every successful edit
    pub fn on_change(&mut self, callback: ChangeCallback) -> &mut Self {
        self.on_change = Some(callback);
        self
    }

    /// Current value read through the binding
    pub fn value(&self) -> ControlValue {
        match &self.kind {
            ControlKind::Number { binding, .. } => ControlValue::Number(binding.read()),
            ControlKind::Color { binding } => ControlValue::Color(binding.read()),
        }
    }

    /// Snap and clamp `value` the way an edit would
    pub fn constrain(&self, value: f32) -> Option<f32> {
        match &self.kind {
            ControlKind::Number { min, max, step, .. } => {
                let snapped = match step {
                    Some(step) if *step > 0.0 => (value / step).round() * step,
                    _ => value,
                };
                Some(snapped.clamp(*min, *max))
            }
            ControlKind::Color { .. } => None,
        }
    }

    fn set_number(&self, path: &str, value: f32) -> Result<f32, PanelError> {
        let ControlKind::Number { binding, .. } = &self.kind else {
            return Err(PanelError::TypeMismatch { path: path.to_string(), expected: "number" });
        };
        if !value.is_finite() {
            return Err(PanelError::NonFinite { path: path.to_string(), value });
        }
        let value = self.constrain(value).unwrap_or(value);
        binding.write(value)?;
        self.changed();
        Ok(value)
    }

    fn set_color(&self, path: &str, text: &str) -> Result<(), PanelError> {
        let ControlKind::Color { binding } = &self.kind else {
            return Err(PanelError::TypeMismatch { path: path.to_string(), expected: "color" });
        };
        binding.write(text.to_string())?;
        self.changed();
        Ok(())
    }

    fn changed(&self) {
        if let Some(callback) = &self.on_change {
            callback();
        }
    }
}

/// A named group of controls and subfolders
pub struct Folder {
    name: String,
    open: bool,
    controls: Vec<Control>,
    folders: Vec<Folder>,
}

impl Folder {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            open: false,
            controls: Vec::new(),
            folders: Vec::new(),
        }
    }

    /// Folder name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the folder is expanded
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Expand the folder
    pub fn open(&mut self) -> &mut Self {
        self.open = true;
        self
    }

    /// Collapse or expand
    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Controls directly in this folder, in registration order
    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    /// Subfolders, in registration order
    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    /// Add a bounded numeric control
    pub fn add_number(
        &mut self,
        name: &str,
        binding: impl Binding<Value = f32> + 'static,
        min: f32,
        max: f32,
    ) -> &mut Control {
        debug_assert!(min <= max, "control '{name}' has min {min} above max {max}");
        self.push(name, ControlKind::Number { binding: Box::new(binding), min, max, step: None })
    }

    /// Add a color control
    pub fn add_color(&mut self, name: &str, binding: impl Binding<Value = String> + 'static) -> &mut Control {
        self.push(name, ControlKind::Color { binding: Box::new(binding) })
    }

    /// Add a closed subfolder
    pub fn add_folder(&mut self, name: &str) -> &mut Folder {
        self.folders.push(Folder::new(name));
        let index = self.folders.len() - 1;
        &mut self.folders[index]
    }

    /// Control by name
    pub fn control(&self, name: &str) -> Option<&Control> {
        self.controls.iter().find(|control| control.name == name)
    }

    /// Subfolder by name
    pub fn folder(&self, name: &str) -> Option<&Folder> {
        self.folders.iter().find(|folder| folder.name == name)
    }

    fn folder_mut(&mut self, name: &str) -> Option<&mut Folder> {
        self.folders.iter_mut().find(|folder| folder.name == name)
    }

    fn push(&mut self, name: &str, kind: ControlKind) -> &mut Control {
        log::debug!("Registered control '{}' in '{}'", name, self.name);
        self.controls.push(Control { name: name.to_string(), kind, on_change: None });
        let index = self.controls.len() - 1;
        &mut self.controls[index]
    }
}

/// Root of a control tree
pub struct ControlPanel {
    root: Folder,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlPanel {
    /// Create an empty, open panel
    pub fn new() -> Self {
        let mut root = Folder::new("");
        root.open = true;
        Self { root }
    }

    /// Top-level folder
    pub fn root(&self) -> &Folder {
        &self.root
    }

    /// Top-level folder, for registration
    pub fn root_mut(&mut self) -> &mut Folder {
        &mut self.root
    }

    /// Control at `path`
    pub fn control(&self, path: &str) -> Option<&Control> {
        let (folder, name) = split_path(path);
        self.folder(folder)?.control(name)
    }

    /// Folder at `path`; the empty path is the root
    pub fn folder(&self, path: &str) -> Option<&Folder> {
        path.split('/')
            .filter(|part| !part.is_empty())
            .try_fold(&self.root, |folder, part| folder.folder(part))
    }

    /// Folder at `path`, mutably
    pub fn folder_mut(&mut self, path: &str) -> Option<&mut Folder> {
        path.split('/')
            .filter(|part| !part.is_empty())
            .try_fold(&mut self.root, |folder, part| folder.folder_mut(part))
    }

    /// Current value of the control at `path`
    pub fn value(&self, path: &str) -> Result<ControlValue, PanelError> {
        self.lookup(path).map(Control::value)
    }

    /// Edit a numeric control; returns the value actually written
    pub fn set_number(&self, path: &str, value: f32) -> Result<f32, PanelError> {
        let written = self.lookup(path)?.set_number(path, value)?;
        log::debug!("Panel edit {} = {}", path, written);
        Ok(written)
    }

    /// Edit a color control
    pub fn set_color(&self, path: &str, text: &str) -> Result<(), PanelError> {
        self.lookup(path)?.set_color(path, text)?;
        log::debug!("Panel edit {} = {}", path, text);
        Ok(())
    }

    /// Paths of every control, depth first in registration order
    pub fn control_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        collect_paths(&self.root, "", &mut paths);
        paths
    }

    fn lookup(&self, path: &str) -> Result<&Control, PanelError> {
        self.control(path).ok_or_else(|| PanelError::UnknownControl(path.to_string()))
    }
}

fn split_path(path: &str) -> (&str, &str) {
    path.rsplit_once('/').unwrap_or(("", path))
}

fn collect_paths(folder: &Folder, prefix: &str, paths: &mut Vec<String>) {
    for control in &folder.controls {
        paths.push(join(prefix, &control.name));
    }
    for child in &folder.folders {
        collect_paths(child, &join(prefix, &child.name), paths);
    }
}

/// Join a folder path and a child name
pub fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}

/// Which light vector an axis group edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSource {
    /// Position or target, in scene units
    Vector(VectorProperty),
    /// Euler rotation, shown in degrees
    Rotation,
}

/// Add an open folder `name` with `x`, `y` and `z` controls over one light vector
///
/// Each control runs `on_change` after an edit; registration runs nothing.
pub fn make_axis_group<'a>(
    parent: &'a mut Folder,
    name: &str,
    rig: &SharedRig,
    source: AxisSource,
    on_change: Option<ChangeCallback>,
) -> Result<&'a mut Folder, PanelError> {
    let folder = parent.add_folder(name);
    for axis in Axis::ALL {
        let control = match source {
            AxisSource::Vector(vector) => {
                let (min, max) = POSITION_RANGE;
                folder.add_number(axis.label(), VectorAxis::new(rig.clone(), vector, axis)?, min, max)
            }
            AxisSource::Rotation => {
                let (min, max) = ROTATION_RANGE;
                folder.add_number(axis.label(), AngleAdapter::new(RotationAxis::new(rig.clone(), axis)), min, max)
            }
        };
        if let Some(callback) = &on_change {
            control.on_change(callback.clone());
        }
    }
    Ok(folder.open())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::render::color::Color;
    use crate::scene::light::Light;
    use crate::scene::rig::LightRig;
    use crate::ui::binding::{ColorAdapter, LightColor, LightScalar, ScalarProperty};
    use approx::assert_relative_eq;
    use std::cell::Cell;

    fn counter() -> (Rc<Cell<u32>>, ChangeCallback) {
        let count = Rc::new(Cell::new(0));
        let inner = count.clone();
        (count, Rc::new(move || inner.set(inner.get() + 1)))
    }

    #[test]
    fn test_axis_group_registers_open_folder_without_callback() {
        let rig = LightRig::new(Light::point(Color::WHITE, 1.0)).into_shared();
        let mut panel = ControlPanel::new();
        let (count, callback) = counter();
        make_axis_group(panel.root_mut(), "position", &rig, AxisSource::Vector(VectorProperty::Position), Some(callback))
            .unwrap();

        let folder = panel.folder("position").unwrap();
        assert!(folder.is_open());
        let names: Vec<_> = folder.controls().iter().map(Control::name).collect();
        assert_eq!(names, ["x", "y", "z"]);
        assert_eq!(count.get(), 0);

        panel.set_number("position/z", 3.0).unwrap();
        assert_eq!(count.get(), 1);
        assert_relative_eq!(rig.borrow().light().position, Vec3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn test_axis_group_fails_for_missing_vector() {
        let rig = LightRig::new(Light::point(Color::WHITE, 1.0)).into_shared();
        let mut panel = ControlPanel::new();
        let result = make_axis_group(panel.root_mut(), "target", &rig, AxisSource::Vector(VectorProperty::Target), None);
        assert!(matches!(result, Err(PanelError::Binding(BindingError::Unsupported { .. }))));
    }

    #[test]
    fn test_numeric_edit_snaps_then_clamps() {
        let rig = LightRig::new(Light::ambient(Color::WHITE, 1.0)).into_shared();
        let mut panel = ControlPanel::new();
        panel
            .root_mut()
            .add_number("intensity", LightScalar::new(rig.clone(), ScalarProperty::Intensity).unwrap(), 0.0, 2.0)
            .step(0.01);

        assert_relative_eq!(panel.set_number("intensity", 0.1234).unwrap(), 0.12, epsilon = 1e-6);
        assert_relative_eq!(panel.set_number("intensity", 5.0).unwrap(), 2.0);
        assert_relative_eq!(panel.set_number("intensity", -1.0).unwrap(), 0.0);
        assert_relative_eq!(rig.borrow().light().intensity, 0.0);
    }

    #[test]
    fn test_non_finite_edit_rejected() {
        let rig = LightRig::new(Light::ambient(Color::WHITE, 1.0)).into_shared();
        let mut panel = ControlPanel::new();
        let (count, callback) = counter();
        panel
            .root_mut()
            .add_number("intensity", LightScalar::new(rig.clone(), ScalarProperty::Intensity).unwrap(), 0.0, 2.0)
            .on_change(callback);

        for value in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let result = panel.set_number("intensity", value);
            assert!(matches!(result, Err(PanelError::NonFinite { ref path, .. }) if path == "intensity"));
        }
        assert_relative_eq!(rig.borrow().light().intensity, 1.0);
        assert_eq!(count.get(), 0);
    }

    #[test]
    #[should_panic(expected = "min 2 above max 0")]
    fn test_inverted_bounds_caught_at_registration() {
        let rig = LightRig::new(Light::ambient(Color::WHITE, 1.0)).into_shared();
        let mut panel = ControlPanel::new();
        panel
            .root_mut()
            .add_number("intensity", LightScalar::new(rig, ScalarProperty::Intensity).unwrap(), 2.0, 0.0);
    }

    #[test]
    fn test_rotation_group_clamps_degrees() {
        let rig = LightRig::new(Light::rect_area(Color::WHITE, 5.0, 12.0, 4.0)).into_shared();
        let mut panel = ControlPanel::new();
        make_axis_group(panel.root_mut(), "rotation", &rig, AxisSource::Rotation, None).unwrap();

        assert_relative_eq!(panel.set_number("rotation/x", -270.0).unwrap(), -180.0);
        assert_relative_eq!(rig.borrow().light().rotation.x, -std::f32::consts::PI, epsilon = 1e-5);
    }

    #[test]
    fn test_failed_color_write_skips_callback() {
        let rig = LightRig::new(Light::ambient(Color::WHITE, 1.0)).into_shared();
        let mut panel = ControlPanel::new();
        let (count, callback) = counter();
        panel
            .root_mut()
            .add_color("color", ColorAdapter::new(LightColor::new(rig.clone())))
            .on_change(callback);

        assert!(panel.set_color("color", "not a color").is_err());
        assert_eq!(count.get(), 0);

        panel.set_color("color", "#FF0000").unwrap();
        assert_eq!(count.get(), 1);
        assert_eq!(panel.value("color").unwrap(), ControlValue::Color("#ff0000".to_string()));
    }

    #[test]
    fn test_edit_errors() {
        let rig = LightRig::new(Light::ambient(Color::WHITE, 1.0)).into_shared();
        let mut panel = ControlPanel::new();
        panel.root_mut().add_color("color", ColorAdapter::new(LightColor::new(rig)));

        assert_eq!(panel.set_number("missing", 1.0), Err(PanelError::UnknownControl("missing".to_string())));
        assert!(matches!(panel.set_number("color", 1.0), Err(PanelError::TypeMismatch { expected: "number", .. })));
    }

    #[test]
    fn test_control_paths_depth_first() {
        let rig = LightRig::new(Light::directional(Color::WHITE, 1.0)).into_shared();
        let mut panel = ControlPanel::new();
        panel.root_mut().add_color("color", ColorAdapter::new(LightColor::new(rig.clone())));
        make_axis_group(panel.root_mut(), "target", &rig, AxisSource::Vector(VectorProperty::Target), None).unwrap();

        assert_eq!(panel.control_paths(), ["color", "target/x", "target/y", "target/z"]);
    }
}

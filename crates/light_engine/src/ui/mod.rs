//! UI module
//!
//! - `binding`: typed read/write access to light properties, plus adapters
//! - `panel`: folder/control tree with clamped, callback-carrying edits
//! - `navigator`: keyboard selection and nudging over a panel

pub mod binding;
pub mod navigator;
pub mod panel;

pub use binding::{
    AngleAdapter, Axis, Binding, BindingError, ColorAdapter, LightColor, LightScalar, RotationAxis,
    ScalarProperty, VectorAxis, VectorProperty,
};
pub use navigator::{NavKey, PanelNavigator, PanelRow};
pub use panel::{
    make_axis_group, AxisSource, ChangeCallback, Control, ControlKind, ControlPanel, ControlValue, Folder,
    PanelError,
};

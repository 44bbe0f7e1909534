//! # Light Engine
//!
//! Interactive light demos: one light in a small scene, a control panel bound to the
//! light's properties, helpers that visualise where the light sits and points, and a
//! render loop that keeps the camera in step with the window.
//!
//! ## Modules
//!
//! - **foundation**: math aliases, frame timing and logging setup
//! - **config**: TOML/RON demo configuration
//! - **events**: light change flags and observers
//! - **render**: colors, meshes, textures, camera, surfaces and the render loop
//! - **scene**: lights, helpers, the light rig, the scene container and orbit controls
//! - **ui**: typed bindings, the control panel and keyboard navigation
//! - **demo**: the four light demos
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use light_engine::prelude::*;
//!
//! fn main() -> Result<(), AppError> {
//!     light_engine::foundation::logging::init();
//!     let config = DemoConfig::load_or_default("light_demo.toml");
//!     run_demo(LightDescriptor::Directional, &config)
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod demo;
pub mod events;
pub mod foundation;
pub mod render;
pub mod scene;
pub mod ui;

mod application;

pub use application::AppError;

/// Common imports for demo programs
pub mod prelude {
    pub use crate::{
        config::{Config, DemoConfig},
        demo::{run_demo, LightDemo, LightDescriptor},
        events::{LightChange, LightObserver},
        foundation::math::{Transform, Vec3},
        render::{Camera, Color, DisplaySurface, SceneRenderer},
        scene::{Light, LightRig, Scene, SharedRig},
        ui::{Binding, ControlPanel},
        AppError,
    };
}

//! Light demos
//!
//! One generic demo parameterised by a `LightDescriptor`.

pub mod bootstrap;
pub mod descriptor;
pub mod runner;


pub use descriptor::LightDescriptor;
pub use runner::{run_demo, translate_event, DemoInput, LightDemo, PointerButton};

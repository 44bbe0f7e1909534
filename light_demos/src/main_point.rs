//! Demo: physically-correct point light

use light_engine::demo::LightDescriptor;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    light_demos::launch(LightDescriptor::Point)
}

//! Demo: directional light aimed at a movable target

use light_engine::demo::LightDescriptor;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    light_demos::launch(LightDescriptor::Directional)
}

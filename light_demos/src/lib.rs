//! Shared entry point for the light demo binaries

use light_engine::config::DemoConfig;
use light_engine::demo::{run_demo, LightDescriptor};

/// Config file looked up in the working directory
pub const CONFIG_PATH: &str = "light_demo.toml";

/// Set up logging, load the config and run `descriptor` until its window closes
pub fn launch(descriptor: LightDescriptor) -> Result<(), Box<dyn std::error::Error>> {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC occurred: {panic_info}");
    }));

    light_engine::foundation::logging::init();

    log::info!("Starting {} demo", descriptor.title());
    let config = DemoConfig::load_or_default(CONFIG_PATH);
    run_demo(descriptor, &config)?;
    Ok(())
}

//! Application-level errors

use thiserror::Error;

use crate::config::ConfigError;
use crate::render::draw_list::RenderError;
use crate::render::surface::WindowError;
use crate::ui::panel::PanelError;

/// Errors surfaced by a running demo
#[derive(Error, Debug)]
pub enum AppError {
    /// Window could not be opened
    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    /// Frame could not be drawn
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Panel registration or edit failed
    #[error("Panel error: {0}")]
    Panel(#[from] PanelError),

    /// Configuration could not be read or written
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

//! Display surfaces
//!
//! A surface has two sizes: the size it is displayed at (the window's framebuffer,
//! in device pixels, so HiDPI displays report more than the window's screen
//! coordinates) and the size of its backing store (what the renderer draws into). The render loop
//! compares the two every frame and resizes the backing store when they differ.

use thiserror::Error;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// GLFW could not be initialised
    #[error("GLFW initialization failed")]
    InitializationFailed,

    /// The window could not be created
    #[error("Window creation failed")]
    CreationFailed,
}

/// Something the renderer draws into
pub trait DisplaySurface {
    /// Size the surface is currently displayed at, in pixels
    fn display_size(&self) -> (u32, u32);

    /// Size of the backing store, in pixels
    fn backing_size(&self) -> (u32, u32);

    /// Resize the backing store
    fn set_backing_size(&mut self, width: u32, height: u32);
}

/// GLFW window with no client API; the backing store size is tracked here
pub struct GlfwSurface {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    backing: (u32, u32),
}

impl GlfwSurface {
    /// Open a resizable window
    ///
    /// The backing store starts at 0×0 so the first frame always resizes it.
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, WindowError> {
        let mut glfw = glfw::init(glfw::fail_on_errors).map_err(|_| WindowError::InitializationFailed)?;

        glfw.window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::NoApi));
        glfw.window_hint(glfw::WindowHint::Resizable(true));

        let (mut window, events) = glfw
            .create_window(width, height, title, glfw::WindowMode::Windowed)
            .ok_or(WindowError::CreationFailed)?;

        window.set_key_polling(true);
        window.set_close_polling(true);
        window.set_size_polling(true);
        window.set_framebuffer_size_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_mouse_button_polling(true);
        window.set_scroll_polling(true);

        log::info!("Opened window '{}' ({}x{})", title, width, height);
        Ok(Self {
            glfw,
            window,
            events,
            backing: (0, 0),
        })
    }

    /// Whether the user asked to close the window
    pub fn should_close(&self) -> bool {
        self.window.should_close()
    }

    /// Request the window to close
    pub fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    /// Pump the event queue and return everything received since the last call
    pub fn poll_events(&mut self) -> Vec<glfw::WindowEvent> {
        self.glfw.poll_events();
        glfw::flush_messages(&self.events).map(|(_, event)| event).collect()
    }

    /// Replace the title bar text
    pub fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }
}

impl DisplaySurface for GlfwSurface {
    fn display_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        pixel_extent(width, height)
    }

    fn backing_size(&self) -> (u32, u32) {
        self.backing
    }

    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.backing = (width, height);
    }
}

/// Convert a signed GLFW extent to pixels, treating negative sizes as empty
fn pixel_extent(width: i32, height: i32) -> (u32, u32) {
    (width.max(0).unsigned_abs(), height.max(0).unsigned_abs())
}

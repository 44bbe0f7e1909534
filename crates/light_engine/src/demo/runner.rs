//! Demo runner
//!
//! `LightDemo` owns everything one light demo needs: the scene and its light rig, the
//! camera and orbit controls, the control panel and the render loop. `run_demo` wraps
//! it in a GLFW window and pumps events until the window closes.

use glfw::{Action, Key, MouseButton, WindowEvent};

use crate::application::AppError;
use crate::config::DemoConfig;
use crate::demo::bootstrap::{build_camera, build_scene};
use crate::demo::descriptor::LightDescriptor;
use crate::render::camera::Camera;
use crate::render::draw_list::DrawListRenderer;
use crate::render::render_loop::{FrameReport, RenderLoop};
use crate::render::surface::{DisplaySurface, GlfwSurface};
use crate::scene::graph::Scene;
use crate::scene::orbit::OrbitControls;
use crate::scene::rig::{LightRig, SharedRig};
use crate::ui::navigator::{NavKey, PanelNavigator};
use crate::ui::panel::ControlPanel;

/// Pointer buttons the orbit controls react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Rotate
    Primary,
    /// Pan
    Secondary,
}

/// Window-system independent input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DemoInput {
    /// Panel navigation key
    Key(NavKey),
    /// Pointer moved to window coordinates
    PointerMoved(f32, f32),
    /// Pointer button pressed or released
    Button(PointerButton, bool),
    /// Scroll by steps; positive is away from the user
    Scroll(f32),
}

#[derive(Debug, Default)]
struct DragState {
    button: Option<PointerButton>,
    last: Option<(f32, f32)>,
}

/// One running light demo
pub struct LightDemo {
    descriptor: LightDescriptor,
    scene: Scene,
    rig: SharedRig,
    camera: Camera,
    orbit: OrbitControls,
    panel: ControlPanel,
    navigator: PanelNavigator,
    render_loop: RenderLoop,
    renderer: DrawListRenderer,
    drag: DragState,
}

impl LightDemo {
    /// Build the scene, light and panel for `descriptor`
    pub fn new(descriptor: LightDescriptor, config: &DemoConfig) -> Result<Self, AppError> {
        config.camera.validate()?;
        let mut scene = build_scene(&config.scene, descriptor.shading_model());
        let (camera, orbit) = build_camera(&config.camera);

        let rig = LightRig::new(descriptor.build_light()).into_shared();
        scene.set_light_rig(rig.clone());

        let mut panel = ControlPanel::new();
        descriptor.register_controls(&mut panel, &rig)?;

        log::info!("{} demo ready", descriptor.title());
        Ok(Self {
            descriptor,
            scene,
            rig,
            camera,
            orbit,
            panel,
            navigator: PanelNavigator::new(),
            render_loop: RenderLoop::new(),
            renderer: DrawListRenderer::new(),
            drag: DragState::default(),
        })
    }

    /// Which light this demo shows
    pub fn descriptor(&self) -> LightDescriptor {
        self.descriptor
    }

    /// The light rig shared with the panel
    pub fn rig(&self) -> &SharedRig {
        &self.rig
    }

    /// Control panel
    pub fn panel(&self) -> &ControlPanel {
        &self.panel
    }

    /// Scene being drawn
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Renderer, with the most recent frame
    pub fn renderer(&self) -> &DrawListRenderer {
        &self.renderer
    }

    /// Status text for the selected panel row
    pub fn status_line(&self) -> Option<String> {
        self.navigator.status_line(&self.panel)
    }

    /// Route one input event to the panel or the orbit controls
    ///
    /// Returns whether the panel changed.
    pub fn handle_input(&mut self, input: DemoInput) -> Result<bool, AppError> {
        match input {
            DemoInput::Key(key) => return Ok(self.navigator.handle_key(&mut self.panel, key)?),
            DemoInput::Button(button, pressed) => {
                self.drag.button = pressed.then_some(button);
                if !pressed {
                    self.drag.last = None;
                }
            }
            DemoInput::PointerMoved(x, y) => {
                if let (Some(button), Some((last_x, last_y))) = (self.drag.button, self.drag.last) {
                    let (dx, dy) = (x - last_x, y - last_y);
                    match button {
                        PointerButton::Primary => self.orbit.rotate(dx, dy),
                        PointerButton::Secondary => self.orbit.pan(dx, dy, &self.camera),
                    }
                }
                self.drag.last = Some((x, y));
            }
            DemoInput::Scroll(steps) => self.orbit.dolly(steps),
        }
        Ok(false)
    }

    /// Apply orbit controls and run one render-loop frame
    pub fn frame<S: DisplaySurface + ?Sized>(&mut self, surface: &mut S) -> Result<FrameReport, AppError> {
        self.orbit.update(&mut self.camera);
        let report = self
            .render_loop
            .frame(surface, &mut self.renderer, &self.scene, &mut self.camera)?;
        Ok(report)
    }
}

/// Map a GLFW event to demo input; returns `None` for events the demo ignores
#[allow(clippy::cast_possible_truncation)]
pub fn translate_event(event: &WindowEvent) -> Option<DemoInput> {
    match *event {
        WindowEvent::Key(key, _, Action::Press | Action::Repeat, _) => {
            let key = match key {
                Key::Up => NavKey::Up,
                Key::Down => NavKey::Down,
                Key::Left => NavKey::Left,
                Key::Right => NavKey::Right,
                Key::Tab => NavKey::Tab,
                _ => return None,
            };
            Some(DemoInput::Key(key))
        }
        WindowEvent::CursorPos(x, y) => Some(DemoInput::PointerMoved(x as f32, y as f32)),
        WindowEvent::MouseButton(button, action, _) => {
            let button = match button {
                MouseButton::Button1 => PointerButton::Primary,
                MouseButton::Button2 => PointerButton::Secondary,
                _ => return None,
            };
            Some(DemoInput::Button(button, action == Action::Press))
        }
        WindowEvent::Scroll(_, y) => Some(DemoInput::Scroll(y as f32)),
        _ => None,
    }
}

/// Open a window and run `descriptor` until the window closes
pub fn run_demo(descriptor: LightDescriptor, config: &DemoConfig) -> Result<(), AppError> {
    let title = format!("{} - {}", config.window.title, descriptor.title());
    let mut surface = GlfwSurface::new(&title, config.window.width, config.window.height)?;
    let mut demo = LightDemo::new(descriptor, config)?;

    while !surface.should_close() {
        for event in surface.poll_events() {
            if let WindowEvent::Key(Key::Escape, _, Action::Press, _) = event {
                surface.set_should_close(true);
                continue;
            }
            let Some(input) = translate_event(&event) else {
                continue;
            };
            match demo.handle_input(input) {
                Ok(true) => {
                    let status = demo.status_line().unwrap_or_default();
                    surface.set_title(&format!("{title} | {status}"));
                }
                Ok(false) => {}
                // Bad edits are reported and the demo keeps running
                Err(AppError::Panel(e)) => log::warn!("Panel edit rejected: {}", e),
                Err(e) => return Err(e),
            }
        }

        demo.frame(&mut surface)?;
    }

    log::info!("{} demo closed after {} frames", descriptor.title(), demo.renderer().frame_count());
    Ok(())
}

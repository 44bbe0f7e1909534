//! Keyboard navigation over a control panel
//!
//! Up/Down move the selection through the visible rows (folder headers and the
//! controls of open folders). Left/Right nudge the selected number by its step, or by
//! 1% of its range when it has none, and cycle color controls through a palette. Tab
//! toggles the folder of the selected row.

use crate::ui::panel::{join, ControlKind, ControlPanel, ControlValue, Folder, PanelError};

const PALETTE: [&str; 8] = [
    "#ffffff", "#ff0000", "#ffa500", "#ffff00", "#00ff00", "#00ffff", "#0000ff", "#ff00ff",
];

/// Navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    /// Previous row
    Up,
    /// Next row
    Down,
    /// Decrease / previous color
    Left,
    /// Increase / next color
    Right,
    /// Open or close the folder
    Tab,
}

/// A visible panel row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelRow {
    /// Folder header, by folder path
    Folder(String),
    /// Control, by control path
    Control(String),
}

impl PanelRow {
    fn path(&self) -> &str {
        match self {
            Self::Folder(path) | Self::Control(path) => path,
        }
    }
}

/// Rows currently visible, top to bottom
pub fn visible_rows(panel: &ControlPanel) -> Vec<PanelRow> {
    let mut rows = Vec::new();
    push_rows(panel.root(), "", &mut rows);
    rows
}

fn push_rows(folder: &Folder, prefix: &str, rows: &mut Vec<PanelRow>) {
    for control in folder.controls() {
        rows.push(PanelRow::Control(join(prefix, control.name())));
    }
    for child in folder.folders() {
        let path = join(prefix, child.name());
        rows.push(PanelRow::Folder(path.clone()));
        if child.is_open() {
            push_rows(child, &path, rows);
        }
    }
}

/// Selection state for keyboard editing
#[derive(Debug, Default)]
pub struct PanelNavigator {
    selected: usize,
}

impl PanelNavigator {
    /// Select the first row
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected row, if the panel has any
    pub fn selected(&self, panel: &ControlPanel) -> Option<PanelRow> {
        let rows = visible_rows(panel);
        let index = self.selected.min(rows.len().checked_sub(1)?);
        rows.into_iter().nth(index)
    }

    /// Apply one key press; returns whether anything changed
    pub fn handle_key(&mut self, panel: &mut ControlPanel, key: NavKey) -> Result<bool, PanelError> {
        let rows = visible_rows(panel);
        if rows.is_empty() {
            return Ok(false);
        }
        self.selected = self.selected.min(rows.len() - 1);

        match key {
            NavKey::Up => {
                self.selected = self.selected.checked_sub(1).unwrap_or(rows.len() - 1);
                Ok(true)
            }
            NavKey::Down => {
                self.selected = (self.selected + 1) % rows.len();
                Ok(true)
            }
            NavKey::Left => nudge(panel, &rows[self.selected], -1),
            NavKey::Right => nudge(panel, &rows[self.selected], 1),
            NavKey::Tab => {
                let folder_path = match &rows[self.selected] {
                    PanelRow::Folder(path) => path.clone(),
                    PanelRow::Control(path) => match path.rsplit_once('/') {
                        Some((folder, _)) => folder.to_string(),
                        None => return Ok(false),
                    },
                };
                let folder = panel
                    .folder_mut(&folder_path)
                    .ok_or_else(|| PanelError::UnknownFolder(folder_path.clone()))?;
                let open = !folder.is_open();
                folder.set_open(open);
                log::debug!("Folder '{}' {}", folder_path, if open { "opened" } else { "closed" });

                let header = PanelRow::Folder(folder_path);
                self.selected = visible_rows(panel).iter().position(|row| *row == header).unwrap_or(0);
                Ok(true)
            }
        }
    }

    /// One-line description of the selection, e.g. `"target/y = 7.00"`
    pub fn status_line(&self, panel: &ControlPanel) -> Option<String> {
        let row = self.selected(panel)?;
        Some(match &row {
            PanelRow::Folder(path) => {
                let open = panel.folder(path).is_some_and(Folder::is_open);
                format!("[{}] {}", if open { "-" } else { "+" }, path)
            }
            PanelRow::Control(path) => match panel.value(path).ok()? {
                ControlValue::Number(value) => format!("{} = {:.2}", row.path(), value),
                ControlValue::Color(color) => format!("{} = {}", row.path(), color),
            },
        })
    }
}

fn nudge(panel: &ControlPanel, row: &PanelRow, direction: i8) -> Result<bool, PanelError> {
    let PanelRow::Control(path) = row else {
        return Ok(false);
    };
    let control = panel.control(path).ok_or_else(|| PanelError::UnknownControl(path.clone()))?;

    match control.kind() {
        ControlKind::Number { binding, min, max, step } => {
            let increment = step.unwrap_or((max - min) * 0.01);
            panel.set_number(path, binding.read() + increment * f32::from(direction))?;
        }
        ControlKind::Color { binding } => {
            let current = binding.read();
            let index = PALETTE.iter().position(|c| *c == current);
            let len = PALETTE.len();
            let next = match (index, direction > 0) {
                (Some(i), true) => (i + 1) % len,
                (Some(i), false) => (i + len - 1) % len,
                (None, _) => 0,
            };
            panel.set_color(path, PALETTE[next])?;
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::color::Color;
    use crate::scene::light::Light;
    use crate::scene::rig::{LightRig, SharedRig};
    use crate::ui::binding::{ColorAdapter, LightColor, LightScalar, ScalarProperty, VectorProperty};
    use crate::ui::panel::{make_axis_group, AxisSource};
    use approx::assert_relative_eq;

    fn panel() -> (SharedRig, ControlPanel) {
        let rig = LightRig::new(Light::directional(Color::WHITE, 1.0)).into_shared();
        let mut panel = ControlPanel::new();
        panel.root_mut().add_color("color", ColorAdapter::new(LightColor::new(rig.clone())));
        panel
            .root_mut()
            .add_number("intensity", LightScalar::new(rig.clone(), ScalarProperty::Intensity).unwrap(), 0.0, 2.0)
            .step(0.01);
        make_axis_group(panel.root_mut(), "target", &rig, AxisSource::Vector(VectorProperty::Target), None).unwrap();
        (rig, panel)
    }

    #[test]
    fn test_rows_follow_folder_state() {
        let (_, mut panel) = panel();
        assert_eq!(visible_rows(&panel).len(), 6);

        let mut navigator = PanelNavigator::new();
        navigator.handle_key(&mut panel, NavKey::Down).unwrap();
        navigator.handle_key(&mut panel, NavKey::Down).unwrap();
        navigator.handle_key(&mut panel, NavKey::Down).unwrap();
        assert_eq!(navigator.selected(&panel), Some(PanelRow::Control("target/x".to_string())));

        navigator.handle_key(&mut panel, NavKey::Tab).unwrap();
        assert_eq!(visible_rows(&panel).len(), 3);
        assert_eq!(navigator.selected(&panel), Some(PanelRow::Folder("target".to_string())));
        assert_eq!(navigator.status_line(&panel).as_deref(), Some("[+] target"));
    }

    #[test]
    fn test_nudge_uses_step_or_range() {
        let (rig, mut panel) = panel();
        let mut navigator = PanelNavigator::new();
        navigator.handle_key(&mut panel, NavKey::Down).unwrap();
        navigator.handle_key(&mut panel, NavKey::Left).unwrap();
        assert_relative_eq!(rig.borrow().light().intensity, 0.99, epsilon = 1e-5);

        navigator.handle_key(&mut panel, NavKey::Down).unwrap();
        navigator.handle_key(&mut panel, NavKey::Down).unwrap();
        navigator.handle_key(&mut panel, NavKey::Right).unwrap();
        assert_relative_eq!(rig.borrow().light().target().unwrap().x, 0.2, epsilon = 1e-5);
    }

    #[test]
    fn test_color_cycles_palette() {
        let (rig, mut panel) = panel();
        let mut navigator = PanelNavigator::new();
        navigator.handle_key(&mut panel, NavKey::Right).unwrap();
        assert_eq!(rig.borrow().light().color, Color::from_hex(0xff0000));
        navigator.handle_key(&mut panel, NavKey::Left).unwrap();
        navigator.handle_key(&mut panel, NavKey::Left).unwrap();
        assert_eq!(rig.borrow().light().color, Color::from_hex(0xff00ff));
    }

    #[test]
    fn test_up_wraps_to_last_row() {
        let (_, mut panel) = panel();
        let mut navigator = PanelNavigator::new();
        navigator.handle_key(&mut panel, NavKey::Up).unwrap();
        assert_eq!(navigator.selected(&panel), Some(PanelRow::Control("target/z".to_string())));
    }
}

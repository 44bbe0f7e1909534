//! Light rig: a light, its helper and the observers watching it
//!
//! The rig is the only way to mutate a light after construction. `modify` applies a
//! change and then synchronously refreshes the helper (when the change touches
//! something it draws) and notifies every other interested observer, so the helper
//! can never lag behind the light by a frame.
//!
//! The helper occupies a dedicated first observer slot. It is held outside the
//! `ObserverList` so the renderer can borrow it for drawing, and is notified through
//! its `LightObserver` impl ahead of everything registered with `subscribe`. The
//! demos themselves register no further observers; `subscribe` is the hook for
//! hosts that embed a rig and want to react to edits.

use std::cell::RefCell;
use std::rc::Rc;

use crate::events::{LightChange, LightObserver, ObserverList};
use crate::scene::helper::LightHelper;
use crate::scene::light::Light;

/// Shared handle used by panel bindings and the scene
pub type SharedRig = Rc<RefCell<LightRig>>;

/// A light together with its helper and observers
pub struct LightRig {
    light: Light,
    helper: Option<LightHelper>,
    observers: ObserverList,
    revision: u64,
}

impl LightRig {
    /// Wrap `light`, create its helper and synchronise it once
    pub fn new(light: Light) -> Self {
        let helper = LightHelper::for_light(&light);
        let mut rig = Self {
            light,
            helper,
            observers: ObserverList::new(),
            revision: 0,
        };
        rig.refresh_helper();
        log::debug!(
            "Created {} light rig (helper: {})",
            rig.light.kind_name(),
            rig.helper.is_some()
        );
        rig
    }

    /// Wrap into a shared handle
    pub fn into_shared(self) -> SharedRig {
        Rc::new(RefCell::new(self))
    }

    /// Current light state
    pub fn light(&self) -> &Light {
        &self.light
    }

    /// Helper, if the light variant has one
    pub fn helper(&self) -> Option<&LightHelper> {
        self.helper.as_ref()
    }

    /// Number of mutations applied so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Register an observer for future changes, notified after the helper
    pub fn subscribe(&mut self, observer: Box<dyn LightObserver>) {
        self.observers.subscribe(observer);
    }

    /// Apply `edit` to the light and announce `change`
    ///
    /// The helper is refreshed before any other observer runs.
    pub fn modify<R>(&mut self, change: LightChange, edit: impl FnOnce(&mut Light) -> R) -> R {
        let result = edit(&mut self.light);
        self.revision += 1;

        if let Some(helper) = &mut self.helper {
            if helper.interests().intersects(change) {
                helper.light_changed(&self.light, change);
                log::debug!("Refreshed {} helper after {:?}", self.light.kind_name(), change);
            }
        }
        self.observers.notify(&self.light, change);
        result
    }

    /// Recompute the helper from the light's current transform
    ///
    /// Idempotent; a no-op for lights without a helper.
    pub fn refresh_helper(&mut self) {
        if let Some(helper) = &mut self.helper {
            helper.update(&self.light);
        }
    }
}

//! Light change notifications
//!
//! Every mutation of a light is tagged with the set of properties it touched.
//! Observers declare which properties they care about and are called synchronously,
//! inside the mutating call, so nothing can be drawn between a change and the
//! observers' reaction to it.

use bitflags::bitflags;

use crate::scene::light::Light;

bitflags! {
    /// Properties of a light touched by a mutation
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LightChange: u8 {
        /// Object position
        const POSITION = 1 << 0;
        /// Directional target position
        const TARGET = 1 << 1;
        /// Object rotation
        const ROTATION = 1 << 2;
        /// Area light width or height
        const EXTENT = 1 << 3;
        /// Light color
        const COLOR = 1 << 4;
        /// Intensity, power, decay or distance
        const INTENSITY = 1 << 5;

        /// Everything that moves, turns or resizes what a helper draws
        const SPATIAL = Self::POSITION.bits()
            | Self::TARGET.bits()
            | Self::ROTATION.bits()
            | Self::EXTENT.bits();
    }
}

/// Receives light change notifications
///
/// Handlers run synchronously on the thread that mutated the light and must not
/// try to mutate the light themselves.
pub trait LightObserver {
    /// Properties this observer wants to hear about
    fn interests(&self) -> LightChange {
        LightChange::all()
    }

    /// Called after `light` was mutated; `change` names what was touched
    fn light_changed(&mut self, light: &Light, change: LightChange);
}

/// Ordered list of observers
#[derive(Default)]
pub struct ObserverList {
    observers: Vec<Box<dyn LightObserver>>,
}

impl ObserverList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer; observers are notified in registration order
    pub fn subscribe(&mut self, observer: Box<dyn LightObserver>) {
        self.observers.push(observer);
    }

    /// Number of registered observers
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Whether no observers are registered
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Notify every observer interested in `change`
    pub fn notify(&mut self, light: &Light, change: LightChange) {
        for observer in &mut self.observers {
            if observer.interests().intersects(change) {
                observer.light_changed(light, change);
            }
        }
    }
}

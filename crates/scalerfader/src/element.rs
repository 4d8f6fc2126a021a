// SPDX-License-Identifier: MIT OR Apache-2.0
//! Elements participating in a rotation.

use scalerfader_animation::{Animatable, AnimatedProperty};
use std::cell::Cell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use uuid::Uuid;

/// Unique identifier for an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub Uuid);

impl ElementId {
    /// Create a new random element ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

struct ElementState {
    id: ElementId,
    name: String,
    scale_x: Cell<f32>,
    scale_y: Cell<f32>,
    alpha: Cell<f32>,
}

/// Handle to one visual item in the stack.
///
/// Clones refer to the same item; equality and hashing use the element's
/// identity, never its current property values.
#[derive(Clone)]
pub struct Element {
    inner: Rc<ElementState>,
}

impl Element {
    /// Create an element at rest: scale (1, 1), fully opaque
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(ElementState {
                id: ElementId::new(),
                name: name.into(),
                scale_x: Cell::new(1.0),
                scale_y: Cell::new(1.0),
                alpha: Cell::new(1.0),
            }),
        }
    }

    /// Get the element ID
    pub fn id(&self) -> ElementId {
        self.inner.id
    }

    /// Get the display name
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Current scale as (x, y)
    pub fn scale(&self) -> (f32, f32) {
        (self.inner.scale_x.get(), self.inner.scale_y.get())
    }

    /// Set both scale axes
    pub fn set_scale(&self, x: f32, y: f32) {
        self.inner.scale_x.set(x);
        self.inner.scale_y.set(y);
    }

    /// Current opacity
    pub fn alpha(&self) -> f32 {
        self.inner.alpha.get()
    }

    /// Set opacity
    pub fn set_alpha(&self, alpha: f32) {
        self.inner.alpha.set(alpha);
    }

    /// Restore scale (1, 1) and full opacity
    pub fn reset_properties(&self) {
        self.set_scale(1.0, 1.0);
        self.set_alpha(1.0);
    }

    /// Whether the element shows no animation residue
    pub fn is_at_rest(&self) -> bool {
        self.scale() == (1.0, 1.0) && self.alpha() == 1.0
    }

    /// Shared handle for animations targeting this element
    pub fn as_target(&self) -> Rc<dyn Animatable> {
        Rc::new(self.clone())
    }
}

impl Animatable for Element {
    fn set_property(&self, property: AnimatedProperty, value: f32) {
        match property {
            AnimatedProperty::ScaleX => self.inner.scale_x.set(value),
            AnimatedProperty::ScaleY => self.inner.scale_y.set(value),
            AnimatedProperty::Alpha => self.inner.alpha.set(value),
        }
    }

    fn property(&self, property: AnimatedProperty) -> f32 {
        match property {
            AnimatedProperty::ScaleX => self.inner.scale_x.get(),
            AnimatedProperty::ScaleY => self.inner.scale_y.get(),
            AnimatedProperty::Alpha => self.inner.alpha.get(),
        }
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for Element {}

impl Hash for Element {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("name", &self.inner.name)
            .field("scale", &self.scale())
            .field("alpha", &self.alpha())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_equality() {
        let a = Element::new("a");
        let same = a.clone();
        let twin = Element::new("a");

        same.set_alpha(0.3);
        assert_eq!(a, same);
        assert_eq!(a.alpha(), 0.3);
        assert_ne!(a, twin);
    }

    #[test]
    fn test_animatable_properties() {
        let element = Element::new("photo");
        element.set_property(AnimatedProperty::ScaleX, 1.1);
        element.set_property(AnimatedProperty::ScaleY, 1.2);
        element.set_property(AnimatedProperty::Alpha, 0.5);

        assert_eq!(element.scale(), (1.1, 1.2));
        assert_eq!(element.property(AnimatedProperty::Alpha), 0.5);
        assert!(!element.is_at_rest());

        element.reset_properties();
        assert!(element.is_at_rest());
    }
}

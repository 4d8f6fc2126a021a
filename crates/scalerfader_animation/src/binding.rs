// SPDX-License-Identifier: MIT OR Apache-2.0
//! Binding of animated values to target properties.

use serde::{Deserialize, Serialize};

/// A float property an animation can drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimatedProperty {
    /// Horizontal scale factor
    ScaleX,
    /// Vertical scale factor
    ScaleY,
    /// Opacity in [0, 1]
    Alpha,
}

impl AnimatedProperty {
    /// Value of the property on an untouched target
    pub fn rest_value(&self) -> f32 {
        1.0
    }
}

/// Something whose properties can be animated.
///
/// Setters take `&self`: targets are shared between the host and the running
/// animations on a single timeline and use interior mutability.
pub trait Animatable {
    /// Write a property value
    fn set_property(&self, property: AnimatedProperty, value: f32);

    /// Read a property value
    fn property(&self, property: AnimatedProperty) -> f32;
}

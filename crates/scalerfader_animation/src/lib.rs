// SPDX-License-Identifier: MIT OR Apache-2.0
//! Property animation primitives for ScalerFader.
//!
//! This crate provides the pieces a rotation scheduler animates with:
//! - Keyframed float tracks over normalized progress
//! - Easing curves (interpolators)
//! - Cancellable animation handles with progress and completion listeners
//! - A frame clock that drives every running animation
//! - Scale + fade transitions built from a [`TransitionConfig`]
//!
//! ## Architecture
//!
//! Everything runs on one timeline. Handles are reference counted and use
//! interior mutability, and listeners are invoked with no borrow held, so a
//! listener may start, cancel or reconfigure any animation (itself included).

pub mod animation;
pub mod binding;
pub mod clock;
pub mod keyframe;
pub mod track;
pub mod transition;

pub use animation::{AnimationHandle, AnimationId, AnimationStatus, EndReason, ListenerId};
pub use binding::{Animatable, AnimatedProperty};
pub use clock::AnimationClock;
pub use keyframe::{Interpolation, Interpolator, Keyframe};
pub use track::PropertyTrack;
pub use transition::{Transition, TransitionBuilder, TransitionConfig, TransitionConfigError};

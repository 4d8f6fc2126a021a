// SPDX-License-Identifier: MIT OR Apache-2.0
//! ScalerFader: endless Ken Burns rotation of a stack of elements.
//!
//! The front element scales up and, past a configurable fraction of its
//! transition, fades into the element behind it, which starts its own
//! transition at that moment. Finished elements move to the back of the
//! stack, so the rotation never ends.
//!
//! ## Architecture
//!
//! - [`RotationScheduler`] decides what animates next and keeps the stack in
//!   rotation. It only sees the host through the [`Reorderable`] capability.
//! - [`ElementRegistry`] holds the single in-flight transition of each element.
//! - [`ScalerFader`] is a host container that owns the stack and forwards its
//!   lifecycle to the scheduler.
//!
//! Everything runs on the thread that ticks the
//! [`AnimationClock`](scalerfader_animation::AnimationClock).

pub mod config;
pub mod container;
pub mod element;
pub mod error;
pub mod registry;
pub mod reorderable;
pub mod scheduler;

pub use config::ScalerFaderConfig;
pub use container::ScalerFader;
pub use element::{Element, ElementId};
pub use error::{ConfigError, ContainerError, RotationError};
pub use registry::ElementRegistry;
pub use reorderable::{ElementStack, Reorderable};
pub use scheduler::RotationScheduler;

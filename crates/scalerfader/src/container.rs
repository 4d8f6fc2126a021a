// SPDX-License-Identifier: MIT OR Apache-2.0
//! The ScalerFader container.
//!
//! Owns a stack of two or more elements and rotates them with a
//! [`RotationScheduler`]. The last element pushed is the first one animated.

use crate::config::ScalerFaderConfig;
use crate::element::Element;
use crate::error::{ConfigError, ContainerError};
use crate::reorderable::{ElementStack, Reorderable};
use crate::scheduler::RotationScheduler;
use scalerfader_animation::AnimationClock;
use std::rc::Rc;

/// Result type for container operations
pub type Result<T> = std::result::Result<T, ContainerError>;

/// Container animating its children with scale and fade transitions
pub struct ScalerFader {
    config: ScalerFaderConfig,
    children: Rc<ElementStack>,
    scheduler: RotationScheduler,
}

impl ScalerFader {
    /// Create an empty container driven by `clock`
    pub fn new(
        config: ScalerFaderConfig,
        clock: AnimationClock,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        let children = Rc::new(ElementStack::new());
        let scheduler = RotationScheduler::new(children.clone(), config.transition, clock);
        Ok(Self {
            config,
            children,
            scheduler,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &ScalerFaderConfig {
        &self.config
    }

    /// Push an element on top of the stack.
    ///
    /// The last element pushed is the first one the user sees animated.
    pub fn push(&self, element: Element) -> Result<()> {
        if self.is_started() {
            return Err(ContainerError::PushWhileRunning);
        }
        if self.children.contains(&element) {
            return Err(ContainerError::DuplicateElement(element.name().to_string()));
        }
        self.children.insert_at_front(element);
        Ok(())
    }

    /// Push several elements, bottom first
    pub fn push_all(&self, elements: impl IntoIterator<Item = Element>) -> Result<()> {
        for element in elements {
            self.push(element)?;
        }
        Ok(())
    }

    /// Start the rotation
    pub fn start(&self) -> Result<()> {
        self.scheduler.start()?;
        Ok(())
    }

    /// Stop the rotation and restore the original stack
    pub fn reset(&self) {
        self.scheduler.reset();
    }

    /// Is the rotation started
    pub fn is_started(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Host layout pass. Starts the rotation if configured to start immediately.
    pub fn on_layout(&self) -> Result<()> {
        if self.config.start_immediately && !self.is_started() {
            self.start()?;
        }
        Ok(())
    }

    /// Host detach. No animation outlives the container's place on screen.
    pub fn on_detached(&self) {
        self.reset();
    }

    /// Current order, back to front
    pub fn children(&self) -> Vec<Element> {
        self.children.ordered_elements()
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Has no elements
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Get the scheduler
    pub fn scheduler(&self) -> &RotationScheduler {
        &self.scheduler
    }
}

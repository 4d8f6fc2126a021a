// SPDX-License-Identifier: MIT OR Apache-2.0
//! Rotation scheduler.
//!
//! The scheduler animates the front element of a [`Reorderable`] stack and
//! keeps the rotation going on its own:
//! - once a transition passes the fade fraction, the element behind it
//!   begins its own transition, so two elements overlap while one fades out
//! - once a transition completes, its element moves to the back of the stack,
//!   ready to be revealed again
//!
//! `reset()` disposes every transition, restores each element's properties
//! and puts the stack back in the order captured by `start()`.

use crate::element::Element;
use crate::error::RotationError;
use crate::registry::ElementRegistry;
use crate::reorderable::Reorderable;
use scalerfader_animation::{
    AnimationClock, AnimationHandle, EndReason, Transition, TransitionBuilder, TransitionConfig,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Result type for scheduler operations
pub type Result<T> = std::result::Result<T, RotationError>;

#[derive(Debug, Default)]
struct SchedulerState {
    running: bool,
    initial_order: Vec<Element>,
}

struct SchedulerInner {
    reorderable: Rc<dyn Reorderable>,
    clock: AnimationClock,
    config: TransitionConfig,
    state: RefCell<SchedulerState>,
    registry: RefCell<ElementRegistry>,
}

impl SchedulerInner {
    fn is_running(&self) -> bool {
        self.state.borrow().running
    }

    /// Build, wire, stash and start a transition on `element`
    fn begin_transition(this: &Rc<Self>, element: &Element) {
        let transition = TransitionBuilder::new(&this.config).build(element.as_target());
        Self::attach_listeners(this, element, &transition);

        this.registry.borrow_mut().stash(element, transition.clone());
        tracing::trace!("Transition begins on {}", element.name());
        transition.start(&this.clock);
    }

    fn attach_listeners(this: &Rc<Self>, element: &Element, transition: &Transition) {
        let threshold = this.config.fade_fraction_start;

        let weak = Rc::downgrade(this);
        let animating = element.clone();
        transition.fade().add_update_listener(move |fade| {
            // Same progress measure the fade keyframes are sampled on
            if fade.animated_fraction() < threshold {
                return;
            }
            let Some(inner) = weak.upgrade() else {
                fade.remove_all_update_listeners();
                return;
            };
            if !inner.is_running() {
                fade.remove_all_update_listeners();
                return;
            }
            let Some(next) = inner.element_behind(&animating) else {
                tracing::warn!("No element behind {} to reveal", animating.name());
                fade.remove_all_update_listeners();
                return;
            };
            // Stay armed until the element behind is free to animate
            if !inner.can_reveal(&next) {
                return;
            }
            fade.remove_all_update_listeners();
            Self::begin_transition(&inner, &next);
        });

        let weak = Rc::downgrade(this);
        let animating = element.clone();
        transition.fade().add_end_listener(move |fade, reason| {
            if reason != EndReason::Completed {
                return;
            }
            fade.remove_all_listeners();

            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.release(&animating, fade);
            if !inner.is_running() {
                return;
            }
            inner.reorderable.move_to_back(&animating);
            tracing::debug!("{} moved to the back", animating.name());
        });
    }

    /// The element right behind `element`, wrapping from the back to the front
    fn element_behind(&self, element: &Element) -> Option<Element> {
        let elements = self.reorderable.ordered_elements();
        let idx = elements.iter().position(|e| e == element)?;
        let behind = if idx == 0 { elements.len() - 1 } else { idx - 1 };
        let next = elements[behind].clone();
        (next != *element).then_some(next)
    }

    /// Whether `next` may start a transition without exceeding the overlap cap.
    ///
    /// At most N-1 elements animate at once, so one always rests behind the
    /// rotation. Two elements are the exception and alternate with an overlap
    /// of two.
    fn can_reveal(&self, next: &Element) -> bool {
        let registry = self.registry.borrow();
        if registry.get(next).is_some() {
            return false;
        }
        let cap = self.reorderable.len().saturating_sub(1).max(2);
        registry.len() < cap
    }

    /// Forget a completed transition, unless a newer one replaced it
    fn release(&self, element: &Element, fade: &AnimationHandle) {
        let mut registry = self.registry.borrow_mut();
        if registry.get(element).is_some_and(|t| t.fade().ptr_eq(fade)) {
            registry.take(element);
        }
    }

    fn dispose_animations(&self, element: &Element) {
        tracing::trace!("Disposing transition of {}", element.name());
        self.registry.borrow_mut().dispose(element);
    }
}

impl Drop for SchedulerInner {
    fn drop(&mut self) {
        for transition in self.registry.get_mut().drain() {
            transition.dispose();
        }
    }
}

/// Orchestrates the endless scale-and-fade rotation of a stack.
///
/// All work happens on the thread that ticks the [`AnimationClock`].
/// Listeners only hold weak references, so dropping the scheduler disposes
/// every transition it started.
pub struct RotationScheduler {
    inner: Rc<SchedulerInner>,
}

impl RotationScheduler {
    /// Create an idle scheduler.
    ///
    /// `config` is expected to pass [`TransitionConfig::validate`].
    pub fn new(
        reorderable: Rc<dyn Reorderable>,
        config: TransitionConfig,
        clock: AnimationClock,
    ) -> Self {
        Self {
            inner: Rc::new(SchedulerInner {
                reorderable,
                clock,
                config,
                state: RefCell::new(SchedulerState::default()),
                registry: RefCell::new(ElementRegistry::new()),
            }),
        }
    }

    /// Start rotating from the front element.
    ///
    /// Fails without touching any state if fewer than two elements are
    /// present. Starting a running scheduler is a no-op.
    pub fn start(&self) -> Result<()> {
        let reorderable = &self.inner.reorderable;
        let elements = reorderable.ordered_elements();
        if elements.len() < 2 {
            tracing::warn!("Cannot rotate {} element(s)", elements.len());
            return Err(RotationError::InsufficientElements { found: elements.len() });
        }

        {
            let mut state = self.inner.state.borrow_mut();
            if state.running {
                return Ok(());
            }
            state.running = true;
            state.initial_order = elements;
        }

        tracing::debug!("Starting rotation of {} elements", reorderable.len());
        if let Some(front) = reorderable.front_element() {
            SchedulerInner::begin_transition(&self.inner, &front);
        }
        Ok(())
    }

    /// Stop rotating and restore the stack captured by `start()`.
    ///
    /// No-op unless running.
    pub fn reset(&self) {
        // Flip state first so listeners fired during teardown see a stopped scheduler
        let initial_order = {
            let mut state = self.inner.state.borrow_mut();
            if !state.running {
                return;
            }
            state.running = false;
            std::mem::take(&mut state.initial_order)
        };

        let reorderable = &self.inner.reorderable;
        for element in reorderable.ordered_elements() {
            self.inner.dispose_animations(&element);
            element.reset_properties();
        }

        let leftovers = self.inner.registry.borrow_mut().drain();
        for transition in leftovers {
            transition.dispose();
        }

        reorderable.clear_all();
        for element in initial_order {
            element.reset_properties();
            reorderable.insert_at_front(element);
        }
        tracing::debug!("Rotation reset");
    }

    /// Is the rotation started
    pub fn is_running(&self) -> bool {
        self.inner.is_running()
    }

    /// Order captured by the last `start()`, empty while idle
    pub fn initial_order(&self) -> Vec<Element> {
        self.inner.state.borrow().initial_order.clone()
    }

    /// Begin a transition on `element` right away, replacing any in flight
    pub fn begin_transition(&self, element: &Element) {
        SchedulerInner::begin_transition(&self.inner, element);
    }

    /// Cancel and forget the element's transition. No-op if it has none.
    pub fn dispose_animations(&self, element: &Element) {
        self.inner.dispose_animations(element);
    }

    /// Scale animation currently stashed for the element
    pub fn stashed_scale_animation(&self, element: &Element) -> Option<AnimationHandle> {
        self.inner.registry.borrow().get(element).map(|t| t.scale().clone())
    }

    /// Fade animation currently stashed for the element
    pub fn stashed_fade_animation(&self, element: &Element) -> Option<AnimationHandle> {
        self.inner.registry.borrow().get(element).map(|t| t.fade().clone())
    }

    /// Number of elements with a stashed transition
    pub fn active_transitions(&self) -> usize {
        self.inner.registry.borrow().len()
    }

    /// Get the transition settings
    pub fn config(&self) -> &TransitionConfig {
        &self.inner.config
    }
}

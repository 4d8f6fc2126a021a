// SPDX-License-Identifier: MIT OR Apache-2.0
//! Frame clock driving running animations.

use crate::animation::AnimationHandle;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

#[derive(Default)]
struct ClockState {
    now: Duration,
    frame: u64,
    active: Vec<AnimationHandle>,
}

/// Host timing driver.
///
/// The host calls [`AnimationClock::tick`] once per frame. Clones share the
/// same clock, so animations can schedule themselves on it from inside
/// listeners.
#[derive(Clone, Default)]
pub struct AnimationClock {
    inner: Rc<RefCell<ClockState>>,
}

impl AnimationClock {
    /// Create a new clock at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a running animation. Scheduling the same animation twice is a no-op.
    pub fn schedule(&self, animation: AnimationHandle) {
        let mut state = self.inner.borrow_mut();
        if !state.active.iter().any(|a| a.ptr_eq(&animation)) {
            state.active.push(animation);
        }
    }

    /// Advance every running animation by `delta`.
    ///
    /// Animations scheduled while this tick runs start advancing on the next
    /// one.
    pub fn tick(&self, delta: Duration) {
        let snapshot = {
            let mut state = self.inner.borrow_mut();
            state.now += delta;
            state.frame += 1;
            state.active.clone()
        };

        for animation in &snapshot {
            animation.advance(delta);
        }

        self.inner.borrow_mut().active.retain(AnimationHandle::is_running);
    }

    /// Drop every animation that is no longer running
    pub fn prune(&self) {
        self.inner.borrow_mut().active.retain(AnimationHandle::is_running);
    }

    /// Total time ticked so far
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Number of ticks so far
    pub fn frame(&self) -> u64 {
        self.inner.borrow().frame
    }

    /// Number of running animations
    pub fn active_count(&self) -> usize {
        self.inner.borrow().active.iter().filter(|a| a.is_running()).count()
    }

    /// Has nothing to advance
    pub fn is_idle(&self) -> bool {
        self.active_count() == 0
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0
//! Cancellable, listener-driven property animations.

use crate::binding::Animatable;
use crate::clock::AnimationClock;
use crate::keyframe::Interpolator;
use crate::track::PropertyTrack;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;
use uuid::Uuid;

/// Unique identifier for an animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationId(pub Uuid);

impl AnimationId {
    /// Create a new random animation ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AnimationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifies a registered listener so it can be removed again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Lifecycle of an animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationStatus {
    /// Built but never started
    #[default]
    Idle,
    /// Advancing on a clock
    Running,
    /// Reached its full duration
    Ended,
    /// Stopped before reaching its duration
    Cancelled,
}

/// Why an animation stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The full duration elapsed
    Completed,
    /// `cancel()` was called while running
    Cancelled,
}

type UpdateListener = Rc<dyn Fn(&AnimationHandle)>;
type EndListener = Rc<dyn Fn(&AnimationHandle, EndReason)>;

struct AnimationState {
    id: AnimationId,
    target: Rc<dyn Animatable>,
    tracks: Vec<PropertyTrack>,
    duration: Duration,
    interpolator: Interpolator,
    elapsed: Duration,
    status: AnimationStatus,
    next_listener: u64,
    update_listeners: Vec<(ListenerId, UpdateListener)>,
    end_listeners: Vec<(ListenerId, EndListener)>,
}

impl AnimationState {
    fn allocate_listener(&mut self) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        id
    }

    fn linear_fraction(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0) as f32
    }
}

/// Handle to one time-based animation of a target's properties.
///
/// Clones share the same animation. Progress listeners receive a sample every
/// time the animation's values are applied; end listeners fire once when the
/// animation completes or is cancelled.
#[derive(Clone)]
pub struct AnimationHandle {
    inner: Rc<RefCell<AnimationState>>,
}

impl AnimationHandle {
    /// Create an idle animation driving `tracks` on `target`
    pub fn new(
        target: Rc<dyn Animatable>,
        tracks: Vec<PropertyTrack>,
        duration: Duration,
        interpolator: Interpolator,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(AnimationState {
                id: AnimationId::new(),
                target,
                tracks,
                duration,
                interpolator,
                elapsed: Duration::ZERO,
                status: AnimationStatus::Idle,
                next_listener: 0,
                update_listeners: Vec::new(),
                end_listeners: Vec::new(),
            })),
        }
    }

    /// Get the animation ID
    pub fn id(&self) -> AnimationId {
        self.inner.borrow().id
    }

    /// Whether two handles refer to the same animation
    pub fn ptr_eq(&self, other: &AnimationHandle) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Get the configured duration
    pub fn duration(&self) -> Duration {
        self.inner.borrow().duration
    }

    /// Get the easing curve
    pub fn interpolator(&self) -> Interpolator {
        self.inner.borrow().interpolator
    }

    /// Get the time played so far
    pub fn elapsed(&self) -> Duration {
        self.inner.borrow().elapsed
    }

    /// Get the lifecycle status
    pub fn status(&self) -> AnimationStatus {
        self.inner.borrow().status
    }

    /// Is currently advancing
    pub fn is_running(&self) -> bool {
        self.status() == AnimationStatus::Running
    }

    /// Was stopped by `cancel()`
    pub fn is_cancelled(&self) -> bool {
        self.status() == AnimationStatus::Cancelled
    }

    /// Fraction of the duration that has elapsed, in [0, 1]
    pub fn linear_fraction(&self) -> f32 {
        self.inner.borrow().linear_fraction()
    }

    /// Elapsed fraction after the easing curve
    pub fn animated_fraction(&self) -> f32 {
        let state = self.inner.borrow();
        state.interpolator.apply(state.linear_fraction())
    }

    /// Get the driven tracks
    pub fn tracks(&self) -> Vec<PropertyTrack> {
        self.inner.borrow().tracks.clone()
    }

    /// Start (or restart) from the beginning and schedule on `clock`
    pub fn start(&self, clock: &AnimationClock) {
        {
            let mut state = self.inner.borrow_mut();
            state.elapsed = Duration::ZERO;
            state.status = AnimationStatus::Running;
        }
        clock.schedule(self.clone());
        self.apply_values();
        self.dispatch_update();
    }

    /// Advance by a frame delta. Does nothing unless running.
    pub fn advance(&self, delta: Duration) {
        let finished = {
            let mut state = self.inner.borrow_mut();
            if state.status != AnimationStatus::Running {
                return;
            }
            state.elapsed = (state.elapsed + delta).min(state.duration);
            state.elapsed >= state.duration
        };

        self.apply_values();
        self.dispatch_update();

        // A progress listener may have cancelled us
        if finished && self.is_running() {
            self.complete();
        }
    }

    /// Seek to a fraction of the duration and emit one progress sample.
    ///
    /// Seeking never completes the animation, even at `1.0`.
    pub fn set_current_fraction(&self, fraction: f32) {
        {
            let mut state = self.inner.borrow_mut();
            let fraction = f64::from(fraction.clamp(0.0, 1.0));
            state.elapsed = state.duration.mul_f64(fraction);
        }
        self.apply_values();
        self.dispatch_update();
    }

    /// Jump to the end and complete. Does nothing unless running.
    pub fn finish(&self) {
        if !self.is_running() {
            return;
        }
        let remaining = {
            let state = self.inner.borrow();
            state.duration.saturating_sub(state.elapsed)
        };
        self.advance(remaining);
        // Zero remaining time on an already-full animation still has to end
        if self.is_running() {
            self.complete();
        }
    }

    /// Stop without completing.
    ///
    /// End listeners observe [`EndReason::Cancelled`]. Cancelling anything
    /// that is not running is a no-op.
    pub fn cancel(&self) {
        {
            let mut state = self.inner.borrow_mut();
            if state.status != AnimationStatus::Running {
                return;
            }
            state.status = AnimationStatus::Cancelled;
        }
        tracing::trace!("animation {:?} cancelled", self.id());
        self.dispatch_end(EndReason::Cancelled);
    }

    fn complete(&self) {
        self.inner.borrow_mut().status = AnimationStatus::Ended;
        self.dispatch_end(EndReason::Completed);
    }

    /// Register a progress listener
    pub fn add_update_listener(&self, listener: impl Fn(&AnimationHandle) + 'static) -> ListenerId {
        let mut state = self.inner.borrow_mut();
        let id = state.allocate_listener();
        let listener: UpdateListener = Rc::new(listener);
        state.update_listeners.push((id, listener));
        id
    }

    /// Register an end listener
    pub fn add_end_listener(
        &self,
        listener: impl Fn(&AnimationHandle, EndReason) + 'static,
    ) -> ListenerId {
        let mut state = self.inner.borrow_mut();
        let id = state.allocate_listener();
        let listener: EndListener = Rc::new(listener);
        state.end_listeners.push((id, listener));
        id
    }

    /// Remove one listener of either kind
    pub fn remove_listener(&self, id: ListenerId) {
        let mut state = self.inner.borrow_mut();
        state.update_listeners.retain(|(lid, _)| *lid != id);
        state.end_listeners.retain(|(lid, _)| *lid != id);
    }

    /// Remove every progress listener
    pub fn remove_all_update_listeners(&self) {
        self.inner.borrow_mut().update_listeners.clear();
    }

    /// Remove every listener of either kind
    pub fn remove_all_listeners(&self) {
        let mut state = self.inner.borrow_mut();
        state.update_listeners.clear();
        state.end_listeners.clear();
    }

    /// Number of registered progress listeners
    pub fn update_listener_count(&self) -> usize {
        self.inner.borrow().update_listeners.len()
    }

    /// Number of registered end listeners
    pub fn end_listener_count(&self) -> usize {
        self.inner.borrow().end_listeners.len()
    }

    fn apply_values(&self) {
        let (target, values) = {
            let state = self.inner.borrow();
            let eased = state.interpolator.apply(state.linear_fraction());
            let values: Vec<_> = state
                .tracks
                .iter()
                .filter_map(|track| track.evaluate(eased).map(|v| (track.property, v)))
                .collect();
            (state.target.clone(), values)
        };

        for (property, value) in values {
            target.set_property(property, value);
        }
    }

    fn dispatch_update(&self) {
        let listeners = self.inner.borrow().update_listeners.clone();
        for (id, listener) in listeners {
            // Skip listeners removed by an earlier one in this dispatch
            if !self.has_update_listener(id) {
                continue;
            }
            listener(self);
        }
    }

    fn dispatch_end(&self, reason: EndReason) {
        let listeners = self.inner.borrow().end_listeners.clone();
        for (id, listener) in listeners {
            if !self.has_end_listener(id) {
                continue;
            }
            listener(self, reason);
        }
    }

    fn has_update_listener(&self, id: ListenerId) -> bool {
        self.inner.borrow().update_listeners.iter().any(|(lid, _)| *lid == id)
    }

    fn has_end_listener(&self, id: ListenerId) -> bool {
        self.inner.borrow().end_listeners.iter().any(|(lid, _)| *lid == id)
    }
}

impl fmt::Debug for AnimationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("AnimationHandle")
            .field("id", &state.id)
            .field("status", &state.status)
            .field("elapsed", &state.elapsed)
            .field("duration", &state.duration)
            .finish_non_exhaustive()
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scale + fade transitions.
//!
//! A transition is two animations of the same target that share a duration
//! and an easing curve and are started together:
//! - the scale animation drives both scale axes from `scale_start` to `scale_end`
//! - the fade animation holds full opacity until `fade_fraction_start`, then
//!   falls linearly to zero at the end

use crate::animation::AnimationHandle;
use crate::binding::{Animatable, AnimatedProperty};
use crate::clock::AnimationClock;
use crate::keyframe::{Interpolator, Keyframe};
use crate::track::PropertyTrack;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use std::time::Duration;
use thiserror::Error;

/// Transition configuration errors
#[derive(Debug, Error, PartialEq)]
pub enum TransitionConfigError {
    /// Duration must be at least one millisecond
    #[error("Transition duration must be positive")]
    InvalidDuration,

    /// Fade fraction outside (0, 1)
    #[error("Fade fraction start must lie strictly between 0 and 1, got {0}")]
    InvalidFadeFraction(f32),

    /// Scale bound is NaN or infinite
    #[error("Scale bounds must be finite")]
    NonFiniteScale,

    /// Unusable easing curve parameters
    #[error("Invalid interpolator: {0:?}")]
    InvalidInterpolator(Interpolator),
}

/// Parameters shared by every transition of a rotation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Time from the start of the scale until the element is fully transparent
    pub duration_ms: u64,
    /// Scale at the start of the transition
    pub scale_start: f32,
    /// Scale at the end of the transition
    pub scale_end: f32,
    /// Fraction of the transition after which the fade begins and the next
    /// element starts its own transition
    pub fade_fraction_start: f32,
    /// Easing curve for both animations
    pub interpolator: Interpolator,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration_ms: 3_000,
            scale_start: 1.0,
            scale_end: 1.25,
            fade_fraction_start: 0.8,
            interpolator: Interpolator::Linear,
        }
    }
}

impl TransitionConfig {
    /// Check every invariant
    pub fn validate(&self) -> Result<(), TransitionConfigError> {
        if self.duration_ms == 0 {
            return Err(TransitionConfigError::InvalidDuration);
        }
        if !(self.fade_fraction_start > 0.0 && self.fade_fraction_start < 1.0) {
            return Err(TransitionConfigError::InvalidFadeFraction(self.fade_fraction_start));
        }
        if !self.scale_start.is_finite() || !self.scale_end.is_finite() {
            return Err(TransitionConfigError::NonFiniteScale);
        }
        if !self.interpolator.is_valid() {
            return Err(TransitionConfigError::InvalidInterpolator(self.interpolator));
        }
        Ok(())
    }

    /// Duration as a [`Duration`]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// A synchronized scale and fade animation pair on one target
#[derive(Debug, Clone)]
pub struct Transition {
    scale: AnimationHandle,
    fade: AnimationHandle,
}

impl Transition {
    /// Get the scale animation
    pub fn scale(&self) -> &AnimationHandle {
        &self.scale
    }

    /// Get the fade animation
    pub fn fade(&self) -> &AnimationHandle {
        &self.fade
    }

    /// Start both animations on the same clock
    pub fn start(&self, clock: &AnimationClock) {
        self.scale.start(clock);
        self.fade.start(clock);
    }

    /// Either animation is still running
    pub fn is_running(&self) -> bool {
        self.scale.is_running() || self.fade.is_running()
    }

    /// Detach every listener, then cancel both animations.
    ///
    /// Listeners are removed first so that cancellation notifies nobody.
    /// Safe to call any number of times.
    pub fn dispose(&self) {
        self.fade.remove_all_listeners();
        self.scale.remove_all_listeners();
        self.scale.cancel();
        self.fade.cancel();
    }
}

/// Builds transitions from a [`TransitionConfig`]
#[derive(Debug, Clone, Copy)]
pub struct TransitionBuilder<'a> {
    config: &'a TransitionConfig,
}

impl<'a> TransitionBuilder<'a> {
    /// Create a builder over a configuration
    pub fn new(config: &'a TransitionConfig) -> Self {
        Self { config }
    }

    /// Build an idle transition for `target`. Nothing is started and no
    /// listener is attached.
    pub fn build(&self, target: Rc<dyn Animatable>) -> Transition {
        Transition {
            scale: self.scale_animation(target.clone()),
            fade: self.fade_animation(target),
        }
    }

    fn scale_animation(&self, target: Rc<dyn Animatable>) -> AnimationHandle {
        let (start, end) = (self.config.scale_start, self.config.scale_end);
        AnimationHandle::new(
            target,
            vec![
                PropertyTrack::of_float(AnimatedProperty::ScaleX, start, end),
                PropertyTrack::of_float(AnimatedProperty::ScaleY, start, end),
            ],
            self.config.duration(),
            self.config.interpolator,
        )
    }

    fn fade_animation(&self, target: Rc<dyn Animatable>) -> AnimationHandle {
        let track = PropertyTrack::new(
            AnimatedProperty::Alpha,
            [
                // Idle
                Keyframe::new(0.0, 1.0),
                // Start fade
                Keyframe::new(self.config.fade_fraction_start, 1.0),
                // Fade complete
                Keyframe::new(1.0, 0.0),
            ],
        );
        AnimationHandle::new(target, vec![track], self.config.duration(), self.config.interpolator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimationStatus;
    use crate::binding::testing::RecordingTarget;

    #[test]
    fn test_default_config_is_valid() {
        let config = TransitionConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.duration(), Duration::from_secs(3));
    }

    #[test]
    fn test_validation() {
        let zero = TransitionConfig { duration_ms: 0, ..Default::default() };
        assert_eq!(zero.validate(), Err(TransitionConfigError::InvalidDuration));

        for fraction in [0.0, 1.0, -0.1, 1.5, f32::NAN] {
            let config = TransitionConfig { fade_fraction_start: fraction, ..Default::default() };
            assert!(
                matches!(config.validate(), Err(TransitionConfigError::InvalidFadeFraction(_))),
                "fraction {fraction} accepted"
            );
        }

        let scale = TransitionConfig { scale_end: f32::INFINITY, ..Default::default() };
        assert_eq!(scale.validate(), Err(TransitionConfigError::NonFiniteScale));
    }

    #[test]
    fn test_config_serialization() {
        let config = TransitionConfig {
            duration_ms: 1_200,
            interpolator: Interpolator::Decelerate { factor: 2.0 },
            ..Default::default()
        };
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::default()).unwrap();
        let loaded: TransitionConfig = ron::from_str(&ron_str).unwrap();
        assert_eq!(loaded, config);

        let partial: TransitionConfig = ron::from_str("(duration_ms: 500)").unwrap();
        assert_eq!(partial.duration_ms, 500);
        assert_eq!(partial.fade_fraction_start, 0.8);
    }

    #[test]
    fn test_build_does_not_start() {
        let config = TransitionConfig::default();
        let target = Rc::new(RecordingTarget::default());
        let transition = TransitionBuilder::new(&config).build(target.clone());

        assert_eq!(transition.scale().status(), AnimationStatus::Idle);
        assert_eq!(transition.fade().status(), AnimationStatus::Idle);
        assert_eq!(transition.fade().update_listener_count(), 0);
        assert_eq!(*target.writes.borrow(), 0);
        assert_eq!(transition.scale().duration(), transition.fade().duration());
    }

    #[test]
    fn test_pair_shares_curve() {
        let config = TransitionConfig {
            interpolator: Interpolator::AccelerateDecelerate,
            fade_fraction_start: 0.6,
            ..Default::default()
        };
        let transition = TransitionBuilder::new(&config).build(Rc::new(RecordingTarget::default()));

        assert_eq!(transition.scale().interpolator(), Interpolator::AccelerateDecelerate);
        assert_eq!(transition.fade().interpolator(), Interpolator::AccelerateDecelerate);

        let scale_tracks: Vec<_> = transition.scale().tracks().iter().map(|t| t.property).collect();
        assert_eq!(scale_tracks, [AnimatedProperty::ScaleX, AnimatedProperty::ScaleY]);

        let fade_tracks = transition.fade().tracks();
        assert_eq!(fade_tracks.len(), 1);
        assert_eq!(fade_tracks[0].property, AnimatedProperty::Alpha);
        assert_eq!(
            fade_tracks[0].keyframes(),
            [Keyframe::new(0.0, 1.0), Keyframe::new(0.6, 1.0), Keyframe::new(1.0, 0.0)]
        );
    }

    #[test]
    fn test_fade_holds_then_falls() {
        let config = TransitionConfig { duration_ms: 1_000, ..Default::default() };
        let target = Rc::new(RecordingTarget::default());
        let clock = AnimationClock::new();
        let transition = TransitionBuilder::new(&config).build(target.clone());
        transition.start(&clock);

        clock.tick(Duration::from_millis(500));
        assert_eq!(target.property(AnimatedProperty::Alpha), 1.0);
        assert!((target.property(AnimatedProperty::ScaleX) - 1.125).abs() < 1e-5);
        assert_eq!(
            target.property(AnimatedProperty::ScaleX),
            target.property(AnimatedProperty::ScaleY)
        );

        clock.tick(Duration::from_millis(400));
        assert!((target.property(AnimatedProperty::Alpha) - 0.5).abs() < 1e-4);

        clock.tick(Duration::from_millis(100));
        assert_eq!(target.property(AnimatedProperty::Alpha), 0.0);
        assert_eq!(target.property(AnimatedProperty::ScaleX), 1.25);
        assert!(!transition.is_running());
    }

    #[test]
    fn test_dispose_is_silent_and_repeatable() {
        let config = TransitionConfig::default();
        let clock = AnimationClock::new();
        let transition = TransitionBuilder::new(&config).build(Rc::new(RecordingTarget::default()));
        transition.start(&clock);
        transition.fade().add_end_listener(|_, _| panic!("listener survived disposal"));
        transition.fade().add_update_listener(|_| panic!("listener survived disposal"));

        transition.dispose();
        transition.dispose();

        assert!(transition.scale().is_cancelled());
        assert!(transition.fade().is_cancelled());
        assert_eq!(transition.fade().end_listener_count(), 0);
        assert!(clock.is_idle());
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyframed property tracks.

use crate::binding::AnimatedProperty;
use crate::keyframe::{Interpolation, Keyframe};
use serde::{Deserialize, Serialize};

/// Keyframes for one property over normalized progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyTrack {
    /// Driven property
    pub property: AnimatedProperty,
    /// Keyframes sorted by fraction
    keyframes: Vec<Keyframe>,
}

impl PropertyTrack {
    /// Create a track from arbitrary keyframes
    pub fn new(property: AnimatedProperty, keyframes: impl IntoIterator<Item = Keyframe>) -> Self {
        let mut track = Self {
            property,
            keyframes: keyframes.into_iter().collect(),
        };
        track.sort_keyframes();
        track
    }

    /// Create a two-keyframe track running from `start` to `end`
    pub fn of_float(property: AnimatedProperty, start: f32, end: f32) -> Self {
        Self::new(property, [Keyframe::new(0.0, start), Keyframe::new(1.0, end)])
    }

    /// Add a keyframe
    pub fn add_keyframe(&mut self, keyframe: Keyframe) {
        self.keyframes.push(keyframe);
        self.sort_keyframes();
    }

    /// Sort keyframes by fraction
    fn sort_keyframes(&mut self) {
        self.keyframes.sort_by(|a, b| a.fraction.total_cmp(&b.fraction));
    }

    /// Get all keyframes
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Find keyframes surrounding a fraction
    fn find_keyframes(&self, fraction: f32) -> (Option<&Keyframe>, Option<&Keyframe>) {
        if self.keyframes.is_empty() {
            return (None, None);
        }

        match self.keyframes.iter().position(|k| k.fraction >= fraction) {
            None => (self.keyframes.last(), None),
            Some(0) => (None, self.keyframes.first()),
            Some(idx) => (Some(&self.keyframes[idx - 1]), Some(&self.keyframes[idx])),
        }
    }

    /// Evaluate the track at a fraction.
    ///
    /// Values before the first keyframe or after the last are clamped to it.
    pub fn evaluate(&self, fraction: f32) -> Option<f32> {
        match self.find_keyframes(fraction) {
            (None, None) => None,
            (Some(kf), None) | (None, Some(kf)) => Some(kf.value),
            (Some(a), Some(b)) => {
                let span = b.fraction - a.fraction;
                if span.abs() < 0.0001 {
                    return Some(b.value);
                }
                let t = (fraction - a.fraction) / span;
                Some(Interpolation::lerp(a.value, b.value, t))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_track() {
        let track = PropertyTrack::new(AnimatedProperty::Alpha, Vec::new());
        assert_eq!(track.evaluate(0.5), None);
    }

    #[test]
    fn test_two_keyframes() {
        let track = PropertyTrack::of_float(AnimatedProperty::ScaleX, 1.0, 1.25);
        assert_eq!(track.evaluate(0.0), Some(1.0));
        assert_eq!(track.evaluate(1.0), Some(1.25));
        assert_eq!(track.evaluate(0.5), Some(1.125));
    }

    #[test]
    fn test_hold_then_fall() {
        let track = PropertyTrack::new(
            AnimatedProperty::Alpha,
            [
                Keyframe::new(1.0, 0.0),
                Keyframe::new(0.0, 1.0),
                Keyframe::new(0.8, 1.0),
            ],
        );

        assert_eq!(track.keyframes()[0].fraction, 0.0);
        assert_eq!(track.evaluate(0.4), Some(1.0));
        assert_eq!(track.evaluate(0.8), Some(1.0));
        let mid = track.evaluate(0.9).unwrap();
        assert!((mid - 0.5).abs() < 1e-5);
        assert_eq!(track.evaluate(1.0), Some(0.0));
    }

    #[test]
    fn test_clamps_outside_range() {
        let mut track = PropertyTrack::new(AnimatedProperty::ScaleY, Vec::new());
        track.add_keyframe(Keyframe::new(0.2, 2.0));
        track.add_keyframe(Keyframe::new(0.6, 4.0));
        assert_eq!(track.evaluate(0.0), Some(2.0));
        assert_eq!(track.evaluate(1.0), Some(4.0));
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0
//! Per-element storage of in-flight transitions.

use crate::element::{Element, ElementId};
use indexmap::IndexMap;
use scalerfader_animation::Transition;

/// Maps each element to the transition currently animating it.
///
/// An element has at most one stashed transition. Anything replaced or
/// removed through [`ElementRegistry::stash`] or [`ElementRegistry::dispose`]
/// is disposed: its listeners are detached and both animations cancelled.
#[derive(Debug, Default)]
pub struct ElementRegistry {
    stash: IndexMap<ElementId, Transition>,
}

impl ElementRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `transition` for `element`, disposing whatever was there before
    pub fn stash(&mut self, element: &Element, transition: Transition) {
        if let Some(previous) = self.stash.insert(element.id(), transition) {
            tracing::trace!("Replacing transition of {}", element.name());
            previous.dispose();
        }
    }

    /// Get the stashed transition
    pub fn get(&self, element: &Element) -> Option<&Transition> {
        self.stash.get(&element.id())
    }

    /// Remove the stashed transition without disposing it
    pub fn take(&mut self, element: &Element) -> Option<Transition> {
        self.stash.swap_remove(&element.id())
    }

    /// Dispose and forget the stashed transition. No-op if there is none.
    pub fn dispose(&mut self, element: &Element) {
        if let Some(transition) = self.take(element) {
            transition.dispose();
        }
    }

    /// Remove every transition without disposing
    pub fn drain(&mut self) -> Vec<Transition> {
        self.stash.drain(..).map(|(_, transition)| transition).collect()
    }

    /// Number of stashed transitions
    pub fn len(&self) -> usize {
        self.stash.len()
    }

    /// Has no stashed transitions
    pub fn is_empty(&self) -> bool {
        self.stash.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scalerfader_animation::{AnimationClock, TransitionBuilder, TransitionConfig};

    fn transition(element: &Element) -> Transition {
        TransitionBuilder::new(&TransitionConfig::default()).build(element.as_target())
    }

    #[test]
    fn test_stash_and_get() {
        let mut registry = ElementRegistry::new();
        let element = Element::new("a");
        let first = transition(&element);

        assert!(registry.get(&element).is_none());
        registry.stash(&element, first.clone());

        let stashed = registry.get(&element).unwrap();
        assert!(stashed.fade().ptr_eq(first.fade()));
        assert!(stashed.scale().ptr_eq(first.scale()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_restash_disposes_previous() {
        let clock = AnimationClock::new();
        let mut registry = ElementRegistry::new();
        let element = Element::new("a");
        let first = transition(&element);
        first.start(&clock);
        first.fade().add_end_listener(|_, _| {});
        first.fade().add_update_listener(|_| {});

        let second = transition(&element);
        registry.stash(&element, first.clone());
        registry.stash(&element, second.clone());

        assert_eq!(registry.len(), 1);
        assert!(registry.get(&element).unwrap().fade().ptr_eq(second.fade()));
        assert!(first.fade().is_cancelled());
        assert!(first.scale().is_cancelled());
        assert_eq!(first.fade().update_listener_count(), 0);
        assert_eq!(first.fade().end_listener_count(), 0);
    }

    #[test]
    fn test_dispose_twice() {
        let clock = AnimationClock::new();
        let mut registry = ElementRegistry::new();
        let element = Element::new("a");
        let pending = transition(&element);
        pending.start(&clock);
        registry.stash(&element, pending.clone());

        registry.dispose(&element);
        assert!(registry.get(&element).is_none());
        assert!(pending.fade().is_cancelled());

        registry.dispose(&element);
        assert!(registry.get(&element).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_take_and_drain() {
        let mut registry = ElementRegistry::new();
        let (a, b) = (Element::new("a"), Element::new("b"));
        registry.stash(&a, transition(&a));
        registry.stash(&b, transition(&b));

        assert!(registry.take(&a).is_some());
        assert!(registry.take(&a).is_none());
        assert_eq!(registry.drain().len(), 1);
        assert!(registry.is_empty());
    }
}

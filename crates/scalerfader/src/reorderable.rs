// SPDX-License-Identifier: MIT OR Apache-2.0
//! Capability over the host's ordered element stack.

use crate::element::Element;
use std::cell::RefCell;

/// Ordered stack of elements, back (index 0) to front (index N-1).
///
/// This is the only view of the host a scheduler gets. Methods take `&self`
/// because the scheduler calls them from inside animation listeners while the
/// host still owns the stack.
pub trait Reorderable {
    /// Current order, back to front
    fn ordered_elements(&self) -> Vec<Element>;

    /// The element drawn on top
    fn front_element(&self) -> Option<Element> {
        self.ordered_elements().last().cloned()
    }

    /// The element directly under the front one
    fn penultimate_element(&self) -> Option<Element> {
        let elements = self.ordered_elements();
        elements.len().checked_sub(2).map(|idx| elements[idx].clone())
    }

    /// Move an element to index 0. Unknown elements are ignored.
    fn move_to_back(&self, element: &Element);

    /// Append an element on top
    fn insert_at_front(&self, element: Element);

    /// Remove every element
    fn clear_all(&self);

    /// Number of elements
    fn len(&self) -> usize {
        self.ordered_elements().len()
    }

    /// Has no elements
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Plain [`Reorderable`] stack backed by a vector
#[derive(Debug, Default)]
pub struct ElementStack {
    elements: RefCell<Vec<Element>>,
}

impl ElementStack {
    /// Create an empty stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of an element, counted from the back
    pub fn position(&self, element: &Element) -> Option<usize> {
        self.elements.borrow().iter().position(|e| e == element)
    }

    /// Whether the element is in the stack
    pub fn contains(&self, element: &Element) -> bool {
        self.position(element).is_some()
    }
}

impl Reorderable for ElementStack {
    fn ordered_elements(&self) -> Vec<Element> {
        self.elements.borrow().clone()
    }

    fn move_to_back(&self, element: &Element) {
        let mut elements = self.elements.borrow_mut();
        if let Some(idx) = elements.iter().position(|e| e == element) {
            let element = elements.remove(idx);
            elements.insert(0, element);
        }
    }

    fn insert_at_front(&self, element: Element) {
        self.elements.borrow_mut().push(element);
    }

    fn clear_all(&self) {
        self.elements.borrow_mut().clear();
    }

    fn len(&self) -> usize {
        self.elements.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(stack: &ElementStack) -> Vec<String> {
        stack.ordered_elements().iter().map(|e| e.name().to_string()).collect()
    }

    #[test]
    fn test_accessors() {
        let stack = ElementStack::new();
        assert!(stack.is_empty());
        assert_eq!(stack.front_element(), None);
        assert_eq!(stack.penultimate_element(), None);

        let (a, b, c) = (Element::new("a"), Element::new("b"), Element::new("c"));
        stack.insert_at_front(a.clone());
        assert_eq!(stack.penultimate_element(), None);
        stack.insert_at_front(b.clone());
        stack.insert_at_front(c.clone());

        assert_eq!(stack.len(), 3);
        assert_eq!(stack.front_element(), Some(c));
        assert_eq!(stack.penultimate_element(), Some(b));
        assert_eq!(stack.position(&a), Some(0));
    }

    #[test]
    fn test_move_to_back() {
        let stack = ElementStack::new();
        let c = Element::new("c");
        stack.insert_at_front(Element::new("a"));
        stack.insert_at_front(Element::new("b"));
        stack.insert_at_front(c.clone());

        stack.move_to_back(&c);
        assert_eq!(names(&stack), ["c", "a", "b"]);

        stack.move_to_back(&Element::new("stranger"));
        assert_eq!(names(&stack), ["c", "a", "b"]);

        stack.clear_all();
        assert!(stack.is_empty());
        assert!(!stack.contains(&c));
    }
}

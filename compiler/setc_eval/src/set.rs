//! Set values and the three set-algebra operations
//!
//! A `SetValue` is an ordered sequence of integers. Literal sets keep their
//! duplicates; only intersection removes them. Union and difference test
//! membership against their inputs, never against the result being built.

use std::fmt;

use setc_lexer::{Element, SetOperator};
use setc_stack::GrowableStack;

/// An ordered sequence of integers used as a set operand.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SetValue {
    elements: GrowableStack<Element>,
}

impl SetValue {
    /// The empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element, keeping duplicates
    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Number of elements, duplicates included
    pub fn len(&self) -> usize {
        self.elements.size()
    }

    /// Returns true if the set has no elements
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns true if `element` occurs at least once
    pub fn contains(&self, element: Element) -> bool {
        self.elements.contains(&element)
    }

    /// Elements in insertion order
    pub fn elements(&self) -> &[Element] {
        self.elements.as_slice()
    }

    /// Every element of `self`, then each element of `other` that does not
    /// occur in `self`.
    ///
    /// Duplicates inside `other` that are absent from `self` are all kept.
    pub fn union(&self, other: &SetValue) -> SetValue {
        let mut result = self.clone();
        for &element in other.elements() {
            if !self.contains(element) {
                result.push(element);
            }
        }
        result
    }

    /// Elements of `self` with no equal element in `other`.
    pub fn difference(&self, other: &SetValue) -> SetValue {
        self.elements()
            .iter()
            .copied()
            .filter(|&element| !other.contains(element))
            .collect()
    }

    /// Elements common to both sets, each value at most once, in `self`
    /// order.
    pub fn intersection(&self, other: &SetValue) -> SetValue {
        let mut result = SetValue::new();
        for &element in self.elements() {
            if other.contains(element) && !result.contains(element) {
                result.push(element);
            }
        }
        result
    }

    /// Compute `left op right`
    pub fn apply(op: SetOperator, left: &SetValue, right: &SetValue) -> SetValue {
        match op {
            SetOperator::Union => left.union(right),
            SetOperator::Difference => left.difference(right),
            SetOperator::Intersection => left.intersection(right),
        }
    }

    /// The same elements sorted ascending
    pub fn sorted(mut self) -> SetValue {
        self.elements.sort();
        self
    }
}

impl FromIterator<Element> for SetValue {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for SetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, element) in self.elements().iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{element}")?;
        }
        f.write_str("]")
    }
}

impl fmt::Debug for SetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SetValue{self}")
    }
}

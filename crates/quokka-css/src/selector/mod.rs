//! CSS Selector representation and matching
//!
//! This module implements the compound "simple selector" subset of
//! [Selectors Level 4](https://www.w3.org/TR/selectors-4/): an optional type
//! selector, an optional ID selector, and any number of class selectors.
//! Combinators, attribute selectors and pseudo-classes are not supported.

use serde::Serialize;

use quokka_dom::ElementData;

/// [§ 17 Calculating Specificity](https://www.w3.org/TR/selectors-4/#specificity-rules)
/// "A selector's specificity is calculated for a given element as follows:
///  - count the number of ID selectors in the selector (= A)
///  - count the number of class selectors, attributes selectors, and pseudo-classes in the selector (= B)
///  - count the number of type selectors and pseudo-elements in the selector (= C)
///
/// Specificities are compared by comparing the three components in order."
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Specificity(pub u32, pub u32, pub u32);

/// A compound selector of the form `tag#id.class1.class2`.
///
/// Every part is optional; a selector with no parts (`*` or nothing at all)
/// matches every element.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SimpleSelector {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    pub tag_name: Option<String>,
    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    pub id: Option<String>,
    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    /// in source order.
    pub class: Vec<String>,
}

impl SimpleSelector {
    /// Build a selector from its parts.
    #[must_use]
    pub fn new(tag_name: Option<&str>, id: Option<&str>, class: &[&str]) -> Self {
        Self {
            tag_name: tag_name.map(str::to_string),
            id: id.map(str::to_string),
            class: class.iter().map(|c| (*c).to_string()).collect(),
        }
    }

    /// [§ 17](https://www.w3.org/TR/selectors-4/#specificity-rules)
    ///
    /// `(id present, number of classes, tag present)`.
    #[must_use]
    pub fn specificity(&self) -> Specificity {
        let a = u32::from(self.id.is_some());
        let b = u32::try_from(self.class.len()).unwrap_or(u32::MAX);
        let c = u32::from(self.tag_name.is_some());
        Specificity(a, b, c)
    }

    /// Does this selector match `element`?
    ///
    /// Each present part must match: the tag name exactly, the id exactly,
    /// and every class must appear in the element's class list.
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        if self
            .tag_name
            .as_ref()
            .is_some_and(|name| *name != element.tag_name)
        {
            return false;
        }

        if self
            .id
            .as_deref()
            .is_some_and(|id| element.id() != Some(id))
        {
            return false;
        }

        let element_classes = element.classes();
        self.class
            .iter()
            .all(|class| element_classes.contains(class.as_str()))
    }
}

/// A selector in a rule's selector list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Selector {
    /// `tag#id.class`
    Simple(SimpleSelector),
}

impl Selector {
    /// Specificity of the selector.
    #[must_use]
    pub fn specificity(&self) -> Specificity {
        match self {
            Self::Simple(simple) => simple.specificity(),
        }
    }

    /// Does this selector match `element`?
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        match self {
            Self::Simple(simple) => simple.matches(element),
        }
    }
}

/// Sort a selector list by specificity, highest first.
///
/// Ties keep no particular order.
pub fn sort_by_specificity(selectors: &mut [Selector]) {
    selectors.sort_unstable_by_key(|s| std::cmp::Reverse(s.specificity()));
}

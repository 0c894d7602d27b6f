// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable attribute-set snapshots.
//!
//! An [`AttributeSet`] captures the declarative attribute assignments of one
//! instantiation (for example the attributes written on an element in
//! markup), optionally together with a reference to a style resource. Once
//! built the snapshot never changes.

use core::fmt;

use crate::id::{Attr, AttrId, ResourceId, StyleRes};
use crate::map::AttrMap;
use crate::value::{AttrValue, ErasedValue};

/// An immutable capture of declarative attribute assignments.
///
/// Use [`AttributeSetBuilder`] to construct one.
///
/// # Example
///
/// ```rust
/// use restyle_attr::{AttrSchema, AttributeSet, ResourceId, StyleRes};
///
/// let mut schema = AttrSchema::new();
/// let alpha = schema.register::<f32>("alpha");
/// let text = schema.register::<String>("text");
///
/// let set = AttributeSet::builder()
///     .literal(alpha, 0.5)
///     .resource(text, ResourceId::new(0x10))
///     .style(StyleRes::new(1))
///     .build();
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.style(), Some(StyleRes::new(1)));
/// ```
#[derive(Clone, Default, PartialEq)]
pub struct AttributeSet {
    entries: AttrMap,
    style: Option<StyleRes>,
}

impl AttributeSet {
    /// Returns a builder for an attribute set.
    #[must_use]
    pub fn builder() -> AttributeSetBuilder {
        AttributeSetBuilder::default()
    }

    /// Returns the number of attributes assigned directly by this set.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the set assigns nothing and references no style.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.style.is_none()
    }

    /// Returns the style resource this set references, if any.
    #[must_use]
    #[inline]
    pub fn style(&self) -> Option<StyleRes> {
        self.style
    }

    /// Returns the value this set assigns directly to an attribute.
    #[must_use]
    #[inline]
    pub fn get(&self, id: AttrId) -> Option<&AttrValue> {
        self.entries.get(id)
    }

    /// Returns the direct assignments of this set.
    #[must_use]
    #[inline]
    pub fn entries(&self) -> &AttrMap {
        &self.entries
    }
}

impl fmt::Debug for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeSet")
            .field("style", &self.style)
            .field("entries", &self.entries)
            .finish()
    }
}

/// Builder for [`AttributeSet`] snapshots.
#[derive(Debug, Default)]
pub struct AttributeSetBuilder {
    entries: AttrMap,
    style: Option<StyleRes>,
}

impl AttributeSetBuilder {
    /// Assigns a literal value.
    #[must_use]
    pub fn literal<T: Clone + PartialEq + fmt::Debug + 'static>(
        mut self,
        attr: Attr<T>,
        value: T,
    ) -> Self {
        self.entries
            .insert(attr.id(), AttrValue::Literal(ErasedValue::new(value)));
        self
    }

    /// Assigns a resource pointer.
    #[must_use]
    pub fn resource<T>(mut self, attr: Attr<T>, resource: ResourceId) -> Self {
        self.entries.insert(attr.id(), AttrValue::Resource(resource));
        self
    }

    /// Assigns an already-tagged value.
    #[must_use]
    pub fn value(mut self, id: AttrId, value: AttrValue) -> Self {
        self.entries.insert(id, value);
        self
    }

    /// References a style resource whose assignments sit below this set's own.
    #[must_use]
    pub fn style(mut self, style: StyleRes) -> Self {
        self.style = Some(style);
        self
    }

    /// Captures the snapshot.
    #[must_use]
    pub fn build(self) -> AttributeSet {
        AttributeSet {
            entries: self.entries,
            style: self.style,
        }
    }
}

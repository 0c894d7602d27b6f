// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory style and value resources.
//!
//! This module provides [`Resources`], a [`StyleContext`] holding style
//! resources (named attribute bundles with an optional parent) and value
//! resources (literals looked up by [`ResourceId`]).

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use restyle_attr::{Attr, AttrId, AttrMap, AttrValue, ErasedValue, ResourceId, StyleRes};

use crate::context::StyleContext;

/// A style resource: attribute assignments plus an optional parent resource.
///
/// Resolving a resource-backed style reads these entries first and then the
/// parent chain, so a child's assignments win over its parent's.
///
/// # Example
///
/// ```rust
/// use restyle::StyleResource;
/// use restyle_attr::{AttrSchema, StyleRes};
///
/// let mut schema = AttrSchema::new();
/// let alpha = schema.register::<f32>("alpha");
///
/// let res = StyleResource::builder()
///     .parent(StyleRes::new(1))
///     .literal(alpha, 0.5)
///     .build();
///
/// assert_eq!(res.parent(), Some(StyleRes::new(1)));
/// assert_eq!(res.entries().len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleResource {
    parent: Option<StyleRes>,
    entries: AttrMap,
}

impl StyleResource {
    /// Returns a builder for a style resource.
    #[must_use]
    pub fn builder() -> StyleResourceBuilder {
        StyleResourceBuilder::default()
    }

    /// Returns the parent resource, if any.
    #[must_use]
    #[inline]
    pub fn parent(&self) -> Option<StyleRes> {
        self.parent
    }

    /// Returns the assignments of this resource, excluding its parents.
    #[must_use]
    #[inline]
    pub fn entries(&self) -> &AttrMap {
        &self.entries
    }
}

/// Builder for [`StyleResource`].
#[derive(Debug, Default)]
pub struct StyleResourceBuilder {
    parent: Option<StyleRes>,
    entries: AttrMap,
}

impl StyleResourceBuilder {
    /// Sets the parent resource.
    #[must_use]
    pub fn parent(mut self, parent: StyleRes) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Assigns a literal value.
    #[must_use]
    pub fn literal<T: Clone + PartialEq + fmt::Debug + 'static>(
        mut self,
        attr: Attr<T>,
        value: T,
    ) -> Self {
        self.entries.insert(attr.id(), AttrValue::literal(value));
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

    /// Builds the resource.
    #[must_use]
    pub fn build(self) -> StyleResource {
        StyleResource {
            parent: self.parent,
            entries: self.entries,
        }
    }
}

/// An immutable table of style and value resources.
///
/// Internally, `Resources` wraps an `Rc<ResourcesData>`, making cloning cheap.
/// Value resources are stored in a sorted vector for O(log n) lookup.
///
/// # Example
///
/// ```rust
/// use restyle::{Resources, StyleContext, StyleResource};
/// use restyle_attr::{AttrSchema, ResourceId, StyleRes};
///
/// const ACCENT: ResourceId = ResourceId::new(0x10);
/// const BUTTON: StyleRes = StyleRes::new(1);
///
/// let mut schema = AttrSchema::new();
/// let background = schema.register::<u32>("background");
///
/// let resources = Resources::builder()
///     .value(ACCENT, 0x0078D4_u32)
///     .style(BUTTON, StyleResource::builder().resource(background, ACCENT).build())
///     .build();
///
/// assert!(resources.style_resource(BUTTON).is_some());
/// assert_eq!(resources.value::<u32>(ACCENT), Some(&0x0078D4));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Resources {
    inner: Rc<ResourcesData>,
}

#[derive(Debug, Default)]
struct ResourcesData {
    styles: HashMap<StyleRes, StyleResource>,
    /// Sorted by `ResourceId` for binary search lookup.
    values: Vec<(ResourceId, ErasedValue)>,
}

impl Resources {
    /// Returns a builder for a resource table.
    #[must_use]
    pub fn builder() -> ResourcesBuilder {
        ResourcesBuilder::default()
    }

    /// Returns the number of style resources.
    #[must_use]
    #[inline]
    pub fn style_count(&self) -> usize {
        self.inner.styles.len()
    }

    /// Returns the number of value resources.
    #[must_use]
    #[inline]
    pub fn value_count(&self) -> usize {
        self.inner.values.len()
    }

    /// Returns the erased value of a value resource.
    #[must_use]
    pub fn erased_value(&self, id: ResourceId) -> Option<&ErasedValue> {
        self.inner
            .values
            .binary_search_by_key(&id, |(k, _)| *k)
            .ok()
            .map(|idx| &self.inner.values[idx].1)
    }

    /// Returns the typed value of a value resource.
    #[must_use]
    pub fn value<T: 'static>(&self, id: ResourceId) -> Option<&T> {
        self.erased_value(id).and_then(ErasedValue::downcast_ref::<T>)
    }
}

impl StyleContext for Resources {
    fn style_resource(&self, res: StyleRes) -> Option<&StyleResource> {
        self.inner.styles.get(&res)
    }

    fn resolve_resource(&self, resource: ResourceId) -> Option<&ErasedValue> {
        self.erased_value(resource)
    }
}

/// Builder for [`Resources`].
#[derive(Debug, Default)]
pub struct ResourcesBuilder {
    styles: HashMap<StyleRes, StyleResource>,
    values: Vec<(ResourceId, ErasedValue)>,
}

impl ResourcesBuilder {
    /// Defines a style resource, replacing any previous definition.
    #[must_use]
    pub fn style(mut self, res: StyleRes, style: StyleResource) -> Self {
        self.styles.insert(res, style);
        self
    }

    /// Defines a value resource, replacing any previous definition.
    #[must_use]
    pub fn value<T: Clone + PartialEq + fmt::Debug + 'static>(
        mut self,
        id: ResourceId,
        value: T,
    ) -> Self {
        let erased = ErasedValue::new(value);

        match self.values.binary_search_by_key(&id, |(k, _)| *k) {
            Ok(idx) => {
                self.values[idx].1 = erased;
            }
            Err(idx) => {
                self.values.insert(idx, (id, erased));
            }
        }
        self
    }

    /// Builds the table.
    #[must_use]
    pub fn build(self) -> Resources {
        Resources {
            inner: Rc::new(ResourcesData {
                styles: self.styles,
                values: self.values,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use restyle_attr::AttrSchema;

    #[test]
    fn empty_table() {
        let resources = Resources::default();
        assert_eq!(resources.style_count(), 0);
        assert_eq!(resources.value_count(), 0);
        assert!(resources.style_resource(StyleRes::new(1)).is_none());
        assert!(resources.resolve_resource(ResourceId::new(1)).is_none());
    }

    #[test]
    fn value_replace() {
        let id = ResourceId::new(4);
        let resources = Resources::builder()
            .value(id, String::from("a"))
            .value(id, String::from("b"))
            .build();

        assert_eq!(resources.value_count(), 1);
        assert_eq!(resources.value::<String>(id).map(String::as_str), Some("b"));
        assert_eq!(resources.value::<u32>(id), None);
    }

    #[test]
    fn style_resources_keep_parent_and_entries() {
        let mut schema = AttrSchema::new();
        let alpha = schema.register::<f32>("alpha");

        let child = StyleRes::new(2);
        let resources = Resources::builder()
            .style(
                child,
                StyleResource::builder()
                    .parent(StyleRes::new(1))
                    .literal(alpha, 0.5)
                    .build(),
            )
            .build();

        let def = resources.style_resource(child).unwrap();
        assert_eq!(def.parent(), Some(StyleRes::new(1)));
        assert_eq!(def.entries().get(alpha.id()), Some(&AttrValue::literal(0.5_f32)));
    }

    #[test]
    fn clone_is_cheap() {
        let resources = Resources::builder().value(ResourceId::new(1), 1_u8).build();
        let cloned = resources.clone();
        assert!(Rc::ptr_eq(&resources.inner, &cloned.inner));
    }
}

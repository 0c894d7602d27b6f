// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scoped resolver over resolved attribute values.

use core::fmt;

use restyle_attr::{Attr, AttrId, AttrMap, AttrValue, ErasedValue, ResourceId};
use smallvec::SmallVec;

use crate::context::StyleContext;
use crate::error::{StyleError, StyleResult};

/// Appliers rarely declare more than 16 attributes.
const INLINE_CAPACITY: usize = 16;

/// The resolved values of one style over one attribute scope.
///
/// Obtained from [`Style::resolve_attributes`](crate::Style::resolve_attributes)
/// and released when dropped; the context's
/// [`resolver_released`](StyleContext::resolver_released) hook runs exactly
/// once per resolver, on every exit path.
///
/// Attributes are kept in scope order with duplicates removed. An attribute
/// that no source defines is absent.
pub struct TypedArray<'cx> {
    cx: &'cx dyn StyleContext,
    entries: SmallVec<[(AttrId, Option<AttrValue>); INLINE_CAPACITY]>,
}

impl<'cx> TypedArray<'cx> {
    pub(crate) fn obtain(cx: &'cx dyn StyleContext, scope: &[AttrId]) -> Self {
        let mut entries: SmallVec<[(AttrId, Option<AttrValue>); INLINE_CAPACITY]> =
            SmallVec::with_capacity(scope.len());
        for id in scope {
            if !entries.iter().any(|(seen, _)| seen == id) {
                entries.push((*id, None));
            }
        }
        let ids: SmallVec<[AttrId; INLINE_CAPACITY]> = entries.iter().map(|(id, _)| *id).collect();
        cx.resolver_obtained(&ids);
        Self { cx, entries }
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [(AttrId, Option<AttrValue>)] {
        &mut self.entries
    }

    /// Fills every absent attribute with its default, if it has one.
    pub(crate) fn fill_defaults(
        &mut self,
        mut default: impl FnMut(AttrId) -> Option<ErasedValue>,
    ) {
        let mut filled = 0_usize;
        for (id, slot) in &mut self.entries {
            if slot.is_none()
                && let Some(value) = default(*id)
            {
                *slot = Some(AttrValue::Literal(value));
                filled += 1;
            }
        }
        log::trace!("filled {filled} attribute(s) with defaults");
    }

    /// Returns the context this resolver was obtained from.
    #[must_use]
    #[inline]
    pub fn context(&self) -> &'cx dyn StyleContext {
        self.cx
    }

    /// Returns the number of attributes in scope.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the scope is empty.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of attributes that resolved to a value.
    #[must_use]
    pub fn index_count(&self) -> usize {
        self.entries.iter().filter(|(_, v)| v.is_some()).count()
    }

    /// Iterates the attributes in scope, in scope order.
    pub fn scope(&self) -> impl Iterator<Item = AttrId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    /// Returns `true` if the attribute resolved to a value.
    #[must_use]
    #[inline]
    pub fn has_value(&self, id: AttrId) -> bool {
        self.value(id).is_some()
    }

    /// Returns the resolved value of an attribute.
    #[must_use]
    pub fn value(&self, id: AttrId) -> Option<&AttrValue> {
        self.entries
            .iter()
            .find(|(aid, _)| *aid == id)
            .and_then(|(_, v)| v.as_ref())
    }

    /// Returns the resource pointer an attribute resolved to, if it did.
    #[must_use]
    pub fn resource(&self, id: AttrId) -> Option<ResourceId> {
        self.value(id).and_then(AttrValue::as_resource)
    }

    /// Returns the typed value of an attribute, dereferencing resource
    /// pointers through the context.
    ///
    /// Returns `Ok(None)` if the attribute is absent.
    ///
    /// # Errors
    ///
    /// [`StyleError::UnresolvedResource`] if a resource pointer cannot be
    /// dereferenced, and [`StyleError::TypeMismatch`] if the literal is not
    /// a `T`.
    pub fn get<T: 'static>(&self, attr: Attr<T>) -> StyleResult<Option<&T>> {
        let id = attr.id();
        let erased = match self.value(id) {
            None => return Ok(None),
            Some(AttrValue::Literal(value)) => value,
            Some(AttrValue::Resource(resource)) => self
                .cx
                .resolve_resource(*resource)
                .ok_or(StyleError::UnresolvedResource {
                    attr: id,
                    resource: *resource,
                })?,
        };
        erased
            .downcast_ref::<T>()
            .map(Some)
            .ok_or_else(|| StyleError::TypeMismatch {
                attr: id,
                expected: core::any::type_name::<T>(),
                found: erased.type_name(),
            })
    }

    /// Iterates the attributes that resolved to a value, in scope order.
    pub fn iter(&self) -> impl Iterator<Item = (AttrId, &AttrValue)> + '_ {
        self.entries
            .iter()
            .filter_map(|(id, v)| v.as_ref().map(|v| (*id, v)))
    }

    /// Copies the resolved values into a map.
    #[must_use]
    pub fn to_attr_map(&self) -> AttrMap {
        self.iter().map(|(id, v)| (id, v.clone())).collect()
    }

    /// Releases the resolver.
    ///
    /// Dropping has the same effect.
    pub fn recycle(self) {}
}

impl Drop for TypedArray<'_> {
    fn drop(&mut self) {
        log::trace!("releasing resolver over {} attribute(s)", self.entries.len());
        self.cx.resolver_released();
    }
}

impl fmt::Debug for TypedArray<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(id, v)| (id, v)))
            .finish()
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute and resource identification types.
//!
//! This module provides [`AttrId`] for runtime attribute identification,
//! [`Attr<T>`] for type-safe attribute keys, and the two opaque indirection
//! tokens used by styles: [`StyleRes`] and [`ResourceId`].

use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

/// A runtime attribute identifier.
///
/// This is a lightweight handle (u16) naming one styleable attribute within
/// an [`AttrSchema`](crate::AttrSchema). Within one target type an id maps to
/// exactly one semantic property.
///
/// # Example
///
/// ```rust
/// use restyle_attr::AttrId;
///
/// let id = AttrId::new(7);
/// assert_eq!(id.index(), 7);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttrId(u16);

impl AttrId {
    /// Creates a new attribute ID from the given index.
    ///
    /// This is typically called by [`AttrSchema::register`](crate::AttrSchema::register)
    /// rather than directly.
    #[must_use]
    #[inline]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Returns the underlying index of this attribute ID.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u16 {
        self.0
    }
}

impl fmt::Debug for AttrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AttrId").field(&self.0).finish()
    }
}

impl fmt::Display for AttrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AttrId({})", self.0)
    }
}

/// A type-safe attribute key.
///
/// This wraps an [`AttrId`] with a phantom type parameter `T` naming the
/// literal type the attribute accepts, so that style builders and resolvers
/// can check values at compile time.
///
/// ```rust
/// use restyle_attr::{Attr, AttrSchema};
///
/// let mut schema = AttrSchema::new();
/// let alpha: Attr<f32> = schema.register("alpha");
///
/// assert_eq!(schema.name(alpha.id()), Some("alpha"));
/// ```
pub struct Attr<T> {
    id: AttrId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Attr<T> {
    /// Creates a typed attribute from an attribute ID.
    ///
    /// The caller must ensure that the `AttrId` was registered with the same
    /// type `T`. A mismatch surfaces as a type error when the value is read.
    #[must_use]
    #[inline]
    pub const fn from_id(id: AttrId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    /// Returns the underlying attribute ID.
    #[must_use]
    #[inline]
    pub const fn id(self) -> AttrId {
        self.id
    }
}

// Manual trait implementations to avoid requiring T: Clone, etc.

impl<T> Copy for Attr<T> {}

impl<T> Clone for Attr<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> PartialEq for Attr<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Attr<T> {}

impl<T> Hash for Attr<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for Attr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attr")
            .field("id", &self.id)
            .field("type", &core::any::type_name::<T>())
            .finish()
    }
}

impl<T> From<Attr<T>> for AttrId {
    #[inline]
    fn from(attr: Attr<T>) -> Self {
        attr.id
    }
}

/// Identifier of a style resource: a named, pre-declared bundle of attribute
/// assignments owned by the resolution context.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StyleRes(u32);

impl StyleRes {
    /// Creates a style resource identifier.
    #[must_use]
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    #[must_use]
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for StyleRes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StyleRes({:#x})", self.0)
    }
}

impl fmt::Display for StyleRes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@style/{:#x}", self.0)
    }
}

/// An opaque indirection token for a value resource (a color, dimension,
/// string, ...).
///
/// Styles only carry the token; turning it into a literal is the job of the
/// resolution context.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceId(u32);

impl ResourceId {
    /// Creates a resource identifier.
    #[must_use]
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    #[must_use]
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceId({:#x})", self.0)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@res/{:#x}", self.0)
    }
}

/// An attribute bound to a resource pointer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttrResource {
    /// The attribute being assigned.
    pub attr: AttrId,
    /// The resource the value is taken from.
    pub resource: ResourceId,
}

impl AttrResource {
    /// Pairs an attribute with a resource pointer.
    #[must_use]
    #[inline]
    pub const fn new(attr: AttrId, resource: ResourceId) -> Self {
        Self { attr, resource }
    }
}

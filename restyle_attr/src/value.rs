// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Type-erased, comparable attribute values.
//!
//! This module provides [`ErasedValue`] for storing literal values of any
//! comparable type in a heterogeneous collection, and [`AttrValue`], the tag
//! every resolved attribute carries: a literal or a resource pointer.

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::id::ResourceId;

/// A type-erased literal value.
///
/// Wraps a value of any `'static` type that is `Clone + PartialEq + Debug`,
/// storing it on the heap with its type information. Two erased values are
/// equal when they hold the same type and the held values compare equal, so
/// whole attribute maps can be compared without knowing their types.
///
/// # Example
///
/// ```rust
/// use restyle_attr::ErasedValue;
///
/// let value = ErasedValue::new(0.5_f32);
/// assert!(value.is::<f32>());
/// assert_eq!(value.downcast_ref::<f32>(), Some(&0.5));
///
/// assert_eq!(value, ErasedValue::new(0.5_f32));
/// assert_ne!(value, ErasedValue::new(0.5_f64));
/// ```
pub struct ErasedValue {
    inner: Box<dyn ErasedValueTrait>,
    type_id: TypeId,
}

impl ErasedValue {
    /// Creates a new erased value from a concrete value.
    #[must_use]
    pub fn new<T: Clone + PartialEq + fmt::Debug + 'static>(value: T) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            inner: Box::new(value),
        }
    }

    /// Returns the [`TypeId`] of the contained value.
    #[must_use]
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the type name of the contained value, for diagnostics.
    #[must_use]
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.inner.type_name()
    }

    /// Returns `true` if the contained value is of type `T`.
    #[must_use]
    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Attempts to downcast to a reference of type `T`.
    ///
    /// Returns `None` if the contained value is not of type `T`.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        if self.is::<T>() {
            self.inner.as_any().downcast_ref()
        } else {
            None
        }
    }
}

impl Clone for ErasedValue {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone_boxed(),
            type_id: self.type_id,
        }
    }
}

impl PartialEq for ErasedValue {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id && self.inner.eq_dyn(other.inner.as_any())
    }
}

impl fmt::Debug for ErasedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt_dyn(f)
    }
}

/// Trait object for type-erased values that can be cloned, compared and printed.
trait ErasedValueTrait: Any {
    fn as_any(&self) -> &dyn Any;
    fn clone_boxed(&self) -> Box<dyn ErasedValueTrait>;
    fn eq_dyn(&self, other: &dyn Any) -> bool;
    fn fmt_dyn(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
    fn type_name(&self) -> &'static str;
}

impl<T: Clone + PartialEq + fmt::Debug + 'static> ErasedValueTrait for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_boxed(&self) -> Box<dyn ErasedValueTrait> {
        Box::new(self.clone())
    }

    fn eq_dyn(&self, other: &dyn Any) -> bool {
        other.downcast_ref::<T>().is_some_and(|other| self == other)
    }

    fn fmt_dyn(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }

    fn type_name(&self) -> &'static str {
        core::any::type_name::<T>()
    }
}

/// A resolved attribute value.
///
/// Resolution always binds exactly one of the two forms: a literal supplied
/// directly, or a pointer to a resource that the resolution context turns
/// into a literal later.
#[derive(Clone, PartialEq)]
pub enum AttrValue {
    /// A literal value.
    Literal(ErasedValue),
    /// A pointer to a value resource.
    Resource(ResourceId),
}

impl AttrValue {
    /// Wraps a literal value.
    #[must_use]
    pub fn literal<T: Clone + PartialEq + fmt::Debug + 'static>(value: T) -> Self {
        Self::Literal(ErasedValue::new(value))
    }

    /// Returns the literal, if this is one.
    #[must_use]
    #[inline]
    pub fn as_literal(&self) -> Option<&ErasedValue> {
        match self {
            Self::Literal(value) => Some(value),
            Self::Resource(_) => None,
        }
    }

    /// Returns the resource pointer, if this is one.
    #[must_use]
    #[inline]
    pub fn as_resource(&self) -> Option<ResourceId> {
        match self {
            Self::Literal(_) => None,
            Self::Resource(id) => Some(*id),
        }
    }
}

impl fmt::Debug for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value:?}"),
            Self::Resource(id) => write!(f, "{id}"),
        }
    }
}

impl From<ResourceId> for AttrValue {
    fn from(id: ResourceId) -> Self {
        Self::Resource(id)
    }
}

impl From<ErasedValue> for AttrValue {
    fn from(value: ErasedValue) -> Self {
        Self::Literal(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::String;

    #[test]
    fn erased_value_downcast() {
        let value = ErasedValue::new(42_i32);
        assert!(value.is::<i32>());
        assert!(!value.is::<f64>());
        assert_eq!(value.downcast_ref::<i32>(), Some(&42));
        assert_eq!(value.downcast_ref::<f64>(), None);
        assert_eq!(value.type_id(), TypeId::of::<i32>());
    }

    #[test]
    fn erased_value_clone_is_deep() {
        let value = ErasedValue::new(String::from("hello"));
        let cloned = value.clone();
        assert_eq!(
            cloned.downcast_ref::<String>().map(String::as_str),
            Some("hello")
        );
        assert_eq!(value, cloned);
    }

    #[test]
    fn equality_requires_same_type() {
        assert_eq!(ErasedValue::new(1_u8), ErasedValue::new(1_u8));
        assert_ne!(ErasedValue::new(1_u8), ErasedValue::new(2_u8));
        assert_ne!(ErasedValue::new(1_u8), ErasedValue::new(1_u16));
    }

    #[test]
    fn debug_prints_inner_value() {
        assert_eq!(format!("{:?}", ErasedValue::new(7_i32)), "7");
        assert_eq!(
            format!("{:?}", AttrValue::literal(String::from("x"))),
            "\"x\""
        );
        assert_eq!(
            format!("{:?}", AttrValue::Resource(ResourceId::new(0x10))),
            "@res/0x10"
        );
    }

    #[test]
    fn type_name_is_reported() {
        assert_eq!(ErasedValue::new(1.5_f32).type_name(), "f32");
    }

    #[test]
    fn attr_value_binds_exactly_one_form() {
        let literal = AttrValue::literal(3_i32);
        assert!(literal.as_literal().is_some());
        assert_eq!(literal.as_resource(), None);

        let resource = AttrValue::from(ResourceId::new(5));
        assert!(resource.as_literal().is_none());
        assert_eq!(resource.as_resource(), Some(ResourceId::new(5)));

        assert_ne!(literal, resource);
    }
}

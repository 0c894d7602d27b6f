// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute schema registry.
//!
//! This module provides [`AttrSchema`] for registering the styleable
//! attributes of a target type and looking up their names, value types and
//! default values.

use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;
use hashbrown::HashMap;

use crate::id::{Attr, AttrId};
use crate::value::ErasedValue;

/// A registration entry for an attribute.
pub struct AttrRegistration {
    name: &'static str,
    type_id: TypeId,
    type_name: &'static str,
    default_value: Option<ErasedValue>,
}

impl AttrRegistration {
    /// Returns the attribute name.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the [`TypeId`] of the attribute's literal type.
    #[must_use]
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the name of the attribute's literal type.
    #[must_use]
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the default value, if one was registered.
    #[must_use]
    #[inline]
    pub fn default_value(&self) -> Option<&ErasedValue> {
        self.default_value.as_ref()
    }
}

impl fmt::Debug for AttrRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttrRegistration")
            .field("name", &self.name)
            .field("type", &self.type_name)
            .field("default_value", &self.default_value)
            .finish_non_exhaustive()
    }
}

/// The attribute schema of a target type.
///
/// Attributes are registered once, and the schema hands back typed
/// [`Attr<T>`] handles whose ids are dense indices into the schema. Appliers
/// use the schema to declare their attribute scope, and diagnostics use it to
/// print attribute names instead of raw ids.
///
/// # Example
///
/// ```rust
/// use restyle_attr::AttrSchema;
///
/// let mut schema = AttrSchema::new();
/// let alpha = schema.register_with_default("alpha", 1.0_f32);
/// let padding = schema.register::<i32>("padding");
///
/// assert_eq!(schema.len(), 2);
/// assert_eq!(schema.id_of("padding"), Some(padding.id()));
/// assert_eq!(schema.default_value(alpha), Some(&1.0));
/// assert_eq!(schema.ids_with_default(), vec![alpha.id()]);
/// ```
#[derive(Default)]
pub struct AttrSchema {
    attrs: Vec<AttrRegistration>,
    by_name: HashMap<&'static str, AttrId>,
}

impl AttrSchema {
    /// Creates a new empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an attribute without a default value.
    ///
    /// # Panics
    ///
    /// Panics if an attribute with the same name is already registered,
    /// or if more than 65,535 attributes are registered.
    pub fn register<T: Clone + PartialEq + fmt::Debug + 'static>(
        &mut self,
        name: &'static str,
    ) -> Attr<T> {
        self.insert::<T>(name, None)
    }

    /// Registers an attribute with a default value.
    ///
    /// Defaults are informational: they back
    /// `attributes_with_default_value` diagnostics and are never applied
    /// automatically.
    ///
    /// # Panics
    ///
    /// Same conditions as [`AttrSchema::register`].
    pub fn register_with_default<T: Clone + PartialEq + fmt::Debug + 'static>(
        &mut self,
        name: &'static str,
        default_value: T,
    ) -> Attr<T> {
        self.insert::<T>(name, Some(ErasedValue::new(default_value)))
    }

    fn insert<T: 'static>(
        &mut self,
        name: &'static str,
        default_value: Option<ErasedValue>,
    ) -> Attr<T> {
        assert!(
            !self.by_name.contains_key(name),
            "Attribute '{name}' is already registered"
        );
        assert!(
            self.attrs.len() < u16::MAX as usize,
            "Too many attributes registered (max {})",
            u16::MAX
        );

        #[expect(clippy::cast_possible_truncation, reason = "checked above")]
        let id = AttrId::new(self.attrs.len() as u16);

        self.attrs.push(AttrRegistration {
            name,
            type_id: TypeId::of::<T>(),
            type_name: core::any::type_name::<T>(),
            default_value,
        });
        self.by_name.insert(name, id);

        Attr::from_id(id)
    }

    /// Returns the number of registered attributes.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Returns `true` if no attributes are registered.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Returns the registration for an attribute ID.
    #[must_use]
    #[inline]
    pub fn get(&self, id: AttrId) -> Option<&AttrRegistration> {
        self.attrs.get(usize::from(id.index()))
    }

    /// Returns the name of an attribute.
    #[must_use]
    pub fn name(&self, id: AttrId) -> Option<&'static str> {
        self.get(id).map(AttrRegistration::name)
    }

    /// Looks an attribute up by name.
    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<AttrId> {
        self.by_name.get(name).copied()
    }

    /// Returns `true` if the ID belongs to this schema.
    #[must_use]
    #[inline]
    pub fn contains(&self, id: AttrId) -> bool {
        usize::from(id.index()) < self.attrs.len()
    }

    /// Returns the typed default value of an attribute, if registered with one.
    #[must_use]
    pub fn default_value<T: 'static>(&self, attr: Attr<T>) -> Option<&T> {
        self.get(attr.id())
            .and_then(AttrRegistration::default_value)
            .and_then(ErasedValue::downcast_ref::<T>)
    }

    /// Returns all registered attribute IDs, in registration order.
    pub fn ids(&self) -> impl Iterator<Item = AttrId> + '_ {
        (0..self.attrs.len()).map(|index| {
            #[expect(clippy::cast_possible_truncation, reason = "bounded at registration")]
            let index = index as u16;
            AttrId::new(index)
        })
    }

    /// Returns the IDs of attributes that were registered with a default value.
    #[must_use]
    pub fn ids_with_default(&self) -> Vec<AttrId> {
        self.ids()
            .filter(|id| self.get(*id).is_some_and(|reg| reg.default_value.is_some()))
            .collect()
    }
}

impl fmt::Debug for AttrSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttrSchema")
            .field("attrs", &self.attrs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec;

    #[test]
    fn register_assigns_dense_ids() {
        let mut schema = AttrSchema::new();
        let a = schema.register::<i32>("a");
        let b = schema.register::<String>("b");

        assert_eq!(a.id().index(), 0);
        assert_eq!(b.id().index(), 1);
        assert_eq!(schema.ids().collect::<Vec<_>>(), vec![a.id(), b.id()]);
    }

    #[test]
    fn lookup_by_name_and_id() {
        let mut schema = AttrSchema::new();
        let alpha = schema.register::<f32>("alpha");

        assert_eq!(schema.id_of("alpha"), Some(alpha.id()));
        assert_eq!(schema.id_of("beta"), None);
        assert_eq!(schema.name(alpha.id()), Some("alpha"));
        assert_eq!(schema.name(AttrId::new(9)), None);
        assert!(schema.contains(alpha.id()));
        assert!(!schema.contains(AttrId::new(9)));
    }

    #[test]
    fn registration_records_type() {
        let mut schema = AttrSchema::new();
        let alpha = schema.register::<f32>("alpha");
        let reg = schema.get(alpha.id()).unwrap();

        assert_eq!(reg.type_id(), TypeId::of::<f32>());
        assert_eq!(reg.type_name(), "f32");
        assert!(reg.default_value().is_none());
    }

    #[test]
    fn defaults_are_typed() {
        let mut schema = AttrSchema::new();
        let alpha = schema.register_with_default("alpha", 1.0_f32);
        let padding = schema.register::<i32>("padding");

        assert_eq!(schema.default_value(alpha), Some(&1.0));
        assert_eq!(schema.default_value(padding), None);
        assert_eq!(schema.ids_with_default(), vec![alpha.id()]);
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn duplicate_name_panics() {
        let mut schema = AttrSchema::new();
        schema.register::<i32>("a");
        schema.register::<i32>("a");
    }
}

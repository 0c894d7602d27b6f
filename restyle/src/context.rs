// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The resolution context seen by styles.

use restyle_attr::{AttrId, ErasedValue, ResourceId, StyleRes};

use crate::resources::StyleResource;

/// The environment a style is resolved against.
///
/// A context owns the style resources that resource-backed styles point at,
/// and dereferences value resources on demand. It is also told when a
/// resolver is obtained and released, which lets hosts pool resolver storage
/// or count outstanding resolvers.
///
/// [`Resources`](crate::Resources) is an in-memory implementation.
pub trait StyleContext {
    /// Looks up a style resource.
    fn style_resource(&self, res: StyleRes) -> Option<&StyleResource>;

    /// Dereferences a value resource.
    fn resolve_resource(&self, resource: ResourceId) -> Option<&ErasedValue>;

    /// Called when a resolver over `scope` has been obtained.
    fn resolver_obtained(&self, scope: &[AttrId]) {
        let _ = scope;
    }

    /// Called exactly once when a resolver is released.
    fn resolver_released(&self) {}
}

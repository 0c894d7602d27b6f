// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Restyle Attr: the value vocabulary of the `restyle` style engine.
//!
//! This crate holds the leaf types every style source and applier shares.
//! Style resolution and application are provided by `restyle`.
//!
//! ## Core Concepts
//!
//! - [`AttrId`] / [`Attr<T>`] name one styleable attribute of a target's
//!   schema; the typed form carries the literal type at compile time.
//! - [`StyleRes`] and [`ResourceId`] are opaque indirection tokens: the first
//!   names a style resource, the second a value resource. Neither is
//!   dereferenced here.
//! - [`ErasedValue`] stores a literal of any comparable type; [`AttrValue`]
//!   tags a resolved attribute as literal or resource pointer.
//! - [`AttrSchema`] registers attributes by name and type.
//! - [`AttributeSet`] is an immutable snapshot of declarative assignments.
//!
//! ## Quick Start
//!
//! ```rust
//! use restyle_attr::{AttrSchema, AttrValue, AttributeSet, ResourceId};
//!
//! let mut schema = AttrSchema::new();
//! let alpha = schema.register::<f32>("alpha");
//! let background = schema.register::<u32>("background");
//!
//! let set = AttributeSet::builder()
//!     .literal(alpha, 0.5)
//!     .resource(background, ResourceId::new(0x7f06_0001))
//!     .build();
//!
//! assert_eq!(set.get(alpha.id()), Some(&AttrValue::literal(0.5_f32)));
//! assert_eq!(
//!     set.get(background.id()).and_then(AttrValue::as_resource),
//!     Some(ResourceId::new(0x7f06_0001))
//! );
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod id;
mod map;
mod schema;
mod set;
mod value;

pub use id::{Attr, AttrId, AttrResource, ResourceId, StyleRes};
pub use map::AttrMap;
pub use schema::{AttrRegistration, AttrSchema};
pub use set::{AttributeSet, AttributeSetBuilder};
pub use value::{AttrValue, ErasedValue};

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Restyle: style resolution and application for view-like targets.
//!
//! This crate resolves styles from several sources into one set of attribute
//! values per target, and applies them through target-specific processing.
//! The attribute vocabulary lives in `restyle_attr`.
//!
//! ## Core Concepts
//!
//! ### Styles
//!
//! [`Style`] is a shared, immutable bundle of attribute assignments. It comes
//! from one of four sources:
//!
//! - a style resource, looked up in the [`StyleContext`] by [`StyleRes`];
//! - an attribute-set snapshot ([`AttributeSet`]);
//! - a programmatic [`StyleBuilder`];
//! - an ordered composition of other styles ([`Style::multi`]).
//!
//! In a composition later styles win per attribute:
//!
//! ```rust
//! use restyle::{Resources, Style};
//! use restyle_attr::AttrSchema;
//!
//! let mut schema = AttrSchema::new();
//! let alpha = schema.register::<f32>("alpha");
//! let padding = schema.register::<i32>("padding");
//!
//! let base = Style::builder().put(alpha, 1.0).put(padding, 4).build();
//! let emphasis = Style::builder().put(alpha, 0.5).build();
//! let merged = Style::multi([base, emphasis]);
//!
//! let resources = Resources::default();
//! let values = merged
//!     .resolve_attributes(&resources, &[alpha.id(), padding.id()])
//!     .unwrap();
//! assert_eq!(values.get(alpha).unwrap(), Some(&0.5));
//! assert_eq!(values.get(padding).unwrap(), Some(&4));
//! ```
//!
//! ### Resources
//!
//! [`Resources`] is an in-memory [`StyleContext`]: it holds style resources,
//! which may inherit from a parent resource, and value resources that
//! attribute values can point at with a [`ResourceId`]. Pointers are kept as
//! pointers through resolution and dereferenced by [`TypedArray::get`].
//!
//! ### Appliers
//!
//! A [`StyleApplier`] pairs a context, a [`Styleable`] implementation and an
//! optional target. Applying a style resolves the styleable's declared
//! attributes and hands them to its processing hooks; the resolver is
//! released on every path. Appliers record every style applied to them, so a
//! detached applier (one without a target) can accumulate a style definition
//! that is replayed later with [`StyleApplier::apply_applier`] or checked
//! with [`StyleApplier::assert_applied_same_attributes`].
//!
//! ## Errors and Logging
//!
//! Fallible operations return [`StyleResult`]. Application steps are logged
//! through the [`log`](https://docs.rs/log) facade at `trace` level, replays
//! and equivalence checks at `debug`, and failed equivalence checks at
//! `warn`.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.
//!
//! [`StyleRes`]: restyle_attr::StyleRes
//! [`ResourceId`]: restyle_attr::ResourceId
//! [`AttributeSet`]: restyle_attr::AttributeSet

#![no_std]

extern crate alloc;

mod applier;
mod config;
mod context;
mod equivalence;
mod error;
mod resolve;
mod resources;
mod style;
mod typed_array;

pub use applier::{StyleApplier, Styleable};
pub use config::{ApplierConfig, CycleHandling, DEFAULT_MAX_DEPTH};
pub use context::StyleContext;
pub use equivalence::{assert_same_attributes, diff_attributes};
pub use error::{AttributeMismatches, Mismatch, StyleError, StyleResult};
pub use resources::{Resources, ResourcesBuilder, StyleResource, StyleResourceBuilder};
pub use style::{DebugListener, Style, StyleBuilder, StyleKey, StyleSource};
pub use typed_array::TypedArray;

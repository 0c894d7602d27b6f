// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style definitions.
//!
//! This module provides [`Style`], an immutable, shared bundle of attribute
//! assignments over a closed set of sources, and [`StyleBuilder`] for
//! programmatic construction.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use restyle_attr::{Attr, AttrId, AttrMap, AttrValue, AttributeSet, ResourceId, StyleRes};

use crate::typed_array::TypedArray;

/// Instrumentation hook attached to a style.
///
/// When a style carries a listener, the applier hands the resolved values to
/// the listener instead of running generic attribute processing for that
/// style.
pub trait DebugListener {
    /// Called with the resolved values before they would be processed.
    fn before_typed_array_processed(&self, style: &Style, values: &TypedArray<'_>);
}

/// Where a style's assignments come from.
#[derive(Clone, Debug, PartialEq)]
pub enum StyleSource {
    /// A style resource owned by the resolution context.
    Resource(StyleRes),
    /// A captured attribute-set snapshot.
    AttributeSet(AttributeSet),
    /// Assignments accumulated by a [`StyleBuilder`].
    Programmatic(AttrMap),
    /// An ordered composition; later children win per attribute.
    Multi(Vec<Style>),
}

/// Identity of a style for cycle detection.
///
/// Resource-backed styles are identified by their resource, so two handles on
/// the same resource are the same style; every other style is identified by
/// its shared allocation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StyleKey {
    /// A style resource.
    Resource(StyleRes),
    /// A shared style allocation.
    Shared(usize),
}

/// A shared, immutable style.
///
/// A style is one of four sources (see [`StyleSource`]) plus three pieces of
/// metadata common to all of them: a diagnostic name, an optional explicit
/// parent, and an optional [`DebugListener`]. Styles never change after
/// construction; composition goes through [`Style::multi`] and the `with_*`
/// methods return new styles.
///
/// Cloning is cheap (`Rc`).
///
/// # Example
///
/// ```rust
/// use restyle::Style;
/// use restyle_attr::{AttrSchema, ResourceId};
///
/// let mut schema = AttrSchema::new();
/// let alpha = schema.register::<f32>("alpha");
/// let text = schema.register::<String>("text");
///
/// let style = Style::builder()
///     .debug_name("greeting")
///     .put(alpha, 0.5)
///     .put_res(text, ResourceId::new(0x10))
///     .build();
///
/// assert_eq!(style.debug_name(), Some("greeting"));
/// assert!(!style.should_apply_parent_automatically());
/// ```
#[derive(Clone)]
pub struct Style {
    inner: Rc<StyleData>,
}

#[derive(Clone)]
struct StyleData {
    debug_name: Option<String>,
    parent: Option<Style>,
    debug_listener: Option<Rc<dyn DebugListener>>,
    apply_defaults: bool,
    source: StyleSource,
}

impl StyleData {
    fn new(source: StyleSource) -> Self {
        Self {
            debug_name: None,
            parent: None,
            debug_listener: None,
            apply_defaults: false,
            source,
        }
    }
}

impl Style {
    fn from_data(data: StyleData) -> Self {
        Self {
            inner: Rc::new(data),
        }
    }

    /// Wraps a style resource.
    #[must_use]
    pub fn resource(res: StyleRes) -> Self {
        Self::from_data(StyleData::new(StyleSource::Resource(res)))
    }

    /// Wraps an attribute-set snapshot.
    ///
    /// Styles built this way apply their parent automatically.
    #[must_use]
    pub fn from_attribute_set(set: AttributeSet) -> Self {
        Self::from_data(StyleData::new(StyleSource::AttributeSet(set)))
    }

    /// The style applied for a missing attribute set.
    ///
    /// It assigns nothing itself; appliers fill every attribute in scope
    /// with the [`Styleable`](crate::Styleable) default value, if any.
    #[must_use]
    pub fn empty() -> Self {
        let mut data = StyleData::new(StyleSource::AttributeSet(AttributeSet::default()));
        data.apply_defaults = true;
        Self::from_data(data)
    }

    /// Returns a builder for a programmatic style.
    #[must_use]
    pub fn builder() -> StyleBuilder {
        StyleBuilder::default()
    }

    /// Composes styles in order; for each attribute the last child defining
    /// it wins.
    #[must_use]
    pub fn multi(children: impl IntoIterator<Item = Self>) -> Self {
        Self::multi_with_parent(children, None)
    }

    /// Composes styles in order with an explicit parent that overrides any
    /// parent declared by the children.
    #[must_use]
    pub fn multi_with_parent(
        children: impl IntoIterator<Item = Self>,
        parent: Option<Self>,
    ) -> Self {
        let mut data = StyleData::new(StyleSource::Multi(children.into_iter().collect()));
        data.parent = parent;
        Self::from_data(data)
    }

    /// Returns a copy of this style with a diagnostic name.
    #[must_use]
    pub fn with_debug_name(&self, name: impl Into<String>) -> Self {
        let mut data = (*self.inner).clone();
        data.debug_name = Some(name.into());
        Self::from_data(data)
    }

    /// Returns a copy of this style with an explicit parent.
    #[must_use]
    pub fn with_parent(&self, parent: Self) -> Self {
        let mut data = (*self.inner).clone();
        data.parent = Some(parent);
        Self::from_data(data)
    }

    /// Returns a copy of this style carrying a debug listener.
    #[must_use]
    pub fn with_debug_listener(&self, listener: Rc<dyn DebugListener>) -> Self {
        let mut data = (*self.inner).clone();
        data.debug_listener = Some(listener);
        Self::from_data(data)
    }

    /// Returns the diagnostic name, if any.
    #[must_use]
    #[inline]
    pub fn debug_name(&self) -> Option<&str> {
        self.inner.debug_name.as_deref()
    }

    /// Returns the source of this style's assignments.
    #[must_use]
    #[inline]
    pub fn source(&self) -> &StyleSource {
        &self.inner.source
    }

    /// Returns the debug listener, if any.
    #[must_use]
    #[inline]
    pub fn debug_listener(&self) -> Option<&dyn DebugListener> {
        self.inner.debug_listener.as_deref()
    }

    /// Returns the explicit parent of this style.
    ///
    /// For a composition without an explicit parent this is the parent
    /// declared by the last child that declares one.
    #[must_use]
    pub fn declares_parent(&self) -> Option<&Self> {
        if let Some(parent) = &self.inner.parent {
            return Some(parent);
        }
        match &self.inner.source {
            StyleSource::Multi(children) => children.iter().rev().find_map(Self::declares_parent),
            StyleSource::Resource(_)
            | StyleSource::AttributeSet(_)
            | StyleSource::Programmatic(_) => None,
        }
    }

    /// Returns `true` if applying this style must first apply its parent.
    ///
    /// Only attribute-set snapshots do: they are captured before any parent
    /// resolution has happened. Resource, programmatic and composed styles
    /// leave parents to the context that produced them.
    #[must_use]
    pub fn should_apply_parent_automatically(&self) -> bool {
        match &self.inner.source {
            StyleSource::AttributeSet(_) => true,
            StyleSource::Resource(_) | StyleSource::Programmatic(_) | StyleSource::Multi(_) => {
                false
            }
        }
    }

    /// Returns `true` if applying this style fills unassigned attributes
    /// with their default values. Only [`Style::empty`] does.
    #[must_use]
    #[inline]
    pub fn should_apply_defaults(&self) -> bool {
        self.inner.apply_defaults
    }

    /// Returns the identity used for cycle detection.
    #[must_use]
    pub fn key(&self) -> StyleKey {
        match &self.inner.source {
            StyleSource::Resource(res) => StyleKey::Resource(*res),
            _ => StyleKey::Shared(Rc::as_ptr(&self.inner) as usize),
        }
    }

    /// Returns the assignments of this style when they can be known without
    /// a resolution context.
    ///
    /// Returns `None` if the style, or any style it is composed of, depends
    /// on a style resource.
    #[must_use]
    pub fn flattened(&self) -> Option<AttrMap> {
        match &self.inner.source {
            StyleSource::Resource(_) => None,
            StyleSource::AttributeSet(set) => set.style().is_none().then(|| set.entries().clone()),
            StyleSource::Programmatic(entries) => Some(entries.clone()),
            StyleSource::Multi(children) => {
                let mut merged = AttrMap::new();
                for child in children {
                    for (id, value) in child.flattened()?.iter() {
                        merged.insert(id, value.clone());
                    }
                }
                Some(merged)
            }
        }
    }
}

/// Context-free equality.
///
/// Styles whose assignments are known without a context compare by their
/// flattened (attribute → value) maps, regardless of which source produced
/// them. Otherwise the sources are compared structurally. Debug names,
/// parents and listeners are not part of equality. Use
/// [`Style::same_attributes`] to compare under a context.
impl PartialEq for Style {
    fn eq(&self, other: &Self) -> bool {
        if Rc::ptr_eq(&self.inner, &other.inner) {
            return true;
        }
        match (self.flattened(), other.flattened()) {
            (Some(a), Some(b)) => a == b,
            _ => self.inner.source == other.inner.source,
        }
    }
}

impl fmt::Debug for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Style")
            .field("debug_name", &self.inner.debug_name)
            .field("source", &self.inner.source)
            .field("parent", &self.inner.parent)
            .field("has_debug_listener", &self.inner.debug_listener.is_some())
            .field("apply_defaults", &self.inner.apply_defaults)
            .finish()
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.inner.debug_name {
            return write!(f, "{name}");
        }
        match &self.inner.source {
            StyleSource::Resource(res) => write!(f, "{res}"),
            StyleSource::AttributeSet(_) => write!(f, "<attribute set>"),
            StyleSource::Programmatic(_) => write!(f, "<programmatic>"),
            StyleSource::Multi(children) => write!(f, "<multi of {}>", children.len()),
        }
    }
}

/// Builder for programmatic styles.
///
/// Later assignments to the same attribute replace earlier ones.
///
/// # Example
///
/// ```rust
/// use restyle::Style;
/// use restyle_attr::AttrSchema;
///
/// let mut schema = AttrSchema::new();
/// let padding = schema.register::<i32>("padding");
///
/// let style = Style::builder().put(padding, 1).put(padding, 2).build();
/// let expected = Style::builder().put(padding, 2).build();
///
/// assert_eq!(style, expected);
/// ```
#[derive(Default)]
pub struct StyleBuilder {
    entries: AttrMap,
    debug_name: Option<String>,
    parent: Option<Style>,
    debug_listener: Option<Rc<dyn DebugListener>>,
}

impl StyleBuilder {
    /// Creates a new empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a literal value.
    #[must_use]
    pub fn put<T: Clone + PartialEq + fmt::Debug + 'static>(
        mut self,
        attr: Attr<T>,
        value: T,
    ) -> Self {
        self.entries.insert(attr.id(), AttrValue::literal(value));
        self
    }

    /// Assigns a resource pointer.
    #[must_use]
    pub fn put_res<T>(mut self, attr: Attr<T>, resource: ResourceId) -> Self {
        self.entries.insert(attr.id(), AttrValue::Resource(resource));
        self
    }

    /// Assigns an already-tagged value to an untyped attribute.
    #[must_use]
    pub fn put_value(mut self, id: AttrId, value: AttrValue) -> Self {
        self.entries.insert(id, value);
        self
    }

    /// Sets the diagnostic name.
    #[must_use]
    pub fn debug_name(mut self, name: impl Into<String>) -> Self {
        self.debug_name = Some(name.into());
        self
    }

    /// Declares an explicit parent.
    ///
    /// The parent is informational for programmatic styles: it is reported
    /// by [`Style::declares_parent`] but neither applied nor resolved, since
    /// only attribute-set styles apply their parent automatically.
    #[must_use]
    pub fn parent(mut self, parent: Style) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Attaches a debug listener.
    #[must_use]
    pub fn debug_listener(mut self, listener: Rc<dyn DebugListener>) -> Self {
        self.debug_listener = Some(listener);
        self
    }

    /// Returns `true` if nothing has been assigned yet.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds the style.
    #[must_use]
    pub fn build(self) -> Style {
        Style::from_data(StyleData {
            debug_name: self.debug_name,
            parent: self.parent,
            debug_listener: self.debug_listener,
            apply_defaults: false,
            source: StyleSource::Programmatic(self.entries),
        })
    }
}

impl fmt::Debug for StyleBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleBuilder")
            .field("entries", &self.entries)
            .field("debug_name", &self.debug_name)
            .field("parent", &self.parent)
            .field("has_debug_listener", &self.debug_listener.is_some())
            .finish()
    }
}

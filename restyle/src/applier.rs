// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Applying styles to targets.
//!
//! This module provides [`StyleApplier`], which resolves styles against a
//! target's attribute scope and hands the values to target-specific
//! processing, and [`Styleable`], the trait a target type implements to
//! declare that scope and processing.

use alloc::vec::Vec;

use restyle_attr::{AttrId, AttributeSet, ErasedValue, StyleRes};
use smallvec::SmallVec;

use crate::config::{ApplierConfig, CycleHandling};
use crate::context::StyleContext;
use crate::equivalence;
use crate::error::{StyleError, StyleResult};
use crate::style::{Style, StyleKey};
use crate::typed_array::TypedArray;

/// Target-specific half of a style applier.
///
/// An implementation declares which attributes a target type understands and
/// how resolved values are written to it. It also acts as the proxy between
/// applier and target: an implementation may declare a narrower scope than
/// the target supports, and only that scope is resolved and processed.
///
/// Every method has a no-op default, so the empty implementation is an
/// applier that declares no attributes.
pub trait Styleable {
    /// The object styles are applied to.
    type Target;

    /// The attributes resolved for every applied style.
    ///
    /// An empty scope skips resolution entirely.
    fn attributes(&self) -> &[AttrId] {
        &[]
    }

    /// The attributes that have a default value. Diagnostic only.
    fn attributes_with_default_value(&self) -> &[AttrId] {
        &[]
    }

    /// The default value of an attribute.
    ///
    /// Used only for [`Style::empty`], the style applied for a missing
    /// attribute set: attributes it leaves unassigned are filled with their
    /// defaults before processing. An implementation backed by an
    /// [`AttrSchema`](restyle_attr::AttrSchema) returns the registered
    /// default.
    fn default_value(&self, id: AttrId) -> Option<&ErasedValue> {
        let _ = id;
        None
    }

    /// Names an attribute for diagnostics.
    fn attribute_name(&self, id: AttrId) -> Option<&'static str> {
        let _ = id;
        None
    }

    /// Styles that must be applied before `style`, in order.
    fn dependencies(&self, style: &Style) -> Vec<Style> {
        let _ = style;
        Vec::new()
    }

    /// Extracts strongly-typed values for the target's declared fields.
    ///
    /// Runs for every resolved style, before attribute processing.
    fn process_styleable_fields(
        &mut self,
        target: &mut Self::Target,
        style: &Style,
        values: &TypedArray<'_>,
    ) -> StyleResult<()> {
        let _ = (target, style, values);
        Ok(())
    }

    /// Maps resolved attributes to target mutations.
    ///
    /// Skipped for styles carrying a [`DebugListener`](crate::DebugListener).
    fn process_attributes(
        &mut self,
        target: &mut Self::Target,
        style: &Style,
        values: &TypedArray<'_>,
    ) -> StyleResult<()> {
        let _ = (target, style, values);
        Ok(())
    }
}

/// Applies styles to one target and records what it applied.
///
/// Every call to [`apply`](Self::apply) appends the style to the applier's
/// history, even for a detached applier, which has no target and only
/// accumulates a style definition. With a target attached, applying a style:
///
/// 1. applies the style's parent, for styles that require it;
/// 2. applies the dependency styles the [`Styleable`] declares;
/// 3. resolves the declared attribute scope, filling in defaults for
///    [`Style::empty`];
/// 4. runs field processing, then either the style's debug listener or
///    generic attribute processing;
/// 5. releases the resolver, whether or not processing succeeded.
///
/// Parents and dependencies are not recorded in the history.
///
/// # Example
///
/// ```rust
/// use restyle::{Resources, Style, StyleApplier, StyleResult, Styleable, TypedArray};
/// use restyle_attr::{Attr, AttrId, AttrSchema};
///
/// #[derive(Default)]
/// struct Label {
///     padding: i32,
/// }
///
/// struct LabelStyleable {
///     scope: [AttrId; 1],
///     padding: Attr<i32>,
/// }
///
/// impl Styleable for LabelStyleable {
///     type Target = Label;
///
///     fn attributes(&self) -> &[AttrId] {
///         &self.scope
///     }
///
///     fn process_attributes(
///         &mut self,
///         target: &mut Label,
///         _style: &Style,
///         values: &TypedArray<'_>,
///     ) -> StyleResult<()> {
///         if let Some(padding) = values.get(self.padding)? {
///             target.padding = *padding;
///         }
///         Ok(())
///     }
/// }
///
/// let mut schema = AttrSchema::new();
/// let padding = schema.register::<i32>("padding");
/// let resources = Resources::default();
///
/// let styleable = LabelStyleable { scope: [padding.id()], padding };
/// let mut applier = StyleApplier::new(&resources, styleable, Label::default());
///
/// applier.apply(&Style::builder().put(padding, 8).build()).unwrap();
///
/// assert_eq!(applier.target().map(|label| label.padding), Some(8));
/// assert_eq!(applier.applied_styles().len(), 1);
/// ```
pub struct StyleApplier<'cx, S: Styleable> {
    cx: &'cx dyn StyleContext,
    styleable: S,
    target: Option<S::Target>,
    applied_styles: Vec<Style>,
    config: ApplierConfig,
}

impl<'cx, S: Styleable> StyleApplier<'cx, S> {
    /// Creates an applier for a target.
    pub fn new(cx: &'cx dyn StyleContext, styleable: S, target: S::Target) -> Self {
        Self {
            cx,
            styleable,
            target: Some(target),
            applied_styles: Vec::new(),
            config: ApplierConfig::default(),
        }
    }

    /// Creates an applier without a target.
    ///
    /// A detached applier only records the styles applied to it, so it can
    /// be compared against or replayed onto another applier later.
    pub fn detached(cx: &'cx dyn StyleContext, styleable: S) -> Self {
        Self {
            cx,
            styleable,
            target: None,
            applied_styles: Vec::new(),
            config: ApplierConfig::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: ApplierConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the configuration.
    #[must_use]
    #[inline]
    pub fn config(&self) -> &ApplierConfig {
        &self.config
    }

    /// Returns the resolution context.
    #[must_use]
    #[inline]
    pub fn context(&self) -> &'cx dyn StyleContext {
        self.cx
    }

    /// Returns the target-specific half of this applier.
    #[must_use]
    #[inline]
    pub fn styleable(&self) -> &S {
        &self.styleable
    }

    /// Returns the target-specific half of this applier mutably.
    #[inline]
    pub fn styleable_mut(&mut self) -> &mut S {
        &mut self.styleable
    }

    /// Returns `true` if no target is attached.
    #[must_use]
    #[inline]
    pub fn is_detached(&self) -> bool {
        self.target.is_none()
    }

    /// Returns the target, if attached.
    #[must_use]
    #[inline]
    pub fn target(&self) -> Option<&S::Target> {
        self.target.as_ref()
    }

    /// Returns the target mutably, if attached.
    #[inline]
    pub fn target_mut(&mut self) -> Option<&mut S::Target> {
        self.target.as_mut()
    }

    /// Consumes the applier and returns its target.
    pub fn into_target(self) -> Option<S::Target> {
        self.target
    }

    /// Returns every style applied through this applier, in order.
    #[must_use]
    #[inline]
    pub fn applied_styles(&self) -> &[Style] {
        &self.applied_styles
    }

    /// Returns the attribute scope of this applier.
    #[must_use]
    #[inline]
    pub fn attributes(&self) -> &[AttrId] {
        self.styleable.attributes()
    }

    /// Returns the attributes that have a default value.
    #[must_use]
    #[inline]
    pub fn attributes_with_default_value(&self) -> &[AttrId] {
        self.styleable.attributes_with_default_value()
    }

    /// Applies a style.
    ///
    /// The style is recorded in the history before anything else happens,
    /// so it stays recorded even if applying it fails.
    ///
    /// # Errors
    ///
    /// Propagates resolution errors, processor errors, [`StyleError::Cycle`]
    /// when a style requires itself through its parents or dependencies, and
    /// [`StyleError::DepthExceeded`] when nesting exceeds
    /// [`ApplierConfig::max_depth`].
    pub fn apply(&mut self, style: &Style) -> StyleResult<()> {
        self.applied_styles.push(style.clone());

        let Some(target) = self.target.as_mut() else {
            log::trace!("recorded {style} on a detached applier");
            return Ok(());
        };

        let mut stack = SmallVec::new();
        apply_nested(
            self.cx,
            &mut self.styleable,
            target,
            &self.config,
            style,
            &mut stack,
        )
    }

    /// Applies an attribute-set snapshot.
    ///
    /// `None` applies [`Style::empty`], which sets every attribute in scope
    /// that has a [default value](Styleable::default_value) to that default.
    ///
    /// # Errors
    ///
    /// Same as [`apply`](Self::apply).
    pub fn apply_attribute_set(&mut self, set: Option<AttributeSet>) -> StyleResult<()> {
        let style = match set {
            Some(set) => Style::from_attribute_set(set),
            None => Style::empty(),
        };
        self.apply(&style)
    }

    /// Applies a style resource.
    ///
    /// # Errors
    ///
    /// Same as [`apply`](Self::apply).
    pub fn apply_res(&mut self, res: StyleRes) -> StyleResult<()> {
        self.apply(&Style::resource(res))
    }

    /// Replays another applier's history onto this one, in order.
    ///
    /// # Errors
    ///
    /// Stops at, and returns, the first failing style.
    pub fn apply_applier(&mut self, other: &StyleApplier<'_, S>) -> StyleResult<()> {
        log::debug!(
            "replaying {} applied style(s) from another applier",
            other.applied_styles.len()
        );
        for style in &other.applied_styles {
            self.apply(style)?;
        }
        Ok(())
    }

    /// Checks that `reference` resolves to the same attributes as everything
    /// this applier has applied so far, composed in order.
    ///
    /// # Errors
    ///
    /// [`StyleError::Mismatch`] listing every differing attribute, or any
    /// resolution error from either side.
    pub fn assert_applied_same_attributes(&self, reference: &Style) -> StyleResult<()> {
        let aggregated = Style::multi(self.applied_styles.iter().cloned());
        equivalence::assert_same_attributes(self, reference, &aggregated)
    }

    /// Resource form of [`assert_applied_same_attributes`](Self::assert_applied_same_attributes).
    ///
    /// # Errors
    ///
    /// Same as [`assert_applied_same_attributes`](Self::assert_applied_same_attributes).
    pub fn assert_applied_same_attributes_res(&self, res: StyleRes) -> StyleResult<()> {
        self.assert_applied_same_attributes(&Style::resource(res))
    }

    /// Debug-build assertion form of
    /// [`assert_applied_same_attributes`](Self::assert_applied_same_attributes).
    /// Does nothing in release builds.
    ///
    /// # Panics
    ///
    /// In debug builds, panics with the full mismatch report.
    #[track_caller]
    pub fn debug_assert_applied_same_attributes(&self, reference: &Style) {
        if cfg!(debug_assertions)
            && let Err(err) = self.assert_applied_same_attributes(reference)
        {
            panic!("applied styles differ from {reference}: {err}");
        }
    }
}

impl<S> core::fmt::Debug for StyleApplier<'_, S>
where
    S: Styleable,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StyleApplier")
            .field("styleable", &core::any::type_name::<S>())
            .field("detached", &self.target.is_none())
            .field("applied_styles", &self.applied_styles)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

type StyleStack = SmallVec<[StyleKey; 8]>;

fn apply_nested<S: Styleable>(
    cx: &dyn StyleContext,
    styleable: &mut S,
    target: &mut S::Target,
    config: &ApplierConfig,
    style: &Style,
    stack: &mut StyleStack,
) -> StyleResult<()> {
    let key = style.key();
    if stack.contains(&key) {
        match config.cycle_handling {
            CycleHandling::Error => return Err(StyleError::cycle(style)),
            CycleHandling::DebugAssert => {
                debug_assert!(false, "style {style} requires itself");
                log::warn!("skipping {style}: it requires itself");
                return Ok(());
            }
            CycleHandling::Ignore => {
                log::trace!("skipping {style}: it requires itself");
                return Ok(());
            }
        }
    }
    if stack.len() > config.max_depth {
        return Err(StyleError::DepthExceeded {
            max_depth: config.max_depth,
        });
    }

    stack.push(key);
    let result = apply_one(cx, styleable, target, config, style, stack);
    stack.pop();
    result
}

fn apply_one<S: Styleable>(
    cx: &dyn StyleContext,
    styleable: &mut S,
    target: &mut S::Target,
    config: &ApplierConfig,
    style: &Style,
    stack: &mut StyleStack,
) -> StyleResult<()> {
    if style.should_apply_parent_automatically()
        && let Some(parent) = style.declares_parent()
    {
        log::trace!("applying parent {parent} of {style}");
        apply_nested(cx, styleable, target, config, parent, stack)?;
    }

    for dependency in styleable.dependencies(style) {
        log::trace!("applying dependency {dependency} of {style}");
        apply_nested(cx, styleable, target, config, &dependency, stack)?;
    }

    let scope: SmallVec<[AttrId; 16]> = SmallVec::from_slice(styleable.attributes());
    if scope.is_empty() {
        log::trace!("{style} applied without attributes: empty scope");
        return Ok(());
    }

    log::trace!("resolving {} attribute(s) of {style}", scope.len());
    let mut values = style.resolve_attributes(cx, &scope)?;
    if style.should_apply_defaults() {
        values.fill_defaults(|id| styleable.default_value(id).cloned());
    }

    styleable.process_styleable_fields(target, style, &values)?;

    if let Some(listener) = style.debug_listener() {
        log::trace!("handing {style} to its debug listener");
        listener.before_typed_array_processed(style, &values);
    } else {
        styleable.process_attributes(target, style, &values)?;
    }

    values.recycle();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Resources;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::Cell;
    use restyle_attr::{Attr, AttrSchema};

    #[derive(Default)]
    struct Counter {
        processed: usize,
    }

    struct CountingStyleable {
        scope: Vec<AttrId>,
        deps: Rc<Cell<bool>>,
        dep_style: Option<Style>,
    }

    impl Styleable for CountingStyleable {
        type Target = Counter;

        fn attributes(&self) -> &[AttrId] {
            &self.scope
        }

        fn dependencies(&self, _style: &Style) -> Vec<Style> {
            if self.deps.get() {
                self.dep_style.iter().cloned().collect()
            } else {
                Vec::new()
            }
        }

        fn process_attributes(
            &mut self,
            target: &mut Counter,
            _style: &Style,
            _values: &TypedArray<'_>,
        ) -> StyleResult<()> {
            target.processed += 1;
            Ok(())
        }
    }

    fn attr() -> Attr<i32> {
        let mut schema = AttrSchema::new();
        schema.register("a")
    }

    fn styleable(scope: Vec<AttrId>) -> CountingStyleable {
        CountingStyleable {
            scope,
            deps: Rc::new(Cell::new(false)),
            dep_style: None,
        }
    }

    #[test]
    fn empty_scope_skips_processing() {
        let cx = Resources::default();
        let mut applier = StyleApplier::new(&cx, styleable(Vec::new()), Counter::default());

        applier.apply(&Style::builder().build()).unwrap();
        assert_eq!(applier.target().unwrap().processed, 0);
        assert_eq!(applier.applied_styles().len(), 1);
    }

    #[test]
    fn parent_is_applied_for_attribute_sets_only() {
        let a = attr();
        let cx = Resources::default();
        let parent = Style::builder().put(a, 1).build();

        let mut applier = StyleApplier::new(&cx, styleable(vec![a.id()]), Counter::default());
        let from_set = Style::from_attribute_set(AttributeSet::default()).with_parent(parent.clone());
        applier.apply(&from_set).unwrap();
        assert_eq!(applier.target().unwrap().processed, 2);

        let composed = Style::multi_with_parent([Style::builder().build()], Some(parent));
        applier.apply(&composed).unwrap();
        assert_eq!(applier.target().unwrap().processed, 3);

        // Parents are applied but never recorded.
        assert_eq!(applier.applied_styles().len(), 2);
    }

    #[test]
    fn self_dependency_is_a_cycle() {
        let a = attr();
        let cx = Resources::default();
        let style = Style::builder().put(a, 1).build();
        let mut s = styleable(vec![a.id()]);
        s.deps.set(true);
        s.dep_style = Some(style.clone());

        let mut applier = StyleApplier::new(&cx, s, Counter::default());
        let err = applier.apply(&style).unwrap_err();
        assert!(matches!(err, StyleError::Cycle { .. }));
        assert_eq!(applier.target().unwrap().processed, 0);
    }

    #[test]
    fn ignored_cycles_apply_once() {
        let a = attr();
        let cx = Resources::default();
        let style = Style::builder().put(a, 1).build();
        let mut s = styleable(vec![a.id()]);
        s.deps.set(true);
        s.dep_style = Some(style.clone());

        let mut applier = StyleApplier::new(&cx, s, Counter::default())
            .with_config(ApplierConfig::default().with_cycle_handling(CycleHandling::Ignore));
        applier.apply(&style).unwrap();
        assert_eq!(applier.target().unwrap().processed, 1);
    }

    #[test]
    fn depth_limit_is_enforced() {
        let a = attr();
        let cx = Resources::default();
        let dependency = Style::builder().put(a, 2).build();
        let mut s = styleable(vec![a.id()]);
        s.dep_style = Some(dependency);
        s.deps.set(true);

        // With a depth of zero the first dependency is already too deep.
        let mut applier = StyleApplier::new(&cx, s, Counter::default())
            .with_config(ApplierConfig::default().with_max_depth(0));
        let err = applier.apply(&Style::builder().build()).unwrap_err();
        assert!(matches!(err, StyleError::DepthExceeded { max_depth: 0 }));
    }

    struct DefaultsStyleable {
        scope: [AttrId; 2],
        padding: Attr<i32>,
        default: ErasedValue,
    }

    impl Styleable for DefaultsStyleable {
        type Target = Vec<Option<i32>>;

        fn attributes(&self) -> &[AttrId] {
            &self.scope
        }

        fn default_value(&self, id: AttrId) -> Option<&ErasedValue> {
            (id == self.padding.id()).then_some(&self.default)
        }

        fn process_attributes(
            &mut self,
            target: &mut Vec<Option<i32>>,
            _style: &Style,
            values: &TypedArray<'_>,
        ) -> StyleResult<()> {
            target.push(values.get(self.padding)?.copied());
            Ok(())
        }
    }

    #[test]
    fn only_the_empty_style_fills_defaults() {
        let mut schema = AttrSchema::new();
        let padding = schema.register::<i32>("padding");
        let other = schema.register::<i32>("other");
        let cx = Resources::default();
        let styleable = DefaultsStyleable {
            scope: [padding.id(), other.id()],
            padding,
            default: ErasedValue::new(6_i32),
        };

        let mut applier = StyleApplier::new(&cx, styleable, Vec::new());
        applier.apply_attribute_set(None).unwrap();
        applier
            .apply_attribute_set(Some(AttributeSet::default()))
            .unwrap();
        applier
            .apply(&Style::multi([Style::empty(), Style::builder().build()]))
            .unwrap();
        applier.apply(&Style::empty()).unwrap();

        assert_eq!(applier.target().unwrap(), &[Some(6), None, None, Some(6)]);
    }

    #[test]
    fn debug_output_names_the_styleable() {
        let cx = Resources::default();
        let applier = StyleApplier::detached(&cx, styleable(Vec::new()));
        let debug = alloc::format!("{applier:?}");
        assert!(debug.contains("CountingStyleable"));
        assert!(debug.contains("detached: true"));
    }
}

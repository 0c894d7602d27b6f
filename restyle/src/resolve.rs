// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute resolution for every style source.
//!
//! Resolution fills one slot per requested attribute. Sources are visited
//! from highest to lowest precedence and a slot, once filled, is never
//! overwritten:
//!
//! - programmatic styles: their own entries;
//! - attribute sets: their own entries, then the referenced style resource;
//! - style resources: their entries, then each parent resource in turn;
//! - compositions: children from last to first.

use restyle_attr::{AttrId, AttrMap, AttrValue, StyleRes};
use smallvec::SmallVec;

use crate::context::StyleContext;
use crate::error::{StyleError, StyleResult};
use crate::style::{Style, StyleSource};
use crate::typed_array::TypedArray;

impl Style {
    /// Resolves the attributes in `scope` against a context.
    ///
    /// Attributes no source defines, including attributes unknown to the
    /// target's schema, are absent from the result. The returned resolver is
    /// released when dropped.
    ///
    /// # Errors
    ///
    /// [`StyleError::MissingStyleResource`] if a referenced style resource
    /// does not exist, and [`StyleError::Cycle`] if a style resource is its
    /// own (transitive) parent.
    ///
    /// # Example
    ///
    /// ```rust
    /// use restyle::{Resources, Style};
    /// use restyle_attr::AttrSchema;
    ///
    /// let mut schema = AttrSchema::new();
    /// let a = schema.register::<i32>("a");
    /// let b = schema.register::<i32>("b");
    /// let c = schema.register::<i32>("c");
    ///
    /// let s0 = Style::builder().put(a, 1).put(b, 2).build();
    /// let s1 = Style::builder().put(b, 3).put(c, 4).build();
    /// let merged = Style::multi([s0, s1]);
    ///
    /// let resources = Resources::default();
    /// let values = merged
    ///     .resolve_attributes(&resources, &[a.id(), b.id(), c.id()])
    ///     .unwrap();
    ///
    /// assert_eq!(values.get(a).unwrap(), Some(&1));
    /// assert_eq!(values.get(b).unwrap(), Some(&3));
    /// assert_eq!(values.get(c).unwrap(), Some(&4));
    /// ```
    pub fn resolve_attributes<'cx>(
        &self,
        cx: &'cx dyn StyleContext,
        scope: &[AttrId],
    ) -> StyleResult<TypedArray<'cx>> {
        let mut values = TypedArray::obtain(cx, scope);
        fill_style(self, cx, values.slots_mut())?;
        Ok(values)
    }
}

fn fill_style(
    style: &Style,
    cx: &dyn StyleContext,
    slots: &mut [(AttrId, Option<AttrValue>)],
) -> StyleResult<()> {
    match style.source() {
        StyleSource::Programmatic(entries) => fill_from(entries, slots),
        StyleSource::AttributeSet(set) => {
            fill_from(set.entries(), slots);
            if let Some(res) = set.style() {
                fill_resource_chain(res, cx, slots)?;
            }
        }
        StyleSource::Resource(res) => fill_resource_chain(*res, cx, slots)?,
        StyleSource::Multi(children) => {
            for child in children.iter().rev() {
                fill_style(child, cx, slots)?;
            }
        }
    }
    Ok(())
}

fn fill_from(entries: &AttrMap, slots: &mut [(AttrId, Option<AttrValue>)]) {
    for (id, slot) in slots.iter_mut() {
        if slot.is_none()
            && let Some(value) = entries.get(*id)
        {
            *slot = Some(value.clone());
        }
    }
}

/// Walks a style resource and its parents. The whole chain is always visited
/// so a broken chain fails the same way whatever the scope.
fn fill_resource_chain(
    res: StyleRes,
    cx: &dyn StyleContext,
    slots: &mut [(AttrId, Option<AttrValue>)],
) -> StyleResult<()> {
    let mut visited: SmallVec<[StyleRes; 8]> = SmallVec::new();
    let mut next = Some(res);
    while let Some(current) = next {
        if visited.contains(&current) {
            return Err(StyleError::cycle(current));
        }
        visited.push(current);
        let def = cx
            .style_resource(current)
            .ok_or(StyleError::MissingStyleResource { res: current })?;
        fill_from(def.entries(), slots);
        next = def.parent();
    }
    Ok(())
}

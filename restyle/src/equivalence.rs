// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Debug checks that two resolution paths agree.

use restyle_attr::AttrId;

use crate::applier::{StyleApplier, Styleable};
use crate::context::StyleContext;
use crate::error::{AttributeMismatches, Mismatch, StyleError, StyleResult};
use crate::style::Style;

/// Resolves two styles over one scope and reports every attribute on which
/// they differ, in scope order.
///
/// `name` labels attributes in the report.
///
/// # Errors
///
/// Propagates resolution errors from either style.
pub fn diff_attributes(
    cx: &dyn StyleContext,
    scope: &[AttrId],
    expected: &Style,
    actual: &Style,
    name: impl Fn(AttrId) -> Option<&'static str>,
) -> StyleResult<AttributeMismatches> {
    let expected_values = expected.resolve_attributes(cx, scope)?;
    let actual_values = actual.resolve_attributes(cx, scope)?;

    let mut report = AttributeMismatches::new();
    for id in expected_values.scope() {
        let expected_value = expected_values.value(id);
        let actual_value = actual_values.value(id);
        if expected_value != actual_value {
            report.push(Mismatch {
                attr: id,
                name: name(id),
                expected: expected_value.cloned(),
                actual: actual_value.cloned(),
            });
        }
    }
    Ok(report)
}

/// Asserts that `reference` and `aggregated` resolve to the same attributes
/// over the applier's declared scope.
///
/// # Errors
///
/// [`StyleError::Mismatch`] listing every differing attribute, or any
/// resolution error.
pub fn assert_same_attributes<S: Styleable>(
    applier: &StyleApplier<'_, S>,
    reference: &Style,
    aggregated: &Style,
) -> StyleResult<()> {
    let styleable = applier.styleable();
    let report = diff_attributes(
        applier.context(),
        applier.attributes(),
        reference,
        aggregated,
        |id| styleable.attribute_name(id),
    )?;
    if report.is_empty() {
        log::debug!("{aggregated} matches {reference}");
        Ok(())
    } else {
        log::warn!("{aggregated} differs from {reference}: {report}");
        Err(StyleError::Mismatch(report))
    }
}

impl Style {
    /// Returns `true` if both styles resolve to the same attributes over
    /// `scope` in `cx`, whatever their sources.
    ///
    /// # Errors
    ///
    /// Propagates resolution errors from either style.
    ///
    /// # Example
    ///
    /// ```rust
    /// use restyle::{Resources, Style, StyleResource};
    /// use restyle_attr::{AttrSchema, StyleRes};
    ///
    /// const TITLE: StyleRes = StyleRes::new(1);
    ///
    /// let mut schema = AttrSchema::new();
    /// let padding = schema.register::<i32>("padding");
    ///
    /// let resources = Resources::builder()
    ///     .style(TITLE, StyleResource::builder().literal(padding, 4).build())
    ///     .build();
    ///
    /// let programmatic = Style::builder().put(padding, 4).build();
    /// assert!(programmatic
    ///     .same_attributes(&Style::resource(TITLE), &resources, &[padding.id()])
    ///     .unwrap());
    /// ```
    pub fn same_attributes(
        &self,
        other: &Self,
        cx: &dyn StyleContext,
        scope: &[AttrId],
    ) -> StyleResult<bool> {
        Ok(diff_attributes(cx, scope, self, other, |_| None)?.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Resources, StyleResource};
    use restyle_attr::{AttrSchema, AttrValue, ResourceId, StyleRes};

    #[test]
    fn diff_reports_every_kind_of_mismatch() {
        let mut schema = AttrSchema::new();
        let a = schema.register::<i32>("a");
        let b = schema.register::<i32>("b");
        let c = schema.register::<i32>("c");
        let d = schema.register::<i32>("d");

        let expected = Style::builder().put(a, 1).put(b, 2).put(d, 4).build();
        let actual = Style::builder().put(a, 1).put(b, 3).put(c, 5).build();
        let cx = Resources::default();

        let report = diff_attributes(
            &cx,
            &[a.id(), b.id(), c.id(), d.id()],
            &expected,
            &actual,
            |id| schema.name(id),
        )
        .unwrap();

        assert_eq!(report.len(), 3);
        let entries = report.entries();
        assert_eq!(entries[0].name, Some("b"));
        assert_eq!(entries[0].expected, Some(AttrValue::literal(2_i32)));
        assert_eq!(entries[0].actual, Some(AttrValue::literal(3_i32)));
        assert_eq!(entries[1].attr, c.id());
        assert_eq!(entries[1].expected, None);
        assert_eq!(entries[2].attr, d.id());
        assert_eq!(entries[2].actual, None);
    }

    #[test]
    fn resource_pointers_compare_by_pointer() {
        let mut schema = AttrSchema::new();
        let text = schema.register::<i32>("text");
        let cx = Resources::default();

        let a = Style::builder().put_res(text, ResourceId::new(1)).build();
        let b = Style::builder().put_res(text, ResourceId::new(1)).build();
        let c = Style::builder().put_res(text, ResourceId::new(2)).build();

        assert!(a.same_attributes(&b, &cx, &[text.id()]).unwrap());
        assert!(!a.same_attributes(&c, &cx, &[text.id()]).unwrap());
    }

    #[test]
    fn same_attributes_respects_scope() {
        let mut schema = AttrSchema::new();
        let a = schema.register::<i32>("a");
        let b = schema.register::<i32>("b");
        let cx = Resources::default();

        let x = Style::builder().put(a, 1).put(b, 1).build();
        let y = Style::builder().put(a, 1).put(b, 2).build();

        assert!(x.same_attributes(&y, &cx, &[a.id()]).unwrap());
        assert!(!x.same_attributes(&y, &cx, &[a.id(), b.id()]).unwrap());
    }

    #[test]
    fn resolution_errors_propagate() {
        let mut schema = AttrSchema::new();
        let a = schema.register::<i32>("a");
        let cx = Resources::builder()
            .style(StyleRes::new(1), StyleResource::builder().literal(a, 1).build())
            .build();

        let err = Style::resource(StyleRes::new(2))
            .same_attributes(&Style::resource(StyleRes::new(1)), &cx, &[a.id()])
            .unwrap_err();
        assert!(matches!(err, StyleError::MissingStyleResource { .. }));
    }
}

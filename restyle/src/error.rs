// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for style resolution and application.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use restyle_attr::{AttrId, AttrValue, ResourceId, StyleRes};
use thiserror::Error;

/// Errors that can occur while resolving or applying a style.
///
/// An attribute that no style source defines is not an error: resolution
/// reports it as absent and appliers skip it.
#[derive(Error, Debug)]
pub enum StyleError {
    /// A style resource referenced by a style or attribute set does not exist.
    #[error("style resource {res} not found")]
    MissingStyleResource {
        /// The missing style resource.
        res: StyleRes,
    },

    /// A style was reached again while it was still being applied or resolved.
    #[error("style cycle detected at {style}")]
    Cycle {
        /// Description of the repeated style.
        style: String,
    },

    /// Nested parent and dependency application went deeper than allowed.
    #[error("style application exceeded the maximum depth of {max_depth}")]
    DepthExceeded {
        /// The configured limit.
        max_depth: usize,
    },

    /// A resource pointer could not be turned into a literal.
    #[error("attribute {attr} references unresolvable resource {resource}")]
    UnresolvedResource {
        /// The attribute holding the pointer.
        attr: AttrId,
        /// The resource that failed to resolve.
        resource: ResourceId,
    },

    /// A literal was read back as a different type than it was stored with.
    #[error("attribute {attr} holds a {found}, expected a {expected}")]
    TypeMismatch {
        /// The attribute being read.
        attr: AttrId,
        /// The requested type.
        expected: &'static str,
        /// The stored type.
        found: &'static str,
    },

    /// A target-specific processor rejected a value.
    #[error("failed to apply attribute {attr}: {reason}")]
    Processor {
        /// The attribute being applied.
        attr: AttrId,
        /// Why it was rejected.
        reason: String,
    },

    /// Two resolution paths produced different attributes.
    #[error("{0}")]
    Mismatch(AttributeMismatches),
}

/// Result type alias for style operations.
pub type StyleResult<T> = Result<T, StyleError>;

impl StyleError {
    /// Creates a cycle error naming the repeated style.
    pub fn cycle(style: impl fmt::Display) -> Self {
        Self::Cycle {
            style: alloc::format!("{style}"),
        }
    }

    /// Creates a processor error.
    pub fn processor(attr: AttrId, reason: impl Into<String>) -> Self {
        Self::Processor {
            attr,
            reason: reason.into(),
        }
    }
}

/// One attribute that resolved differently along two paths.
#[derive(Clone, Debug, PartialEq)]
pub struct Mismatch {
    /// The differing attribute.
    pub attr: AttrId,
    /// Schema name of the attribute, when the applier knows it.
    pub name: Option<&'static str>,
    /// Value from the reference path; `None` when absent there.
    pub expected: Option<AttrValue>,
    /// Value from the checked path; `None` when absent there.
    pub actual: Option<AttrValue>,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name {
            Some(name) => write!(f, "{name}")?,
            None => write!(f, "{}", self.attr)?,
        }
        match (&self.expected, &self.actual) {
            (Some(expected), Some(actual)) => {
                write!(f, ": expected {expected:?}, got {actual:?}")
            }
            (Some(expected), None) => write!(f, ": expected {expected:?}, missing"),
            (None, Some(actual)) => write!(f, ": unexpected {actual:?}"),
            (None, None) => write!(f, ": absent on both paths"),
        }
    }
}

/// Every attribute that differs between two resolutions, in scope order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeMismatches {
    entries: Vec<Mismatch>,
}

impl AttributeMismatches {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a mismatch.
    pub fn push(&mut self, mismatch: Mismatch) {
        self.entries.push(mismatch);
    }

    /// Returns `true` if nothing differs.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of differing attributes.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the recorded mismatches.
    #[must_use]
    #[inline]
    pub fn entries(&self) -> &[Mismatch] {
        &self.entries
    }

    /// Returns the differing attribute IDs.
    pub fn attrs(&self) -> impl Iterator<Item = AttrId> + '_ {
        self.entries.iter().map(|m| m.attr)
    }
}

impl fmt::Display for AttributeMismatches {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} attribute(s) differ", self.entries.len())?;
        for (i, mismatch) in self.entries.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{mismatch}")?;
        }
        Ok(())
    }
}

// Copyright 2017 Lyndon Brown
//
// This file is part of the `argtree` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Arity: how many values an option or positional consumes.

/// Inclusive lower/upper bound on the number of values an [`OptionSpec`] or [`PositionalSpec`]
/// accepts. `max` of `None` means unbounded.
///
/// [`OptionSpec`]: crate::spec::OptionSpec
/// [`PositionalSpec`]: crate::spec::PositionalSpec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Arity {
    pub min: u32,
    pub max: Option<u32>,
}

/// No values at all. Used for flags.
pub const ZERO: Arity = Arity { min: 0, max: Some(0) };
/// `?` — zero or one value.
pub const ZERO_OR_ONE: Arity = Arity { min: 0, max: Some(1) };
/// Exactly one value.
pub const EXACTLY_ONE: Arity = Arity { min: 1, max: Some(1) };
/// `*` — zero or more values, unbounded.
pub const ZERO_OR_MORE: Arity = Arity { min: 0, max: None };
/// `+` — one or more values, unbounded.
pub const ONE_OR_MORE: Arity = Arity { min: 1, max: None };

impl Arity {
    /// Construct a custom arity range. `max` of `None` means unbounded.
    ///
    /// Panics (debug only) if `max` is `Some(m)` with `m < min`.
    #[inline]
    pub fn new(min: u32, max: Option<u32>) -> Self {
        debug_assert!(max.map_or(true, |m| m >= min), "arity max must be >= min");
        Self { min, max }
    }

    /// Whether this arity describes a flag (accepts no values).
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.max == Some(0)
    }

    /// Whether the upper bound is unbounded.
    #[inline]
    pub fn is_unbounded(&self) -> bool {
        self.max.is_none()
    }

    /// Whether `count` values lies within `[min, max]`.
    #[inline]
    pub fn accepts(&self, count: u32) -> bool {
        count >= self.min && self.max.map_or(true, |m| count <= m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_constants() {
        assert!(ZERO.is_zero());
        assert!(!ZERO_OR_ONE.is_zero());
        assert_eq!(EXACTLY_ONE, Arity { min: 1, max: Some(1) });
        assert!(ZERO_OR_MORE.is_unbounded());
        assert!(ONE_OR_MORE.is_unbounded());
        assert_eq!(ONE_OR_MORE.min, 1);
    }

    #[test]
    fn accepts_range() {
        let a = Arity::new(1, Some(3));
        assert!(!a.accepts(0));
        assert!(a.accepts(1));
        assert!(a.accepts(3));
        assert!(!a.accepts(4));
    }

    #[test]
    fn accepts_unbounded() {
        let a = Arity::new(2, None);
        assert!(!a.accepts(1));
        assert!(a.accepts(2));
        assert!(a.accepts(1000));
    }
}

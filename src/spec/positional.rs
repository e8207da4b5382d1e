// Copyright 2019 Lyndon Brown
//
// This file is part of the `argtree` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Description of a single available positional argument slot.

use crate::arity::{Arity, EXACTLY_ONE};

/// An immutable description of a positional argument slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionalSpec {
    name: String,
    arity: Arity,
}

impl PositionalSpec {
    /// Construct a positional spec with the given arity.
    pub fn new(name: impl Into<String>, arity: Arity) -> Self {
        Self { name: name.into(), arity }
    }

    /// Construct a scalar (arity `{1,1}`) positional spec.
    pub fn scalar(name: impl Into<String>) -> Self {
        Self::new(name, EXACTLY_ONE)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Whether this positional produces a scalar (`arity == {1,1}`) rather than a sequence value.
    pub fn is_scalar(&self) -> bool {
        self.arity.min == 1 && self.arity.max == Some(1)
    }
}

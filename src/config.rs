// Copyright 2018 Lyndon Brown
//
// This file is part of the `argtree` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Parser configuration: the knobs controlling option/subcommand resolution and grammar
//! tie-breaks. A subcommand inherits its parent's configuration unless it declares its own
//! override (see [`CommandSpec::config`]).
//!
//! [`CommandSpec::config`]: crate::spec::CommandSpec::config

use std::collections::BTreeSet;

/// Flat record of parser behaviour knobs.
///
/// Constructed via [`ParserConfiguration::default`] for the standard GNU/POSIX-ish behaviour, then
/// adjusted with the `set_*` builder methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfiguration {
    pub allow_abbreviations: bool,
    pub abbreviation_min_length: usize,
    pub case_sensitive_long: bool,
    pub case_sensitive_short: bool,
    pub normalize_underscores_to_dashes: bool,
    pub strict_option_order: bool,
    pub allow_negative_numbers: bool,
    pub allow_equals_for_flags: bool,
    pub truthy_values: BTreeSet<String>,
    pub falsey_values: BTreeSet<String>,
    pub allow_interleaved_options: bool,
    pub implicit_catch_all_positional: bool,
    pub stop_at_unknown_subcommand: bool,
    pub negation_prefixes: BTreeSet<String>,
}

impl Default for ParserConfiguration {
    fn default() -> Self {
        Self {
            allow_abbreviations: true,
            abbreviation_min_length: 1,
            case_sensitive_long: true,
            case_sensitive_short: true,
            normalize_underscores_to_dashes: false,
            strict_option_order: false,
            allow_negative_numbers: true,
            allow_equals_for_flags: true,
            truthy_values: ["true", "1", "yes", "on"].iter().map(|s| s.to_string()).collect(),
            falsey_values: ["false", "0", "no", "off"].iter().map(|s| s.to_string()).collect(),
            allow_interleaved_options: true,
            implicit_catch_all_positional: true,
            stop_at_unknown_subcommand: false,
            negation_prefixes: ["no"].iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ParserConfiguration {
    /// Start from the default configuration.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn set_allow_abbreviations(mut self, allow: bool) -> Self {
        self.allow_abbreviations = allow;
        self
    }

    #[inline]
    pub fn set_abbreviation_min_length(mut self, len: usize) -> Self {
        self.abbreviation_min_length = len.max(1);
        self
    }

    #[inline]
    pub fn set_case_sensitive_long(mut self, sensitive: bool) -> Self {
        self.case_sensitive_long = sensitive;
        self
    }

    #[inline]
    pub fn set_case_sensitive_short(mut self, sensitive: bool) -> Self {
        self.case_sensitive_short = sensitive;
        self
    }

    #[inline]
    pub fn set_normalize_underscores_to_dashes(mut self, normalize: bool) -> Self {
        self.normalize_underscores_to_dashes = normalize;
        self
    }

    #[inline]
    pub fn set_strict_option_order(mut self, strict: bool) -> Self {
        self.strict_option_order = strict;
        self
    }

    #[inline]
    pub fn set_allow_negative_numbers(mut self, allow: bool) -> Self {
        self.allow_negative_numbers = allow;
        self
    }

    #[inline]
    pub fn set_allow_equals_for_flags(mut self, allow: bool) -> Self {
        self.allow_equals_for_flags = allow;
        self
    }

    #[inline]
    pub fn set_truthy_values<I: IntoIterator<Item = String>>(mut self, values: I) -> Self {
        self.truthy_values = values.into_iter().collect();
        self
    }

    #[inline]
    pub fn set_falsey_values<I: IntoIterator<Item = String>>(mut self, values: I) -> Self {
        self.falsey_values = values.into_iter().collect();
        self
    }

    #[inline]
    pub fn set_allow_interleaved_options(mut self, allow: bool) -> Self {
        self.allow_interleaved_options = allow;
        self
    }

    #[inline]
    pub fn set_implicit_catch_all_positional(mut self, enable: bool) -> Self {
        self.implicit_catch_all_positional = enable;
        self
    }

    #[inline]
    pub fn set_stop_at_unknown_subcommand(mut self, enable: bool) -> Self {
        self.stop_at_unknown_subcommand = enable;
        self
    }

    #[inline]
    pub fn set_negation_prefixes<I: IntoIterator<Item = String>>(mut self, prefixes: I) -> Self {
        self.negation_prefixes = prefixes.into_iter().collect();
        self
    }

    /// Fold a token into `true`/`false` per the configured truthy/falsey sets, matching
    /// case-insensitively (simple ASCII casefold, per spec.md §4.3).
    pub(crate) fn parse_bool_token(&self, token: &str) -> Option<bool> {
        let lower = token.to_ascii_lowercase();
        if self.truthy_values.iter().any(|v| v.to_ascii_lowercase() == lower) {
            Some(true)
        } else if self.falsey_values.iter().any(|v| v.to_ascii_lowercase() == lower) {
            Some(false)
        } else {
            None
        }
    }
}

// Copyright 2019 Lyndon Brown
//
// This file is part of the `argtree` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! The immutable parse tree produced by [`crate::parse`].

use std::collections::BTreeMap;

use crate::spec::option::FlagConst;

/// The value carried by a [`ParsedOption`]. Shape depends on the option's arity and accumulation
/// mode (spec.md §3, §4.2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// A flag's resolved state: its `flag_const` as given, or the logical negation of a boolean
    /// `flag_const` when matched through a negation prefix.
    Flag(FlagConst),
    /// `Count` accumulation: the number of occurrences.
    Count(u32),
    /// A single scalar value (arity max == 1, or `FirstWins`/`LastWins`/`ErrorOnDuplicate` with
    /// arity max == 1).
    Single(String),
    /// A flattened sequence of values: either a single occurrence of a multi-value option, or
    /// `Collect` with `flatten_values` set.
    Multiple(Vec<String>),
    /// `Collect` accumulation without flattening: one inner `Vec` per occurrence, each holding
    /// that occurrence's values in order.
    Nested(Vec<Vec<String>>),
}

/// A single resolved option occurrence group in a [`ParseResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOption {
    name: String,
    alias: String,
    value: OptionValue,
    occurrences: u32,
}

impl ParsedOption {
    pub(crate) fn new(name: String, alias: String, value: OptionValue, occurrences: u32) -> Self {
        Self { name, alias, value, occurrences }
    }

    /// The option's spec name (not the alias used on the command line).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The long or short alias (or negated long form) actually matched on the command line for
    /// this option's most recently recorded occurrence.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// The resolved value, shaped per arity/accumulation.
    pub fn value(&self) -> &OptionValue {
        &self.value
    }

    /// Total number of times this option appeared in the input.
    pub fn occurrences(&self) -> u32 {
        self.occurrences
    }
}

/// The value carried by a [`ParsedPositional`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionalValue {
    /// A positional with arity `{1,1}`.
    Scalar(String),
    /// Any other arity: an ordered sequence of bound values.
    Sequence(Vec<String>),
}

/// A single resolved positional in a [`ParseResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPositional {
    name: String,
    value: PositionalValue,
}

impl ParsedPositional {
    pub(crate) fn new(name: String, value: PositionalValue) -> Self {
        Self { name, value }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &PositionalValue {
        &self.value
    }
}

/// One node of the immutable parse tree: the resolved state of a single command level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    command: String,
    alias: Option<String>,
    options: BTreeMap<String, ParsedOption>,
    positionals: BTreeMap<String, ParsedPositional>,
    extras: Vec<String>,
    subcommand: Option<Box<ParseResult>>,
}

impl ParseResult {
    pub(crate) fn new(
        command: String,
        alias: Option<String>,
        options: BTreeMap<String, ParsedOption>,
        positionals: BTreeMap<String, ParsedPositional>,
        extras: Vec<String>,
        subcommand: Option<ParseResult>,
    ) -> Self {
        Self { command, alias, options, positionals, extras, subcommand: subcommand.map(Box::new) }
    }

    /// The canonical command name at this level.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The alias actually used to reach this level, if it differs from the canonical name.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Options resolved at this level, keyed by spec name.
    pub fn options(&self) -> &BTreeMap<String, ParsedOption> {
        &self.options
    }

    /// Look up a single resolved option by spec name.
    pub fn option(&self, name: &str) -> Option<&ParsedOption> {
        self.options.get(name)
    }

    /// Positionals resolved at this level, keyed by spec name.
    pub fn positionals(&self) -> &BTreeMap<String, ParsedPositional> {
        &self.positionals
    }

    /// Look up a single resolved positional by spec name.
    pub fn positional(&self, name: &str) -> Option<&ParsedPositional> {
        self.positionals.get(name)
    }

    /// Tokens captured after a `--` separator at this level.
    pub fn extras(&self) -> &[String] {
        &self.extras
    }

    /// The nested result for the subcommand invoked at this level, if any.
    pub fn subcommand(&self) -> Option<&ParseResult> {
        self.subcommand.as_deref()
    }
}

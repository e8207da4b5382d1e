// Copyright 2017 Lyndon Brown
//
// This file is part of the `argtree` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! The two disjoint error taxonomies: failures raised while building a [`CommandSpec`] (and its
//! children), and failures raised while [`parse`]-ing a token sequence against one.
//!
//! [`CommandSpec`]: crate::spec::CommandSpec
//! [`parse`]: crate::parse

use std::error::Error as StdError;
use std::fmt;

/// An error raised while constructing a spec (`CommandSpec`, `OptionSpec`, `PositionalSpec` or
/// `ParserConfiguration`). Construction either fully succeeds or fails with one of these; there is
/// no partially-built spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecError {
    kind: SpecErrorKind,
}

/// The closed set of ways a spec can fail to validate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecErrorKind {
    /// Two options within the same command share a `name`.
    DuplicateOptionName(String),
    /// Two options within the same command share a short name.
    DuplicateShortName(char),
    /// Two subcommands (or a subcommand and an alias) within the same command share a name.
    DuplicateSubcommandName(String),
    /// An option's long or short name set is empty (both, or the relevant one).
    EmptyOptionName(String),
    /// A short name is not exactly one character, or uses a forbidden character.
    InvalidShortName(char),
    /// A negation prefix collides with a long name already declared on the option.
    ConflictingNegationPrefix { option: String, prefix: String },
    /// An arity's `max` is `Some(m)` with `m < min`.
    InvalidArity { option: String, min: u32, max: u32 },
    /// A flag-typed option was given an accumulation mode other than `LastWins`, `FirstWins`,
    /// `ErrorOnDuplicate` or `Count`, or a non-flag option was given `Count`.
    FlagAccumulationMismatch(String),
    /// More than one positional in the same command has an unbounded arity.
    MultipleUnboundedPositionals(String),
    /// A negation prefix was declared on an option whose `flag_const` is not a boolean.
    NegationOnNonBooleanFlag(String),
    /// A reserved token (`--`) was used as an option, positional or subcommand name.
    ReservedToken(String),
}

impl SpecError {
    pub(crate) fn new(kind: SpecErrorKind) -> Self {
        Self { kind }
    }

    /// The specific kind of validation failure.
    pub fn kind(&self) -> &SpecErrorKind {
        &self.kind
    }
}

impl fmt::Display for SpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use SpecErrorKind::*;
        match &self.kind {
            DuplicateOptionName(name) => write!(f, "duplicate option name `{}`", name),
            DuplicateShortName(ch) => write!(f, "duplicate short option `-{}`", ch),
            DuplicateSubcommandName(name) => write!(f, "duplicate subcommand name `{}`", name),
            EmptyOptionName(name) => write!(f, "option `{}` has no long or short names", name),
            InvalidShortName(ch) => write!(f, "invalid short option character `{:?}`", ch),
            ConflictingNegationPrefix { option, prefix } => write!(f,
                "negation prefix `{}` on option `{}` collides with an existing long name",
                prefix, option),
            InvalidArity { option, min, max } => write!(f,
                "option `{}` has invalid arity: max {} is less than min {}", option, max, min),
            FlagAccumulationMismatch(name) => write!(f,
                "option `{}` has an accumulation mode incompatible with its flag-ness", name),
            MultipleUnboundedPositionals(cmd) => write!(f,
                "command `{}` declares more than one unbounded positional", cmd),
            NegationOnNonBooleanFlag(name) => write!(f,
                "option `{}` has a negation prefix but a non-boolean flag_const", name),
            ReservedToken(name) => write!(f, "`{}` cannot be used as a name; it is reserved", name),
        }
    }
}

impl StdError for SpecError {}

/// An error raised while parsing a token sequence against a validated `CommandSpec`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    kind: ParseErrorKind,
    token_index: Option<usize>,
    token: Option<String>,
}

/// The closed set of ways a parse can fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A token looked like an option but did not resolve to any declared one, or resolved to one
    /// that `strict_option_order` forbids at this position (a positional has already started).
    UnknownOption { name: String },
    /// An abbreviated long name matched more than one declared long name.
    AmbiguousOption { name: String, candidates: Vec<String> },
    /// An `ErrorOnDuplicate`-mode option was supplied more than once.
    OptionCannotBeSpecifiedMultipleTimes { option: String },
    /// A non-flag option with zero arity (a bare trigger) was given an inline `=value`.
    OptionDoesNotAcceptValue { option: String },
    /// A flag was given an inline `=value` while `allow_equals_for_flags` is disabled.
    FlagWithValue { option: String },
    /// A flag received `=value` that matched neither the truthy nor the falsey set.
    InvalidFlagValue { option: String, value: String },
    /// Fewer values were available than the option's arity minimum requires.
    InsufficientOptionValues { option: String, expected_min: u32, got: u32 },
    /// A candidate subcommand token did not resolve to any declared subcommand.
    UnknownSubcommand { name: String },
    /// An abbreviated subcommand name matched more than one declared subcommand/alias.
    AmbiguousSubcommand { name: String, candidates: Vec<String> },
    /// Fewer positional values were supplied than the declared positionals require in total.
    InsufficientPositionalArguments { positional: String, expected_min: u32, got: u32 },
    /// More positional values were supplied than the declared positionals (or implicit catch-all)
    /// can absorb.
    UnexpectedPositionalArgument { value: String },
    /// An inherited `ParserConfiguration` is internally inconsistent (e.g. a negation prefix
    /// collides with an abbreviation-resolved long name) only detectable at parse time.
    ParserConfiguration(String),
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind) -> Self {
        Self { kind, token_index: None, token: None }
    }

    pub(crate) fn at(mut self, index: usize, token: impl Into<String>) -> Self {
        self.token_index = Some(index);
        self.token = Some(token.into());
        self
    }

    /// The specific kind of parse failure, with structured context (candidate lists, counts).
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    /// Index of the offending token within the input sequence, if applicable.
    pub fn token_index(&self) -> Option<usize> {
        self.token_index
    }

    /// The offending raw token, if applicable.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ParseErrorKind::*;
        match &self.kind {
            UnknownOption { name } => write!(f, "unknown option `{}`", name),
            AmbiguousOption { name, candidates } => write!(f,
                "ambiguous option `{}`: could be any of {}", name, candidates.join(", ")),
            OptionCannotBeSpecifiedMultipleTimes { option } => write!(f,
                "option `{}` cannot be specified more than once", option),
            OptionDoesNotAcceptValue { option } => write!(f,
                "option `{}` does not accept a value", option),
            FlagWithValue { option } => write!(f,
                "flag `{}` was given a value but does not accept one", option),
            InvalidFlagValue { option, value } => write!(f,
                "`{}` is not a valid value for flag `{}`", value, option),
            InsufficientOptionValues { option, expected_min, got } => write!(f,
                "option `{}` expects at least {} value(s); got {}", option, expected_min, got),
            UnknownSubcommand { name } => write!(f, "unknown subcommand `{}`", name),
            AmbiguousSubcommand { name, candidates } => write!(f,
                "ambiguous subcommand `{}`: could be any of {}", name, candidates.join(", ")),
            InsufficientPositionalArguments { positional, expected_min, got } => write!(f,
                "positional `{}` expects at least {} value(s); got {}", positional, expected_min, got),
            UnexpectedPositionalArgument { value } => write!(f,
                "unexpected positional argument `{}`", value),
            ParserConfiguration(msg) => write!(f, "inconsistent parser configuration: {}", msg),
        }
    }
}

impl StdError for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_stable_enough_to_read() {
        let e = ParseError::new(ParseErrorKind::UnknownOption { name: "frob".into() })
            .at(3, "--frob");
        assert_eq!(e.token_index(), Some(3));
        assert_eq!(e.token(), Some("--frob"));
        assert_eq!(e.to_string(), "unknown option `frob`");
    }
}

// Copyright 2017 Lyndon Brown
//
// This file is part of the `argtree` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! A syntactic command-line argument parser: it turns pre-split string tokens plus a declarative
//! [`CommandSpec`] into an immutable [`ParseResult`] tree, or a structured [`ParseError`].
//!
//! This library deliberately stops at syntax. It does not coerce values to non-string types,
//! apply defaults, validate cross-option relationships, generate help text, offer shell
//! completion, merge in environment variables or config files, or dispatch to handler functions.
//! Each of those belongs in a layer built on top of the [`ParseResult`] this crate returns.
//!
//! # Documentation
//!
//! Most of this crate's documentation is found within its submodules: [`spec`] for describing a
//! command's grammar, [`config`] for the parser's behavioural knobs, and [`result`] for the shape
//! of a finished parse.
//!
//! # Example
//!
//! ```
//! use argtree::parse;
//! use argtree::spec::{CommandSpec, OptionSpec};
//!
//! let spec = CommandSpec::builder("greet")
//!     .option(OptionSpec::builder("loud").long("loud").short('l').flag().build().unwrap())
//!     .build()
//!     .unwrap();
//!
//! let tokens: Vec<String> = ["--loud"].iter().map(|s| s.to_string()).collect();
//! let result = parse(&tokens, &spec).unwrap();
//! assert!(result.option("loud").is_some());
//! ```

#![deny(bare_trait_objects)]

pub mod arity;
pub mod config;
mod engine;
pub mod error;
mod matching;
pub mod result;
pub mod spec;

pub use config::ParserConfiguration;
pub use error::{ParseError, ParseErrorKind, SpecError, SpecErrorKind};
pub use result::ParseResult;
pub use spec::CommandSpec;

/// Parse `tokens` against `spec`, using `spec`'s own configuration override if it declares one, or
/// [`ParserConfiguration::default`] otherwise.
///
/// This is the single entry point into the engine (spec.md §4.2); nested subcommands are handled
/// internally and attached to the returned tree via [`ParseResult::subcommand`].
pub fn parse(tokens: &[String], spec: &CommandSpec) -> Result<ParseResult, ParseError> {
    let root_config = spec.config_override().cloned().unwrap_or_default();
    engine::run(tokens, spec, &root_config, None)
}

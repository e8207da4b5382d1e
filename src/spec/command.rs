// Copyright 2018 Lyndon Brown
//
// This file is part of the `argtree` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Description of a single available command (the root program, or a subcommand).
//!
//! Resolution against the name tables built here (`options()`, `positionals()`,
//! `subcommands()`) is performed by the parse engine via [`crate::matching::resolve_name`], not
//! precomputed into a separate hash table: these collections are invariably small for a CLI, and
//! the applicable normalization (case folding, underscore/dash) depends on the *effective*
//! configuration, which is only known once a subcommand's inherited-or-overridden
//! `ParserConfiguration` is resolved at parse time (see `DESIGN.md`).

use crate::config::ParserConfiguration;
use crate::error::{SpecError, SpecErrorKind};
use crate::spec::option::OptionSpec;
use crate::spec::positional::PositionalSpec;

/// An immutable, validated description of a command: its options, positionals, subcommands, and
/// an optional configuration override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    name: String,
    aliases: Vec<String>,
    options: Vec<OptionSpec>,
    positionals: Vec<PositionalSpec>,
    subcommands: Vec<CommandSpec>,
    config: Option<ParserConfiguration>,
}

impl CommandSpec {
    /// Start building a command named `name`.
    pub fn builder(name: impl Into<String>) -> CommandSpecBuilder {
        CommandSpecBuilder::new(name.into())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    pub fn option(&self, name: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.name() == name)
    }

    pub fn positionals(&self) -> &[PositionalSpec] {
        &self.positionals
    }

    pub fn positional(&self, name: &str) -> Option<&PositionalSpec> {
        self.positionals.iter().find(|p| p.name() == name)
    }

    pub fn subcommands(&self) -> &[CommandSpec] {
        &self.subcommands
    }

    /// Exact lookup of a subcommand by its canonical name or one of its aliases.
    pub fn subcommand_exact(&self, name_or_alias: &str) -> Option<&CommandSpec> {
        self.subcommands.iter().find(|c| c.name == name_or_alias || c.aliases.iter().any(|a| a == name_or_alias))
    }

    /// This command's own configuration override, if declared.
    pub fn config_override(&self) -> Option<&ParserConfiguration> {
        self.config.as_ref()
    }
}

/// Builder for [`CommandSpec`]; `build()` performs full validation (spec.md §3 invariants).
#[derive(Debug, Clone)]
pub struct CommandSpecBuilder {
    name: String,
    aliases: Vec<String>,
    options: Vec<OptionSpec>,
    positionals: Vec<PositionalSpec>,
    subcommands: Vec<CommandSpec>,
    config: Option<ParserConfiguration>,
}

impl CommandSpecBuilder {
    fn new(name: String) -> Self {
        Self {
            name,
            aliases: Vec::new(),
            options: Vec::new(),
            positionals: Vec::new(),
            subcommands: Vec::new(),
            config: None,
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    pub fn positional(mut self, positional: PositionalSpec) -> Self {
        self.positionals.push(positional);
        self
    }

    pub fn subcommand(mut self, subcommand: CommandSpec) -> Self {
        self.subcommands.push(subcommand);
        self
    }

    pub fn config(mut self, config: ParserConfiguration) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> Result<CommandSpec, SpecError> {
        if self.name.is_empty() {
            return Err(SpecError::new(SpecErrorKind::ReservedToken(self.name)));
        }
        if self.name == "--" {
            return Err(SpecError::new(SpecErrorKind::ReservedToken(self.name)));
        }

        // Option name, long name, short name collisions across the whole command.
        let mut seen_option_names = std::collections::HashSet::new();
        let mut seen_long_names = std::collections::HashSet::new();
        let mut seen_short_names = std::collections::HashSet::new();
        let mut all_long_names = std::collections::HashSet::new();
        for opt in &self.options {
            all_long_names.extend(opt.long_names().iter().cloned());
        }
        for opt in &self.options {
            if !seen_option_names.insert(opt.name().to_string()) {
                return Err(SpecError::new(SpecErrorKind::DuplicateOptionName(opt.name().to_string())));
            }
            for long in opt.long_names() {
                if !seen_long_names.insert(long.clone()) {
                    return Err(SpecError::new(SpecErrorKind::DuplicateOptionName(long.clone())));
                }
            }
            for &ch in opt.short_names() {
                if !seen_short_names.insert(ch) {
                    return Err(SpecError::new(SpecErrorKind::DuplicateShortName(ch)));
                }
            }
            // Negation prefixes must not clash with any long name configured anywhere in this
            // command (spec.md §3: "negation prefixes do not clash with any configured long name").
            for prefix in opt.negation_prefixes() {
                for long in opt.long_names() {
                    let negated = format!("{}-{}", prefix, long);
                    if all_long_names.contains(&negated) {
                        return Err(SpecError::new(SpecErrorKind::ConflictingNegationPrefix {
                            option: opt.name().to_string(),
                            prefix: prefix.clone(),
                        }));
                    }
                }
            }
        }

        // Positional name uniqueness, and at most one unbounded positional.
        let mut seen_positional_names = std::collections::HashSet::new();
        let mut unbounded_count = 0;
        for pos in &self.positionals {
            if !seen_positional_names.insert(pos.name().to_string()) {
                return Err(SpecError::new(SpecErrorKind::DuplicateOptionName(pos.name().to_string())));
            }
            if pos.arity().is_unbounded() {
                unbounded_count += 1;
            }
        }
        if unbounded_count > 1 {
            return Err(SpecError::new(SpecErrorKind::MultipleUnboundedPositionals(self.name.clone())));
        }

        // Subcommand name/alias collisions.
        let mut seen_subcommand_tokens = std::collections::HashSet::new();
        for cmd in &self.subcommands {
            if cmd.name == "--" {
                return Err(SpecError::new(SpecErrorKind::ReservedToken(cmd.name.clone())));
            }
            if !seen_subcommand_tokens.insert(cmd.name.clone()) {
                return Err(SpecError::new(SpecErrorKind::DuplicateSubcommandName(cmd.name.clone())));
            }
            for alias in &cmd.aliases {
                if !seen_subcommand_tokens.insert(alias.clone()) {
                    return Err(SpecError::new(SpecErrorKind::DuplicateSubcommandName(alias.clone())));
                }
            }
        }

        Ok(CommandSpec {
            name: self.name,
            aliases: self.aliases,
            options: self.options,
            positionals: self.positionals,
            subcommands: self.subcommands,
            config: self.config,
        })
    }
}

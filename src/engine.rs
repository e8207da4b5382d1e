// Copyright 2017 Lyndon Brown
//
// This file is part of the `argtree` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! The single-pass, left-to-right parse engine (spec.md §4.2).
//!
//! One call to [`run`] handles exactly one command level: it walks its slice of tokens, resolves
//! each against the effective (possibly inherited) [`ParserConfiguration`], and either returns a
//! finished [`ParseResult`] or recurses into a matched subcommand, at which point this level's
//! token stream ends.

use std::collections::BTreeMap;

use crate::config::ParserConfiguration;
use crate::error::{ParseError, ParseErrorKind};
use crate::matching::{self, Resolution};
use crate::result::{OptionValue, ParseResult, ParsedOption, ParsedPositional, PositionalValue};
use crate::spec::command::CommandSpec;
use crate::spec::option::{AccumulationMode, FlagConst, OptionSpec};

/// One recorded appearance of an option on the command line.
enum Occurrence {
    Flag(FlagConst),
    Values(Vec<String>),
}

struct Accumulated {
    alias: String,
    mode: AccumulationMode,
    flatten: bool,
    occurrences: Vec<Occurrence>,
}

/// Parse `tokens` against `spec`, using `parent_config` when `spec` declares no override of its
/// own. `alias_used` is the token the caller matched to reach this command (`None` at the root, or
/// when the canonical name itself was used).
pub(crate) fn run(
    tokens: &[String],
    spec: &CommandSpec,
    parent_config: &ParserConfiguration,
    alias_used: Option<String>,
) -> Result<ParseResult, ParseError> {
    let config = spec.config_override().cloned().unwrap_or_else(|| parent_config.clone());
    check_config_consistency(spec, &config)?;

    let mut accumulated: BTreeMap<String, Accumulated> = BTreeMap::new();
    let mut positional_tokens: Vec<String> = Vec::new();
    let mut extras: Vec<String> = Vec::new();
    let mut trailing = false;
    let mut seen_positional = false;
    let mut rest_are_positionals = false;
    let mut subcommand_result: Option<ParseResult> = None;

    // `allow_interleaved_options` swallows every later token as a positional, option-shaped or
    // not, once one has been seen. `strict_option_order` is a distinct, stricter rule: it leaves
    // option resolution active, but rejects an option-shaped token outright once a positional has
    // started (spec.md §4.2 state machine: "PositionalsStarted: ... subsequent option tokens
    // raise"), rather than silently reinterpreting it as a positional.
    let block_interleaving = !config.allow_interleaved_options;

    let mut idx = 0usize;
    while idx < tokens.len() {
        let token = tokens[idx].clone();

        if rest_are_positionals {
            positional_tokens.push(token);
            idx += 1;
            continue;
        }

        if trailing {
            extras.push(token);
            idx += 1;
            continue;
        }

        if token == "--" {
            trailing = true;
            idx += 1;
            continue;
        }

        if token.starts_with("--") && token.len() > 2 {
            if seen_positional && config.strict_option_order {
                return Err(ParseError::new(ParseErrorKind::UnknownOption {
                    name: token.trim_start_matches('-').to_string(),
                }).at(idx, token));
            }
            let token_index = idx;
            idx += 1;
            handle_long_option(&token, token_index, spec, &config, &mut accumulated, tokens, &mut idx)?;
            continue;
        }

        if token.starts_with('-') && token.len() >= 2 && token.as_str() != "-" {
            let first_char = token[1..].chars().next();
            let first_is_registered_short = first_char
                .map(|c| spec.options().iter().any(|o| o.short_names().contains(&c)))
                .unwrap_or(false);

            if !first_is_registered_short
                && config.allow_negative_numbers
                && looks_like_number(&token[1..])
            {
                // Falls through to the positional/subcommand branch below.
            } else {
                if seen_positional && config.strict_option_order {
                    return Err(ParseError::new(ParseErrorKind::UnknownOption {
                        name: token.trim_start_matches('-').to_string(),
                    }).at(idx, token));
                }
                let token_index = idx;
                idx += 1;
                handle_short_cluster(&token, token_index, spec, &config, &mut accumulated, tokens, &mut idx)?;
                continue;
            }
        }

        // Candidate subcommand or positional (dispatch rule 5).
        let try_subcommand =
            !spec.subcommands().is_empty() && (!seen_positional || !config.stop_at_unknown_subcommand);

        if try_subcommand {
            let candidates = spec.subcommands().iter().flat_map(|c| {
                std::iter::once((c.name(), c))
                    .chain(c.aliases().iter().map(move |a| (a.as_str(), c)))
            });
            match matching::resolve_name(
                &token,
                candidates,
                config.allow_abbreviations,
                config.abbreviation_min_length,
                true,
                config.normalize_underscores_to_dashes,
            ) {
                Resolution::Ambiguous(candidates) => {
                    return Err(ParseError::new(ParseErrorKind::AmbiguousSubcommand {
                        name: token.clone(),
                        candidates,
                    }).at(idx, token));
                },
                Resolution::Exact(sub) => {
                    let alias = if token == sub.name() { None } else { Some(token.clone()) };
                    let child = run(&tokens[idx + 1..], sub, &config, alias)?;
                    subcommand_result = Some(child);
                    break;
                },
                Resolution::NoMatch => {
                    if spec.positionals().is_empty() {
                        return Err(ParseError::new(ParseErrorKind::UnknownSubcommand {
                            name: token.clone(),
                        }).at(idx, token));
                    }
                    // Falls through: treated as a positional below.
                },
            }
        }

        positional_tokens.push(token);
        seen_positional = true;
        if block_interleaving {
            rest_are_positionals = true;
        }
        idx += 1;
    }

    let positionals = group_positionals(&positional_tokens, spec, &config)?;
    let options = finalize_options(accumulated);

    Ok(ParseResult::new(
        spec.name().to_string(),
        alias_used,
        options,
        positionals,
        extras,
        subcommand_result,
    ))
}

/// `CommandSpec::build` rejects literal name collisions, but it does so without knowledge of the
/// *effective* `ParserConfiguration` a subcommand ends up inheriting: two distinct long names, or a
/// negated long name and a sibling's plain long name, can still normalize (case folding,
/// underscore/dash folding) to the same string once that configuration is known. Catch that here,
/// once per command level, rather than leaving it to surface as silent misresolution (spec.md §7:
/// `ParserConfigurationError`).
fn check_config_consistency(spec: &CommandSpec, config: &ParserConfiguration) -> Result<(), ParseError> {
    let mut normalized_long: BTreeMap<String, String> = BTreeMap::new();
    for opt in spec.options() {
        for long in opt.long_names() {
            let norm = matching::normalize(long, config.case_sensitive_long, config.normalize_underscores_to_dashes);
            if let Some(existing) = normalized_long.insert(norm.clone(), long.clone()) {
                if existing != *long {
                    return Err(ParseError::new(ParseErrorKind::ParserConfiguration(format!(
                        "long names `{}` and `{}` become indistinguishable under the effective configuration",
                        existing, long,
                    ))));
                }
            }
        }
        for prefix in opt.negation_prefixes() {
            for long in opt.long_names() {
                let negated = format!("{}-{}", prefix, long);
                let norm = matching::normalize(&negated, config.case_sensitive_long, config.normalize_underscores_to_dashes);
                if let Some(existing) = normalized_long.insert(norm.clone(), negated.clone()) {
                    if existing != negated {
                        return Err(ParseError::new(ParseErrorKind::ParserConfiguration(format!(
                            "negated form `{}` collides with `{}` under the effective configuration",
                            negated, existing,
                        ))));
                    }
                }
            }
        }
    }

    let mut normalized_short: BTreeMap<char, char> = BTreeMap::new();
    for opt in spec.options() {
        for &ch in opt.short_names() {
            let folded = if config.case_sensitive_short { ch } else { ch.to_ascii_lowercase() };
            if let Some(&existing) = normalized_short.get(&folded) {
                if existing != ch {
                    return Err(ParseError::new(ParseErrorKind::ParserConfiguration(format!(
                        "short names `-{}` and `-{}` become indistinguishable under the effective configuration",
                        existing, ch,
                    ))));
                }
            } else {
                normalized_short.insert(folded, ch);
            }
        }
    }

    let mut normalized_subs: BTreeMap<String, String> = BTreeMap::new();
    for sub in spec.subcommands() {
        let mut tokens: Vec<&str> = vec![sub.name()];
        tokens.extend(sub.aliases().iter().map(|s| s.as_str()));
        for token in tokens {
            let norm = matching::normalize(token, true, config.normalize_underscores_to_dashes);
            if let Some(existing) = normalized_subs.insert(norm, token.to_string()) {
                if existing != token {
                    return Err(ParseError::new(ParseErrorKind::ParserConfiguration(format!(
                        "subcommand tokens `{}` and `{}` become indistinguishable under the effective configuration",
                        existing, token,
                    ))));
                }
            }
        }
    }

    Ok(())
}

/// Whether `s` parses as a decimal or floating-point number (leading `-` already stripped), for
/// the `allow_negative_numbers` disambiguation (spec.md §4.2).
fn looks_like_number(s: &str) -> bool {
    !s.is_empty() && s.parse::<f64>().is_ok()
}

/// Whether `token` would itself be consumed as an option/subcommand/terminator rather than a plain
/// value, for greedy multi-value option consumption (spec.md §4.2).
fn is_boundary_token(token: &str, spec: &CommandSpec, config: &ParserConfiguration) -> bool {
    if token == "--" {
        return true;
    }
    if token.starts_with("--") && token.len() > 2 {
        return true;
    }
    if token.starts_with('-') && token.len() >= 2 && token != "-" {
        let first_char = token[1..].chars().next();
        let first_is_registered_short = first_char
            .map(|c| spec.options().iter().any(|o| o.short_names().contains(&c)))
            .unwrap_or(false);
        if first_is_registered_short {
            return true;
        }
        if config.allow_negative_numbers && looks_like_number(&token[1..]) {
            return false;
        }
        return true;
    }
    spec.subcommands().iter().any(|c| c.name() == token || c.aliases().iter().any(|a| a == token))
}

fn handle_long_option(
    token: &str,
    token_index: usize,
    spec: &CommandSpec,
    config: &ParserConfiguration,
    accumulated: &mut BTreeMap<String, Accumulated>,
    tokens: &[String],
    idx: &mut usize,
) -> Result<(), ParseError> {
    let rest = &token[2..];
    let (name_part, inline_value) = match rest.find('=') {
        Some(pos) => (&rest[..pos], Some(rest[pos + 1..].to_string())),
        None => (rest, None),
    };

    if name_part.is_empty() {
        return Err(ParseError::new(ParseErrorKind::UnknownOption { name: String::new() })
            .at(token_index, token.to_string()));
    }

    // Combine plain long names and negation-prefixed forms into a single resolution namespace
    // (abbreviation applies uniformly to both; see DESIGN.md).
    let mut candidates: Vec<(String, (&OptionSpec, bool))> = Vec::new();
    for opt in spec.options() {
        for long in opt.long_names() {
            candidates.push((long.clone(), (opt, false)));
        }
        for prefix in opt.negation_prefixes() {
            for long in opt.long_names() {
                candidates.push((format!("{}-{}", prefix, long), (opt, true)));
            }
        }
    }

    let resolution = matching::resolve_name(
        name_part,
        candidates.iter().map(|(n, p)| (n.as_str(), *p)),
        config.allow_abbreviations,
        config.abbreviation_min_length,
        config.case_sensitive_long,
        config.normalize_underscores_to_dashes,
    );

    let (opt, negated) = match resolution {
        Resolution::NoMatch => {
            return Err(ParseError::new(ParseErrorKind::UnknownOption { name: name_part.to_string() })
                .at(token_index, token.to_string()));
        },
        Resolution::Ambiguous(candidates) => {
            return Err(ParseError::new(ParseErrorKind::AmbiguousOption {
                name: name_part.to_string(),
                candidates,
            }).at(token_index, token.to_string()));
        },
        Resolution::Exact(pair) => pair,
    };

    record_occurrence(
        opt, name_part.to_string(), negated, inline_value,
        spec, config, tokens, idx, token, token_index, accumulated,
    )
}

/// Parse a short-option cluster (`-abc`), consuming subsequent tokens for a trailing data option's
/// value as needed.
fn handle_short_cluster(
    token: &str,
    token_index: usize,
    spec: &CommandSpec,
    config: &ParserConfiguration,
    accumulated: &mut BTreeMap<String, Accumulated>,
    tokens: &[String],
    idx: &mut usize,
) -> Result<(), ParseError> {
    let body = &token[1..];
    let mut chars = body.char_indices();

    while let Some((byte_pos, ch)) = chars.next() {
        let opt = spec.options().iter().find(|o| o.short_names().contains(&ch));
        let opt = match opt {
            Some(o) => o,
            None => {
                return Err(ParseError::new(ParseErrorKind::UnknownOption { name: ch.to_string() })
                    .at(token_index, token.to_string()));
            },
        };

        if opt.is_flag() {
            record_occurrence(
                opt, ch.to_string(), false, None,
                spec, config, tokens, idx, token, token_index, accumulated,
            )?;
            continue;
        }

        // A data option ends the cluster: either it takes the remainder of this token as an inline
        // value, or it pulls subsequent tokens.
        let next_byte = byte_pos + ch.len_utf8();
        let remainder = &body[next_byte..];
        let inline_value = if remainder.is_empty() { None } else { Some(remainder.to_string()) };

        record_occurrence(
            opt, ch.to_string(), false, inline_value,
            spec, config, tokens, idx, token, token_index, accumulated,
        )?;
        break;
    }

    Ok(())
}

/// Record one occurrence of `opt`, consuming further tokens from `tokens`/`idx` if it takes values
/// and none were supplied inline.
fn record_occurrence(
    opt: &OptionSpec,
    alias: String,
    negated: bool,
    inline_value: Option<String>,
    spec: &CommandSpec,
    config: &ParserConfiguration,
    tokens: &[String],
    idx: &mut usize,
    token: &str,
    token_index: usize,
    accumulated: &mut BTreeMap<String, Accumulated>,
) -> Result<(), ParseError> {
    if opt.accumulation_mode() == AccumulationMode::ErrorOnDuplicate
        && accumulated.contains_key(opt.name())
    {
        return Err(ParseError::new(ParseErrorKind::OptionCannotBeSpecifiedMultipleTimes {
            option: opt.name().to_string(),
        }).at(token_index, token.to_string()));
    }

    let occurrence = if opt.is_flag() {
        if let Some(value) = inline_value {
            if !config.allow_equals_for_flags {
                return Err(ParseError::new(ParseErrorKind::FlagWithValue { option: opt.name().to_string() })
                    .at(token_index, token.to_string()));
            }
            match config.parse_bool_token(&value) {
                Some(b) => Occurrence::Flag(FlagConst::Bool(b)),
                None => {
                    return Err(ParseError::new(ParseErrorKind::InvalidFlagValue {
                        option: opt.name().to_string(),
                        value,
                    }).at(token_index, token.to_string()));
                },
            }
        } else if negated {
            match opt.flag_const() {
                FlagConst::Bool(b) => Occurrence::Flag(FlagConst::Bool(!b)),
                FlagConst::Text(_) => unreachable!("negation prefixes require a boolean flag_const"),
            }
        } else {
            Occurrence::Flag(opt.flag_const().clone())
        }
    } else if opt.arity().is_zero() {
        // A non-flag option declared with zero arity takes no values at all (distinct from a flag,
        // which is allowed `=value` under `allow_equals_for_flags`; see `OptionSpec` invariants).
        if inline_value.is_some() {
            return Err(ParseError::new(ParseErrorKind::OptionDoesNotAcceptValue {
                option: opt.name().to_string(),
            }).at(token_index, token.to_string()));
        }
        Occurrence::Values(Vec::new())
    } else {
        let arity = opt.arity();
        let mut values: Vec<String> = Vec::new();
        if let Some(v) = inline_value {
            values.push(v);
        }

        if arity.max == Some(1) {
            // `ZERO_OR_ONE` options are allowed to end the stream with no value at all; whether
            // an exhausted stream is acceptable is decided below by `arity.min`, uniformly with
            // every other arity shape.
            if values.is_empty() && *idx < tokens.len() {
                values.push(tokens[*idx].clone());
                *idx += 1;
            }
        } else {
            loop {
                if let Some(max) = arity.max {
                    if values.len() as u32 >= max {
                        break;
                    }
                }
                if *idx >= tokens.len() {
                    break;
                }
                if is_boundary_token(&tokens[*idx], spec, config) {
                    break;
                }
                values.push(tokens[*idx].clone());
                *idx += 1;
            }
        }

        if (values.len() as u32) < arity.min {
            return Err(ParseError::new(ParseErrorKind::InsufficientOptionValues {
                option: opt.name().to_string(),
                expected_min: arity.min,
                got: values.len() as u32,
            }).at(token_index, token.to_string()));
        }

        Occurrence::Values(values)
    };

    let entry = accumulated.entry(opt.name().to_string()).or_insert_with(|| Accumulated {
        alias: alias.clone(),
        mode: opt.accumulation_mode(),
        flatten: opt.flatten_values(),
        occurrences: Vec::new(),
    });
    entry.alias = alias;
    entry.occurrences.push(occurrence);

    Ok(())
}

fn finalize_options(accumulated: BTreeMap<String, Accumulated>) -> BTreeMap<String, ParsedOption> {
    let mut result = BTreeMap::new();
    for (name, acc) in accumulated {
        let occurrences = acc.occurrences.len() as u32;
        if occurrences == 0 {
            continue;
        }
        let value = reconcile(acc.mode, acc.flatten, &acc.occurrences);
        result.insert(name.clone(), ParsedOption::new(name, acc.alias, value, occurrences));
    }
    result
}

/// Reconcile repeated occurrences per the option's accumulation mode (spec.md §4.2). `ErrorOnDuplicate`
/// never reaches here with more than one occurrence; `Count` is handled entirely at the flag arm.
fn reconcile(mode: AccumulationMode, flatten: bool, occurrences: &[Occurrence]) -> OptionValue {
    match occurrences.first() {
        Some(Occurrence::Flag(_)) => {
            let picked = match mode {
                AccumulationMode::FirstWins => occurrences.first(),
                _ => occurrences.last(),
            };
            let value = match picked {
                Some(Occurrence::Flag(v)) => v.clone(),
                _ => unreachable!(),
            };
            if mode == AccumulationMode::Count {
                OptionValue::Count(occurrences.len() as u32)
            } else {
                OptionValue::Flag(value)
            }
        },
        Some(Occurrence::Values(_)) => {
            let all: Vec<Vec<String>> = occurrences.iter().map(|o| match o {
                Occurrence::Values(v) => v.clone(),
                _ => unreachable!(),
            }).collect();

            let single_shape = |values: Vec<String>| {
                if values.len() == 1 {
                    OptionValue::Single(values.into_iter().next().unwrap())
                } else {
                    OptionValue::Multiple(values)
                }
            };

            match mode {
                AccumulationMode::FirstWins => single_shape(all.into_iter().next().unwrap()),
                AccumulationMode::Collect => {
                    if all.len() == 1 {
                        single_shape(all.into_iter().next().unwrap())
                    } else if flatten {
                        OptionValue::Multiple(all.into_iter().flatten().collect())
                    } else {
                        OptionValue::Nested(all)
                    }
                },
                // LastWins and ErrorOnDuplicate (which never accumulates past one occurrence).
                _ => single_shape(all.into_iter().last().unwrap()),
            }
        },
        None => unreachable!("an accumulated option always has at least one occurrence"),
    }
}

fn group_positionals(
    acc: &[String],
    spec: &CommandSpec,
    config: &ParserConfiguration,
) -> Result<BTreeMap<String, ParsedPositional>, ParseError> {
    let specs = spec.positionals();

    if specs.is_empty() {
        if config.implicit_catch_all_positional {
            let mut map = BTreeMap::new();
            map.insert(
                "args".to_string(),
                ParsedPositional::new("args".to_string(), PositionalValue::Sequence(acc.to_vec())),
            );
            return Ok(map);
        }
        if let Some(first) = acc.first() {
            return Err(ParseError::new(ParseErrorKind::UnexpectedPositionalArgument {
                value: first.clone(),
            }));
        }
        return Ok(BTreeMap::new());
    }

    let n = acc.len() as u32;
    let total_min: u32 = specs.iter().map(|s| s.arity().min).sum();
    if n < total_min {
        let mut cum = 0u32;
        let mut culprit = specs[0].name().to_string();
        for s in specs {
            cum += s.arity().min;
            if cum > n {
                culprit = s.name().to_string();
                break;
            }
        }
        return Err(ParseError::new(ParseErrorKind::InsufficientPositionalArguments {
            positional: culprit,
            expected_min: total_min,
            got: n,
        }));
    }

    let mut suffix_min = vec![0u32; specs.len() + 1];
    for i in (0..specs.len()).rev() {
        suffix_min[i] = suffix_min[i + 1] + specs[i].arity().min;
    }

    let mut result = BTreeMap::new();
    let mut taken = 0usize;
    let mut remaining = n;
    for (i, spec_i) in specs.iter().enumerate() {
        let arity = spec_i.arity();
        let reserve_for_rest = suffix_min[i + 1];
        let available = remaining.saturating_sub(reserve_for_rest);
        let take = match arity.max {
            Some(max) => available.min(max),
            None => available,
        } as usize;

        let values: Vec<String> = acc[taken..taken + take].to_vec();
        taken += take;
        remaining -= take as u32;

        let value = if spec_i.is_scalar() {
            PositionalValue::Scalar(values.into_iter().next().unwrap_or_default())
        } else {
            PositionalValue::Sequence(values)
        };
        result.insert(spec_i.name().to_string(), ParsedPositional::new(spec_i.name().to_string(), value));
    }

    if taken < acc.len() {
        return Err(ParseError::new(ParseErrorKind::UnexpectedPositionalArgument {
            value: acc[taken].clone(),
        }));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arity;
    use crate::spec::{CommandSpec, OptionSpec, PositionalSpec};

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    fn deploy_tool() -> CommandSpec {
        CommandSpec::builder("deploy-tool")
            .option(OptionSpec::builder("verbose").long("verbose").short('v').flag()
                .accumulation_mode(AccumulationMode::Count).build().unwrap())
            .subcommand(
                CommandSpec::builder("deploy")
                    .positional(PositionalSpec::scalar("environment"))
                    .option(OptionSpec::builder("region").long("region").arity(arity::EXACTLY_ONE).build().unwrap())
                    .build().unwrap()
            )
            .build().unwrap()
    }

    #[test]
    fn repeated_short_flag_counts_occurrences() {
        let spec = deploy_tool();
        let result = run(&toks(&["-v", "-v", "-v"]), &spec, &ParserConfiguration::default(), None).unwrap();
        let opt = result.option("verbose").unwrap();
        assert_eq!(opt.occurrences(), 3);
        assert!(matches!(opt.value(), OptionValue::Count(3)));
    }

    #[test]
    fn subcommand_recursion_with_equals_value() {
        let spec = deploy_tool();
        let result = run(
            &toks(&["deploy", "production", "--region=us-east-1"]),
            &spec, &ParserConfiguration::default(), None,
        ).unwrap();
        let sub = result.subcommand().unwrap();
        assert_eq!(sub.command(), "deploy");
        assert!(matches!(sub.positional("environment").unwrap().value(), PositionalValue::Scalar(s) if s == "production"));
        assert!(matches!(sub.option("region").unwrap().value(), OptionValue::Single(s) if s == "us-east-1"));
    }

    #[test]
    fn double_dash_captures_extras() {
        let spec = deploy_tool();
        let result = run(&toks(&["--", "-v", "extra"]), &spec, &ParserConfiguration::default(), None).unwrap();
        assert_eq!(result.extras(), &["-v".to_string(), "extra".to_string()]);
        assert!(result.option("verbose").is_none());
    }

    #[test]
    fn unknown_subcommand_token_with_no_positionals_errors() {
        let spec = deploy_tool();
        let err = run(&toks(&["bogus"]), &spec, &ParserConfiguration::default(), None).unwrap_err();
        assert!(matches!(err.kind(), ParseErrorKind::UnknownSubcommand { .. }));
    }

    #[test]
    fn unique_abbreviation_resolves_long_option() {
        let spec = CommandSpec::builder("root")
            .option(OptionSpec::builder("region").long("region").arity(arity::EXACTLY_ONE).build().unwrap())
            .build().unwrap();
        let result = run(&toks(&["--reg", "us-east-1"]), &spec, &ParserConfiguration::default(), None).unwrap();
        assert!(matches!(result.option("region").unwrap().value(), OptionValue::Single(s) if s == "us-east-1"));
    }

    #[test]
    fn ambiguous_abbreviation_is_rejected() {
        let spec = CommandSpec::builder("root")
            .option(OptionSpec::builder("region").long("region").arity(arity::EXACTLY_ONE).build().unwrap())
            .option(OptionSpec::builder("retain").long("retain").flag().build().unwrap())
            .build().unwrap();
        let err = run(&toks(&["--re", "x"]), &spec, &ParserConfiguration::default(), None).unwrap_err();
        assert!(matches!(err.kind(), ParseErrorKind::AmbiguousOption { .. }));
    }

    #[test]
    fn negated_long_flag_flips_flag_const() {
        let spec = CommandSpec::builder("root")
            .option(OptionSpec::builder("color").long("color").flag()
                .negation_prefix("no").build().unwrap())
            .build().unwrap();
        let result = run(&toks(&["--no-color"]), &spec, &ParserConfiguration::default(), None).unwrap();
        assert!(matches!(result.option("color").unwrap().value(), OptionValue::Flag(FlagConst::Bool(false))));
    }

    #[test]
    fn negative_number_is_not_mistaken_for_an_option() {
        let spec = CommandSpec::builder("root")
            .positional(PositionalSpec::scalar("offset"))
            .build().unwrap();
        let result = run(&toks(&["-5"]), &spec, &ParserConfiguration::default(), None).unwrap();
        assert!(matches!(result.positional("offset").unwrap().value(), PositionalValue::Scalar(s) if s == "-5"));
    }

    #[test]
    fn insufficient_positional_arguments_is_reported() {
        let spec = CommandSpec::builder("root")
            .positional(PositionalSpec::scalar("src"))
            .positional(PositionalSpec::scalar("dst"))
            .build().unwrap();
        let err = run(&toks(&["only-one"]), &spec, &ParserConfiguration::default(), None).unwrap_err();
        assert!(matches!(err.kind(), ParseErrorKind::InsufficientPositionalArguments { .. }));
    }

    #[test]
    fn variadic_positional_after_scalar_reserves_minimum() {
        let spec = CommandSpec::builder("root")
            .positional(PositionalSpec::scalar("first"))
            .positional(PositionalSpec::new("rest", arity::ONE_OR_MORE))
            .build().unwrap();
        let result = run(&toks(&["a", "b", "c"]), &spec, &ParserConfiguration::default(), None).unwrap();
        assert!(matches!(result.positional("first").unwrap().value(), PositionalValue::Scalar(s) if s == "a"));
        assert!(matches!(result.positional("rest").unwrap().value(),
            PositionalValue::Sequence(v) if v == &vec!["b".to_string(), "c".to_string()]));
    }

    #[test]
    fn implicit_catch_all_positional_absorbs_unrecognized_tokens() {
        let spec = CommandSpec::builder("root").build().unwrap();
        let result = run(&toks(&["a", "b"]), &spec, &ParserConfiguration::default(), None).unwrap();
        assert!(matches!(result.positional("args").unwrap().value(),
            PositionalValue::Sequence(v) if v == &vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn strict_option_order_rejects_an_option_token_once_a_positional_has_started() {
        let spec = CommandSpec::builder("root")
            .option(OptionSpec::builder("verbose").long("verbose").flag().build().unwrap())
            .positional(PositionalSpec::new("rest", arity::ZERO_OR_MORE))
            .config(ParserConfiguration::default().set_strict_option_order(true))
            .build().unwrap();
        let err = run(&toks(&["first", "--verbose"]), &spec, &ParserConfiguration::default(), None).unwrap_err();
        assert!(matches!(err.kind(), ParseErrorKind::UnknownOption { name } if name == "verbose"));
    }

    #[test]
    fn allow_interleaved_options_false_still_swallows_later_dashed_tokens_as_positionals() {
        let spec = CommandSpec::builder("root")
            .option(OptionSpec::builder("verbose").long("verbose").flag().build().unwrap())
            .positional(PositionalSpec::new("rest", arity::ZERO_OR_MORE))
            .config(ParserConfiguration::default().set_allow_interleaved_options(false))
            .build().unwrap();
        let result = run(&toks(&["first", "--verbose"]), &spec, &ParserConfiguration::default(), None).unwrap();
        assert!(result.option("verbose").is_none());
        assert!(matches!(result.positional("rest").unwrap().value(),
            PositionalValue::Sequence(v) if v == &vec!["first".to_string(), "--verbose".to_string()]));
    }

    #[test]
    fn inherited_case_insensitivity_surfaces_as_configuration_error() {
        // Construction validates raw long-name equality only; "Verbose" and "verbose" are distinct
        // at that point but collide once the subcommand inherits a case-insensitive configuration.
        let spec = CommandSpec::builder("root")
            .config(ParserConfiguration::default().set_case_sensitive_long(false))
            .subcommand(
                CommandSpec::builder("sub")
                    .option(OptionSpec::builder("a").long("verbose").flag().build().unwrap())
                    .option(OptionSpec::builder("b").long("Verbose").flag().build().unwrap())
                    .build().unwrap()
            )
            .build().unwrap();
        let err = run(&toks(&["sub"]), &spec, &ParserConfiguration::default(), None).unwrap_err();
        assert!(matches!(err.kind(), ParseErrorKind::ParserConfiguration(_)));
    }
}

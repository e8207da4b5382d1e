// Copyright 2017 Lyndon Brown
//
// This file is part of the `argtree` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Positional grouping: greedy left-to-right allocation reserving minima for the remainder.

use argtree::arity;
use argtree::parse;
use argtree::result::PositionalValue;
use argtree::spec::{CommandSpec, PositionalSpec};

fn toks(words: &[&str]) -> Vec<String> {
    words.iter().map(|s| s.to_string()).collect()
}

#[test]
fn two_scalars_split_one_each() {
    let spec = CommandSpec::builder("cp")
        .positional(PositionalSpec::scalar("src"))
        .positional(PositionalSpec::scalar("dst"))
        .build().unwrap();

    let result = parse(&toks(&["a.txt", "b.txt"]), &spec).unwrap();
    assert!(matches!(result.positional("src").unwrap().value(), PositionalValue::Scalar(s) if s == "a.txt"));
    assert!(matches!(result.positional("dst").unwrap().value(), PositionalValue::Scalar(s) if s == "b.txt"));
}

#[test]
fn unbounded_positional_followed_by_nothing_takes_everything_available() {
    let spec = CommandSpec::builder("cp")
        .positional(PositionalSpec::new("files", arity::ONE_OR_MORE))
        .build().unwrap();

    let result = parse(&toks(&["a", "b", "c"]), &spec).unwrap();
    assert!(matches!(result.positional("files").unwrap().value(), PositionalValue::Sequence(v)
        if v == &vec!["a".to_string(), "b".to_string(), "c".to_string()]));
}

#[test]
fn scalar_after_unbounded_reserves_its_minimum_from_the_greedy_allocation() {
    let spec = CommandSpec::builder("cp")
        .positional(PositionalSpec::new("sources", arity::ONE_OR_MORE))
        .positional(PositionalSpec::scalar("destination"))
        .build().unwrap();

    let result = parse(&toks(&["a", "b", "c", "dest"]), &spec).unwrap();
    assert!(matches!(result.positional("sources").unwrap().value(), PositionalValue::Sequence(v)
        if v == &vec!["a".to_string(), "b".to_string(), "c".to_string()]));
    assert!(matches!(result.positional("destination").unwrap().value(), PositionalValue::Scalar(s) if s == "dest"));
}

#[test]
fn bounded_range_positional_takes_at_most_its_max() {
    let spec = CommandSpec::builder("tool")
        .positional(PositionalSpec::new("pair", arity::Arity::new(1, Some(2))))
        .positional(PositionalSpec::new("rest", arity::ZERO_OR_MORE))
        .build().unwrap();

    let result = parse(&toks(&["a", "b", "c", "d"]), &spec).unwrap();
    assert!(matches!(result.positional("pair").unwrap().value(), PositionalValue::Sequence(v)
        if v == &vec!["a".to_string(), "b".to_string()]));
    assert!(matches!(result.positional("rest").unwrap().value(), PositionalValue::Sequence(v)
        if v == &vec!["c".to_string(), "d".to_string()]));
}

#[test]
fn too_few_positionals_names_the_first_unsatisfied_slot() {
    let spec = CommandSpec::builder("cp")
        .positional(PositionalSpec::scalar("src"))
        .positional(PositionalSpec::scalar("dst"))
        .build().unwrap();

    let err = parse(&toks(&["a.txt"]), &spec).unwrap_err();
    match err.kind() {
        argtree::ParseErrorKind::InsufficientPositionalArguments { positional, expected_min, got } => {
            assert_eq!(positional, "dst");
            assert_eq!(*expected_min, 2);
            assert_eq!(*got, 1);
        },
        other => panic!("expected InsufficientPositionalArguments, got {:?}", other),
    }
}

#[test]
fn too_many_positionals_without_a_catch_all_is_rejected() {
    let spec = CommandSpec::builder("tool")
        .config(argtree::ParserConfiguration::default().set_implicit_catch_all_positional(false))
        .positional(PositionalSpec::scalar("only"))
        .build().unwrap();

    let err = parse(&toks(&["a", "b"]), &spec).unwrap_err();
    assert!(matches!(err.kind(), argtree::ParseErrorKind::UnexpectedPositionalArgument { value } if value == "b"));
}

#[test]
fn empty_command_with_no_declared_positionals_uses_implicit_catch_all() {
    let spec = CommandSpec::builder("tool").build().unwrap();
    let result = parse(&toks(&["free", "form", "args"]), &spec).unwrap();
    assert!(matches!(result.positional("args").unwrap().value(), PositionalValue::Sequence(v)
        if v == &vec!["free".to_string(), "form".to_string(), "args".to_string()]));
}

#[test]
fn lone_dash_is_a_positional_not_an_option() {
    let spec = CommandSpec::builder("tool")
        .positional(PositionalSpec::scalar("input"))
        .build().unwrap();
    let result = parse(&toks(&["-"]), &spec).unwrap();
    assert!(matches!(result.positional("input").unwrap().value(), PositionalValue::Scalar(s) if s == "-"));
}

#[test]
fn empty_token_sequence_against_all_optional_positionals_succeeds() {
    let spec = CommandSpec::builder("tool")
        .positional(PositionalSpec::new("files", arity::ZERO_OR_MORE))
        .build().unwrap();
    let result = parse(&toks(&[]), &spec).unwrap();
    assert!(matches!(result.positional("files").unwrap().value(), PositionalValue::Sequence(v) if v.is_empty()));
}

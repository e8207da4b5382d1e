// Copyright 2018 Lyndon Brown
//
// This file is part of the `argtree` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Name resolution: exact match, then (optionally) unique-prefix abbreviation match, per spec.md
//! §4.1. Shared by long-option, subcommand and negation-prefixed-long-option resolution.

/// Outcome of resolving a user-supplied name against a set of candidates.
pub enum Resolution<T> {
    /// No candidate matched at all.
    NoMatch,
    /// Exactly one candidate matched (exact match always wins over abbreviation ambiguity).
    Exact(T),
    /// Two or more candidates were an equally-valid abbreviation match. Carries their names, in
    /// declaration order, for the caller to build an `AmbiguousOption`/`AmbiguousSubcommand` error.
    Ambiguous(Vec<String>),
}

/// Case-fold and underscore/dash normalize `name` for comparison purposes, per the
/// `case_sensitive_*`/`normalize_underscores_to_dashes` configuration knobs. Non-ASCII bytes are
/// compared as-is (spec.md §4.3: "simple ASCII casefolding").
pub fn normalize(name: &str, case_sensitive: bool, normalize_underscores: bool) -> String {
    let mut s = name.to_string();
    if normalize_underscores {
        s = s.replace('_', "-");
    }
    if !case_sensitive {
        s = s.to_ascii_lowercase();
    }
    s
}

/// Resolve `needle` against `candidates` (name, payload pairs, in declaration order).
///
/// 1. An exact match (after normalization) always wins, overriding any abbreviation ambiguity.
/// 2. Otherwise, if `allow_abbreviations` and `needle.len() >= min_abbrev_len` (measured on the
///    raw, non-normalized needle), every candidate whose normalized name starts with the
///    normalized needle is collected; zero is `NoMatch`, one is `Exact`, two or more is
///    `Ambiguous`.
pub fn resolve_name<'a, T: Clone>(
    needle: &str,
    candidates: impl Iterator<Item = (&'a str, T)>,
    allow_abbreviations: bool,
    min_abbrev_len: usize,
    case_sensitive: bool,
    normalize_underscores: bool,
) -> Resolution<T> {
    let norm_needle = normalize(needle, case_sensitive, normalize_underscores);

    let mut abbrev_matches: Vec<(&'a str, T)> = Vec::new();

    for (cand_name, payload) in candidates {
        let norm_cand = normalize(cand_name, case_sensitive, normalize_underscores);
        if norm_cand == norm_needle {
            return Resolution::Exact(payload);
        }
        if allow_abbreviations
            && needle.len() >= min_abbrev_len
            && norm_cand.starts_with(&norm_needle)
        {
            abbrev_matches.push((cand_name, payload));
        }
    }

    match abbrev_matches.len() {
        0 => Resolution::NoMatch,
        1 => Resolution::Exact(abbrev_matches.pop().unwrap().1),
        _ => Resolution::Ambiguous(abbrev_matches.into_iter().map(|(n, _)| n.to_string()).collect()),
    }
}

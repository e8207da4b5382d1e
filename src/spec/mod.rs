// Copyright 2018 Lyndon Brown
//
// This file is part of the `argtree` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! The spec model: immutable, validated-at-construction descriptions of commands, options and
//! positionals (spec.md §3, §4.1).

pub mod command;
pub mod option;
pub mod positional;

pub use command::{CommandSpec, CommandSpecBuilder};
pub use option::{AccumulationMode, FlagConst, OptionSpec, OptionSpecBuilder};
pub use positional::PositionalSpec;

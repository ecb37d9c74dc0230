// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use insta::assert_snapshot;

use super::*;
use crate::class::Channel;
use crate::class::DebugClass;
use crate::class::InfoClass;

#[test]
fn parse_spec_classes() {
    let ParseResult { directives, errors } =
        parse_spec(Channel::Debug, "@error !@warning @!report");

    assert!(errors.is_empty());
    assert_eq!(
        directives,
        vec![
            Directive::Classes {
                classes: DebugClass::Error.into(),
                enable: true,
            },
            Directive::Classes {
                classes: DebugClass::Warning.into(),
                enable: false,
            },
            Directive::Classes {
                classes: DebugClass::Report.into(),
                enable: false,
            },
        ]
    );
}

#[test]
fn parse_spec_class_names_depend_on_channel() {
    let ParseResult { directives, errors } = parse_spec(Channel::Info, "@fatal,@CTRACE");

    assert_eq!(
        directives,
        vec![Directive::Classes {
            classes: InfoClass::Fatal.into(),
            enable: true,
        }]
    );
    assert_eq!(errors.len(), 1);
    assert_snapshot!(&errors[0], @"unknown name in directive '@CTRACE'");
}

#[test]
fn parse_spec_all() {
    let ParseResult { directives, .. } = parse_spec(Channel::Debug, "!@all +all");

    assert_eq!(
        directives,
        vec![
            Directive::Classes {
                classes: Channel::Debug.all_classes(),
                enable: false,
            },
            Directive::Flags {
                flags: Flags::ALL,
                enable: true,
            },
        ]
    );
}

#[test]
fn parse_spec_both_negations() {
    let ParseResult { directives, .. } = parse_spec(Channel::Debug, "!+!startup");

    assert_eq!(
        directives,
        vec![Directive::Flags {
            flags: Flags::STARTUP,
            enable: false,
        }]
    );
}

#[test]
fn parse_spec_overrides_are_lowercased() {
    let ParseResult { directives, errors } =
        parse_spec(Channel::Debug, "&Parser.cpp;!%NET !&vendor/");

    assert!(errors.is_empty());
    assert_eq!(
        directives,
        vec![
            Directive::File {
                key: "parser.cpp".to_string(),
                show: true,
            },
            Directive::Module {
                key: "net".to_string(),
                show: false,
            },
            Directive::File {
                key: "vendor/".to_string(),
                show: false,
            },
        ]
    );
}

#[test]
fn parse_spec_ansi() {
    let ParseResult { directives, .. } = parse_spec(Channel::Info, "ANSI !ansicolor");

    assert_eq!(
        directives,
        vec![Directive::Highlighting(true), Directive::Highlighting(false)]
    );
}

#[test]
fn parse_spec_skips_malformed_tokens() {
    let ParseResult { directives, errors } =
        parse_spec(Channel::Debug, "& ! % @bogus colour @debug");

    assert_eq!(
        directives,
        vec![Directive::Classes {
            classes: DebugClass::Debug.into(),
            enable: true,
        }]
    );
    assert_eq!(errors.len(), 5);
    assert_snapshot!(errors.join("\n"), @r"
    empty key in directive '&'
    empty directive '!'
    empty key in directive '%'
    unknown name in directive '@bogus'
    unrecognized directive 'colour'
    ");
}

#[test]
fn parse_spec_empty() {
    let ParseResult { directives, errors } = parse_spec(Channel::Debug, " ,; ");
    assert!(directives.is_empty());
    assert!(errors.is_empty());
}

#[test]
fn decide_uses_class_bit_without_overrides() {
    let overrides = Overrides::default();
    assert!(overrides.decide(true, "net", "src/net.cpp"));
    assert!(!overrides.decide(false, "net", "src/net.cpp"));
}

#[test]
fn decide_module_beats_file() {
    let mut overrides = Overrides::default();
    overrides.set_file("foo", true);
    overrides.set_module("x", false);

    assert!(!overrides.decide(false, "x", "src/foo.cpp"));
    assert!(overrides.decide(false, "y", "src/foo.cpp"));
    assert!(!overrides.decide(false, "y", "src/bar.cpp"));
}

#[test]
fn decide_file_is_case_insensitive_substring() {
    let mut overrides = Overrides::default();
    overrides.set_file("b", true);

    assert!(overrides.decide(false, "", "ABC"));
    assert!(!overrides.decide(false, "", "xyz"));
}

#[test]
fn decide_file_key_matches_anywhere_in_path() {
    let mut overrides = Overrides::default();
    overrides.set_file("foo", true);

    assert!(overrides.decide(false, "", "foo.cpp"));
    assert!(overrides.decide(false, "", "src/foo.cpp"));
    assert!(overrides.decide(false, "", "barfoo.cpp"));
    assert!(overrides.decide(false, "", "SRC/Foo.CPP"));
    assert!(!overrides.decide(false, "", "fo.cpp"));
    assert!(!overrides.decide(false, "", "f_o_o.cpp"));
}

#[test]
fn decide_latest_file_key_wins() {
    let mut overrides = Overrides::default();
    overrides.set_file("src/", false);
    overrides.set_file("parser", true);
    assert!(overrides.decide(true, "", "src/parser.cpp"));

    overrides.set_file("src/", false);
    assert!(!overrides.decide(true, "", "src/parser.cpp"));
}

#[test]
fn decide_ignores_file_overrides_for_empty_file() {
    let mut overrides = Overrides::default();
    overrides.set_file("a", false);
    assert!(overrides.decide(true, "", ""));
}

#[test]
fn module_lookup_is_exact() {
    let mut overrides = Overrides::default();
    overrides.set_module("net", false);

    assert!(overrides.decide(true, "network", ""));
    assert!(overrides.decide(true, "ne", ""));
    assert!(!overrides.decide(true, "net", ""));
    assert_eq!(overrides.module("NET"), Some(false));
    assert_eq!(overrides.remove_module("net"), Some(false));
    assert!(overrides.is_empty());
}

#[test]
fn module_lookup_ignores_case() {
    let mut overrides = Overrides::default();
    overrides.set_module("Net", false);

    assert_eq!(overrides.module("net"), Some(false));
    assert!(!overrides.decide(true, "Net", ""));
    assert!(!overrides.decide(true, "net", ""));
    assert!(!overrides.decide(true, "NET", ""));
    assert!(overrides.decide(true, "Network", ""));
}

#[test]
fn empty_keys_are_ignored() {
    let mut overrides = Overrides::default();
    overrides.set_file("", true);
    overrides.set_module("", true);
    assert!(overrides.is_empty());
}

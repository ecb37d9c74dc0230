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

use crate::class::Channel;
use crate::class::ClassMask;
use crate::class::Flags;

/// One mutation of a channel's filter state, as parsed from a configuration string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `@name` sets the class bits, `!@name` or `@!name` clears them.
    Classes { classes: ClassMask, enable: bool },
    /// `+name` sets the flag bits, `!+name` or `+!name` clears them.
    Flags { flags: Flags, enable: bool },
    /// `&key` shows, `!&key` hides messages whose file path contains `key`.
    File { key: String, show: bool },
    /// `%key` shows, `!%key` hides messages tagged with module `key`.
    Module { key: String, show: bool },
    /// `ansi...` turns color decoration on, `!ansi...` turns it off.
    Highlighting(bool),
}

/// The outcome of parsing a configuration string.
#[derive(Debug, Default)]
pub struct ParseResult {
    /// Directives in the order they were written.
    pub directives: Vec<Directive>,
    /// Tokens that were skipped.
    pub errors: Vec<String>,
}

impl ParseResult {
    fn add_directive(&mut self, directive: Directive) {
        self.directives.push(directive);
    }

    fn add_error(&mut self, message: String) {
        self.errors.push(message);
    }
}

/// Parse a configuration string for `channel`.
///
/// Tokens are separated by spaces, commas or semicolons. Tokens that name no known class or flag,
/// carry an empty key, or carry no recognized sigil are reported in [`ParseResult::errors`] and
/// otherwise ignored.
pub fn parse_spec(channel: Channel, spec: &str) -> ParseResult {
    let mut result = ParseResult::default();

    for token in spec
        .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .filter(|t| !t.is_empty())
    {
        let (mut negate, rest) = match token.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, token),
        };

        let mut chars = rest.chars();
        let Some(sigil) = chars.next() else {
            result.add_error(format!("empty directive '{token}'"));
            continue;
        };
        let body = chars.as_str();

        match sigil {
            '@' | '+' => {
                let name = match body.strip_prefix('!') {
                    Some(name) => {
                        negate = true;
                        name
                    }
                    None => body,
                };
                let directive = if sigil == '@' {
                    channel
                        .class_by_name(name)
                        .map(|classes| Directive::Classes {
                            classes,
                            enable: !negate,
                        })
                } else {
                    Flags::from_name(name).map(|flags| Directive::Flags {
                        flags,
                        enable: !negate,
                    })
                };
                match directive {
                    Some(directive) => result.add_directive(directive),
                    None => result.add_error(format!("unknown name in directive '{token}'")),
                }
            }
            '&' | '%' => {
                if body.is_empty() {
                    result.add_error(format!("empty key in directive '{token}'"));
                    continue;
                }
                let key = body.to_ascii_lowercase();
                let show = !negate;
                result.add_directive(if sigil == '&' {
                    Directive::File { key, show }
                } else {
                    Directive::Module { key, show }
                });
            }
            _ => {
                let is_ansi = rest
                    .get(..4)
                    .is_some_and(|prefix| prefix.eq_ignore_ascii_case("ansi"));
                if is_ansi {
                    result.add_directive(Directive::Highlighting(!negate));
                } else {
                    result.add_error(format!("unrecognized directive '{token}'"));
                }
            }
        }
    }

    result
}

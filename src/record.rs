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

//! Message payloads and their rendering.

use std::fmt;
use std::time::Duration;

/// An integer value with the width it was declared with.
///
/// Signed values are stored sign-extended and their hex form shows the two's complement at the
/// declared width. Unsigned values are never truncated; the width only sets the zero padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scalar {
    bits: u64,
    signed: bool,
    size: u8,
}

impl Scalar {
    /// A signed value of `size` bytes.
    pub const fn signed(value: i64, size: u8) -> Scalar {
        Scalar {
            bits: value as u64,
            signed: true,
            size,
        }
    }

    /// An unsigned value of `size` bytes.
    pub const fn unsigned(value: u64, size: u8) -> Scalar {
        Scalar {
            bits: value,
            signed: false,
            size,
        }
    }

    /// The width in bytes.
    pub const fn size(self) -> u8 {
        self.size
    }

    fn hex_bits(self) -> u64 {
        if !self.signed {
            return self.bits;
        }
        match self.size {
            0 => 0,
            1..=7 => self.bits & ((1u64 << (u32::from(self.size) * 8)) - 1),
            _ => self.bits,
        }
    }

    fn byte(self) -> Option<u8> {
        if self.size == 1 {
            u8::try_from(self.hex_bits()).ok()
        } else {
            None
        }
    }

    fn write_decimal(self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.signed {
            write!(f, "{}", self.bits as i64)
        } else {
            write!(f, "{}", self.bits)
        }
    }

    fn write_hex(self, f: &mut fmt::Formatter<'_>, min_width: usize) -> fmt::Result {
        let width = (usize::from(self.size) * 2).max(min_width);
        write!(f, "{:0width$x}", self.hex_bits())
    }
}

macro_rules! impl_scalar_from {
    ($($t:ty => $ctor:ident as $wide:ty),* $(,)?) => {
        $(
            impl From<$t> for Scalar {
                fn from(value: $t) -> Scalar {
                    Scalar::$ctor(value as $wide, size_of::<$t>() as u8)
                }
            }
        )*
    };
}

impl_scalar_from!(
    i8 => signed as i64,
    i16 => signed as i64,
    i32 => signed as i64,
    i64 => signed as i64,
    isize => signed as i64,
    u8 => unsigned as u64,
    u16 => unsigned as u64,
    u32 => unsigned as u64,
    u64 => unsigned as u64,
    usize => unsigned as u64,
);

impl From<bool> for Scalar {
    fn from(value: bool) -> Scalar {
        Scalar::unsigned(u64::from(value), 1)
    }
}

impl From<char> for Scalar {
    fn from(value: char) -> Scalar {
        Scalar::unsigned(u64::from(u32::from(value)), 4)
    }
}

/// The body of a line, the part after `file:line:`.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Body<'a> {
    Enter {
        function: &'a str,
    },
    Leave {
        function: &'a str,
    },
    Return {
        function: &'a str,
        result: Scalar,
    },
    Value {
        name: &'a str,
        value: Scalar,
    },
    Pointer {
        name: &'a str,
        address: usize,
    },
    Text {
        name: &'a str,
        address: usize,
        text: &'a str,
    },
    Message(&'a str),
    ClockStart {
        label: &'a str,
        at: &'a str,
    },
    ClockStop {
        label: &'a str,
        at: &'a str,
        elapsed: Duration,
    },
    Formatted {
        label: &'static str,
        args: fmt::Arguments<'a>,
    },
}

impl fmt::Display for Body<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Body::Enter { function } => write!(f, "Entering {function}()"),
            Body::Leave { function } => write!(f, "Leaving {function}()"),
            Body::Return { function, result } => {
                write!(f, "Leaving {function}() (result 0x")?;
                result.write_hex(f, 8)?;
                f.write_str(", ")?;
                result.write_decimal(f)?;
                f.write_str(")")
            }
            Body::Value { name, value } => {
                write!(f, "{name} = ")?;
                value.write_decimal(f)?;
                f.write_str(", 0x")?;
                value.write_hex(f, 0)?;
                if let Some(byte) = value.byte() {
                    if byte < 0x20 || (127..=160).contains(&byte) {
                        write!(f, ", '{byte:02x}'")?;
                    } else {
                        write!(f, ", '{}'", char::from(byte))?;
                    }
                }
                Ok(())
            }
            Body::Pointer { name, address: 0 } => write!(f, "{name} = NULL"),
            Body::Pointer { name, address } => write!(f, "{name} = 0x{address:08x}"),
            Body::Text {
                name,
                address,
                text,
            } => write!(f, "{name} = 0x{address:08x} \"{text}\""),
            Body::Message(message) => f.write_str(message),
            Body::ClockStart { label, at } => write!(f, "{label} started@{at}"),
            Body::ClockStop { label, at, elapsed } => write!(
                f,
                "{label} stopped@{at} = {}s",
                crate::clock::format_elapsed(elapsed)
            ),
            Body::Formatted { label, args } => {
                f.write_str(label)?;
                f.write_fmt(args)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(value: impl Into<Scalar>) -> String {
        Body::Value {
            name: "x",
            value: value.into(),
        }
        .to_string()
    }

    #[test]
    fn byte_values_show_their_character() {
        assert_eq!(value(10u8), "x = 10, 0x0a, '0a'");
        assert_eq!(value(65u8), "x = 65, 0x41, 'A'");
        assert_eq!(value(127u8), "x = 127, 0x7f, '7f'");
        assert_eq!(value(0xe9u8), "x = 233, 0xe9, '\u{e9}'");
    }

    #[test]
    fn wide_values_have_no_character() {
        assert_eq!(value(10i32), "x = 10, 0x0000000a");
        assert_eq!(value(-1i16), "x = -1, 0xffff");
        assert_eq!(value(-97i8), "x = -97, 0x9f, '9f'");
        assert_eq!(value(u64::MAX), "x = 18446744073709551615, 0xffffffffffffffff");
    }

    #[test]
    fn unsigned_values_are_padded_not_truncated() {
        assert_eq!(value(Scalar::unsigned(300, 1)), "x = 300, 0x12c");
        assert_eq!(value(Scalar::unsigned(255, 1)), "x = 255, 0xff, '\u{ff}'");
        assert_eq!(value(Scalar::unsigned(0x12345, 2)), "x = 74565, 0x12345");

        let body = Body::Return {
            function: "compute",
            result: Scalar::unsigned(0x1_0000_0000, 4),
        };
        assert_eq!(body.to_string(), "Leaving compute() (result 0x100000000, 4294967296)");
    }

    #[test]
    fn return_shows_hex_and_decimal() {
        let body = Body::Return {
            function: "compute",
            result: Scalar::from(-1i32),
        };
        assert_eq!(body.to_string(), "Leaving compute() (result 0xffffffff, -1)");

        let body = Body::Return {
            function: "compute",
            result: Scalar::from(7u8),
        };
        assert_eq!(body.to_string(), "Leaving compute() (result 0x00000007, 7)");
    }

    #[test]
    fn pointers() {
        let null = Body::Pointer {
            name: "p",
            address: 0,
        };
        assert_eq!(null.to_string(), "p = NULL");

        let some = Body::Pointer {
            name: "p",
            address: 0xbeef,
        };
        assert_eq!(some.to_string(), "p = 0x0000beef");
    }

    #[test]
    fn clock_bodies() {
        let start = Body::ClockStart {
            label: "load",
            at: "12:00:00.000001",
        };
        assert_eq!(start.to_string(), "load started@12:00:00.000001");

        let stop = Body::ClockStop {
            label: "load",
            at: "12:00:01.500001",
            elapsed: Duration::from_micros(1_500_000),
        };
        assert_eq!(stop.to_string(), "load stopped@12:00:01.500001 = 1.500000s");
    }
}

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

//! Message classes, the bitmasks selecting them, and configuration flags.

use std::fmt;
use std::ops::BitAnd;
use std::ops::BitOr;
use std::ops::BitOrAssign;

use crate::append::Stream;

/// One of the two independent filtering and output paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Call-trace, report and timing instrumentation.
    Debug,
    /// User-facing info, warning, error and fatal messages.
    Info,
}

impl Channel {
    /// The lowercase name of the channel.
    pub fn name(self) -> &'static str {
        match self {
            Channel::Debug => "debug",
            Channel::Info => "info",
        }
    }

    /// Every class bit known to this channel.
    pub fn all_classes(self) -> ClassMask {
        match self {
            Channel::Debug => DebugClass::ALL.into_iter().map(ClassMask::from).collect(),
            Channel::Info => InfoClass::ALL.into_iter().map(ClassMask::from).collect(),
        }
    }

    /// The classes enabled before any configuration is applied.
    pub fn default_classes(self) -> ClassMask {
        match self {
            Channel::Debug => [
                DebugClass::Error,
                DebugClass::Debug,
                DebugClass::Warning,
                DebugClass::Assert,
                DebugClass::Report,
                DebugClass::TimeVal,
            ]
            .into_iter()
            .map(ClassMask::from)
            .collect(),
            Channel::Info => {
                let mut mask: ClassMask = [
                    InfoClass::Info,
                    InfoClass::Warning,
                    InfoClass::Error,
                    InfoClass::Fatal,
                ]
                .into_iter()
                .map(ClassMask::from)
                .collect();
                if cfg!(debug_assertions) {
                    mask |= ClassMask::from(InfoClass::Verbose);
                    mask |= ClassMask::from(InfoClass::Debug);
                }
                mask
            }
        }
    }

    /// Resolve a class name as written after the `@` sigil. `all` selects every class.
    pub fn class_by_name(self, name: &str) -> Option<ClassMask> {
        if name.eq_ignore_ascii_case("all") {
            return Some(self.all_classes());
        }
        match self {
            Channel::Debug => DebugClass::from_name(name).map(ClassMask::from),
            Channel::Info => InfoClass::from_name(name).map(ClassMask::from),
        }
    }

    /// Names of the classes of this channel contained in `mask`.
    pub fn class_names(self, mask: ClassMask) -> Vec<&'static str> {
        match self {
            Channel::Debug => DebugClass::ALL
                .into_iter()
                .filter(|c| mask.contains(c.bit()))
                .map(DebugClass::name)
                .collect(),
            Channel::Info => InfoClass::ALL
                .into_iter()
                .filter(|c| mask.contains(c.bit()))
                .map(InfoClass::name)
                .collect(),
        }
    }
}

/// Classes of the debug channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum DebugClass {
    /// Function entry and exit.
    CallTrace = 1 << 0,
    /// Values, pointers, strings and plain messages.
    Report = 1 << 1,
    /// Failed assertions.
    Assert = 1 << 2,
    /// Clock measurements.
    TimeVal = 1 << 3,
    /// Formatted debug messages.
    Debug = 1 << 4,
    /// Formatted error messages.
    Error = 1 << 5,
    /// Formatted warning messages.
    Warning = 1 << 6,
}

impl DebugClass {
    /// All debug classes, in bit order.
    pub const ALL: [DebugClass; 7] = [
        DebugClass::CallTrace,
        DebugClass::Report,
        DebugClass::Assert,
        DebugClass::TimeVal,
        DebugClass::Debug,
        DebugClass::Error,
        DebugClass::Warning,
    ];

    /// The bit of this class.
    pub const fn bit(self) -> u32 {
        self as u32
    }

    /// The configuration name of this class.
    pub const fn name(self) -> &'static str {
        match self {
            DebugClass::CallTrace => "ctrace",
            DebugClass::Report => "report",
            DebugClass::Assert => "assert",
            DebugClass::TimeVal => "timeval",
            DebugClass::Debug => "debug",
            DebugClass::Error => "error",
            DebugClass::Warning => "warning",
        }
    }

    /// Look up a class by its configuration name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<DebugClass> {
        DebugClass::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }
}

/// Classes of the info channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum InfoClass {
    Info = 1 << 0,
    Verbose = 1 << 1,
    Warning = 1 << 2,
    Error = 1 << 3,
    /// Written, flushed, then the process aborts.
    Fatal = 1 << 4,
    Debug = 1 << 5,
}

impl InfoClass {
    /// All info classes, in bit order.
    pub const ALL: [InfoClass; 6] = [
        InfoClass::Info,
        InfoClass::Verbose,
        InfoClass::Warning,
        InfoClass::Error,
        InfoClass::Fatal,
        InfoClass::Debug,
    ];

    /// The bit of this class.
    pub const fn bit(self) -> u32 {
        self as u32
    }

    /// The configuration name of this class.
    pub const fn name(self) -> &'static str {
        match self {
            InfoClass::Info => "info",
            InfoClass::Verbose => "verbose",
            InfoClass::Warning => "warning",
            InfoClass::Error => "error",
            InfoClass::Fatal => "fatal",
            InfoClass::Debug => "debug",
        }
    }

    /// Look up a class by its configuration name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<InfoClass> {
        InfoClass::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }
}

/// A class of either channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    Debug(DebugClass),
    Info(InfoClass),
}

impl Class {
    /// The channel this class belongs to.
    pub fn channel(self) -> Channel {
        match self {
            Class::Debug(_) => Channel::Debug,
            Class::Info(_) => Channel::Info,
        }
    }

    /// The bit of this class within its channel.
    pub fn bit(self) -> u32 {
        match self {
            Class::Debug(c) => c.bit(),
            Class::Info(c) => c.bit(),
        }
    }

    /// The configuration name of this class.
    pub fn name(self) -> &'static str {
        match self {
            Class::Debug(c) => c.name(),
            Class::Info(c) => c.name(),
        }
    }

    /// The stream lines of this class are written to.
    pub fn stream(self) -> Stream {
        match self {
            Class::Info(InfoClass::Info | InfoClass::Verbose) => Stream::Stdout,
            Class::Info(_) | Class::Debug(_) => Stream::Stderr,
        }
    }
}

impl From<DebugClass> for Class {
    fn from(class: DebugClass) -> Self {
        Class::Debug(class)
    }
}

impl From<InfoClass> for Class {
    fn from(class: InfoClass) -> Self {
        Class::Info(class)
    }
}

/// A set of class bits of one channel.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ClassMask(u32);

impl ClassMask {
    /// The empty mask.
    pub const NONE: ClassMask = ClassMask(0);

    /// Create a mask from raw bits.
    pub const fn from_bits(bits: u32) -> ClassMask {
        ClassMask(bits)
    }

    /// The raw bits.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether any bit of `bits` is set.
    pub const fn contains(self, bits: u32) -> bool {
        self.0 & bits != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Set every bit of `other`.
    pub fn insert(&mut self, other: ClassMask) {
        self.0 |= other.0;
    }

    /// Clear every bit of `other`.
    pub fn remove(&mut self, other: ClassMask) {
        self.0 &= !other.0;
    }
}

impl fmt::Debug for ClassMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassMask({:#010x})", self.0)
    }
}

impl From<DebugClass> for ClassMask {
    fn from(class: DebugClass) -> Self {
        ClassMask(class.bit())
    }
}

impl From<InfoClass> for ClassMask {
    fn from(class: InfoClass) -> Self {
        ClassMask(class.bit())
    }
}

impl BitOr for ClassMask {
    type Output = ClassMask;

    fn bitor(self, rhs: ClassMask) -> ClassMask {
        ClassMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for ClassMask {
    fn bitor_assign(&mut self, rhs: ClassMask) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for ClassMask {
    type Output = ClassMask;

    fn bitand(self, rhs: ClassMask) -> ClassMask {
        ClassMask(self.0 & rhs.0)
    }
}

impl FromIterator<ClassMask> for ClassMask {
    fn from_iter<I: IntoIterator<Item = ClassMask>>(iter: I) -> Self {
        iter.into_iter().fold(ClassMask::NONE, BitOr::bitor)
    }
}

/// Configuration flags of a channel.
///
/// Flags never take part in matching. [`Flags::STARTUP`] makes a freshly configured debugger write
/// a summary of the channel's configuration; [`Flags::ALWAYS`] is stored for callers to consult.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Flags(u32);

impl Flags {
    pub const NONE: Flags = Flags(0);
    pub const ALWAYS: Flags = Flags(1 << 0);
    pub const STARTUP: Flags = Flags(1 << 1);
    pub const ALL: Flags = Flags(Flags::ALWAYS.0 | Flags::STARTUP.0);

    /// Create flags from raw bits.
    pub const fn from_bits(bits: u32) -> Flags {
        Flags(bits)
    }

    /// The raw bits.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether every bit of `other` is set.
    pub const fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Set every bit of `other`.
    pub fn insert(&mut self, other: Flags) {
        self.0 |= other.0;
    }

    /// Clear every bit of `other`.
    pub fn remove(&mut self, other: Flags) {
        self.0 &= !other.0;
    }

    /// Resolve a flag name as written after the `+` sigil, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Flags> {
        [
            ("always", Flags::ALWAYS),
            ("startup", Flags::STARTUP),
            ("all", Flags::ALL),
        ]
        .into_iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, flags)| flags)
    }

    /// Names of the set flags.
    pub fn names(self) -> Vec<&'static str> {
        let mut names = vec![];
        if self.contains(Flags::ALWAYS) {
            names.push("always");
        }
        if self.contains(Flags::STARTUP) {
            names.push("startup");
        }
        names
    }
}

impl fmt::Debug for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

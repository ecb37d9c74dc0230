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

use crate::append;
use crate::append::Append;
use crate::class::Channel;
use crate::class::ClassMask;
use crate::debugger::Debugger;
use crate::layout::ClassColor;
use crate::layout::TextLayout;
use crate::trap::DefaultTrap;
use crate::trap::Trap;

/// A builder for configuring a [`Debugger`].
///
/// ## Examples
///
/// ```rust
/// use rtdebug::Debugger;
/// use rtdebug::append;
/// use rtdebug::class::Channel;
/// use rtdebug::class::DebugClass;
///
/// let debugger = Debugger::builder()
///     .append(append::Stdio::default())
///     .spec(Channel::Debug, "@ctrace !@report %net")
///     .build();
///
/// assert!(debugger.matches(DebugClass::CallTrace, "", "main.rs"));
/// assert!(!debugger.matches(DebugClass::Report, "", "main.rs"));
/// assert!(debugger.matches(DebugClass::Report, "net", "main.rs"));
/// ```
#[must_use = "call `build` to create the debugger"]
#[derive(Debug)]
pub struct DebuggerBuilder {
    append: Box<dyn Append>,
    trap: Box<dyn Trap>,
    layout: TextLayout,
    highlighting: bool,
    classes: Vec<(Channel, ClassMask)>,
    specs: Vec<(Channel, String)>,
    env: Option<String>,
}

impl Default for DebuggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DebuggerBuilder {
    /// Create a builder writing to stdout and stderr with the default classes enabled.
    pub fn new() -> Self {
        Self {
            append: Box::new(append::Stdio::default()),
            trap: Box::new(DefaultTrap::default()),
            layout: TextLayout::default(),
            highlighting: false,
            classes: vec![],
            specs: vec![],
            env: None,
        }
    }

    /// Set the destination lines are written to.
    pub fn append(mut self, append: impl Into<Box<dyn Append>>) -> Self {
        self.append = append.into();
        self
    }

    /// Set the trap receiving errors of dropped lines.
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    /// Set the colors used when highlighting is on.
    pub fn colors(mut self, colors: ClassColor) -> Self {
        self.layout.colors = colors;
        self
    }

    /// Turn ANSI color decoration on or off. Default to off.
    pub fn highlighting(mut self, highlighting: bool) -> Self {
        self.highlighting = highlighting;
        self
    }

    /// Whether lines start with the wall-clock time. Default to true.
    pub fn timestamp(mut self, timestamp: bool) -> Self {
        self.layout.timestamp = timestamp;
        self
    }

    /// Whether the thread prefix includes the process id. Default to true.
    pub fn process_id(mut self, process_id: bool) -> Self {
        self.layout.process_id = process_id;
        self
    }

    /// Replace the initially enabled classes of `channel`.
    pub fn classes(mut self, channel: Channel, classes: ClassMask) -> Self {
        self.classes.push((channel, classes));
        self
    }

    /// Apply a configuration string to `channel` on build.
    ///
    /// Strings are applied in the order they were added, after [`DebuggerBuilder::classes`].
    pub fn spec(mut self, channel: Channel, spec: impl Into<String>) -> Self {
        self.specs.push((channel, spec.into()));
        self
    }

    /// Read configuration from the environment variables `name` (debug channel) and `name_INFO`
    /// (info channel) on build, after every [`DebuggerBuilder::spec`].
    pub fn env(mut self, name: impl Into<String>) -> Self {
        self.env = Some(name.into());
        self
    }

    /// Create the debugger.
    ///
    /// Channels whose startup flag is set once configuration is applied get a summary line
    /// written.
    pub fn build(self) -> Debugger {
        let debugger = Debugger::new(self.append, self.trap, self.layout, self.highlighting);
        for (channel, classes) in self.classes {
            debugger.set_classes(channel, classes);
        }
        for (channel, spec) in self.specs {
            debugger.apply_spec(channel, &spec);
        }
        if let Some(name) = self.env {
            debugger.apply_env_vars(&name);
        }
        debugger.announce();
        debugger
    }
}

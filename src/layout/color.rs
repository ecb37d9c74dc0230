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

use colored::Color;

use crate::class::Class;
use crate::class::DebugClass;
use crate::class::InfoClass;

/// Customize the color of each message class.
#[derive(Debug, Clone)]
pub struct ClassColor {
    pub call_trace: Color,
    pub report: Color,
    pub assert: Color,
    pub time_val: Color,
    pub debug: Color,
    pub error: Color,
    pub warning: Color,
    pub info: Color,
    pub verbose: Color,
    pub fatal: Color,
}

impl Default for ClassColor {
    fn default() -> Self {
        Self {
            call_trace: Color::Yellow,
            report: Color::Green,
            assert: Color::BrightRed,
            time_val: Color::Blue,
            debug: Color::Magenta,
            error: Color::Red,
            warning: Color::BrightYellow,
            info: Color::Cyan,
            verbose: Color::Blue,
            fatal: Color::BrightRed,
        }
    }
}

impl ClassColor {
    /// The color lines of `class` are drawn in.
    pub fn color_of(&self, class: Class) -> Color {
        match class {
            Class::Debug(DebugClass::CallTrace) => self.call_trace,
            Class::Debug(DebugClass::Report) => self.report,
            Class::Debug(DebugClass::Assert) => self.assert,
            Class::Debug(DebugClass::TimeVal) => self.time_val,
            Class::Debug(DebugClass::Debug) | Class::Info(InfoClass::Debug) => self.debug,
            Class::Debug(DebugClass::Error) | Class::Info(InfoClass::Error) => self.error,
            Class::Debug(DebugClass::Warning) | Class::Info(InfoClass::Warning) => self.warning,
            Class::Info(InfoClass::Info) => self.info,
            Class::Info(InfoClass::Verbose) => self.verbose,
            Class::Info(InfoClass::Fatal) => self.fatal,
        }
    }
}

/// Background colors cycled through by thread id.
const THREAD_COLORS: [Color; 6] = [
    Color::Black,
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
];

pub(crate) const RESET: &str = "\x1b[0m";

pub(crate) fn foreground(color: Color) -> String {
    format!("\x1b[{}m", color.to_fg_str())
}

pub(crate) fn thread_background(id: u32) -> String {
    let color = THREAD_COLORS[id as usize % THREAD_COLORS.len()];
    format!("\x1b[{}m", color.to_bg_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes() {
        assert_eq!(foreground(Color::Red), "\x1b[31m");
        assert_eq!(thread_background(1), "\x1b[41m");
        assert_eq!(thread_background(6), "\x1b[40m");
    }

    #[test]
    fn info_and_debug_share_severity_colors() {
        let colors = ClassColor::default();
        assert_eq!(
            colors.color_of(DebugClass::Error.into()),
            colors.color_of(InfoClass::Error.into())
        );
        assert_eq!(colors.color_of(DebugClass::CallTrace.into()), Color::Yellow);
    }
}

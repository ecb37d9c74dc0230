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

//! Composition of one output line.

use std::fmt::Write;

pub use self::color::ClassColor;

use crate::Error;
use crate::Location;
use crate::class::Class;
use crate::record::Body;

mod color;

/// A layout that formats a message as one line of text.
///
/// Output format:
///
/// ```text
/// 22:44:57.172105 4711.01: main.cpp:12:Entering main()
/// 22:44:57.172219 4711.01:  main.cpp:14:argc = 1, 0x00000001
/// 22:44:57.172276 4711.02:  worker.cpp:40:Warning: queue is full
/// ```
///
/// The timestamp and the process id can be turned off. When highlighting is on, the thread
/// prefix gets a background color chosen by thread id and the rest of the line is drawn in the
/// color of its class, see [`ClassColor`].
#[derive(Debug, Clone)]
pub struct TextLayout {
    pub colors: ClassColor,
    pub timestamp: bool,
    pub process_id: bool,
}

impl Default for TextLayout {
    fn default() -> Self {
        Self {
            colors: ClassColor::default(),
            timestamp: true,
            process_id: true,
        }
    }
}

/// Everything about a line that is not its body.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LineContext<'a> {
    pub(crate) class: Class,
    pub(crate) time: Option<&'a str>,
    pub(crate) pid: u32,
    pub(crate) tid: u32,
    pub(crate) indent: usize,
    pub(crate) highlighting: bool,
    pub(crate) location: Location<'a>,
}

impl TextLayout {
    pub(crate) fn format(&self, cx: &LineContext, body: &Body) -> Result<String, Error> {
        let mut line = String::with_capacity(128);
        self.write_line(&mut line, cx, body)
            .map_err(Error::from_fmt_error)?;
        Ok(line)
    }

    fn write_line(&self, out: &mut String, cx: &LineContext, body: &Body) -> std::fmt::Result {
        if let Some(time) = cx.time.filter(|_| self.timestamp) {
            write!(out, "{time} ")?;
        }

        if cx.highlighting {
            out.push_str(&color::thread_background(cx.tid));
        }
        if self.process_id {
            write!(out, "{}.", cx.pid)?;
        }
        write!(out, "{:02}:", cx.tid)?;
        if cx.highlighting {
            out.push_str(color::RESET);
        }
        out.push(' ');

        out.extend(std::iter::repeat_n(' ', cx.indent));

        if cx.highlighting {
            out.push_str(&color::foreground(self.colors.color_of(cx.class)));
        }
        let location = cx.location;
        if !location.file().is_empty() {
            write!(out, "{}:{}:", location.basename(), location.line())?;
        }
        write!(out, "{body}")?;
        if cx.highlighting {
            out.push_str(color::RESET);
        }
        out.push('\n');
        Ok(())
    }
}

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

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use crate::Error;
use crate::append::Append;
use crate::append::Stream;

/// An appender that keeps every line in memory.
///
/// Clones share the same buffer, so a clone kept by the caller observes everything written
/// through the debugger. Lines are stored without their trailing newline.
///
/// # Examples
///
/// ```
/// use rtdebug::Debugger;
/// use rtdebug::Location;
/// use rtdebug::append::Memory;
/// use rtdebug::class::DebugClass;
///
/// let memory = Memory::default();
/// let debugger = Debugger::builder()
///     .append(memory.clone())
///     .timestamp(false)
///     .process_id(false)
///     .build();
///
/// debugger.show_message(DebugClass::Report, "", "hello", Location::new("src/main.rs", 7));
/// assert_eq!(memory.lines(), vec!["01: main.rs:7:hello".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Memory {
    entries: Arc<Mutex<Vec<(Stream, String)>>>,
}

impl Memory {
    fn entries_mut(&self) -> MutexGuard<'_, Vec<(Stream, String)>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every captured line with its stream, in write order.
    pub fn entries(&self) -> Vec<(Stream, String)> {
        self.entries_mut().clone()
    }

    /// Every captured line, in write order.
    pub fn lines(&self) -> Vec<String> {
        self.entries_mut()
            .iter()
            .map(|(_, line)| line.clone())
            .collect()
    }

    /// The lines written to `stream`, in write order.
    pub fn lines_of(&self, stream: Stream) -> Vec<String> {
        self.entries_mut()
            .iter()
            .filter(|(s, _)| *s == stream)
            .map(|(_, line)| line.clone())
            .collect()
    }

    /// Everything captured, each line terminated by a newline.
    pub fn contents(&self) -> String {
        let mut contents = String::new();
        for (_, line) in self.entries_mut().iter() {
            contents.push_str(line);
            contents.push('\n');
        }
        contents
    }

    /// Forget every captured line.
    pub fn clear(&self) {
        self.entries_mut().clear();
    }
}

impl Append for Memory {
    fn append(&self, stream: Stream, line: &[u8]) -> Result<(), Error> {
        let line = String::from_utf8_lossy(line);
        let line = line.strip_suffix('\n').unwrap_or(&line).to_string();
        self.entries_mut().push((stream, line));
        Ok(())
    }
}

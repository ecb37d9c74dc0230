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

//! Destinations that rendered lines are written to.

use std::fmt;

use crate::Error;

mod memory;
mod stdio;
mod testing;
mod writer;

pub use self::memory::Memory;
pub use self::stdio::Stdio;
pub use self::testing::Testing;
pub use self::writer::Writer;

/// The standard stream a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// A destination for rendered lines.
///
/// The debugger calls [`Append::append`] while holding its output lock, once per line, with the
/// complete line including the trailing newline. Implementations must not log through the same
/// debugger.
pub trait Append: fmt::Debug + Send + Sync + 'static {
    /// Write one complete line to `stream`.
    fn append(&self, stream: Stream, line: &[u8]) -> Result<(), Error>;

    /// Flush any buffered lines.
    ///
    /// Default to a no-op.
    fn flush(&self) -> Result<(), Error> {
        Ok(())
    }
}

impl<T: Append> From<T> for Box<dyn Append> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

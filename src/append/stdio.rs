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

use std::io;
use std::io::Write;

use crate::Error;
use crate::append::Append;
use crate::append::Stream;

/// An appender that writes each line to the process's standard output or standard error,
/// according to the line's [`Stream`].
///
/// # Examples
///
/// ```
/// use rtdebug::append::Stdio;
///
/// let stdio_appender = Stdio::default();
/// ```
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct Stdio {}

impl Append for Stdio {
    fn append(&self, stream: Stream, line: &[u8]) -> Result<(), Error> {
        let written = match stream {
            Stream::Stdout => io::stdout().lock().write_all(line),
            Stream::Stderr => io::stderr().lock().write_all(line),
        };
        written.map_err(|err| {
            Error::from_io_error(err).with_context("stream", format!("{stream:?}"))
        })
    }

    fn flush(&self) -> Result<(), Error> {
        io::stdout().flush().map_err(Error::from_io_error)?;
        io::stderr().flush().map_err(Error::from_io_error)?;
        Ok(())
    }
}

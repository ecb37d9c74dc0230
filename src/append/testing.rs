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

use crate::Error;
use crate::append::Append;
use crate::append::Stream;

/// An appender that writes lines that can be captured by a test harness (like `cargo test`),
/// and thus the outputs are suppressed unless `--nocapture` or `--show-output` is specified.
///
/// # Examples
///
/// ```
/// use rtdebug::append::Testing;
///
/// let test_appender = Testing::default();
/// ```
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct Testing {}

impl Append for Testing {
    fn append(&self, stream: Stream, line: &[u8]) -> Result<(), Error> {
        let line = String::from_utf8_lossy(line);
        match stream {
            Stream::Stdout => print!("{line}"),
            Stream::Stderr => eprint!("{line}"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Debugger;
    use crate::Location;
    use crate::class::DebugClass;

    #[test]
    fn writes_through_the_harness() {
        let debugger = Debugger::builder().append(Testing::default()).build();
        debugger.show_message(DebugClass::Report, "", "captured", Location::caller());
        assert!(Testing::default().append(Stream::Stdout, b"plain\n").is_ok());
    }
}

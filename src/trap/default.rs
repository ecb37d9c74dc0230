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
use crate::trap::Trap;

/// A trap that discards every error, so a failing log call produces no output at all.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct DefaultTrap {}

impl Trap for DefaultTrap {
    fn trap(&self, _: &Error) {}
}

/// A trap that reports errors to standard error if possible.
///
/// If standard error is not available, it does nothing.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct StderrTrap {}

impl Trap for StderrTrap {
    fn trap(&self, err: &Error) {
        let _ = writeln!(io::stderr(), "rtdebug: dropped line: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn traps_never_panic() {
        let err = Error::new(ErrorKind::Format, "bad payload").with_context("thread", 1);
        DefaultTrap::default().trap(&err);
        StderrTrap::default().trap(&err);
    }
}

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

//! Wall-clock interval measurement per thread.

use std::time::Duration;
use std::time::SystemTime;

use crate::Error;
use crate::ErrorKind;
use crate::thread::with_scope;

/// Make now the calling thread's baseline for the debugger `serial`. Returns now.
pub(crate) fn start(serial: u64) -> SystemTime {
    let now = SystemTime::now();
    with_scope(serial, |scope| scope.baseline = now);
    now
}

/// Measure the time since the calling thread's baseline. The baseline is left unchanged.
pub(crate) fn stop(serial: u64) -> Result<(Duration, SystemTime), Error> {
    let now = SystemTime::now();
    let baseline = with_scope(serial, |scope| scope.baseline);
    let elapsed = now.duration_since(baseline).map_err(|err| {
        Error::new(ErrorKind::Time, "wall clock went backwards").with_source(err)
    })?;
    Ok((elapsed, now))
}

/// Render an elapsed time as seconds with microsecond precision, `S.ffffff`.
pub(crate) fn format_elapsed(elapsed: Duration) -> String {
    format!("{}.{:06}", elapsed.as_secs(), elapsed.subsec_micros())
}

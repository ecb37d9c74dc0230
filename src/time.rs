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

//! Wall-clock rendering, backed by either `jiff` (default) or `chrono`.

use std::time::SystemTime;

use crate::Error;
use crate::ErrorKind;

#[cfg(feature = "jiff")]
mod jiff_impl {
    use super::*;

    /// Render `time` in the system time zone as `HH:MM:SS.ffffff`.
    pub fn format_clock(time: SystemTime) -> Result<String, Error> {
        let timestamp = jiff::Timestamp::try_from(time).map_err(|err| {
            Error::new(ErrorKind::Time, "system time out of range").with_source(err)
        })?;
        let zoned = timestamp.to_zoned(jiff::tz::TimeZone::system());
        Ok(zoned.strftime("%H:%M:%S.%6f").to_string())
    }
}

#[cfg(all(feature = "chrono", not(feature = "jiff")))]
mod chrono_impl {
    use super::*;

    /// Render `time` in the local time zone as `HH:MM:SS.ffffff`.
    pub fn format_clock(time: SystemTime) -> Result<String, Error> {
        if time < SystemTime::UNIX_EPOCH {
            return Err(Error::new(ErrorKind::Time, "system time before unix epoch"));
        }
        let local = chrono::DateTime::<chrono::Local>::from(time);
        Ok(local.format("%H:%M:%S%.6f").to_string())
    }
}

#[cfg(feature = "jiff")]
pub use jiff_impl::*; // Prefer jiff when both are enabled

#[cfg(all(feature = "chrono", not(feature = "jiff")))]
pub use chrono_impl::*;

#[cfg(not(any(feature = "jiff", feature = "chrono")))]
compile_error!("At least one of 'jiff' or 'chrono' features must be enabled");

/// Render the current time as `HH:MM:SS.ffffff`.
pub fn now() -> Result<String, Error> {
    format_clock(SystemTime::now())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn assert_clock_shape(s: &str) {
        let bytes = s.as_bytes();
        assert_eq!(bytes.len(), 15, "{s}");
        for (i, b) in bytes.iter().enumerate() {
            match i {
                2 | 5 => assert_eq!(*b, b':', "{s}"),
                8 => assert_eq!(*b, b'.', "{s}"),
                _ => assert!(b.is_ascii_digit(), "{s}"),
            }
        }
    }

    #[test]
    fn clock_has_microsecond_precision() {
        assert_clock_shape(&now().unwrap());
    }

    #[test]
    fn microseconds_are_kept() {
        let time = SystemTime::UNIX_EPOCH + Duration::from_micros(1_700_000_000_123_456);
        let rendered = format_clock(time).unwrap();
        assert_clock_shape(&rendered);
        assert!(rendered.ends_with(".123456"), "{rendered}");
    }
}

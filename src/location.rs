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

use std::panic;

/// The source location a message is emitted from.
///
/// The file is used for file overrides and rendered as its basename. An empty file suppresses
/// the `file:line:` header of the rendered line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Location<'a> {
    file: &'a str,
    line: u32,
    function: &'a str,
}

impl<'a> Location<'a> {
    /// Create a location from a file path and a line number.
    pub const fn new(file: &'a str, line: u32) -> Location<'a> {
        Location {
            file,
            line,
            function: "",
        }
    }

    /// A location that renders without a header and never matches a file override.
    pub const fn none() -> Location<'static> {
        Location::new("", 0)
    }

    /// The location of the caller, without a function name.
    #[track_caller]
    pub fn caller() -> Location<'static> {
        let location = panic::Location::caller();
        Location::new(location.file(), location.line())
    }

    /// Set the name of the enclosing function.
    pub const fn with_function(mut self, function: &'a str) -> Location<'a> {
        self.function = function;
        self
    }

    pub fn file(&self) -> &'a str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn function(&self) -> &'a str {
        self.function
    }

    /// The file name without its directories.
    pub fn basename(&self) -> &'a str {
        match self.file.rfind(|c| c == '/' || c == '\\') {
            Some(pos) => &self.file[pos + 1..],
            None => self.file,
        }
    }
}

/// Capture the current file, line and enclosing function as a [`Location`].
///
/// # Examples
///
/// ```
/// fn parse() -> rtdebug::Location<'static> {
///     rtdebug::location!()
/// }
///
/// let location = parse();
/// assert_eq!(location.function(), "parse");
/// assert!(location.file().ends_with(".rs"));
/// ```
#[macro_export]
macro_rules! location {
    () => {
        $crate::Location::new(file!(), line!()).with_function({
            fn f() {}
            fn type_name_of<T>(_: T) -> &'static str {
                ::std::any::type_name::<T>()
            }
            let path = type_name_of(f);
            let path = path.strip_suffix("::f").unwrap_or(path);
            // closures show up as `{{closure}}` segments
            path.rsplit("::")
                .find(|segment| !segment.starts_with('{'))
                .unwrap_or(path)
        })
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basename_strips_directories() {
        assert_eq!(Location::new("src/foo.cpp", 1).basename(), "foo.cpp");
        assert_eq!(Location::new("foo.cpp", 1).basename(), "foo.cpp");
        assert_eq!(Location::new("a/b/", 1).basename(), "");
        assert_eq!(Location::new(r"src\win.rs", 1).basename(), "win.rs");
    }

    #[test]
    fn caller_points_here() {
        let location = Location::caller();
        assert!(location.file().ends_with("location.rs"));
        assert_eq!(location.function(), "");
    }

    #[test]
    fn macro_names_enclosing_function() {
        let location = crate::location!();
        assert_eq!(location.function(), "macro_names_enclosing_function");

        let from_closure = (|| crate::location!())();
        assert_eq!(from_closure.function(), "macro_names_enclosing_function");
    }
}

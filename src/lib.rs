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

//! A thread-safe runtime debugging facility.
//!
//! # Overview
//!
//! Call sites emit categorized messages: call traces, values, pointers, strings, clock
//! measurements and formatted messages. Each message belongs to a class of one of two channels.
//! The debug channel carries instrumentation; the info channel carries user-facing info, warning,
//! error and fatal messages. A message is written when its class is enabled, unless a file or
//! module override says otherwise.
//!
//! Written lines look like this:
//!
//! ```text
//! 22:44:57.172105 4711.01: main.rs:12:Entering main()
//! 22:44:57.172219 4711.01:  main.rs:14:argc = 1, 0x00000001
//! 22:44:57.172276 4711.02: worker.rs:40:Warning: queue is full
//! ```
//!
//! Lines of concurrent threads never interleave. Each thread gets a sequential id in order of
//! its first output, and nested call traces are indented per thread.
//!
//! # Configuration
//!
//! A configuration string is a list of tokens separated by spaces, commas or semicolons:
//!
//! * `@name` enables a class, `!@name` or `@!name` disables it (`all` for every class);
//! * `+name` sets a flag (`always`, `startup`, `all`), `!+name` clears it;
//! * `&key` shows messages from files whose path contains `key`, `!&key` hides them;
//! * `%key` shows messages tagged with module `key`, `!%key` hides them;
//! * `ansi` turns color highlighting on, `!ansi` turns it off.
//!
//! Module overrides beat file overrides, which beat the class bits.
//!
//! # Examples
//!
//! ```
//! use rtdebug::class::DebugClass;
//! use rtdebug::class::InfoClass;
//!
//! // SAFETY: no other thread reads the environment concurrently.
//! unsafe { std::env::set_var("APP_DEBUG", "@ctrace !@report") };
//! let debugger = rtdebug::init("APP_DEBUG");
//!
//! let location = rtdebug::location!();
//! debugger.enter(DebugClass::CallTrace, "", location);
//! debugger.info_message(InfoClass::Info, "", location, format_args!("{} items", 3));
//! debugger.leave(DebugClass::CallTrace, "", location);
//!
//! rtdebug::destroy();
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod append;
pub mod bridge;
pub mod class;
pub mod filter;
pub mod layout;
pub mod trap;

mod clock;
mod debugger;
mod error;
mod location;
mod record;
mod thread;
mod time;

pub use self::debugger::Debugger;
pub use self::debugger::DebuggerBuilder;
pub use self::debugger::Lifecycle;
pub use self::debugger::destroy;
pub use self::debugger::init;
pub use self::debugger::instance;
pub use self::debugger::lifecycle;
pub use self::error::Error;
pub use self::error::ErrorKind;
pub use self::location::Location;
pub use self::record::Scalar;

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

use crate::Debugger;
use crate::Location;
use crate::class::InfoClass;

fn info_class(level: log::Level) -> InfoClass {
    match level {
        log::Level::Error => InfoClass::Error,
        log::Level::Warn => InfoClass::Warning,
        log::Level::Info => InfoClass::Info,
        log::Level::Debug => InfoClass::Verbose,
        log::Level::Trace => InfoClass::Debug,
    }
}

fn forward(debugger: &Debugger, record: &log::Record) {
    let location = Location::new(record.file().unwrap_or_default(), record.line().unwrap_or(0));
    debugger.info_message(
        info_class(record.level()),
        record.target(),
        location,
        *record.args(),
    );
}

/// A [`log::Log`] writing records to the info channel of a debugger.
///
/// Levels map to classes as `error` to Error, `warn` to Warning, `info` to Info, `debug` to
/// Verbose and `trace` to Debug. The record's target is the module tag.
#[derive(Debug, Clone)]
pub struct LogBridge {
    debugger: Arc<Debugger>,
}

impl LogBridge {
    pub fn new(debugger: Arc<Debugger>) -> Self {
        Self { debugger }
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.debugger
            .matches(info_class(metadata.level()), metadata.target(), "")
    }

    fn log(&self, record: &log::Record) {
        forward(&self.debugger, record);
    }

    fn flush(&self) {
        self.debugger.flush();
    }
}

struct GlobalBridge(());

impl log::Log for GlobalBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        crate::instance().matches(info_class(metadata.level()), metadata.target(), "")
    }

    fn log(&self, record: &log::Record) {
        forward(&crate::instance(), record);
    }

    fn flush(&self) {
        crate::instance().flush();
    }
}

/// Set up the log crate global logger to write to the process-wide debugger.
///
/// Records follow the process-wide debugger across [`destroy`](crate::destroy): each record goes
/// to the instance current at the time it is logged.
///
/// This function will set the global maximum log level to `Trace`. To override this, call
/// [`log::set_max_level`] after this function.
///
/// # Errors
///
/// Return an error if the log crate global logger has already been set.
///
/// # Examples
///
/// ```
/// rtdebug::bridge::try_setup_log_crate().unwrap();
/// log::info!("This is an info message.");
/// ```
pub fn try_setup_log_crate() -> Result<(), log::SetLoggerError> {
    static LOGGER: GlobalBridge = GlobalBridge(());
    log::set_logger(&LOGGER)?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}

/// Set up the log crate global logger to write to `debugger`.
///
/// # Errors
///
/// Return an error if the log crate global logger has already been set.
pub fn try_setup_log_crate_with(debugger: Arc<Debugger>) -> Result<(), log::SetLoggerError> {
    log::set_boxed_logger(Box::new(LogBridge::new(debugger)))?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}

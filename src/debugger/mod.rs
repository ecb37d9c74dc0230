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

//! The debugger: filtering, serialized output and configuration.

use std::fmt;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::RwLockReadGuard;
use std::sync::RwLockWriteGuard;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

pub use self::builder::DebuggerBuilder;
pub use self::global::Lifecycle;
pub use self::global::destroy;
pub use self::global::init;
pub use self::global::instance;
pub use self::global::lifecycle;

use crate::Error;
use crate::Location;
use crate::append::Append;
use crate::class::Channel;
use crate::class::Class;
use crate::class::ClassMask;
use crate::class::DebugClass;
use crate::class::Flags;
use crate::class::InfoClass;
use crate::clock;
use crate::filter::ChannelFilter;
use crate::filter::Directive;
use crate::filter::Overrides;
use crate::filter::ParseResult;
use crate::filter::parse_spec;
use crate::layout::LineContext;
use crate::layout::TextLayout;
use crate::record::Body;
use crate::record::Scalar;
use crate::thread;
use crate::thread::ThreadRegistry;
use crate::time;
use crate::trap::Trap;

mod builder;
mod global;


/// Filter state of one channel.
#[derive(Debug)]
struct ChannelState {
    filter: ChannelFilter,
    overrides: RwLock<Overrides>,
}

impl ChannelState {
    fn new(classes: ClassMask) -> Self {
        Self {
            filter: ChannelFilter::new(classes),
            overrides: RwLock::new(Overrides::default()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Overrides> {
        self.overrides.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Overrides> {
        self.overrides.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn update<R>(&self, f: impl FnOnce(&mut Overrides) -> R) -> R {
        let mut overrides = self.write();
        let result = f(&mut overrides);
        self.filter.sync_overridden(&overrides);
        result
    }

    fn admits(&self, bit: u32, module: &str, file: &str) -> bool {
        let enabled = self.filter.classes().contains(bit);
        if !self.filter.is_overridden() {
            return enabled;
        }
        self.read().decide(enabled, module, file)
    }
}

/// Everything behind the output lock.
#[derive(Debug)]
struct Output {
    threads: ThreadRegistry,
    append: Box<dyn Append>,
}

/// A runtime debugger.
///
/// Every message carries a class, a module tag and a source location. A message is written
/// when its channel admits it: the class bit must be enabled, unless a file override matching the
/// location's path or a module override naming the tag says otherwise. Admitted messages are
/// written one whole line at a time, so lines of concurrent threads never interleave.
///
/// Logging never fails: a line that cannot be produced is dropped and the error is handed to the
/// debugger's [`Trap`].
///
/// # Examples
///
/// ```
/// use rtdebug::Debugger;
/// use rtdebug::Location;
/// use rtdebug::append::Memory;
/// use rtdebug::class::Channel;
/// use rtdebug::class::DebugClass;
///
/// let memory = Memory::default();
/// let debugger = Debugger::builder()
///     .append(memory.clone())
///     .timestamp(false)
///     .process_id(false)
///     .spec(Channel::Debug, "@ctrace")
///     .build();
///
/// let location = Location::new("src/main.rs", 10).with_function("main");
/// debugger.enter(DebugClass::CallTrace, "", location);
/// debugger.show_value(DebugClass::Report, "", 42u8, "answer", location);
/// debugger.leave(DebugClass::CallTrace, "", location);
///
/// assert_eq!(
///     memory.lines(),
///     vec![
///         "01: main.rs:10:Entering main()",
///         "01:  main.rs:10:answer = 42, 0x2a, '*'",
///         "01: main.rs:10:Leaving main()",
///     ]
/// );
/// ```
#[derive(Debug)]
pub struct Debugger {
    serial: u64,
    pid: u32,
    debug: ChannelState,
    info: ChannelState,
    highlighting: AtomicBool,
    layout: TextLayout,
    output: Mutex<Output>,
    trap: Box<dyn Trap>,
}

impl Drop for Debugger {
    fn drop(&mut self) {
        thread::retire(self.serial);
    }
}

impl Debugger {
    /// Create a new [`DebuggerBuilder`].
    pub fn builder() -> DebuggerBuilder {
        DebuggerBuilder::new()
    }

    fn new(
        append: Box<dyn Append>,
        trap: Box<dyn Trap>,
        layout: TextLayout,
        highlighting: bool,
    ) -> Self {
        Self {
            serial: thread::register(),
            pid: std::process::id(),
            debug: ChannelState::new(Channel::Debug.default_classes()),
            info: ChannelState::new(Channel::Info.default_classes()),
            highlighting: AtomicBool::new(highlighting),
            layout,
            output: Mutex::new(Output {
                threads: ThreadRegistry::default(),
                append,
            }),
            trap,
        }
    }

    fn channel(&self, channel: Channel) -> &ChannelState {
        match channel {
            Channel::Debug => &self.debug,
            Channel::Info => &self.info,
        }
    }

    fn output(&self) -> MutexGuard<'_, Output> {
        self.output.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether a message of `class` tagged `module` from `file` would be written.
    pub fn matches(&self, class: impl Into<Class>, module: &str, file: &str) -> bool {
        let class = class.into();
        self.channel(class.channel())
            .admits(class.bit(), module, file)
    }

    fn admits(&self, class: Class, module: &str, location: &Location<'_>) -> bool {
        self.channel(class.channel())
            .admits(class.bit(), module, location.file())
    }

    fn write(
        &self,
        class: Class,
        location: Location<'_>,
        indent: usize,
        body: Body<'_>,
    ) -> Result<(), Error> {
        let mut output = self.output();
        let time = if self.layout.timestamp {
            Some(time::now()?)
        } else {
            None
        };
        let tid = output.threads.current();
        let cx = LineContext {
            class,
            time: time.as_deref(),
            pid: self.pid,
            tid,
            indent,
            highlighting: self.highlighting(),
            location,
        };
        let line = self.layout.format(&cx, &body)?;
        output
            .append
            .append(class.stream(), line.as_bytes())
            .map_err(|err| err.with_context("thread", tid))
    }

    fn emit(&self, class: Class, location: Location<'_>, body: Body<'_>) {
        let indent = thread::indent(self.serial);
        if let Err(err) = self.write(class, location, indent, body) {
            self.trap.trap(&err);
        }
    }

    /// Write `Entering f()` and indent the thread's following lines by one more space.
    pub fn enter(&self, class: DebugClass, module: &str, location: Location<'_>) {
        let class = Class::from(class);
        if !self.admits(class, module, &location) {
            return;
        }
        let function = location.function();
        self.emit(class, location, Body::Enter { function });
        thread::enter_scope(self.serial);
    }

    /// Take back one level of indent and write `Leaving f()`.
    pub fn leave(&self, class: DebugClass, module: &str, location: Location<'_>) {
        let class = Class::from(class);
        if !self.admits(class, module, &location) {
            return;
        }
        thread::leave_scope(self.serial);
        let function = location.function();
        self.emit(class, location, Body::Leave { function });
    }

    /// Like [`Debugger::leave`], also showing the returned value.
    pub fn ret(
        &self,
        class: DebugClass,
        module: &str,
        location: Location<'_>,
        result: impl Into<Scalar>,
    ) {
        let class = Class::from(class);
        if !self.admits(class, module, &location) {
            return;
        }
        thread::leave_scope(self.serial);
        let function = location.function();
        let result = result.into();
        self.emit(class, location, Body::Return { function, result });
    }

    /// Write `name = value` in decimal and hex, and as a character for single bytes.
    pub fn show_value(
        &self,
        class: DebugClass,
        module: &str,
        value: impl Into<Scalar>,
        name: &str,
        location: Location<'_>,
    ) {
        let class = Class::from(class);
        if !self.admits(class, module, &location) {
            return;
        }
        let value = value.into();
        self.emit(class, location, Body::Value { name, value });
    }

    /// Write the address `ptr` points to, or `NULL`.
    pub fn show_pointer<T: ?Sized>(
        &self,
        class: DebugClass,
        module: &str,
        ptr: *const T,
        name: &str,
        location: Location<'_>,
    ) {
        let class = Class::from(class);
        if !self.admits(class, module, &location) {
            return;
        }
        let address = ptr.cast::<()>() as usize;
        self.emit(class, location, Body::Pointer { name, address });
    }

    /// Write the address and the contents of `text`.
    pub fn show_string(
        &self,
        class: DebugClass,
        module: &str,
        text: &str,
        name: &str,
        location: Location<'_>,
    ) {
        let class = Class::from(class);
        if !self.admits(class, module, &location) {
            return;
        }
        let address = text.as_ptr() as usize;
        self.emit(
            class,
            location,
            Body::Text {
                name,
                address,
                text,
            },
        );
    }

    /// Write `message` as is.
    pub fn show_message(
        &self,
        class: DebugClass,
        module: &str,
        message: &str,
        location: Location<'_>,
    ) {
        let class = Class::from(class);
        if !self.admits(class, module, &location) {
            return;
        }
        self.emit(class, location, Body::Message(message));
    }

    /// Restart the calling thread's clock and write the time it was started at.
    pub fn start_clock(
        &self,
        class: DebugClass,
        module: &str,
        label: &str,
        location: Location<'_>,
    ) {
        let class = Class::from(class);
        if !self.admits(class, module, &location) {
            return;
        }
        let started = clock::start(self.serial);
        let result = time::format_clock(started).and_then(|at| {
            let indent = thread::indent(self.serial);
            self.write(class, location, indent, Body::ClockStart { label, at: &at })
        });
        if let Err(err) = result {
            self.trap.trap(&err);
        }
    }

    /// Write the time elapsed since the calling thread's clock was started.
    ///
    /// The clock keeps running: a later stop measures from the same start. A thread that never
    /// started its clock measures from its first use of this debugger.
    pub fn stop_clock(
        &self,
        class: DebugClass,
        module: &str,
        label: &str,
        location: Location<'_>,
    ) {
        let class = Class::from(class);
        if !self.admits(class, module, &location) {
            return;
        }
        let result = clock::stop(self.serial).and_then(|(elapsed, now)| {
            let at = time::format_clock(now)?;
            let indent = thread::indent(self.serial);
            self.write(
                class,
                location,
                indent,
                Body::ClockStop {
                    label,
                    at: &at,
                    elapsed,
                },
            )
        });
        if let Err(err) = result {
            self.trap.trap(&err);
        }
    }

    /// Write a formatted message on the debug channel.
    ///
    /// A [`Location::none`] location writes the message without the `file:line:` header.
    pub fn debug_message(
        &self,
        class: DebugClass,
        module: &str,
        location: Location<'_>,
        args: fmt::Arguments<'_>,
    ) {
        let class = Class::from(class);
        if !self.admits(class, module, &location) {
            return;
        }
        self.emit(class, location, Body::Formatted { label: "", args });
    }

    /// Write a formatted message on the info channel.
    ///
    /// Every class but [`InfoClass::Info`] prefixes the message with its label, as in
    /// `Warning: disk almost full`. An admitted [`InfoClass::Fatal`] message is flushed and then
    /// the process is aborted.
    pub fn info_message(
        &self,
        class: InfoClass,
        module: &str,
        location: Location<'_>,
        args: fmt::Arguments<'_>,
    ) {
        let label = match class {
            InfoClass::Info => "",
            InfoClass::Verbose => "Verbose: ",
            InfoClass::Warning => "Warning: ",
            InfoClass::Error => "Error: ",
            InfoClass::Fatal => "Fatal: ",
            InfoClass::Debug => "Debug: ",
        };
        let fatal = class == InfoClass::Fatal;
        let class = Class::from(class);
        if !self.admits(class, module, &location) {
            return;
        }
        self.emit(class, location, Body::Formatted { label, args });
        if fatal {
            self.flush();
            std::process::abort();
        }
    }

    /// Abort the process unless `holds`, writing `failed assertion 'expr'` first when the
    /// assert class is admitted.
    pub fn assertion(&self, module: &str, location: Location<'_>, expr: &str, holds: bool) {
        if holds {
            return;
        }
        let class = Class::from(DebugClass::Assert);
        if self.admits(class, module, &location) {
            self.emit(
                class,
                location,
                Body::Formatted {
                    label: "",
                    args: format_args!("failed assertion '{expr}'"),
                },
            );
            self.flush();
        }
        std::process::abort();
    }

    /// Flush the destination.
    pub fn flush(&self) {
        let result = self.output().append.flush();
        if let Err(err) = result {
            self.trap.trap(&err);
        }
    }
}

// configuration
impl Debugger {
    /// The enabled classes of `channel`.
    pub fn classes(&self, channel: Channel) -> ClassMask {
        self.channel(channel).filter.classes()
    }

    /// Replace the enabled classes of `channel`.
    pub fn set_classes(&self, channel: Channel, classes: ClassMask) {
        self.channel(channel).filter.store_classes(classes);
    }

    /// Enable `classes` in addition to those already enabled.
    pub fn enable_classes(&self, channel: Channel, classes: impl Into<ClassMask>) {
        self.channel(channel).filter.insert_classes(classes.into());
    }

    /// Disable `classes`, leaving the others alone.
    pub fn disable_classes(&self, channel: Channel, classes: impl Into<ClassMask>) {
        self.channel(channel).filter.remove_classes(classes.into());
    }

    /// Disable every class of `channel`.
    pub fn clear_classes(&self, channel: Channel) {
        self.set_classes(channel, ClassMask::NONE);
    }

    pub fn flags(&self, channel: Channel) -> Flags {
        self.channel(channel).filter.flags()
    }

    pub fn set_flags(&self, channel: Channel, flags: Flags) {
        self.channel(channel).filter.store_flags(flags);
    }

    pub fn enable_flags(&self, channel: Channel, flags: Flags) {
        self.channel(channel).filter.insert_flags(flags);
    }

    pub fn disable_flags(&self, channel: Channel, flags: Flags) {
        self.channel(channel).filter.remove_flags(flags);
    }

    pub fn clear_flags(&self, channel: Channel) {
        self.set_flags(channel, Flags::NONE);
    }

    /// The override registered for `module`, if any.
    pub fn module(&self, channel: Channel, module: &str) -> Option<bool> {
        self.channel(channel).read().module(module)
    }

    /// Show (`true`) or hide (`false`) every message tagged `module`, whatever its class.
    ///
    /// Module keys are stored lowercase and matched exactly. An empty key is ignored.
    pub fn set_module(&self, channel: Channel, module: &str, show: bool) {
        self.channel(channel)
            .update(|overrides| overrides.set_module(module, show));
    }

    pub fn remove_module(&self, channel: Channel, module: &str) -> Option<bool> {
        self.channel(channel)
            .update(|overrides| overrides.remove_module(module))
    }

    pub fn clear_modules(&self, channel: Channel) {
        self.channel(channel).update(Overrides::clear_modules);
    }

    /// Every module override of `channel`, sorted by key.
    pub fn modules(&self, channel: Channel) -> Vec<(String, bool)> {
        self.channel(channel).read().modules()
    }

    /// The override registered under the file key `key`, if any.
    pub fn file(&self, channel: Channel, key: &str) -> Option<bool> {
        self.channel(channel).read().file(key)
    }

    /// Show (`true`) or hide (`false`) every message whose file path contains `key`.
    ///
    /// Keys are matched case-insensitively. When several keys match a path, the one registered
    /// last decides; registering a key again makes it the latest. An empty key is ignored.
    pub fn set_file(&self, channel: Channel, key: &str, show: bool) {
        self.channel(channel)
            .update(|overrides| overrides.set_file(key, show));
    }

    pub fn remove_file(&self, channel: Channel, key: &str) -> Option<bool> {
        self.channel(channel)
            .update(|overrides| overrides.remove_file(key))
    }

    pub fn clear_files(&self, channel: Channel) {
        self.channel(channel).update(Overrides::clear_files);
    }

    /// Every file override of `channel`, oldest first.
    pub fn files(&self, channel: Channel) -> Vec<(String, bool)> {
        self.channel(channel).read().files()
    }

    /// Whether lines are decorated with ANSI colors.
    pub fn highlighting(&self) -> bool {
        self.highlighting.load(Ordering::Relaxed)
    }

    pub fn set_highlighting(&self, highlighting: bool) {
        self.highlighting.store(highlighting, Ordering::Relaxed);
    }

    /// Apply a configuration string to `channel`.
    ///
    /// See [`parse_spec`] for the grammar. Malformed tokens are skipped and returned in
    /// [`ParseResult::errors`].
    pub fn apply_spec(&self, channel: Channel, spec: &str) -> ParseResult {
        let result = parse_spec(channel, spec);
        for directive in result.directives.iter() {
            match directive {
                Directive::Classes {
                    classes,
                    enable: true,
                } => self.enable_classes(channel, *classes),
                Directive::Classes {
                    classes,
                    enable: false,
                } => self.disable_classes(channel, *classes),
                Directive::Flags {
                    flags,
                    enable: true,
                } => self.enable_flags(channel, *flags),
                Directive::Flags {
                    flags,
                    enable: false,
                } => self.disable_flags(channel, *flags),
                Directive::File { key, show } => self.set_file(channel, key, *show),
                Directive::Module { key, show } => self.set_module(channel, key, *show),
                Directive::Highlighting(on) => self.set_highlighting(*on),
            }
        }
        result
    }

    fn apply_env_vars(&self, name: &str) {
        let vars = [
            (Channel::Debug, name.to_string()),
            (Channel::Info, format!("{name}_INFO")),
        ];
        for (channel, var) in vars {
            if let Ok(spec) = std::env::var(&var) {
                self.apply_spec(channel, &spec);
            }
        }
    }

    /// Apply the environment variable `name` to the debug channel and `name_INFO` to the info
    /// channel, then announce the configuration of every channel with the startup flag set.
    pub fn apply_env(&self, name: &str) {
        self.apply_env_vars(name);
        self.announce();
    }

    fn announce(&self) {
        for channel in [Channel::Debug, Channel::Info] {
            if self.flags(channel).contains(Flags::STARTUP) {
                let summary = self.summary(channel);
                self.emit(
                    Class::Debug(DebugClass::Report),
                    Location::none(),
                    Body::Message(&summary),
                );
            }
        }
    }

    /// A one-line description of the configuration of `channel`.
    pub fn summary(&self, channel: Channel) -> String {
        fn join(overrides: Vec<(String, bool)>) -> String {
            overrides
                .into_iter()
                .map(|(key, show)| format!("{key}={}", if show { "on" } else { "off" }))
                .collect::<Vec<_>>()
                .join(" ")
        }

        let state = self.channel(channel);
        let (modules, files) = {
            let overrides = state.read();
            (join(overrides.modules()), join(overrides.files()))
        };
        format!(
            "{} channel: classes [{}] flags [{}] modules [{modules}] files [{files}] ansi {}",
            channel.name(),
            channel.class_names(state.filter.classes()).join(" "),
            state.filter.flags().names().join(" "),
            if self.highlighting() { "on" } else { "off" },
        )
    }
}

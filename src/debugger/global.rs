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

//! The process-wide debugger behind [`init`], [`instance`] and [`destroy`].

use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use crate::debugger::Debugger;

static GLOBAL: RwLock<Option<Arc<Debugger>>> = RwLock::new(None);
static DESTROYED: AtomicBool = AtomicBool::new(false);

/// The state of the process-wide debugger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Never created.
    Uninitialized,
    /// Created and not destroyed since.
    Active,
    /// Destroyed; the next use creates a fresh one.
    Destroyed,
}

/// The process-wide debugger, created with default settings on first use.
pub fn instance() -> Arc<Debugger> {
    if let Some(debugger) = GLOBAL
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
    {
        return debugger.clone();
    }

    let mut global = GLOBAL.write().unwrap_or_else(PoisonError::into_inner);
    global
        .get_or_insert_with(|| Arc::new(Debugger::builder().build()))
        .clone()
}

/// Configure the process-wide debugger from the environment.
///
/// The variable `name` configures the debug channel and `name_INFO` the info channel; see
/// [`Debugger::apply_env`].
///
/// # Examples
///
/// ```
/// use rtdebug::class::Channel;
/// use rtdebug::class::DebugClass;
///
/// // SAFETY: no other thread reads the environment concurrently.
/// unsafe { std::env::set_var("MYAPP_DEBUG", "@ctrace %net") };
/// let debugger = rtdebug::init("MYAPP_DEBUG");
/// assert!(debugger.matches(DebugClass::CallTrace, "", "main.rs"));
/// assert_eq!(debugger.module(Channel::Debug, "net"), Some(true));
/// rtdebug::destroy();
/// ```
pub fn init(name: &str) -> Arc<Debugger> {
    let debugger = instance();
    debugger.apply_env(name);
    debugger
}

/// Tear down the process-wide debugger.
///
/// Callers still holding the debugger keep a working instance; later calls to [`instance`] or
/// [`init`] create a fresh one.
pub fn destroy() {
    let mut global = GLOBAL.write().unwrap_or_else(PoisonError::into_inner);
    if let Some(debugger) = global.take() {
        DESTROYED.store(true, Ordering::Release);
        drop(global);
        debugger.flush();
    }
}

/// The current state of the process-wide debugger.
pub fn lifecycle() -> Lifecycle {
    let global = GLOBAL.read().unwrap_or_else(PoisonError::into_inner);
    match (global.is_some(), DESTROYED.load(Ordering::Acquire)) {
        (true, _) => Lifecycle::Active,
        (false, true) => Lifecycle::Destroyed,
        (false, false) => Lifecycle::Uninitialized,
    }
}

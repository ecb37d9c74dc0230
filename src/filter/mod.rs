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

//! Class masks, module and file overrides, and the decision whether a message passes.

use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;

use crate::class::ClassMask;
use crate::class::Flags;

mod spec;

pub use self::spec::Directive;
pub use self::spec::ParseResult;
pub use self::spec::parse_spec;

#[cfg(test)]
mod tests;

/// The lock-free part of a channel's filter state.
///
/// Masks are stored in atomics so the fast path can test a class bit without taking any lock.
#[derive(Debug)]
pub(crate) struct ChannelFilter {
    classes: AtomicU32,
    flags: AtomicU32,
    // mirrors `!Overrides::is_empty()` of the same channel, written under its write lock
    overridden: AtomicBool,
}

impl ChannelFilter {
    pub(crate) fn new(classes: ClassMask) -> Self {
        Self {
            classes: AtomicU32::new(classes.bits()),
            flags: AtomicU32::new(Flags::NONE.bits()),
            overridden: AtomicBool::new(false),
        }
    }

    pub(crate) fn classes(&self) -> ClassMask {
        ClassMask::from_bits(self.classes.load(Ordering::Acquire))
    }

    pub(crate) fn store_classes(&self, classes: ClassMask) {
        self.classes.store(classes.bits(), Ordering::Release);
    }

    pub(crate) fn insert_classes(&self, classes: ClassMask) {
        self.classes.fetch_or(classes.bits(), Ordering::AcqRel);
    }

    pub(crate) fn remove_classes(&self, classes: ClassMask) {
        self.classes.fetch_and(!classes.bits(), Ordering::AcqRel);
    }

    pub(crate) fn flags(&self) -> Flags {
        Flags::from_bits(self.flags.load(Ordering::Acquire))
    }

    pub(crate) fn store_flags(&self, flags: Flags) {
        self.flags.store(flags.bits(), Ordering::Release);
    }

    pub(crate) fn insert_flags(&self, flags: Flags) {
        self.flags.fetch_or(flags.bits(), Ordering::AcqRel);
    }

    pub(crate) fn remove_flags(&self, flags: Flags) {
        self.flags.fetch_and(!flags.bits(), Ordering::AcqRel);
    }

    pub(crate) fn is_overridden(&self) -> bool {
        self.overridden.load(Ordering::Acquire)
    }

    pub(crate) fn sync_overridden(&self, overrides: &Overrides) {
        self.overridden
            .store(!overrides.is_empty(), Ordering::Release);
    }
}

/// Module and file overrides of one channel.
///
/// Module keys are matched exactly, ignoring ASCII case, against the tag a message carries. File
/// keys are matched as case-insensitive substrings of the message's file path; when several keys
/// match, the one registered most recently decides.
#[derive(Debug, Default, Clone)]
pub(crate) struct Overrides {
    modules: HashMap<String, bool>,
    // registration order, oldest first
    files: Vec<(String, bool)>,
}

impl Overrides {
    pub(crate) fn is_empty(&self) -> bool {
        self.modules.is_empty() && self.files.is_empty()
    }

    pub(crate) fn set_module(&mut self, module: &str, show: bool) {
        if module.is_empty() {
            return;
        }
        self.modules.insert(module.to_ascii_lowercase(), show);
    }

    pub(crate) fn module(&self, module: &str) -> Option<bool> {
        self.modules.get(&module.to_ascii_lowercase()).copied()
    }

    pub(crate) fn remove_module(&mut self, module: &str) -> Option<bool> {
        self.modules.remove(&module.to_ascii_lowercase())
    }

    pub(crate) fn clear_modules(&mut self) {
        self.modules.clear();
    }

    pub(crate) fn modules(&self) -> Vec<(String, bool)> {
        let mut modules: Vec<_> = self
            .modules
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        modules.sort();
        modules
    }

    pub(crate) fn set_file(&mut self, key: &str, show: bool) {
        if key.is_empty() {
            return;
        }
        let key = key.to_ascii_lowercase();
        self.files.retain(|(k, _)| *k != key);
        self.files.push((key, show));
    }

    pub(crate) fn file(&self, key: &str) -> Option<bool> {
        let key = key.to_ascii_lowercase();
        self.files.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    pub(crate) fn remove_file(&mut self, key: &str) -> Option<bool> {
        let key = key.to_ascii_lowercase();
        let pos = self.files.iter().position(|(k, _)| *k == key)?;
        Some(self.files.remove(pos).1)
    }

    pub(crate) fn clear_files(&mut self) {
        self.files.clear();
    }

    pub(crate) fn files(&self) -> Vec<(String, bool)> {
        self.files.clone()
    }

    /// Decide whether a message passes, given whether its class bit is enabled.
    ///
    /// A module override beats a file override, which beats the class bit.
    pub(crate) fn decide(&self, class_enabled: bool, module: &str, file: &str) -> bool {
        let mut result = class_enabled;

        if !file.is_empty() && !self.files.is_empty() {
            let file = file.to_ascii_lowercase();
            let latest = self
                .files
                .iter()
                .rev()
                .find(|(k, _)| file.contains(k.as_str()));
            if let Some((_, show)) = latest {
                result = *show;
            }
        }

        if !module.is_empty() && !self.modules.is_empty() {
            if let Some(show) = self.module(module) {
                result = show;
            }
        }

        result
    }
}

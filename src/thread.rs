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

//! Per-thread bookkeeping: sequential ids, call depth and clock baseline.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::thread::ThreadId;
use std::time::SystemTime;

/// Sequential thread ids of one debugger. Lives behind the debugger's lock.
#[derive(Debug)]
pub(crate) struct ThreadRegistry {
    ids: HashMap<ThreadId, u32>,
    next: u32,
}

impl Default for ThreadRegistry {
    fn default() -> Self {
        Self {
            ids: HashMap::new(),
            next: 1,
        }
    }
}

impl ThreadRegistry {
    /// The id of `thread`, allocating the next one on first use.
    pub(crate) fn id_of(&mut self, thread: ThreadId) -> u32 {
        let next = &mut self.next;
        *self.ids.entry(thread).or_insert_with(|| {
            let id = *next;
            *next = next.saturating_add(1);
            id
        })
    }

    /// The id of the calling thread.
    pub(crate) fn current(&mut self) -> u32 {
        self.id_of(std::thread::current().id())
    }
}

/// The state a thread keeps for one debugger.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Scope {
    pub(crate) indent: usize,
    pub(crate) baseline: SystemTime,
}

impl Scope {
    fn new() -> Self {
        Self {
            indent: 0,
            baseline: SystemTime::now(),
        }
    }
}

static NEXT_SERIAL: AtomicU64 = AtomicU64::new(1);
// serials of debuggers not yet dropped
static LIVE: Mutex<BTreeSet<u64>> = Mutex::new(BTreeSet::new());
// bumped on every drop; threads prune their scopes when it moves
static RETIRED: AtomicU64 = AtomicU64::new(0);

/// Allocate the serial of a new debugger.
pub(crate) fn register() -> u64 {
    let serial = NEXT_SERIAL.fetch_add(1, Ordering::Relaxed);
    LIVE.lock()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(serial);
    serial
}

/// Release the serial of a dropped debugger.
///
/// The calling thread forgets its scope at once. Other threads drop theirs the next time they
/// touch any debugger.
pub(crate) fn retire(serial: u64) {
    LIVE.lock()
        .unwrap_or_else(PoisonError::into_inner)
        .remove(&serial);
    RETIRED.fetch_add(1, Ordering::Release);
    forget(serial);
}

#[derive(Debug, Default)]
struct Scopes {
    retired: u64,
    scopes: HashMap<u64, Scope>,
}

impl Scopes {
    fn prune(&mut self) {
        let retired = RETIRED.load(Ordering::Acquire);
        if retired == self.retired {
            return;
        }
        self.retired = retired;
        let live = LIVE.lock().unwrap_or_else(PoisonError::into_inner);
        self.scopes.retain(|serial, _| live.contains(serial));
    }
}

thread_local! {
    static SCOPES: RefCell<Scopes> = RefCell::new(Scopes::default());
}

/// Run `f` on the calling thread's scope for the debugger `serial`, creating it on first touch.
///
/// During thread teardown the thread-local map may already be gone; `f` then sees a fresh scope
/// whose changes are discarded.
pub(crate) fn with_scope<R>(serial: u64, f: impl FnOnce(&mut Scope) -> R) -> R {
    match SCOPES.try_with(|_| ()) {
        Ok(()) => SCOPES.with(|scopes| {
            let mut scopes = scopes.borrow_mut();
            scopes.prune();
            f(scopes.scopes.entry(serial).or_insert_with(Scope::new))
        }),
        Err(_) => f(&mut Scope::new()),
    }
}

/// Forget the calling thread's scope for the debugger `serial`.
pub(crate) fn forget(serial: u64) {
    let _ = SCOPES.try_with(|scopes| scopes.borrow_mut().scopes.remove(&serial));
}

#[cfg(test)]
fn has_scope(serial: u64) -> bool {
    SCOPES.with(|scopes| scopes.borrow().scopes.contains_key(&serial))
}

/// The calling thread's indent for the debugger `serial`.
pub(crate) fn indent(serial: u64) -> usize {
    with_scope(serial, |scope| scope.indent)
}

/// Increase the calling thread's indent by one.
pub(crate) fn enter_scope(serial: u64) {
    with_scope(serial, |scope| scope.indent = scope.indent.saturating_add(1));
}

/// Decrease the calling thread's indent by one, never below zero. Returns the new indent.
pub(crate) fn leave_scope(serial: u64) -> usize {
    with_scope(serial, |scope| {
        scope.indent = scope.indent.saturating_sub(1);
        scope.indent
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential_and_stable() {
        let mut registry = ThreadRegistry::default();
        let main = registry.current();
        let other = std::thread::spawn(|| std::thread::current().id())
            .join()
            .unwrap();

        assert_eq!(main, 1);
        assert_eq!(registry.id_of(other), 2);
        assert_eq!(registry.current(), 1);
        assert_eq!(registry.id_of(other), 2);
    }

    #[test]
    fn indent_floors_at_zero() {
        let serial = register();
        for _ in 0..3 {
            enter_scope(serial);
        }
        assert_eq!(indent(serial), 3);
        for _ in 0..5 {
            leave_scope(serial);
        }
        assert_eq!(indent(serial), 0);
        retire(serial);
    }

    #[test]
    fn scopes_are_per_thread() {
        let serial = register();
        enter_scope(serial);
        let other = std::thread::spawn(move || indent(serial)).join().unwrap();
        assert_eq!(other, 0);
        assert_eq!(indent(serial), 1);
        retire(serial);
    }

    #[test]
    fn retired_scopes_are_pruned_on_other_threads() {
        let kept = register();
        let gone = register();
        enter_scope(kept);
        enter_scope(gone);

        std::thread::spawn(move || retire(gone)).join().unwrap();
        assert!(has_scope(gone));

        assert_eq!(indent(kept), 1);
        assert!(!has_scope(gone));
        assert!(has_scope(kept));
        retire(kept);
        assert!(!has_scope(kept));
    }
}

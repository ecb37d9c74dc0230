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

//! The process-wide debugger. Kept in one test since every step changes shared state.

use std::sync::Arc;

use rtdebug::Lifecycle;
use rtdebug::class::Channel;
use rtdebug::class::ClassMask;
use rtdebug::class::DebugClass;
use rtdebug::class::Flags;
use rtdebug::class::InfoClass;

#[test]
fn init_destroy_and_recreate() {
    assert_eq!(rtdebug::lifecycle(), Lifecycle::Uninitialized);

    // logging before init uses the built-in defaults
    let early = rtdebug::instance();
    assert_eq!(rtdebug::lifecycle(), Lifecycle::Active);
    assert_eq!(early.classes(Channel::Debug), Channel::Debug.default_classes());
    assert!(!early.matches(DebugClass::CallTrace, "", "main.rs"));

    // SAFETY: this test binary runs no other thread touching the environment.
    unsafe {
        std::env::set_var("LIFECYCLE_DEBUG", "@ctrace,&main.rs;!%noisy");
        std::env::set_var("LIFECYCLE_DEBUG_INFO", "!@all @error +always");
    }
    let debugger = rtdebug::init("LIFECYCLE_DEBUG");
    assert!(Arc::ptr_eq(&early, &debugger));
    assert!(debugger.matches(DebugClass::CallTrace, "", "main.rs"));
    assert_eq!(debugger.file(Channel::Debug, "main.rs"), Some(true));
    assert_eq!(debugger.module(Channel::Debug, "noisy"), Some(false));
    assert_eq!(
        debugger.classes(Channel::Info),
        ClassMask::from(InfoClass::Error)
    );
    assert_eq!(debugger.flags(Channel::Info), Flags::ALWAYS);
    assert_eq!(debugger.flags(Channel::Debug), Flags::NONE);

    rtdebug::destroy();
    assert_eq!(rtdebug::lifecycle(), Lifecycle::Destroyed);

    // a held debugger keeps working after teardown
    debugger.show_message(DebugClass::Report, "", "after destroy", rtdebug::Location::none());

    let fresh = rtdebug::instance();
    assert!(!Arc::ptr_eq(&fresh, &debugger));
    assert_eq!(rtdebug::lifecycle(), Lifecycle::Active);
    assert_eq!(fresh.classes(Channel::Debug), Channel::Debug.default_classes());
    assert!(fresh.modules(Channel::Debug).is_empty());

    rtdebug::destroy();
}

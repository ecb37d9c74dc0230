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

//! Fatal messages and failed assertions end the process. Each test re-runs itself in a child
//! process and inspects how the child ended.

use std::process::Command;
use std::process::Output;

use rtdebug::Debugger;
use rtdebug::Location;
use rtdebug::class::InfoClass;

const CHILD: &str = "RTDEBUG_FATAL_CHILD";

fn debugger() -> Debugger {
    Debugger::builder()
        .timestamp(false)
        .process_id(false)
        .build()
}

fn run_child(test: &str) -> Output {
    Command::new(std::env::current_exe().unwrap())
        .args([test, "--exact", "--nocapture", "--test-threads=1"])
        .env(CHILD, test)
        .output()
        .unwrap()
}

fn is_child(test: &str) -> bool {
    std::env::var(CHILD).is_ok_and(|v| v == test)
}

#[test]
fn fatal_message_aborts() {
    if is_child("fatal_message_aborts") {
        debugger().info_message(
            InfoClass::Fatal,
            "",
            Location::new("src/main.rs", 3),
            format_args!("cannot open {}", "db.sqlite"),
        );
        println!("still alive");
        return;
    }

    let output = run_child("fatal_message_aborts");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(
        stderr.contains("01: main.rs:3:Fatal: cannot open db.sqlite\n"),
        "{stderr}"
    );
    assert!(!stdout.contains("still alive"), "{stdout}");
}

#[test]
fn failed_assertion_aborts() {
    if is_child("failed_assertion_aborts") {
        let queue: Vec<u32> = vec![];
        debugger().assertion(
            "",
            Location::new("src/queue.rs", 21),
            "!queue.is_empty()",
            !queue.is_empty(),
        );
        println!("still alive");
        return;
    }

    let output = run_child("failed_assertion_aborts");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(
        stderr.contains("01: queue.rs:21:failed assertion '!queue.is_empty()'\n"),
        "{stderr}"
    );
    assert!(!stdout.contains("still alive"), "{stdout}");
}

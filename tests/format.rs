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

use std::fs::File;
use std::io::Read;

use insta::assert_snapshot;
use rtdebug::Debugger;
use rtdebug::Location;
use rtdebug::append::Memory;
use rtdebug::append::Writer;
use rtdebug::class::Channel;
use rtdebug::class::DebugClass;
use rtdebug::class::InfoClass;

fn bare(memory: &Memory) -> Debugger {
    Debugger::builder()
        .append(memory.clone())
        .timestamp(false)
        .process_id(false)
        .spec(Channel::Debug, "@all")
        .spec(Channel::Info, "@all")
        .build()
}

fn session(debugger: &Debugger) {
    let main = Location::new("/src/app/main.cpp", 10).with_function("main");
    let parse = Location::new("/src/app/parser.cpp", 42).with_function("parse");

    debugger.enter(DebugClass::CallTrace, "", main);
    debugger.show_value(DebugClass::Report, "", 3i32, "argc", main);
    debugger.enter(DebugClass::CallTrace, "parser", parse);
    debugger.show_value(DebugClass::Report, "parser", b'\t', "sep", parse);
    debugger.show_pointer(DebugClass::Report, "parser", std::ptr::null::<u8>(), "cursor", parse);
    debugger.debug_message(DebugClass::Warning, "parser", parse, format_args!("{} tokens left", 2));
    debugger.ret(DebugClass::CallTrace, "parser", parse, -22i32);
    debugger.info_message(InfoClass::Info, "", Location::none(), format_args!("parsed"));
    debugger.info_message(InfoClass::Warning, "", main, format_args!("deprecated flag"));
    debugger.leave(DebugClass::CallTrace, "", main);
}

#[test]
fn plain_lines() {
    let memory = Memory::default();
    session(&bare(&memory));

    assert_snapshot!(memory.contents(), @r"
    01: main.cpp:10:Entering main()
    01:  main.cpp:10:argc = 3, 0x00000003
    01:  parser.cpp:42:Entering parse()
    01:   parser.cpp:42:sep = 9, 0x09, '09'
    01:   parser.cpp:42:cursor = NULL
    01:   parser.cpp:42:2 tokens left
    01:  parser.cpp:42:Leaving parse() (result 0xffffffea, -22)
    01:  parsed
    01:  main.cpp:10:Warning: deprecated flag
    01: main.cpp:10:Leaving main()
    ");
}

#[test]
fn overrides_select_lines() {
    let memory = Memory::default();
    let debugger = bare(&memory);
    debugger.apply_spec(Channel::Debug, "!@all !%parser &main.cpp");
    session(&debugger);

    assert_snapshot!(memory.contents(), @r"
    01: main.cpp:10:Entering main()
    01:  main.cpp:10:argc = 3, 0x00000003
    01:  parsed
    01:  main.cpp:10:Warning: deprecated flag
    01: main.cpp:10:Leaving main()
    ");
}

#[test]
fn highlighted_lines() {
    let memory = Memory::default();
    let debugger = bare(&memory);
    debugger.set_highlighting(true);
    debugger.show_message(DebugClass::Report, "", "ok", Location::new("a.rs", 1));
    debugger.info_message(InfoClass::Error, "", Location::new("a.rs", 2), format_args!("bad"));

    let lines = memory.lines();
    assert_eq!(lines[0], "\x1b[41m01:\x1b[0m \x1b[32ma.rs:1:ok\x1b[0m");
    assert_eq!(lines[1], "\x1b[41m01:\x1b[0m \x1b[31ma.rs:2:Error: bad\x1b[0m");
}

#[test]
fn prefixes() {
    let memory = Memory::default();
    let debugger = Debugger::builder().append(memory.clone()).build();
    debugger.show_message(DebugClass::Report, "", "hello", Location::new("a.rs", 1));

    let line = memory.lines().pop().unwrap();
    let (time, rest) = line.split_once(' ').unwrap();
    assert_eq!(time.len(), "HH:MM:SS.ffffff".len(), "{line}");
    assert_eq!(rest, format!("{}.01: a.rs:1:hello", std::process::id()));
}

#[test]
fn writer_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("debug.log");
    let file = File::create(&path).unwrap();

    let debugger = Debugger::builder()
        .append(Writer::new(file))
        .timestamp(false)
        .process_id(false)
        .build();
    debugger.show_message(DebugClass::Report, "", "to disk", Location::new("a.rs", 1));
    debugger.info_message(InfoClass::Info, "", Location::none(), format_args!("also"));
    debugger.flush();

    let mut contents = String::new();
    File::open(&path)
        .unwrap()
        .read_to_string(&mut contents)
        .unwrap();
    assert_snapshot!(contents, @r"
    01: a.rs:1:to disk
    01: also
    ");
}

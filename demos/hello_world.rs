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

//! Run with `HELLO_WORLD="@ctrace +startup ansi"` to see call traces in color.

use rtdebug::Debugger;
use rtdebug::class::DebugClass;
use rtdebug::location;

const MODULE: &str = "hello";

fn output(debugger: &Debugger, text: &str) {
    debugger.enter(DebugClass::CallTrace, MODULE, location!());

    debugger.show_string(DebugClass::Report, MODULE, text, "text", location!());
    println!("{text}");

    debugger.leave(DebugClass::CallTrace, MODULE, location!());
}

fn main() {
    let debugger = rtdebug::init("HELLO_WORLD");
    let return_code = 0;

    debugger.enter(DebugClass::CallTrace, MODULE, location!());
    debugger.start_clock(DebugClass::TimeVal, MODULE, "output() measurement", location!());

    output(&debugger, "Hello to rtdebug!");

    debugger.stop_clock(DebugClass::TimeVal, MODULE, "output() measurement", location!());
    debugger.ret(DebugClass::CallTrace, MODULE, location!(), return_code);

    rtdebug::destroy();
    std::process::exit(return_code);
}

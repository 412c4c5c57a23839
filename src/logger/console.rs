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

use std::io::Write;

use crate::LevelColor;
use crate::Severity;

/// Prints a line to stderr for fatal, error and warning records, to stdout otherwise.
pub(crate) fn print(colors: &LevelColor, no_color: bool, level: Severity, line: &str, newline: bool) {
    let text = colors.colorize(no_color, level, line);
    let end = if newline { "\n" } else { "" };
    // console output is best-effort
    if level.is_stderr() {
        let _ = write!(std::io::stderr().lock(), "{text}{end}");
    } else {
        let _ = write!(std::io::stdout().lock(), "{text}{end}");
    }
}

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

use std::fmt::Write;

use jiff::Zoned;

#[derive(Debug)]
pub(crate) enum Clock {
    DefaultClock,
    #[cfg(test)]
    ManualClock(ManualClock),
}

impl Clock {
    pub(crate) fn now(&self) -> Zoned {
        match self {
            Clock::DefaultClock => Zoned::now(),
            #[cfg(test)]
            Clock::ManualClock(clock) => clock.now(),
        }
    }
}

/// The time could be reset.
#[derive(Debug)]
#[cfg(test)]
pub(crate) struct ManualClock {
    now: Zoned,
}

#[cfg(test)]
impl ManualClock {
    pub(crate) fn new(now: Zoned) -> ManualClock {
        ManualClock { now }
    }

    fn now(&self) -> Zoned {
        self.now.clone()
    }
}

/// Appends `<tz> YYYY-MM-DD HH:MM:SS.NNNNNNNNN` to `buf`.
///
/// `<tz>` is the whole-hour UTC offset, zero-padded to two characters. Offsets of ten hours or
/// more west of UTC need three (`-10`, `-11`, `-12`); they are printed in full rather than
/// truncated.
pub(crate) fn write_timestamp(buf: &mut String, now: &Zoned) {
    let tz = now.offset().seconds() / 3600;
    let _ = write!(
        buf,
        "{tz:02} {} {:02}:{:02}:{:02}.{:09}",
        now.date(),
        now.hour(),
        now.minute(),
        now.second(),
        now.subsec_nanosecond(),
    );
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn format(zoned: &str) -> String {
        let now = Zoned::from_str(zoned).unwrap();
        let clock = Clock::ManualClock(ManualClock::new(now));
        let mut buf = String::new();
        write_timestamp(&mut buf, &clock.now());
        buf
    }

    #[test]
    fn test_timestamp_layout() {
        assert_eq!(
            format("2024-08-10T17:12:52.000000123+08:00[+08:00]"),
            "08 2024-08-10 17:12:52.000000123"
        );
        assert_eq!(
            format("2024-01-02T03:04:05-05:00[-05:00]"),
            "-5 2024-01-02 03:04:05.000000000"
        );
        assert_eq!(
            format("2024-01-02T03:04:05[UTC]"),
            "00 2024-01-02 03:04:05.000000000"
        );
    }

    #[test]
    fn test_wide_offsets_are_not_truncated() {
        assert_eq!(
            format("2024-01-02T03:04:05-10:00[-10:00]"),
            "-10 2024-01-02 03:04:05.000000000"
        );
        assert_eq!(
            format("2024-01-02T03:04:05+14:00[+14:00]"),
            "14 2024-01-02 03:04:05.000000000"
        );
        // half-hour offsets keep the whole hours only
        assert_eq!(
            format("2024-01-02T03:04:05+05:30[+05:30]"),
            "05 2024-01-02 03:04:05.000000000"
        );
    }
}

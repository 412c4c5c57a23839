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

use std::fmt;
use std::ops::BitOr;
use std::ops::BitOrAssign;

/// The set of sinks a logger writes to.
///
/// Where an `Outputs` is passed as an override (for example to
/// [`Registry::get_or_create`](crate::Registry::get_or_create)), [`Outputs::NONE`] means "leave
/// the current setting unchanged" rather than "disable all sinks".
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Outputs(u8);

impl Outputs {
    pub const NONE: Outputs = Outputs(0);
    pub const CONSOLE: Outputs = Outputs(0x1);
    pub const FILE: Outputs = Outputs(0x2);
    pub const BOTH: Outputs = Outputs(0x3);

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Builds a set from raw bits, dropping unknown ones.
    pub const fn from_bits(bits: u8) -> Outputs {
        Outputs(bits & Outputs::BOTH.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: Outputs) -> bool {
        self.0 & other.0 == other.0 && !other.is_empty()
    }

    pub const fn has_console(self) -> bool {
        self.contains(Outputs::CONSOLE)
    }

    pub const fn has_file(self) -> bool {
        self.contains(Outputs::FILE)
    }
}

impl BitOr for Outputs {
    type Output = Outputs;

    fn bitor(self, rhs: Outputs) -> Outputs {
        Outputs(self.0 | rhs.0)
    }
}

impl BitOrAssign for Outputs {
    fn bitor_assign(&mut self, rhs: Outputs) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for Outputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Outputs::NONE => f.write_str("Outputs(NONE)"),
            Outputs::CONSOLE => f.write_str("Outputs(CONSOLE)"),
            Outputs::FILE => f.write_str("Outputs(FILE)"),
            _ => f.write_str("Outputs(CONSOLE | FILE)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains() {
        assert!(Outputs::BOTH.has_console());
        assert!(Outputs::BOTH.has_file());
        assert!(!Outputs::CONSOLE.has_file());
        assert!(!Outputs::NONE.contains(Outputs::NONE));
        assert_eq!(Outputs::CONSOLE | Outputs::FILE, Outputs::BOTH);
    }

    #[test]
    fn test_from_bits_masks_unknown() {
        assert_eq!(Outputs::from_bits(0xff), Outputs::BOTH);
        assert!(Outputs::from_bits(0x4).is_empty());
    }
}

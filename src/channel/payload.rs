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

use std::borrow::Cow;

/// A value that can be written to a [`FileChannel`](super::FileChannel) as raw bytes.
pub trait Payload {
    fn bytes(&self) -> &[u8];

    /// Whether the bytes are opaque binary rather than text.
    fn is_binary(&self) -> bool;
}

impl Payload for str {
    fn bytes(&self) -> &[u8] {
        self.as_bytes()
    }

    fn is_binary(&self) -> bool {
        false
    }
}

impl Payload for String {
    fn bytes(&self) -> &[u8] {
        self.as_bytes()
    }

    fn is_binary(&self) -> bool {
        false
    }
}

impl Payload for [u8] {
    fn bytes(&self) -> &[u8] {
        self
    }

    fn is_binary(&self) -> bool {
        true
    }
}

impl<const N: usize> Payload for [u8; N] {
    fn bytes(&self) -> &[u8] {
        self
    }

    fn is_binary(&self) -> bool {
        true
    }
}

impl Payload for Vec<u8> {
    fn bytes(&self) -> &[u8] {
        self
    }

    fn is_binary(&self) -> bool {
        true
    }
}

impl Payload for Cow<'_, str> {
    fn bytes(&self) -> &[u8] {
        self.as_bytes()
    }

    fn is_binary(&self) -> bool {
        false
    }
}

impl<T: Payload + ?Sized> Payload for &T {
    fn bytes(&self) -> &[u8] {
        (**self).bytes()
    }

    fn is_binary(&self) -> bool {
        (**self).is_binary()
    }
}

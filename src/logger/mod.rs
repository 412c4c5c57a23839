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

mod builder;
mod console;
mod format;
mod instance;
mod registry;

pub use self::builder::FILE_ENV;
pub use self::builder::LEVEL_ENV;
pub use self::builder::LoggerConfig;
pub use self::builder::RegistryBuilder;
pub use self::instance::AppendCallback;
pub use self::instance::Appended;
pub use self::instance::Logger;
pub use self::registry::Registry;

/// The smallest maximum file size a logger accepts.
pub const MIN_LOG_SIZE: u64 = 8192;

/// The maximum file size of a logger unless configured otherwise.
pub const DEFAULT_LOG_SIZE: u64 = size_of::<usize>() as u64 * 32 * 1024 * 1024;

/// The path of the default logger unless configured otherwise.
pub const DEFAULT_LOG_FILE: &str = "logger.log";

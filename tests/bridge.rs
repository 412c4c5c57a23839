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

use rotalog::Outputs;
use rotalog::Registry;
use rotalog::Severity;
use rotalog::bridge::LogBridge;
use tempfile::TempDir;

#[test]
fn test_log_macros_reach_the_file() {
    let dir = TempDir::new().unwrap();
    let registry = Registry::builder()
        .outputs(Outputs::FILE)
        .level(Severity::Debug)
        .sequence_number(false)
        .build();
    let logger = registry.get_or_create(dir.path().join("bridge.log"), Outputs::NONE, None);

    LogBridge::new(logger.clone())
        .with_filter("debug,noisy=error")
        .unwrap()
        .apply()
        .unwrap();
    assert!(LogBridge::new(logger.clone()).apply().is_err());

    log::info!(target: "app", "listening on {}", 8080);
    log::warn!(target: "noisy", "dropped by directive");
    log::trace!(target: "app", "below the directive level");
    log::error!(target: "noisy", "kept");
    log::logger().flush();

    let content = std::fs::read_to_string(logger.path()).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2, "{content}");
    assert!(lines[0].contains(" INFO][app] listening on 8080 (tests/bridge.rs+"));
    assert!(lines[1].contains(" ERROR][noisy] kept"));
}

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

use rand::Rng;
use rand::distr::Alphanumeric;
use rotalog::MIN_LOG_SIZE;
use rotalog::Outputs;
use rotalog::Registry;
use tempfile::TempDir;

fn random_line(rng: &mut impl Rng, i: usize) -> String {
    let len = rng.random_range(20..400);
    let body: String = rng
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect();
    format!("entry-{i:06} {body}")
}

#[test]
fn test_file_stays_within_bound() {
    let dir = TempDir::new().unwrap();
    let registry = Registry::builder()
        .outputs(Outputs::FILE)
        .max_size(MIN_LOG_SIZE)
        .build();
    let logger = registry.get_or_create(dir.path().join("nested/dir/app.log"), Outputs::NONE, None);

    let mut rng = rand::rng();
    let mut written = Vec::new();
    for i in 0..2_000 {
        let line = random_line(&mut rng, i);
        logger.warning(&line).unwrap();
        written.push(line);
    }
    logger.shrink_to_fit();
    logger.flush().unwrap();

    let content = std::fs::read_to_string(logger.path()).unwrap();
    assert!(content.len() as u64 <= MIN_LOG_SIZE);
    assert!(content.ends_with('\n'));

    // every kept line is whole and the most recent one survived
    let kept: Vec<&str> = content.lines().collect();
    assert!(!kept.is_empty());
    for line in &kept {
        let message = &line[line.find("] ").unwrap() + 2..];
        assert!(written.iter().any(|w| w == message), "corrupted line: {line}");
    }
    assert!(kept.last().unwrap().ends_with(written.last().unwrap().as_str()));

    let mut temp = logger.path().as_os_str().to_owned();
    temp.push(".1");
    assert!(!std::path::Path::new(&temp).exists());
}

#[test]
fn test_existing_oversized_file_is_shrunk_on_open() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("big.log");
    let mut rng = rand::rng();
    let old: String = (0..1_000)
        .map(|i| random_line(&mut rng, i) + "\n")
        .collect();
    std::fs::write(&path, &old).unwrap();
    assert!(old.len() as u64 > 2 * MIN_LOG_SIZE);

    let registry = Registry::builder()
        .outputs(Outputs::FILE)
        .max_size(2 * MIN_LOG_SIZE)
        .build();
    let logger = registry.get_or_create(&path, Outputs::NONE, None);
    logger.note("first after restart").unwrap();
    registry.close_all();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.len() as u64 <= 2 * MIN_LOG_SIZE);
    assert!(content.lines().last().unwrap().ends_with("first after restart"));
    let previous = content.lines().rev().nth(1).unwrap();
    assert!(old.ends_with(&format!("{previous}\n")));
}

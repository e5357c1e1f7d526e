//! Testing utilities shared by the fuzz harness and the regression tests.
//!
//! This module is gated behind the `testing` feature.
//!
//! # Provided helpers
//!
//! - [`FuzzScript`]: an `arbitrary` script biased towards quotes, escapes, comments and separators
//! - [`collapse_whitespace`]: reference collapsing for scripts without any structure
//! - [`check_split_invariants`]: split a script and assert the properties every split must satisfy
//! - [`test_split`]: the shared body of the `split` fuzz harness
//! - [`run_crash_dir_regression`]: replay saved fuzzer crash inputs under a time limit

extern crate std;

use alloc::string::String;
use alloc::vec::Vec;
use arbitrary::{Arbitrary, Unstructured};
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::{Delimiters, Error, split};

/// Script fragments that exercise the interplay between the scan states.
const FRAGMENTS: &[&str] = &[
    "SELECT", "1", "FROM t", "x", " ", "  ", "\n", "\t", "\r\n", ";", "'", "\"", "\\", "--", "/*",
    "*/", "/", "*", "-", "GO", "#", "{", "}", "$$", "é", "§",
];

/// A script assembled from structural fragments and arbitrary text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzScript(pub String);

impl<'a> Arbitrary<'a> for FuzzScript {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let len = u.int_in_range(0..=64)?;
        let mut script = String::new();
        for _ in 0..len {
            if u.ratio(1, 8)? {
                let text: &str = u.arbitrary()?;
                script.push_str(text);
            } else {
                script.push_str(u.choose(FRAGMENTS)?);
            }
        }
        Ok(Self(script))
    }
}

/// Collapse whitespace the way the splitter does for unstructured text.
#[must_use]
pub fn collapse_whitespace(script: &str) -> String {
    let mut collapsed = String::with_capacity(script.len());
    for c in script.chars() {
        if matches!(c, ' ' | '\n' | '\t') {
            if !collapsed.is_empty() && !collapsed.ends_with(' ') {
                collapsed.push(' ');
            }
        } else {
            collapsed.push(c);
        }
    }
    collapsed
}

/// Split `script` and assert the properties every split must satisfy.
///
/// # Errors
///
/// Returns the split error, after checking it is consistent with the script.
///
/// # Panics
///
/// Panics if any property is violated.
pub fn check_split_invariants(delimiters: &Delimiters, script: &str) -> Result<Vec<String>, Error> {
    let result = split(script, delimiters);

    let unstructured = !script.contains(['\'', '"', '\\'])
        && [
            delimiters.separator(),
            delimiters.comment_prefix(),
            delimiters.block_comment_start(),
        ]
        .iter()
        .all(|token| !script.contains(token));

    match &result {
        Ok(statements) => {
            for statement in statements {
                assert!(!statement.is_empty(), "Empty statement from {script:?}");
                assert!(
                    !statement.starts_with([' ', '\n', '\t']),
                    "Statement {statement:?} from {script:?} starts with whitespace"
                );
                if !statement.contains(['\'', '"']) {
                    assert!(
                        !statement.contains("  "),
                        "Uncollapsed whitespace in {statement:?} from {script:?}"
                    );
                }
            }
            if unstructured {
                let collapsed = collapse_whitespace(script);
                let expected: Vec<String> = if collapsed.is_empty() {
                    Vec::new()
                } else {
                    alloc::vec![collapsed]
                };
                assert_eq!(statements, &expected, "Unstructured script {script:?}");
            }
        }
        Err(Error::UnterminatedBlockComment {
            expected_delimiter,
            position,
        }) => {
            assert_eq!(expected_delimiter, delimiters.block_comment_end());
            assert!(
                script[*position..].starts_with(delimiters.block_comment_start()),
                "Error position {position} of {script:?} is not a block comment start"
            );
        }
    }

    if !script.contains(delimiters.block_comment_start()) {
        assert!(
            result.is_ok(),
            "Script {script:?} without block comments failed: {result:?}"
        );
    }

    result
}

/// Shared body of the `split` fuzz harness.
pub fn test_split(delimiters: &Delimiters, script: &FuzzScript) {
    let _ = check_split_invariants(delimiters, &script.0);
}

/// Replay every crash input in `crash_dir` through `test`.
///
/// New `.fuzz` files found in `workspace_dir` (the honggfuzz workspace of
/// the harness) are copied into `crash_dir` first, so that they become
/// permanent regression inputs.
///
/// # Panics
///
/// Panics if the directories cannot be read, if `test` panics, or if a
/// single input takes longer than `limit`.
pub fn run_crash_dir_regression(
    crash_dir: &str,
    workspace_dir: &str,
    limit: Duration,
    test: impl Fn(&[u8]),
) {
    let crash_dir = Path::new(crash_dir);
    fs::create_dir_all(crash_dir).expect("Failed to create crash input directory");

    if let Ok(entries) = fs::read_dir(workspace_dir) {
        for path in entries.flatten().map(|entry| entry.path()) {
            if !path.extension().is_some_and(|ext| ext == "fuzz") {
                continue;
            }
            let Some(name) = path.file_name() else {
                continue;
            };
            let target = crash_dir.join(name);
            if !target.exists() {
                fs::copy(&path, &target).expect("Failed to copy crash input");
            }
        }
    }

    let mut inputs: Vec<_> = fs::read_dir(crash_dir)
        .expect("Failed to read crash input directory")
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    inputs.sort();

    for path in inputs {
        let data = fs::read(&path).expect("Failed to read crash input");
        let start = Instant::now();
        test(&data);
        let elapsed = start.elapsed();
        assert!(
            elapsed <= limit,
            "Crash input {} took {elapsed:?}, over the {limit:?} limit",
            path.display()
        );
    }
}

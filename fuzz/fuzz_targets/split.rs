//! Statement splitting fuzzer.
//!
//! Generates an arbitrary set of delimiters and a script biased towards
//! quotes, escapes, comments and separators, then checks that splitting
//! never panics and upholds the invariants in `check_split_invariants`.

use honggfuzz::fuzz;
use sql_statement_splitter::Delimiters;
use sql_statement_splitter::testing::{FuzzScript, test_split};

fn main() {
    loop {
        fuzz!(|input: (Delimiters, FuzzScript)| {
            let (delimiters, script) = input;
            test_split(&delimiters, &script);
        });
    }
}

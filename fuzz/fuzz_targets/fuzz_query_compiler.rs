#![no_main]

use arbitrary::Arbitrary;
use fsearch::query::{compile_query, CompileOptions};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    query: &'a str,
    haystack: &'a str,
    match_case: bool,
    enable_regex: bool,
    enable_wildcards: bool,
    split_terms: bool,
}

fuzz_target!(|input: Input| {
    let options = CompileOptions {
        match_case: input.match_case,
        enable_regex: input.enable_regex,
        enable_wildcards: input.enable_wildcards,
        split_terms: input.split_terms,
    };
    // Compilation may fail, matching must never panic
    if let Ok(query) = compile_query(input.query, options) {
        for predicate in query.predicates() {
            let _ = predicate.is_match(input.haystack);
        }
    }
});

pub mod compiler;
pub mod matcher;

pub use compiler::{compile_query, looks_like_regex, CompileOptions, CompiledQuery, Predicate};
pub use matcher::{CaseMode, LiteralMatcher, Matcher};

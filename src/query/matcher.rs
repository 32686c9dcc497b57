//! Matching strategies applied to a single haystack.

use crate::error::{Result, SearchError};
use globset::{GlobBuilder, GlobMatcher};
use memchr::memmem;
use regex::{Regex, RegexBuilder};

/// How letter case is treated by a literal or glob match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseMode {
    /// Exact byte comparison
    Sensitive,
    /// Byte-wise ASCII folding, used when the needle is pure ASCII
    AsciiInsensitive,
    /// Per-codepoint folding, used when the needle contains multi-byte UTF-8
    Utf8Insensitive,
}

impl CaseMode {
    /// Pick the mode from the match-case option and whether the needle holds
    /// multi-byte UTF-8
    pub fn new(match_case: bool, is_utf8: bool) -> Self {
        match (match_case, is_utf8) {
            (true, _) => CaseMode::Sensitive,
            (false, false) => CaseMode::AsciiInsensitive,
            (false, true) => CaseMode::Utf8Insensitive,
        }
    }

    pub fn is_case_sensitive(self) -> bool {
        self == CaseMode::Sensitive
    }
}

/// Compiled matcher for one predicate
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Substring search
    Literal(LiteralMatcher),
    /// Shell wildcard pattern matched against the whole haystack
    Glob(GlobMatcher),
    /// Regular expression, unanchored unless the pattern anchors itself
    Regex(Regex),
}

impl Matcher {
    pub fn literal(needle: &str, mode: CaseMode) -> Self {
        Matcher::Literal(LiteralMatcher::new(needle, mode))
    }

    pub fn glob(pattern: &str, mode: CaseMode) -> Result<Self> {
        let glob = GlobBuilder::new(pattern)
            .case_insensitive(!mode.is_case_sensitive())
            .literal_separator(false)
            .backslash_escape(true)
            .build()
            .map_err(|e| SearchError::CompileFailure(e.to_string()))?;
        Ok(Matcher::Glob(glob.compile_matcher()))
    }

    pub fn regex(pattern: &str, match_case: bool) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(!match_case)
            .build()
            .map_err(|e| SearchError::CompileFailure(e.to_string()))?;
        Ok(Matcher::Regex(regex))
    }

    #[inline]
    pub fn is_match(&self, haystack: &str) -> bool {
        match self {
            Matcher::Literal(literal) => literal.is_match(haystack),
            Matcher::Glob(glob) => glob.is_match(haystack),
            Matcher::Regex(regex) => regex.is_match(haystack),
        }
    }

    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Matcher::Literal(literal) => match literal.mode {
                CaseMode::Sensitive => "literal",
                CaseMode::AsciiInsensitive => "literal-icase",
                CaseMode::Utf8Insensitive => "literal-icase-utf8",
            },
            Matcher::Glob(_) => "glob",
            Matcher::Regex(_) => "regex",
        }
    }
}

/// Substring matcher with a precomputed needle for its case mode
#[derive(Debug, Clone)]
pub struct LiteralMatcher {
    mode: CaseMode,
    needle: Needle,
}

#[derive(Debug, Clone)]
enum Needle {
    Bytes(memmem::Finder<'static>),
    Ascii(Box<[u8]>),
    Folded(Box<[char]>),
}

impl LiteralMatcher {
    pub fn new(needle: &str, mode: CaseMode) -> Self {
        let needle = match mode {
            CaseMode::Sensitive => Needle::Bytes(memmem::Finder::new(needle.as_bytes()).into_owned()),
            CaseMode::AsciiInsensitive => Needle::Ascii(needle.as_bytes().into()),
            CaseMode::Utf8Insensitive => Needle::Folded(needle.chars().map(fold_char).collect()),
        };
        Self { mode, needle }
    }

    pub fn mode(&self) -> CaseMode {
        self.mode
    }

    #[inline]
    pub fn is_match(&self, haystack: &str) -> bool {
        match &self.needle {
            Needle::Bytes(finder) => finder.find(haystack.as_bytes()).is_some(),
            Needle::Ascii(needle) => ascii_icase_contains(haystack.as_bytes(), needle),
            Needle::Folded(needle) => utf8_icase_contains(haystack, needle),
        }
    }
}

/// Case-insensitive ASCII substring test (`strcasestr`)
fn ascii_icase_contains(haystack: &[u8], needle: &[u8]) -> bool {
    let Some(&first) = needle.first() else {
        return true;
    };
    if haystack.len() < needle.len() {
        return false;
    }
    let last_start = haystack.len() - needle.len();
    memchr::memchr2_iter(
        first.to_ascii_lowercase(),
        first.to_ascii_uppercase(),
        &haystack[..=last_start],
    )
    .any(|pos| haystack[pos..pos + needle.len()].eq_ignore_ascii_case(needle))
}

/// Case-insensitive substring test that only ever compares whole codepoints
fn utf8_icase_contains(haystack: &str, needle: &[char]) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack
        .char_indices()
        .any(|(start, _)| starts_with_folded(&haystack[start..], needle))
}

fn starts_with_folded(haystack: &str, needle: &[char]) -> bool {
    let mut chars = haystack.chars();
    needle
        .iter()
        .all(|&expected| chars.next().is_some_and(|c| fold_char(c) == expected))
}

/// Simple case fold: single-codepoint lowercase mapping, identity otherwise
#[inline]
pub fn fold_char(c: char) -> char {
    if c.is_ascii() {
        return c.to_ascii_lowercase();
    }
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(folded), None) => folded,
        _ => c,
    }
}

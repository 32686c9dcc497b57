use crate::error::{Result, SearchError};
use crate::query::matcher::{CaseMode, Matcher};

/// Characters that switch a query to the regex matcher when regex mode is on
pub const REGEX_CHARS: &[char] = &['$', '(', ')', '*', '+', '.', '?', '[', '\\', '^', '{', '|'];

/// Characters that switch a query to the glob matcher when wildcards are enabled
pub const WILDCARD_CHARS: &[char] = &['*', '?'];

/// Path separator used by reconstructed paths
pub const PATH_SEPARATOR: char = '/';

/// Options that influence compilation
#[derive(Debug, Clone, Copy, Default)]
pub struct CompileOptions {
    pub match_case: bool,
    pub enable_regex: bool,
    /// Treat `*` and `?` as shell wildcards instead of literal characters
    pub enable_wildcards: bool,
    /// Split the query on whitespace into an AND-chain of predicates
    pub split_terms: bool,
}

/// One compiled term of a query
#[derive(Debug, Clone)]
pub struct Predicate {
    text: String,
    case_mode: CaseMode,
    is_utf8: bool,
    has_separator: bool,
    matcher: Matcher,
}

impl Predicate {
    /// Compile a regex term; the pattern is case-folded by the regex engine itself
    fn regex(text: &str, match_case: bool) -> Result<Self> {
        let is_utf8 = is_multibyte(text);
        let matcher = Matcher::regex(text, match_case)?;
        Ok(Self::build(text, CaseMode::new(match_case, is_utf8), is_utf8, matcher))
    }

    /// Compile a plain (non-regex) term
    fn plain(text: &str, options: CompileOptions) -> Result<Self> {
        let is_utf8 = is_multibyte(text);
        let case_mode = CaseMode::new(options.match_case, is_utf8);
        let matcher = if options.enable_wildcards && has_wildcards(text) {
            Matcher::glob(text, case_mode)?
        } else {
            Matcher::literal(text, case_mode)
        };
        Ok(Self::build(text, case_mode, is_utf8, matcher))
    }

    fn build(text: &str, case_mode: CaseMode, is_utf8: bool, matcher: Matcher) -> Self {
        Self {
            text: text.to_string(),
            case_mode,
            is_utf8,
            has_separator: text.contains(PATH_SEPARATOR),
            matcher,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_mode.is_case_sensitive()
    }

    pub fn is_utf8(&self) -> bool {
        self.is_utf8
    }

    /// Whether the term looks like a path and should be matched against full paths
    /// in automatic path mode
    pub fn has_separator(&self) -> bool {
        self.has_separator
    }

    /// Whether this term is matched against the full path rather than the name
    #[inline]
    pub fn uses_path(&self, force_path: bool, auto_path: bool) -> bool {
        force_path || (auto_path && self.has_separator)
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    #[inline]
    pub fn is_match(&self, haystack: &str) -> bool {
        self.matcher.is_match(haystack)
    }
}

/// A query ready for execution: every predicate must match
#[derive(Debug, Clone)]
pub struct CompiledQuery {
    predicates: Vec<Predicate>,
}

impl CompiledQuery {
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_regex(&self) -> bool {
        matches!(
            self.predicates.first().map(Predicate::matcher),
            Some(Matcher::Regex(_))
        )
    }
}

/// Whether the text contains any regex metacharacter
pub fn looks_like_regex(text: &str) -> bool {
    text.contains(REGEX_CHARS)
}

pub fn has_wildcards(text: &str) -> bool {
    text.contains(WILDCARD_CHARS)
}

/// More bytes than codepoints means the text holds multi-byte UTF-8
fn is_multibyte(text: &str) -> bool {
    text.len() != text.chars().count()
}

/// Compile raw query text.
///
/// The text is trimmed first. Regex mode only kicks in when the text actually
/// contains a regex metacharacter; otherwise the query is matched as a
/// substring, or as a glob when wildcards are enabled and present.
pub fn compile_query(raw: &str, options: CompileOptions) -> Result<CompiledQuery> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(SearchError::InvalidQuery("query is empty".to_string()));
    }

    if options.enable_regex && looks_like_regex(text) {
        return Ok(CompiledQuery {
            predicates: vec![Predicate::regex(text, options.match_case)?],
        });
    }

    let predicates = if options.split_terms {
        text.split_whitespace()
            .map(|term| Predicate::plain(term, options))
            .collect::<Result<Vec<_>>>()?
    } else {
        vec![Predicate::plain(text, options)?]
    };

    Ok(CompiledQuery { predicates })
}

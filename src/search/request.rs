use crate::error::Result;
use crate::index::EntryIndex;
use crate::query::CompileOptions;
use crate::search::result::SearchResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Restricts results to files or folders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryFilter {
    #[default]
    None,
    FilesOnly,
    FoldersOnly,
}

impl EntryFilter {
    #[inline]
    pub fn accepts(self, is_dir: bool) -> bool {
        match self {
            EntryFilter::None => true,
            EntryFilter::FilesOnly => !is_dir,
            EntryFilter::FoldersOnly => is_dir,
        }
    }
}

/// Per-request search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOptions {
    #[serde(default)]
    pub filter: EntryFilter,

    /// Maximum number of results, 0 means unlimited
    #[serde(default)]
    pub limit: usize,

    /// Return nothing for an empty query instead of listing the whole corpus
    #[serde(default)]
    pub hide_empty_query_results: bool,

    #[serde(default)]
    pub match_case: bool,

    #[serde(default)]
    pub enable_regex: bool,

    /// Treat `*` and `?` as shell wildcards; off means they match literally
    #[serde(default)]
    pub enable_wildcards: bool,

    /// Match queries containing a path separator against full paths
    #[serde(default = "default_auto_search_in_path")]
    pub auto_search_in_path: bool,

    /// Always match against full paths
    #[serde(default)]
    pub force_search_in_path: bool,

    /// Retry failed matches against the entry's transliterated names
    #[serde(default)]
    pub enable_transliteration: bool,

    /// Treat whitespace separated words as independent terms that must all match
    #[serde(default)]
    pub split_terms: bool,
}

fn default_auto_search_in_path() -> bool {
    true
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            filter: EntryFilter::None,
            limit: 0,
            hide_empty_query_results: false,
            match_case: false,
            enable_regex: false,
            enable_wildcards: false,
            auto_search_in_path: default_auto_search_in_path(),
            force_search_in_path: false,
            enable_transliteration: false,
            split_terms: false,
        }
    }
}

impl SearchOptions {
    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            match_case: self.match_case,
            enable_regex: self.enable_regex,
            enable_wildcards: self.enable_wildcards,
            split_terms: self.split_terms,
        }
    }

    /// Whether `count` results already fill the cap
    #[inline]
    pub fn limit_reached(&self, count: usize) -> bool {
        self.limit != 0 && count >= self.limit
    }
}

/// Opaque caller-chosen value handed back with the result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SenderToken(pub u64);

/// What a completion callback receives
pub type SearchOutcome<E> = Result<SearchResult<E>>;

/// Completion callback, run once on the coordinator thread
pub type CompletionCallback<E> = Box<dyn FnOnce(SearchOutcome<E>, SenderToken) + Send + 'static>;

/// A search submitted to the coordinator.
///
/// Any caller state the callback needs travels inside the closure.
pub struct SearchRequest<I: EntryIndex> {
    pub query: String,
    pub options: SearchOptions,
    pub index: Arc<I>,
    pub sender: SenderToken,
    callback: CompletionCallback<I::Entry>,
}

impl<I: EntryIndex> SearchRequest<I> {
    pub fn new<F>(index: Arc<I>, query: impl Into<String>, callback: F) -> Self
    where
        F: FnOnce(SearchOutcome<I::Entry>, SenderToken) + Send + 'static,
    {
        Self {
            query: query.into(),
            options: SearchOptions::default(),
            index,
            sender: SenderToken::default(),
            callback: Box::new(callback),
        }
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_sender(mut self, sender: SenderToken) -> Self {
        self.sender = sender;
        self
    }

    pub fn filter(mut self, filter: EntryFilter) -> Self {
        self.options.filter = filter;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.options.limit = limit;
        self
    }

    pub fn match_case(mut self, enabled: bool) -> Self {
        self.options.match_case = enabled;
        self
    }

    pub fn regex(mut self, enabled: bool) -> Self {
        self.options.enable_regex = enabled;
        self
    }

    pub fn wildcards(mut self, enabled: bool) -> Self {
        self.options.enable_wildcards = enabled;
        self
    }

    pub fn transliteration(mut self, enabled: bool) -> Self {
        self.options.enable_transliteration = enabled;
        self
    }

    /// Deliver the outcome, consuming the request
    pub(crate) fn complete(self, outcome: SearchOutcome<I::Entry>) {
        (self.callback)(outcome, self.sender);
    }
}

impl<I: EntryIndex> fmt::Debug for SearchRequest<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchRequest")
            .field("query", &self.query)
            .field("options", &self.options)
            .field("entries", &self.index.len())
            .field("sender", &self.sender)
            .finish()
    }
}

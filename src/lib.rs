//! # fsearch - Concurrent File Name Search
//!
//! fsearch answers "which entries of this file index match my query" by
//! scanning an in-memory corpus in parallel. Each query is compiled once into
//! a literal, glob or regex matcher, the corpus is split into contiguous
//! partitions scanned by a worker pool, and the partition results are merged
//! back in corpus order.
//!
//! ## Architecture
//!
//! - [`index`] - Entry model and the in-memory, parent-linked index
//! - [`query`] - Query compilation and matchers
//! - [`search`] - Partitioning, workers, aggregation and the search coordinator
//! - [`output`] - Result formatting (plain, colored or JSON)
//! - [`utils`] - Configuration and progress reporting
//! - [`error`] - Error type shared by the library
//!
//! ## Quick Start
//!
//! ```no_run
//! use fsearch::index::{IndexEntry, MemoryIndex};
//! use fsearch::search::{SearchEngine, SearchOptions};
//!
//! let index = MemoryIndex::parse_path_list("/photos/img_001.jpg\n/notes.txt\n").unwrap();
//! let engine = SearchEngine::with_threads(0).unwrap();
//! let result = engine.search(&index, "img", &SearchOptions::default()).unwrap();
//!
//! for entry in result.iter() {
//!     println!("{}", entry.full_path().unwrap());
//! }
//! ```
//!
//! Interactive callers submit requests to a
//! [`SearchCoordinator`](search::SearchCoordinator) instead, which runs them on
//! a background thread and drops queued requests that were superseded.

pub mod error;
pub mod index;
pub mod output;
pub mod query;
pub mod search;
pub mod utils;

pub use error::{Result, SearchError};

//! Parallel search over an entry index.
//!
//! A search is prepared on the calling thread (fast paths, query compilation
//! and partitioning) and then executed by fanning the partitions out to the
//! worker pool and merging the results in corpus order.

use crate::error::{Result, SearchError};
use crate::index::EntryIndex;
use crate::query::{compile_query, CompiledQuery};
use crate::search::aggregate::{aggregate, list_all};
use crate::search::partition::{partition, PartitionRange};
use crate::search::pool::{RayonPool, Task, WorkerPool};
use crate::search::request::SearchOptions;
use crate::search::result::SearchResult;
use crate::search::worker::{scan_partition, WorkerPartition};
use log::{debug, warn};
use std::sync::Arc;
use std::time::Instant;

/// Outcome of [`SearchEngine::prepare`]
#[derive(Debug)]
pub enum Prepared<E> {
    /// Answered without touching the worker pool
    Complete(SearchResult<E>),
    /// Needs a parallel scan
    Dispatch(DispatchPlan),
}

/// Compiled query plus the partitions to scan
#[derive(Debug)]
pub struct DispatchPlan {
    pub query: CompiledQuery,
    pub ranges: Vec<PartitionRange>,
}

/// Runs searches on a shared worker pool
#[derive(Clone)]
pub struct SearchEngine {
    pool: Arc<dyn WorkerPool>,
}

impl SearchEngine {
    pub fn new(pool: Arc<dyn WorkerPool>) -> Self {
        Self { pool }
    }

    /// Engine backed by a rayon pool of `threads` workers (0 = one per CPU)
    pub fn with_threads(threads: usize) -> Result<Self> {
        Ok(Self::new(Arc::new(RayonPool::new(threads)?)))
    }

    pub fn workers(&self) -> usize {
        self.pool.available_workers()
    }

    /// Run a complete search and return its result
    pub fn search<I: EntryIndex>(
        &self,
        index: &I,
        query: &str,
        options: &SearchOptions,
    ) -> Result<SearchResult<I::Entry>> {
        match self.prepare(index, query, options)? {
            Prepared::Complete(result) => Ok(result),
            Prepared::Dispatch(plan) => self.execute(index, plan, options),
        }
    }

    /// Resolve fast paths and build the dispatch plan.
    ///
    /// An empty corpus or an empty query never reaches the pool. A query that
    /// fails to compile is logged and answered with an empty result.
    pub fn prepare<I: EntryIndex>(
        &self,
        index: &I,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Prepared<I::Entry>> {
        if index.is_empty() {
            return Ok(Prepared::Complete(SearchResult::empty()));
        }

        if query.trim().is_empty() {
            let result = if options.hide_empty_query_results {
                SearchResult::empty()
            } else {
                list_all(index, options.filter, options.limit)
            };
            return Ok(Prepared::Complete(result));
        }

        let compiled = match compile_query(query, options.compile_options()) {
            Ok(compiled) => compiled,
            Err(SearchError::CompileFailure(message)) => {
                warn!("query failed to compile query={:?} error={}", query, message);
                return Ok(Prepared::Complete(SearchResult::empty()));
            }
            Err(err) => return Err(err),
        };

        let workers = self.pool.available_workers();
        if workers == 0 {
            return Err(SearchError::PoolUnavailable("pool has no workers".to_string()));
        }

        Ok(Prepared::Dispatch(DispatchPlan {
            query: compiled,
            ranges: partition(index.len(), workers),
        }))
    }

    /// Scan every partition of the plan in parallel and merge the results
    pub fn execute<I: EntryIndex>(
        &self,
        index: &I,
        plan: DispatchPlan,
        options: &SearchOptions,
    ) -> Result<SearchResult<I::Entry>> {
        let start = Instant::now();
        let DispatchPlan { query, ranges } = plan;

        let mut partitions: Vec<WorkerPartition<I::Entry>> =
            ranges.into_iter().map(WorkerPartition::new).collect();

        let tasks: Vec<Task> = partitions
            .iter_mut()
            .map(|partition| {
                let query = &query;
                Box::new(move || scan_partition(index, query, options, partition)) as Task
            })
            .collect();
        let dispatched = tasks.len();

        self.pool.run_all(tasks)?;

        let result = aggregate(partitions, options.limit);
        debug!(
            "search finished matcher={} partitions={} entries={} results={} folders={} files={} elapsed_ms={:.2}",
            query.predicates().first().map_or("none", |p| p.matcher().kind()),
            dispatched,
            index.len(),
            result.len(),
            result.folder_count(),
            result.file_count(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(result)
    }
}

impl std::fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine")
            .field("workers", &self.pool.available_workers())
            .finish()
    }
}

use crate::index::{EntryIndex, IndexEntry};
use crate::search::request::EntryFilter;
use crate::search::result::SearchResult;
use crate::search::worker::WorkerPartition;
use log::trace;

/// Merge worker output into one result.
///
/// Partitions are concatenated in range order, so the result preserves corpus
/// order. The cap (0 = unlimited) is applied across all partitions.
pub fn aggregate<E: IndexEntry>(partitions: Vec<WorkerPartition<E>>, limit: usize) -> SearchResult<E> {
    let total: usize = partitions.iter().map(|p| p.results.len()).sum();
    let capacity = if limit == 0 { total } else { total.min(limit) };
    let mut result = SearchResult::with_capacity(capacity);

    'partitions: for partition in partitions {
        for entry in partition.results {
            if result.len() == capacity {
                break 'partitions;
            }
            result.push(entry);
        }
    }

    result
}

/// Every live entry accepted by the filter, up to the cap.
///
/// Used for empty queries when results are not hidden.
pub fn list_all<I: EntryIndex>(index: &I, filter: EntryFilter, limit: usize) -> SearchResult<I::Entry> {
    let n = index.len();
    let capacity = if limit == 0 { n } else { limit.min(n) };
    let mut result = SearchResult::with_capacity(capacity);

    for id in 0..n {
        if result.len() == capacity {
            break;
        }
        let entry = match index.try_get(id) {
            Ok(entry) => entry,
            Err(err) => {
                trace!("skipping entry id={} error={}", id, err);
                continue;
            }
        };
        if filter.accepts(entry.is_dir()) {
            result.push(entry.clone());
        }
    }

    result
}

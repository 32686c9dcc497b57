use crate::index::{EntryIndex, IndexEntry};
use crate::query::CompiledQuery;
use crate::search::partition::PartitionRange;
use crate::search::request::SearchOptions;
use log::trace;

/// A worker's assigned range and the matches it collected, in id order
#[derive(Debug)]
pub struct WorkerPartition<E> {
    pub range: PartitionRange,
    pub results: Vec<E>,
}

impl<E> WorkerPartition<E> {
    pub fn new(range: PartitionRange) -> Self {
        Self {
            range,
            results: Vec::new(),
        }
    }
}

/// Scan one partition, appending every accepted entry to `partition.results`.
///
/// Unreadable entries and entries whose path cannot be built are skipped.
/// Scanning stops as soon as the partition holds `options.limit` results.
pub fn scan_partition<I: EntryIndex>(
    index: &I,
    query: &CompiledQuery,
    options: &SearchOptions,
    partition: &mut WorkerPartition<I::Entry>,
) {
    let mut path_buf = String::with_capacity(256);

    for id in partition.range.ids() {
        if options.limit_reached(partition.results.len()) {
            break;
        }

        let entry = match index.try_get(id) {
            Ok(entry) => entry,
            Err(err) => {
                trace!("skipping entry id={} error={}", id, err);
                continue;
            }
        };

        if !options.filter.accepts(entry.is_dir()) {
            continue;
        }

        if entry_matches(entry, query, options, &mut path_buf) {
            partition.results.push(entry.clone());
        }
    }
}

/// Whether every predicate accepts the entry.
///
/// The full path is built at most once per entry, the first time a predicate
/// needs it.
fn entry_matches<E: IndexEntry>(
    entry: &E,
    query: &CompiledQuery,
    options: &SearchOptions,
    path_buf: &mut String,
) -> bool {
    let mut path_ready = false;

    for predicate in query.predicates() {
        let use_path = predicate.uses_path(options.force_search_in_path, options.auto_search_in_path);
        let haystack = if use_path {
            if !path_ready {
                if let Err(err) = entry.write_full_path(path_buf) {
                    trace!("skipping entry name={:?} error={}", entry.name(), err);
                    return false;
                }
                path_ready = true;
            }
            path_buf.as_str()
        } else {
            entry.name()
        };

        if predicate.is_match(haystack) {
            continue;
        }

        if options.enable_transliteration && transliteration_matches(entry, |s| predicate.is_match(s)) {
            continue;
        }

        return false;
    }

    true
}

/// Try the first-letter form, then the full form. Entries without a
/// transliteration never match here.
fn transliteration_matches<E: IndexEntry>(entry: &E, is_match: impl Fn(&str) -> bool) -> bool {
    let full = entry.full_transliteration();
    if full.is_empty() {
        return false;
    }
    is_match(entry.first_transliteration()) || is_match(full)
}

use crate::error::{Result, SearchError};

/// Position of an entry inside an [`EntryIndex`]
pub type EntryId = usize;

/// Upper bound for a reconstructed path, in bytes (mirrors `PATH_MAX`)
pub const MAX_PATH_LEN: usize = 4096;

/// A single indexed file or directory as seen by the search engine.
///
/// Entries are cheap handles (typically an `Arc`); the engine clones one only
/// when it lands in a result.
pub trait IndexEntry: Clone + Send + Sync + 'static {
    /// Display name (last path component)
    fn name(&self) -> &str;

    /// Whether the entry is a directory
    fn is_dir(&self) -> bool;

    /// Reconstruct the full path into `buf`, replacing its contents.
    ///
    /// Fails with [`SearchError::PathTooLong`] when the path would exceed
    /// [`MAX_PATH_LEN`]; `buf` is left empty in that case.
    fn write_full_path(&self, buf: &mut String) -> Result<()>;

    /// Abbreviated transliteration of the name (initials), empty if none
    fn first_transliteration(&self) -> &str {
        ""
    }

    /// Full transliteration of the name, empty if none
    fn full_transliteration(&self) -> &str {
        ""
    }

    /// Convenience wrapper around [`IndexEntry::write_full_path`]
    fn full_path(&self) -> Result<String> {
        let mut buf = String::new();
        self.write_full_path(&mut buf)?;
        Ok(buf)
    }
}

/// An ordered, randomly indexable corpus of entries.
///
/// The index is never locked by the engine: callers must not mutate it while a
/// search that references it is in flight.
pub trait EntryIndex: Send + Sync + 'static {
    type Entry: IndexEntry;

    /// Total number of slots, including tombstoned ones
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entry at `id`, or `None` for a tombstoned or out-of-range slot
    fn get(&self, id: EntryId) -> Option<&Self::Entry>;

    /// Like [`EntryIndex::get`] but reports the missing slot as an error
    fn try_get(&self, id: EntryId) -> Result<&Self::Entry> {
        self.get(id).ok_or(SearchError::EntryUnavailable(id))
    }
}

use crate::index::IndexEntry;

/// One row of a result set
#[derive(Debug, Clone)]
pub struct ResultEntry<E> {
    pub entry: E,
    /// Dense, zero-based position within the result
    pub position: usize,
}

/// Ordered, count-annotated answer to a search
#[derive(Debug, Clone)]
pub struct SearchResult<E> {
    entries: Vec<ResultEntry<E>>,
    folder_count: usize,
    file_count: usize,
}

impl<E> Default for SearchResult<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            folder_count: 0,
            file_count: 0,
        }
    }
}

impl<E: IndexEntry> SearchResult<E> {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Append an entry at the next position and count it
    pub(crate) fn push(&mut self, entry: E) {
        if entry.is_dir() {
            self.folder_count += 1;
        } else {
            self.file_count += 1;
        }
        let position = self.entries.len();
        self.entries.push(ResultEntry { entry, position });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn folder_count(&self) -> usize {
        self.folder_count
    }

    pub fn file_count(&self) -> usize {
        self.file_count
    }

    pub fn entries(&self) -> &[ResultEntry<E>] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.entries.iter().map(|r| &r.entry)
    }

    pub fn get(&self, position: usize) -> Option<&E> {
        self.entries.get(position).map(|r| &r.entry)
    }

    /// Remove the entry at `position`, shifting later entries down so positions
    /// stay dense, and update the folder/file counts.
    pub fn remove(&mut self, position: usize) -> Option<E> {
        if position >= self.entries.len() {
            return None;
        }
        let removed = self.entries.remove(position);
        for (pos, row) in self.entries.iter_mut().enumerate().skip(position) {
            row.position = pos;
        }
        if removed.entry.is_dir() {
            self.folder_count -= 1;
        } else {
            self.file_count -= 1;
        }
        Some(removed.entry)
    }

    pub fn into_entries(self) -> Vec<E> {
        self.entries.into_iter().map(|r| r.entry).collect()
    }
}

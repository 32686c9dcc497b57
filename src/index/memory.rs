//! In-memory entry index built from a path list.
//!
//! Every entry is a [`FileNode`] holding a link to its parent directory, so
//! full paths are reconstructed on demand instead of being stored per entry.
//!
//! Path list format, one entry per line:
//!
//! ```text
//! /home/user/photos/            <- trailing '/' marks a directory
//! /home/user/photos/img_042.jpg
//! /home/user/文档.txt<TAB>wd<TAB>wendang
//! ```
//!
//! The optional tab-separated columns carry the precomputed first and full
//! transliteration of the name. Blank lines and lines starting with `#` are
//! ignored. Parent directories that are not listed themselves are created as
//! path-only nodes and never appear as entries.

use crate::error::{Result, SearchError};
use crate::index::types::{EntryId, EntryIndex, IndexEntry, MAX_PATH_LEN};
use rustc_hash::FxHashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Shared handle to a node
pub type NodeRef = Arc<FileNode>;

/// A file or directory with a link to its parent
#[derive(Debug)]
pub struct FileNode {
    name: Box<str>,
    is_dir: bool,
    parent: Option<NodeRef>,
    first_translit: Box<str>,
    full_translit: Box<str>,
}

impl FileNode {
    pub fn new(name: &str, is_dir: bool, parent: Option<NodeRef>) -> NodeRef {
        Arc::new(Self {
            name: name.into(),
            is_dir,
            parent,
            first_translit: "".into(),
            full_translit: "".into(),
        })
    }

    /// Node with precomputed transliterations of its name
    pub fn with_transliteration(
        name: &str,
        is_dir: bool,
        parent: Option<NodeRef>,
        first: &str,
        full: &str,
    ) -> NodeRef {
        Arc::new(Self {
            name: name.into(),
            is_dir,
            parent,
            first_translit: first.into(),
            full_translit: full.into(),
        })
    }

    pub fn parent(&self) -> Option<&NodeRef> {
        self.parent.as_ref()
    }

    /// Number of ancestors above this node
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.parent.as_deref();
        while let Some(node) = current {
            depth += 1;
            current = node.parent.as_deref();
        }
        depth
    }
}

impl Drop for FileNode {
    // Unlink ancestors one at a time so a deep chain is not freed recursively
    fn drop(&mut self) {
        let mut parent = self.parent.take();
        while let Some(node) = parent {
            parent = match Arc::try_unwrap(node) {
                Ok(mut inner) => inner.parent.take(),
                Err(_) => None,
            };
        }
    }
}

impl IndexEntry for NodeRef {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_dir(&self) -> bool {
        self.is_dir
    }

    fn write_full_path(&self, buf: &mut String) -> Result<()> {
        buf.clear();

        let mut chain: Vec<&FileNode> = Vec::with_capacity(16);
        let mut len = 0usize;
        let mut current: Option<&FileNode> = Some(self);
        while let Some(node) = current {
            len += node.name.len() + 1;
            if len > MAX_PATH_LEN + 1 {
                return Err(SearchError::PathTooLong {
                    limit: MAX_PATH_LEN,
                });
            }
            chain.push(node);
            current = node.parent.as_deref();
        }

        for (i, node) in chain.iter().rev().enumerate() {
            if i > 0 {
                buf.push('/');
            }
            buf.push_str(&node.name);
        }
        Ok(())
    }

    fn first_transliteration(&self) -> &str {
        &self.first_translit
    }

    fn full_transliteration(&self) -> &str {
        &self.full_translit
    }
}

/// Ordered in-memory corpus; removed slots stay as tombstones so ids are stable
#[derive(Debug, Default)]
pub struct MemoryIndex {
    slots: Vec<Option<NodeRef>>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(nodes: impl IntoIterator<Item = NodeRef>) -> Self {
        Self {
            slots: nodes.into_iter().map(Some).collect(),
        }
    }

    /// Append a node and return its id
    pub fn push(&mut self, node: NodeRef) -> EntryId {
        self.slots.push(Some(node));
        self.slots.len() - 1
    }

    /// Tombstone a slot, returning the node that occupied it
    pub fn remove(&mut self, id: EntryId) -> Option<NodeRef> {
        self.slots.get_mut(id).and_then(Option::take)
    }

    /// Number of live (non-tombstoned) entries
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Read a path list file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse_path_list(&content).map_err(|e| match e {
            SearchError::PathList { message, .. } => SearchError::PathList {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    /// Build an index from path list text (see module docs for the format)
    pub fn parse_path_list(content: &str) -> Result<Self> {
        let mut builder = PathListBuilder::default();
        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            builder.add_line(line).map_err(|message| SearchError::PathList {
                path: Default::default(),
                message: format!("line {}: {}", line_no + 1, message),
            })?;
        }
        Ok(builder.finish())
    }
}

impl EntryIndex for MemoryIndex {
    type Entry = NodeRef;

    fn len(&self) -> usize {
        self.slots.len()
    }

    fn get(&self, id: EntryId) -> Option<&NodeRef> {
        self.slots.get(id).and_then(Option::as_ref)
    }
}

/// Incrementally resolves parent links while reading a path list
#[derive(Default)]
struct PathListBuilder {
    dirs: FxHashMap<String, NodeRef>,
    index: MemoryIndex,
}

impl PathListBuilder {
    fn add_line(&mut self, line: &str) -> std::result::Result<(), String> {
        let mut columns = line.split('\t');
        let raw_path = columns.next().unwrap_or_default();
        if raw_path.len() > MAX_PATH_LEN {
            return Err(format!("path exceeds {} bytes", MAX_PATH_LEN));
        }
        let first = columns.next().unwrap_or_default().trim();
        let full = columns.next().unwrap_or_default().trim();

        let is_dir = raw_path.len() > 1 && raw_path.ends_with('/');
        let path = if is_dir {
            raw_path.trim_end_matches('/')
        } else {
            raw_path
        };
        if path.is_empty() {
            return Err("empty path".to_string());
        }

        let (parent_path, name) = match path.rfind('/') {
            Some(pos) => (Some(&path[..pos]), &path[pos + 1..]),
            None => (None, path),
        };
        if name.is_empty() {
            return Err(format!("missing file name in {:?}", raw_path));
        }

        let parent = parent_path.map(|p| self.dir_node(p));

        let node = if is_dir {
            match self.dirs.get(path) {
                Some(existing) => existing.clone(),
                None => {
                    let node = FileNode::with_transliteration(name, true, parent, first, full);
                    self.dirs.insert(path.to_string(), node.clone());
                    node
                }
            }
        } else {
            FileNode::with_transliteration(name, false, parent, first, full)
        };

        self.index.push(node);
        Ok(())
    }

    /// Directory node for `path`, creating it and its ancestors as needed
    fn dir_node(&mut self, path: &str) -> NodeRef {
        if let Some(node) = self.dirs.get(path) {
            return node.clone();
        }

        // Walk up to the closest ancestor that already exists
        let mut missing = Vec::new();
        let mut parent = None;
        let mut current = path;
        while let Some(pos) = current.rfind('/') {
            current = &current[..pos];
            if let Some(node) = self.dirs.get(current) {
                parent = Some(node.clone());
                break;
            }
            missing.push(current);
        }

        for dir in missing.into_iter().rev() {
            parent = Some(self.insert_dir(dir, parent));
        }
        self.insert_dir(path, parent)
    }

    fn insert_dir(&mut self, path: &str, parent: Option<NodeRef>) -> NodeRef {
        let name = path.rfind('/').map_or(path, |pos| &path[pos + 1..]);
        let node = FileNode::new(name, true, parent);
        self.dirs.insert(path.to_string(), node.clone());
        node
    }

    fn finish(self) -> MemoryIndex {
        self.index
    }
}

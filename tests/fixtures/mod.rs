//! Shared corpora and pool doubles for integration tests.
#![allow(dead_code)]

use fsearch::index::MemoryIndex;
use fsearch::search::{RayonPool, Task, WorkerPool};
use fsearch::Result;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Small corpus covering folders, unicode names and transliterations
pub const SAMPLE_LIST: &str = "\
/home/
/home/user/
/home/user/myfoobar.txt
/home/user/photos/
/home/user/photos/img_042.jpg
/home/user/photos/image_042.jpg
/home/user/photos/IMG_043.JPG
/home/user/a/
/home/user/a/b
/home/user/docs/
/home/user/docs/文档.txt\twd\twendang
/home/user/docs/report 2024.pdf
/home/user/docs/b.md
";

pub fn sample_index() -> MemoryIndex {
    MemoryIndex::parse_path_list(SAMPLE_LIST).expect("sample list parses")
}

/// `count` files spread over 10 folders, named `file_00042.dat` and so on
pub fn synthetic_list(count: usize) -> String {
    let mut list = String::with_capacity(count * 32);
    for dir in 0..10 {
        list.push_str(&format!("/data/dir{}/\n", dir));
    }
    for i in 0..count {
        list.push_str(&format!("/data/dir{}/file_{:05}.dat\n", i % 10, i));
    }
    list
}

pub fn synthetic_index(count: usize) -> MemoryIndex {
    MemoryIndex::parse_path_list(&synthetic_list(count)).expect("synthetic list parses")
}

/// Wraps a rayon pool and counts dispatched batches
pub struct CountingPool {
    inner: RayonPool,
    pub batches: AtomicUsize,
}

impl CountingPool {
    pub fn new(threads: usize) -> Arc<Self> {
        Arc::new(Self {
            inner: RayonPool::new(threads).expect("pool builds"),
            batches: AtomicUsize::new(0),
        })
    }

    pub fn batches(&self) -> usize {
        self.batches.load(Ordering::SeqCst)
    }
}

impl WorkerPool for CountingPool {
    fn available_workers(&self) -> usize {
        self.inner.available_workers()
    }

    fn run_all<'a>(&self, tasks: Vec<Task<'a>>) -> Result<()> {
        self.batches.fetch_add(1, Ordering::SeqCst);
        self.inner.run_all(tasks)
    }
}

//! Worker pool abstraction used to run partition scans in parallel.

use crate::error::{Result, SearchError};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

/// A unit of work borrowed from the dispatching thread
pub type Task<'a> = Box<dyn FnOnce() + Send + 'a>;

/// Runs batches of tasks and waits for all of them
pub trait WorkerPool: Send + Sync {
    /// Number of tasks that can run at the same time
    fn available_workers(&self) -> usize;

    /// Run every task and return once all have finished
    fn run_all<'a>(&self, tasks: Vec<Task<'a>>) -> Result<()>;
}

/// Pool backed by a dedicated rayon thread pool
pub struct RayonPool {
    pool: rayon::ThreadPool,
}

impl RayonPool {
    /// Create a pool with `threads` workers, 0 meaning one per CPU
    pub fn new(threads: usize) -> Result<Self> {
        let threads = if threads == 0 { default_threads() } else { threads };
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("fsearch-worker-{}", i))
            .build()
            .map_err(|e| SearchError::PoolUnavailable(e.to_string()))?;
        Ok(Self { pool })
    }
}

impl WorkerPool for RayonPool {
    fn available_workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    fn run_all<'a>(&self, tasks: Vec<Task<'a>>) -> Result<()> {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.pool.scope(|scope| {
                for task in tasks {
                    scope.spawn(move |_| task());
                }
            })
        }));
        outcome.map_err(|payload| {
            SearchError::PoolUnavailable(format!("worker panicked: {}", panic_message(payload.as_ref())))
        })
    }
}

impl std::fmt::Debug for RayonPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RayonPool")
            .field("threads", &self.pool.current_num_threads())
            .finish()
    }
}

fn default_threads() -> usize {
    thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_runs_all_tasks() {
        let pool = RayonPool::new(3).unwrap();
        assert_eq!(pool.available_workers(), 3);

        let counter = AtomicUsize::new(0);
        let tasks: Vec<Task> = (0..10)
            .map(|_| {
                let counter = &counter;
                Box::new(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                }) as Task
            })
            .collect();
        pool.run_all(tasks).unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn test_tasks_can_borrow_mutably() {
        let pool = RayonPool::new(2).unwrap();
        let mut slots = vec![0usize; 4];
        let tasks: Vec<Task> = slots
            .iter_mut()
            .enumerate()
            .map(|(i, slot)| Box::new(move || *slot = i * 2) as Task)
            .collect();
        pool.run_all(tasks).unwrap();
        assert_eq!(slots, vec![0, 2, 4, 6]);
    }

    #[test]
    fn test_panic_becomes_error() {
        let pool = RayonPool::new(1).unwrap();
        fn explode() {
            panic!("boom");
        }
        let tasks: Vec<Task> = vec![Box::new(explode)];
        let err = pool.run_all(tasks).unwrap_err();
        assert!(matches!(err, SearchError::PoolUnavailable(ref msg) if msg.contains("boom")));
    }

    #[test]
    fn test_zero_means_cpu_count() {
        let pool = RayonPool::new(0).unwrap();
        assert!(pool.available_workers() >= 1);
    }
}

//! Background search thread with a single-slot mailbox.
//!
//! At most one request waits while another is being processed. Submitting a
//! new request replaces a waiting one, so bursts of keystrokes collapse into
//! the latest query. A request that has already been picked up always runs to
//! completion and its callback is always invoked.

use crate::error::Result;
use crate::index::EntryIndex;
use crate::search::engine::{Prepared, SearchEngine};
use crate::search::request::{SearchOutcome, SearchRequest};
use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError, TrySendError};
use log::{debug, error, info, warn};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// What the coordinator thread is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CoordinatorState {
    /// Waiting for a request
    Idle = 0,
    /// Compiling the query and handing partitions to the pool
    Dispatching = 1,
    /// Waiting for workers to finish
    Awaiting = 2,
    /// Running the completion callback
    Delivering = 3,
    /// Thread has exited
    Shutdown = 4,
}

impl CoordinatorState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => CoordinatorState::Idle,
            1 => CoordinatorState::Dispatching,
            2 => CoordinatorState::Awaiting,
            3 => CoordinatorState::Delivering,
            _ => CoordinatorState::Shutdown,
        }
    }
}

enum Command<I: EntryIndex> {
    Search(SearchRequest<I>),
    Shutdown,
}

#[derive(Debug)]
struct Shared {
    state: AtomicU8,
    ready: AtomicBool,
    terminating: AtomicBool,
}

impl Shared {
    fn set_state(&self, state: CoordinatorState) {
        self.state.store(state as u8, Ordering::Release);
    }
}

/// Owns the search thread and its mailbox
pub struct SearchCoordinator<I: EntryIndex> {
    mailbox: Sender<Command<I>>,
    /// Second handle on the mailbox, used to evict a waiting request
    evict: Receiver<Command<I>>,
    shared: Arc<Shared>,
    thread: Option<JoinHandle<()>>,
}

impl<I: EntryIndex> SearchCoordinator<I> {
    /// Spawn the search thread
    pub fn new(engine: SearchEngine) -> Result<Self> {
        let (mailbox, inbox) = bounded(1);
        let shared = Arc::new(Shared {
            state: AtomicU8::new(CoordinatorState::Idle as u8),
            ready: AtomicBool::new(false),
            terminating: AtomicBool::new(false),
        });

        let thread_shared = shared.clone();
        let thread_inbox = inbox.clone();
        let thread = thread::Builder::new()
            .name("fsearch-search".to_string())
            .spawn(move || run(engine, thread_inbox, thread_shared))?;

        Ok(Self {
            mailbox,
            evict: inbox,
            shared,
            thread: Some(thread),
        })
    }

    /// Queue a request, replacing any request that is still waiting.
    ///
    /// Returns immediately. Requests submitted after shutdown are dropped
    /// without their callback being run.
    pub fn submit(&self, request: SearchRequest<I>) {
        if self.shared.terminating.load(Ordering::Acquire) {
            warn!("search request dropped after shutdown query={:?}", request.query);
            return;
        }

        let mut command = Command::Search(request);
        loop {
            match self.mailbox.try_send(command) {
                Ok(()) => return,
                Err(TrySendError::Full(rejected)) => {
                    command = rejected;
                    match self.evict.try_recv() {
                        Ok(Command::Search(stale)) => {
                            debug!("superseded pending search query={:?}", stale.query);
                        }
                        Ok(Command::Shutdown) => {
                            // Shutdown wins over any search
                            let _ = self.mailbox.try_send(Command::Shutdown);
                            return;
                        }
                        // The search thread took the waiting request first
                        Err(TryRecvError::Empty) => {}
                        Err(TryRecvError::Disconnected) => return,
                    }
                }
                Err(TrySendError::Disconnected(_)) => {
                    warn!("search thread is gone, request dropped");
                    return;
                }
            }
        }
    }

    pub fn state(&self) -> CoordinatorState {
        CoordinatorState::from_u8(self.shared.state.load(Ordering::Acquire))
    }

    /// Whether the search thread has started accepting work
    pub fn is_ready(&self) -> bool {
        self.shared.ready.load(Ordering::Acquire)
    }

    /// Stop the search thread and wait for it to exit.
    ///
    /// A waiting request is discarded. A request already in progress finishes
    /// and delivers its result first. Calling this more than once is harmless.
    pub fn shutdown(&mut self) {
        if !self.shared.terminating.swap(true, Ordering::AcqRel) {
            loop {
                if let Ok(Command::Search(stale)) = self.evict.try_recv() {
                    debug!("discarding pending search on shutdown query={:?}", stale.query);
                }
                match self.mailbox.try_send(Command::Shutdown) {
                    Ok(()) | Err(TrySendError::Disconnected(_)) => break,
                    Err(TrySendError::Full(_)) => continue,
                }
            }
        }

        if let Some(handle) = self.thread.take() {
            if handle.join().is_err() {
                error!("search thread panicked");
            }
        }
    }
}

impl<I: EntryIndex> Drop for SearchCoordinator<I> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run<I: EntryIndex>(engine: SearchEngine, inbox: Receiver<Command<I>>, shared: Arc<Shared>) {
    shared.ready.store(true, Ordering::Release);
    info!("search thread started workers={}", engine.workers());

    while let Ok(command) = inbox.recv() {
        let request = match command {
            Command::Search(request) => request,
            Command::Shutdown => break,
        };

        shared.set_state(CoordinatorState::Dispatching);
        let outcome = process(&engine, &request, &shared);

        shared.set_state(CoordinatorState::Delivering);
        let sender = request.sender;
        if panic::catch_unwind(AssertUnwindSafe(|| request.complete(outcome))).is_err() {
            error!("search callback panicked sender={:?}", sender);
        }
        shared.set_state(CoordinatorState::Idle);
    }

    shared.ready.store(false, Ordering::Release);
    shared.set_state(CoordinatorState::Shutdown);
    info!("search thread stopped");
}

fn process<I: EntryIndex>(
    engine: &SearchEngine,
    request: &SearchRequest<I>,
    shared: &Shared,
) -> SearchOutcome<I::Entry> {
    let index = request.index.as_ref();
    match engine.prepare(index, &request.query, &request.options)? {
        Prepared::Complete(result) => Ok(result),
        Prepared::Dispatch(plan) => {
            shared.set_state(CoordinatorState::Awaiting);
            engine.execute(index, plan, &request.options)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::MemoryIndex;
    use crate::search::request::SenderToken;
    use std::sync::mpsc;
    use std::time::{Duration, Instant};

    fn index() -> Arc<MemoryIndex> {
        Arc::new(MemoryIndex::parse_path_list("/a/alpha.txt\n/a/beta.txt\n/a/gamma.txt\n").unwrap())
    }

    fn wait_until(condition: impl Fn() -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !condition() {
            assert!(Instant::now() < deadline, "timed out");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_delivers_result_with_sender() {
        let coordinator = SearchCoordinator::new(SearchEngine::with_threads(2).unwrap()).unwrap();
        let (tx, rx) = mpsc::channel();
        coordinator.submit(
            SearchRequest::new(index(), "beta", move |outcome, sender| {
                tx.send((outcome.map(|r| r.len()).unwrap(), sender)).unwrap();
            })
            .with_sender(SenderToken(7)),
        );
        let (count, sender) = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(count, 1);
        assert_eq!(sender, SenderToken(7));
    }

    #[test]
    fn test_state_and_shutdown() {
        let mut coordinator = SearchCoordinator::<MemoryIndex>::new(SearchEngine::with_threads(1).unwrap()).unwrap();
        wait_until(|| coordinator.is_ready());
        assert_eq!(coordinator.state(), CoordinatorState::Idle);
        coordinator.shutdown();
        assert_eq!(coordinator.state(), CoordinatorState::Shutdown);
        assert!(!coordinator.is_ready());
        coordinator.shutdown();
    }

    #[test]
    fn test_submit_after_shutdown_is_dropped() {
        let mut coordinator = SearchCoordinator::new(SearchEngine::with_threads(1).unwrap()).unwrap();
        coordinator.shutdown();
        let (tx, rx) = mpsc::channel::<()>();
        coordinator.submit(SearchRequest::new(index(), "alpha", move |_, _| {
            let _ = tx.send(());
        }));
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
    }

    #[test]
    fn test_callback_panic_keeps_thread_alive() {
        let coordinator = SearchCoordinator::new(SearchEngine::with_threads(1).unwrap()).unwrap();
        coordinator.submit(SearchRequest::new(index(), "alpha", |_, _| panic!("callback failed")));
        let (tx, rx) = mpsc::channel();
        coordinator.submit(SearchRequest::new(index(), "gamma", move |outcome, _| {
            tx.send(outcome.map(|r| r.len()).unwrap()).unwrap();
        }));
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), 1);
    }
}

//! Concurrent search pipeline.
//!
//! - [`coordinator`] - Background search thread, latest request wins
//! - [`engine`] - Prepare and execute one search on the worker pool
//! - [`partition`] - Split the corpus into contiguous id ranges
//! - [`worker`] - Scan one range against a compiled query
//! - [`aggregate`] - Merge partition results in corpus order
//! - [`pool`] - Worker pool abstraction and the rayon implementation
//! - [`request`] / [`result`] - Request options and result sets

pub mod aggregate;
pub mod coordinator;
pub mod engine;
pub mod partition;
pub mod pool;
pub mod request;
pub mod result;
pub mod worker;

pub use coordinator::{CoordinatorState, SearchCoordinator};
pub use engine::{DispatchPlan, Prepared, SearchEngine};
pub use partition::{partition, PartitionRange};
pub use pool::{RayonPool, Task, WorkerPool};
pub use request::{
    CompletionCallback, EntryFilter, SearchOptions, SearchOutcome, SearchRequest, SenderToken,
};
pub use result::{ResultEntry, SearchResult};

pub mod memory;
pub mod types;

pub use memory::{FileNode, MemoryIndex, NodeRef};
pub use types::*;

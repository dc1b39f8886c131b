//! Durable store implementations.

mod filesystem;
mod memory;

pub use filesystem::{FilesystemStore, MAX_FILE_SIZE};
pub use memory::MemoryStore;

//! Adapter implementations of the document ports.

pub mod fs;
pub mod memory;

pub use fs::FsTaskRepository;
pub use memory::InMemoryTaskRepository;

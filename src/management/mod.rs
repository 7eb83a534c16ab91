mod eras;
mod library;
mod memory;
mod tags;

pub use eras::{EraManager, SavedDetection};
pub use library::LibraryManager;
pub use memory::MemoryTagStore;
pub use tags::{TagCacheManager, TagCacheStats};

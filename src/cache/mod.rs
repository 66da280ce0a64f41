// Cache module for persisting the repository list.
// One slot, one key, serialized as JSON.

pub mod paths;
pub mod slot;
pub mod store;

pub use slot::{CACHE_KEY, CacheSlot, EXPIRATION_WINDOW};
pub use store::{FileStore, MemoryStore, SlotStore};

pub mod memory;
pub mod redis;
pub mod store;

pub use memory::MemoryStore;
pub use self::redis::RedisStore;
pub use store::KeyValueStore;
pub use store::Storage;
pub use store::StorageKey;
pub use store::TRENDING_CACHE_PREFIX;

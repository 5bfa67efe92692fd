//! Cache storage backends. Fetched rates live only for the session.

pub mod memory;

pub use memory::MemoryCache;

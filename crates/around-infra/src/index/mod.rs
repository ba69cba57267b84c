//! Content index implementations - in-memory fallback.
//! The PostgreSQL index lives in `crate::database`.

mod memory;

pub use memory::InMemoryContentIndex;

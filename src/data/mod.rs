//! Production storage backends for the journal's key-value boundary.

mod storage;

pub use storage::SqliteStore;

//! # Storage Layer
//!
//! [`RecordStore`] owns the student collection and keeps a file-backed copy
//! current. The raw I/O sits behind the [`StorageBackend`] trait so the same
//! store logic runs against a real file or against memory in tests.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: `RecordStore<FsBackend>`, production storage
//!   - The whole collection lives in one JSON file (`students.json` by default)
//!   - Writes go to a temp file and are renamed over the target
//!
//! - [`memory::InMemoryStore`]: `RecordStore<MemBackend>`, for testing
//!   - No filesystem, can simulate write failures
//!
//! ## Persistence Contract
//!
//! - Every successful `add`, `remove` and `edit` rewrites the whole collection.
//! - A failed write is returned to the caller; the in-memory change stays.
//! - Loading happens once, in [`RecordStore::open`]. A missing file is an
//!   empty store; a corrupt one is logged and also an empty store.
//!
//! ## Storage Format
//!
//! ```text
//! [
//!   { "name": "Alice", "roll": 101, "grade": "A" },
//!   { "name": "Bob",   "roll": 102, "grade": "B" }
//! ]
//! ```

pub mod backend;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;
pub mod record_store;

pub use backend::StorageBackend;
pub use record_store::{LoadStatus, RecordStore};

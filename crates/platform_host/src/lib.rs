//! Storage and clock contracts the game runtime is built on.
//!
//! The runtime talks to persistence only through [`SaveStore`]. This crate ships in-memory and
//! no-op stores; the browser `localStorage` store lives in `desktop_runtime::persistence`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod storage;
pub mod time;

pub use storage::save_slot::{
    write_payload, MemorySaveStore, NoopSaveStore, SaveEnvelope, SaveStore, StoreFuture, SAVE_SLOT,
};
pub use time::unix_time_ms_now;

//! Persisted collections: address book, calculation history and pinned calculations.
//!
//! Each store owns one [`StorageBackend`] and never caches between calls. Every mutation
//! runs under the backend lock and is written atomically.

pub mod addresses;
pub mod backend;
pub mod document;
pub mod history;
pub mod outcome;
pub mod pinned;
pub mod records;

pub use addresses::{AddressBook, AddressEntry, AddressRecord, AddressRepository, Role};
pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use history::{HistoryStore, HISTORY_LIMIT};
pub use outcome::Outcome;
pub use pinned::{PinnedStore, PINNED_LIMIT};
pub use records::{CalculationRecord, HistoryEntry, PinnedEntry};

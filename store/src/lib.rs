// Store library root: storage backends, the record store over them, settings
// and CSV export.

pub mod config;
pub mod error;
pub mod export;
pub mod record_store;
pub mod storage;

pub use error::StoreError;
pub use record_store::{Clock, RecordStore, SystemClock, BILLS_KEY, CATEGORIES_KEY};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};

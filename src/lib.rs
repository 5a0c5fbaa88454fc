//! Per-user persisted state for a UI layer.
//! - `identity` scopes every stored entry under the user's personal number.
//! - `store` abstracts the async key-value collaborator.
//! - `cell` pairs an in-memory reactive value with write-through persistence.

pub mod cell;
pub mod errors;
pub mod identity;
pub mod store;

pub use cell::PersonalCell;
pub use errors::StorageError;
pub use identity::{Identity, PersonalNumber};
pub use store::{json_file::JsonFileStore, memory::MemoryStore, KeyValueStore};

//! Storage backends for to-do items.
//!
//! Both backends implement [`ItemRepository`] from `tickler_core`:
//! [`InMemoryRepository`] for tests and throwaway deployments, and
//! [`MySqlRepository`] for durable storage.

pub mod memory;
pub mod mysql;

pub use memory::InMemoryRepository;
pub use mysql::MySqlRepository;
pub use tickler_core::error::StorageError;
pub use tickler_core::repository::{ItemRepository, ReadRepository};

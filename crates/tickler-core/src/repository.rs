use crate::error::StorageError;
use crate::item::{ItemId, ToDoItem};
use async_trait::async_trait;
use jiff::Timestamp;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A read-only view of an item store.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the item with the given id.
    /// Returns `None` if it does not exist.
    async fn get(&self, id: &ItemId) -> Result<Option<ToDoItem>>;

    /// Returns every stored item, in no particular order.
    async fn get_all(&self) -> Result<Vec<ToDoItem>>;

    /// Checks whether an item with the given id is stored.
    async fn exists(&self, id: &ItemId) -> Result<bool>;

    /// Returns the items with `start <= expiration_date < end`,
    /// ordered by expiration date ascending.
    async fn get_by_expiration_range(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<ToDoItem>>;

    /// Verifies that the backing store is reachable.
    async fn ping(&self) -> Result<()>;
}

#[async_trait]
pub trait ItemRepository: ReadRepository {
    /// Inserts a new item. Returns `Err(Conflict)` if the id is already taken.
    async fn insert(&self, item: ToDoItem) -> Result<ItemId>;

    /// Replaces the stored item that has the same id.
    /// Returns `false` if no such item exists.
    async fn update(&self, item: ToDoItem) -> Result<bool>;

    /// Deletes the item with the given id.
    /// Returns `true` if the item existed and was removed.
    async fn delete(&self, id: &ItemId) -> Result<bool>;
}
